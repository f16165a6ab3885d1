//! Allocation and access error types.

use std::error::Error;
use std::fmt;

use glyphmap_core::{Container, Level};

use crate::source::AllocSite;

/// A request for one array could not be satisfied.
///
/// Always fatal to the enclosing call; by the time the caller sees this
/// error every array acquired by that call has been released.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AllocationError {
    /// Which array failed.
    pub site: AllocSite,
    /// Number of elements requested.
    pub requested: usize,
}

impl fmt::Display for AllocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "failed to allocate {} array #{} ({} elements)",
            self.site.level, self.site.ordinal, self.requested
        )
    }
}

impl Error for AllocationError {}

/// Errors from addressing cells of a [`World`](crate::World).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AccessError {
    /// An index is past the end of the array it addresses.
    IndexOutOfRange {
        /// Level of the array.
        level: Level,
        /// The offending index.
        index: usize,
        /// Length of the array.
        len: usize,
    },
    /// The container's arrays have not been allocated or loaded yet.
    NotMaterialized {
        /// The container that was addressed.
        container: Container,
    },
}

impl fmt::Display for AccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexOutOfRange { level, index, len } => {
                write!(f, "{level} index {index} out of range (len {len})")
            }
            Self::NotMaterialized { container } => {
                write!(f, "container {container} is not materialized")
            }
        }
    }
}

impl Error for AccessError {}

/// Errors from allocator operations that address an existing world.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArenaError {
    /// An array could not be acquired.
    Allocation(AllocationError),
    /// The addressed cell does not exist or is not ready.
    Access(AccessError),
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Allocation(e) => write!(f, "allocation failed: {e}"),
            Self::Access(e) => write!(f, "access failed: {e}"),
        }
    }
}

impl Error for ArenaError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Allocation(e) => Some(e),
            Self::Access(e) => Some(e),
        }
    }
}

impl From<AllocationError> for ArenaError {
    fn from(e: AllocationError) -> Self {
        Self::Allocation(e)
    }
}

impl From<AccessError> for ArenaError {
    fn from(e: AccessError) -> Self {
        Self::Access(e)
    }
}
