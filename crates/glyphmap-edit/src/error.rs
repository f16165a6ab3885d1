//! Editing and configuration error types.

use std::error::Error;
use std::fmt;

use glyphmap_arena::{AccessError, AllocationError, ArenaError};
use glyphmap_core::Level;
use glyphmap_save::StoreError;
use glyphmap_space::SpaceError;

/// Errors returned by selection operations and the editing session.
#[derive(Debug)]
pub enum EditError {
    /// The session has no world open.
    NoWorld,
    /// A buffer or array could not be allocated.
    Allocation(AllocationError),
    /// A corner or cell lies outside its grid.
    Space(SpaceError),
    /// An index or container of the world could not be reached.
    Access(AccessError),
    /// Two positions that must share a level do not.
    LevelMismatch {
        /// Level of the first position.
        expected: Level,
        /// Level of the second position.
        found: Level,
    },
    /// The operation needs a captured buffer and none is pending.
    NoPendingBuffer,
    /// Saving or loading failed.
    Store(StoreError),
}

impl fmt::Display for EditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoWorld => write!(f, "no world is open"),
            Self::Allocation(e) => write!(f, "allocation failed: {e}"),
            Self::Space(e) => write!(f, "{e}"),
            Self::Access(e) => write!(f, "{e}"),
            Self::LevelMismatch { expected, found } => {
                write!(f, "level mismatch: expected {expected}, found {found}")
            }
            Self::NoPendingBuffer => write!(f, "no selection buffer is pending"),
            Self::Store(e) => write!(f, "store error: {e}"),
        }
    }
}

impl Error for EditError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Allocation(e) => Some(e),
            Self::Space(e) => Some(e),
            Self::Access(e) => Some(e),
            Self::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<AllocationError> for EditError {
    fn from(e: AllocationError) -> Self {
        Self::Allocation(e)
    }
}

impl From<SpaceError> for EditError {
    fn from(e: SpaceError) -> Self {
        Self::Space(e)
    }
}

impl From<AccessError> for EditError {
    fn from(e: AccessError) -> Self {
        Self::Access(e)
    }
}

impl From<ArenaError> for EditError {
    fn from(e: ArenaError) -> Self {
        match e {
            ArenaError::Allocation(e) => Self::Allocation(e),
            ArenaError::Access(e) => Self::Access(e),
        }
    }
}

impl From<StoreError> for EditError {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}

/// Errors detected while validating an [`EditorConfig`](crate::EditorConfig).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The map layout cannot map pixels to cells.
    Layout(SpaceError),
    /// No save directory was configured.
    EmptySaveRoot,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Layout(e) => write!(f, "invalid map layout: {e}"),
            Self::EmptySaveRoot => write!(f, "save_root must not be empty"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Layout(e) => Some(e),
            Self::EmptySaveRoot => None,
        }
    }
}
