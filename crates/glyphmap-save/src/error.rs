//! Error types for world persistence.

use std::fmt;
use std::io;

use glyphmap_arena::{AccessError, AllocationError};
use glyphmap_core::{Container, Dimensions};

/// Errors that can occur while saving or loading world files.
#[derive(Debug)]
pub enum StoreError {
    /// An I/O error occurred during read or write.
    Io(io::Error),
    /// The file does not start with the expected `b"CAFEBABE"` magic.
    BadMagic {
        /// The eight bytes found instead.
        found: [u8; 8],
    },
    /// The format version is newer than this build understands.
    UnsupportedVersion {
        /// The version found in the file.
        found: u16,
    },
    /// An array could not be allocated while loading.
    Allocation(AllocationError),
    /// A region file was written for a world of different extents.
    DimensionMismatch {
        /// Extents of the world being loaded into.
        expected: Dimensions,
        /// Extents recorded in the file.
        found: Dimensions,
    },
    /// A tile record could not be decoded.
    MalformedTile {
        /// Human-readable description of what went wrong.
        detail: String,
    },
    /// A world cell index is past the end of the world array.
    WorldIndexOutOfRange {
        /// The offending index.
        index: usize,
        /// Number of world cells.
        len: usize,
    },
    /// The arrays a region file covers have not been materialized.
    NotMaterialized {
        /// The first container found missing.
        container: Container,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::BadMagic { found } => write!(
                f,
                "invalid magic bytes {found:02x?} (expected b\"CAFEBABE\")"
            ),
            Self::UnsupportedVersion { found } => {
                write!(f, "unsupported format version {found}")
            }
            Self::Allocation(e) => write!(f, "allocation failed during load: {e}"),
            Self::DimensionMismatch { expected, found } => {
                write!(f, "dimension mismatch: world is {expected}, file is {found}")
            }
            Self::MalformedTile { detail } => write!(f, "malformed tile: {detail}"),
            Self::WorldIndexOutOfRange { index, len } => {
                write!(f, "world index {index} out of range (len {len})")
            }
            Self::NotMaterialized { container } => {
                write!(f, "container {container} is not materialized")
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Allocation(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for StoreError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<AllocationError> for StoreError {
    fn from(e: AllocationError) -> Self {
        Self::Allocation(e)
    }
}

impl From<AccessError> for StoreError {
    fn from(e: AccessError) -> Self {
        match e {
            AccessError::IndexOutOfRange { index, len, .. } => {
                Self::WorldIndexOutOfRange { index, len }
            }
            AccessError::NotMaterialized { container } => Self::NotMaterialized { container },
        }
    }
}
