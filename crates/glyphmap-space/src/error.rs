//! Error types for grid indexing.

use glyphmap_core::GridCell;
use std::fmt;

/// Errors arising from bounds-checked index conversions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SpaceError {
    /// A grid cell lies outside the extent it was checked against.
    CellOutOfBounds {
        /// The offending cell.
        cell: GridCell,
        /// Columns of the extent.
        width: u16,
        /// Rows of the extent.
        height: u16,
    },
    /// A flat index is past the end of the array it addresses.
    IndexOutOfBounds {
        /// The offending index.
        index: usize,
        /// Length of the array.
        len: usize,
    },
    /// A z-plane is above the top of the local volume.
    PlaneOutOfBounds {
        /// The offending plane.
        z: u8,
        /// Number of planes.
        z_height: u8,
    },
    /// A grid layout cannot map pixels (non-positive cell size).
    InvalidLayout {
        /// What went wrong.
        reason: String,
    },
}

impl fmt::Display for SpaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CellOutOfBounds {
                cell,
                width,
                height,
            } => {
                write!(f, "cell {cell} out of bounds: [0, {width}) x [0, {height})")
            }
            Self::IndexOutOfBounds { index, len } => {
                write!(f, "index {index} out of bounds for length {len}")
            }
            Self::PlaneOutOfBounds { z, z_height } => {
                write!(f, "plane {z} out of bounds for {z_height} planes")
            }
            Self::InvalidLayout { reason } => write!(f, "invalid grid layout: {reason}"),
        }
    }
}

impl std::error::Error for SpaceError {}
