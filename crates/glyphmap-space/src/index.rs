//! Pure flat-index transforms.
//!
//! These are unchecked arithmetic: callers guarantee `row < height` for
//! the 2D pair and `row < width`, `col < height` for the 3D pair.
//! [`GridExtent`](crate::GridExtent) provides the checked forms.

/// Flatten a 2D grid cell: `col * height + row`.
pub const fn flatten2(col: usize, row: usize, height: usize) -> usize {
    col * height + row
}

/// Recover `(col, row)` from a [`flatten2`] index.
///
/// `height` must be non-zero.
pub const fn unflatten2(index: usize, height: usize) -> (usize, usize) {
    (index / height, index % height)
}

/// Flatten a local cell: `z * (width * height) + row * height + col`.
pub const fn flatten3(row: usize, col: usize, z: usize, width: usize, height: usize) -> usize {
    z * (width * height) + row * height + col
}

/// Recover `(row, col, z)` from a [`flatten3`] index.
///
/// `width` and `height` must be non-zero.
pub const fn unflatten3(index: usize, width: usize, height: usize) -> (usize, usize, usize) {
    let plane = width * height;
    let z = index / plane;
    let rem = index % plane;
    (rem / height, rem % height, z)
}
