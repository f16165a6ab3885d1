//! Bounds-checked 2D grid extents.

use glyphmap_core::{Dimensions, GridCell, Level};

use crate::error::SpaceError;
use crate::index::{flatten2, unflatten2};

/// Columns and rows of one 2D grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct GridExtent {
    /// Number of columns.
    pub width: u16,
    /// Number of rows.
    pub height: u16,
}

impl GridExtent {
    /// Create an extent.
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// The grid addressed at `level` (one z-plane for `Local`).
    pub fn of(dims: &Dimensions, level: Level) -> Self {
        let (w, h) = dims.extent(level);
        Self::new(w as u16, h as u16)
    }

    /// Number of cells.
    pub const fn len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Whether the extent has no cells.
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `cell` lies inside the extent.
    pub const fn contains(&self, cell: GridCell) -> bool {
        cell.col < self.width && cell.row < self.height
    }

    /// Check `cell` against the extent.
    pub fn check(&self, cell: GridCell) -> Result<GridCell, SpaceError> {
        if self.contains(cell) {
            Ok(cell)
        } else {
            Err(SpaceError::CellOutOfBounds {
                cell,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Flat index of `cell`, via [`flatten2`].
    pub fn index_of(&self, cell: GridCell) -> Result<usize, SpaceError> {
        let cell = self.check(cell)?;
        Ok(flatten2(
            cell.col as usize,
            cell.row as usize,
            self.height as usize,
        ))
    }

    /// Grid cell of a flat index, via [`unflatten2`].
    pub fn cell_of(&self, index: usize) -> Result<GridCell, SpaceError> {
        if index >= self.len() {
            return Err(SpaceError::IndexOutOfBounds {
                index,
                len: self.len(),
            });
        }
        let (col, row) = unflatten2(index, self.height as usize);
        Ok(GridCell::new(col as u16, row as u16))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_of_rejects_outside_cells() {
        let e = GridExtent::new(3, 2);
        assert_eq!(e.index_of(GridCell::new(2, 1)), Ok(5));
        assert!(matches!(
            e.index_of(GridCell::new(3, 0)),
            Err(SpaceError::CellOutOfBounds { .. })
        ));
        assert!(matches!(
            e.index_of(GridCell::new(0, 2)),
            Err(SpaceError::CellOutOfBounds { .. })
        ));
    }

    #[test]
    fn cell_of_inverts_index_of() {
        let e = GridExtent::new(4, 5);
        for i in 0..e.len() {
            let cell = e.cell_of(i).unwrap();
            assert_eq!(e.index_of(cell).unwrap(), i);
        }
        assert!(matches!(
            e.cell_of(20),
            Err(SpaceError::IndexOutOfBounds { index: 20, len: 20 })
        ));
    }

    #[test]
    fn empty_extent_contains_nothing() {
        let e = GridExtent::new(0, 4);
        assert!(e.is_empty());
        assert!(!e.contains(GridCell::new(0, 0)));
        assert!(e.cell_of(0).is_err());
    }

    #[test]
    fn of_reads_level_extent() {
        let dims = Dimensions::new(2, 3, 4, 5, 6, 7, 8, 9, 10);
        assert_eq!(GridExtent::of(&dims, Level::World), GridExtent::new(2, 3));
        assert_eq!(GridExtent::of(&dims, Level::Region), GridExtent::new(6, 7));
        assert_eq!(GridExtent::of(&dims, Level::Local), GridExtent::new(8, 9));
    }
}
