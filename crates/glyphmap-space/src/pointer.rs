//! Pointer-to-cell mapping and the inverse cell-to-pixel layout.

use glyphmap_core::{Dimensions, GridCell, Level, Position};

use crate::error::SpaceError;
use crate::extent::GridExtent;
use crate::index::{flatten2, flatten3};

/// Where a grid is drawn on screen.
///
/// When `centered` is set, `(origin_x, origin_y)` is the centre of the
/// grid; otherwise it is the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridLayout {
    /// Horizontal anchor in pixels.
    pub origin_x: i32,
    /// Vertical anchor in pixels.
    pub origin_y: i32,
    /// Width of one cell in pixels. Must be positive.
    pub cell_width: i32,
    /// Height of one cell in pixels. Must be positive.
    pub cell_height: i32,
    /// Whether the origin is the grid centre.
    pub centered: bool,
}

impl GridLayout {
    /// Default cell size of the map view.
    pub const DEFAULT_CELL_SIZE: i32 = 32;

    /// A grid centred on `(origin_x, origin_y)` with square cells.
    pub const fn centered(origin_x: i32, origin_y: i32, cell_size: i32) -> Self {
        Self {
            origin_x,
            origin_y,
            cell_width: cell_size,
            cell_height: cell_size,
            centered: true,
        }
    }

    /// Check that the layout can map pixels.
    pub fn validate(&self) -> Result<(), SpaceError> {
        if self.cell_width <= 0 || self.cell_height <= 0 {
            return Err(SpaceError::InvalidLayout {
                reason: format!(
                    "cell size must be positive, got {}x{}",
                    self.cell_width, self.cell_height
                ),
            });
        }
        Ok(())
    }

    /// Top-left pixel of a grid of `extent` under this layout.
    pub fn edge(&self, extent: GridExtent) -> (i64, i64) {
        let (x, y) = (self.origin_x as i64, self.origin_y as i64);
        if self.centered {
            (
                x - (extent.width as i64 * self.cell_width as i64) / 2,
                y - (extent.height as i64 * self.cell_height as i64) / 2,
            )
        } else {
            (x, y)
        }
    }
}

impl Default for GridLayout {
    fn default() -> Self {
        // Centre of a 1280x720 window.
        Self::centered(640, 360, Self::DEFAULT_CELL_SIZE)
    }
}

/// Screen rectangle of one cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PixelRect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width.
    pub w: i32,
    /// Height.
    pub h: i32,
}

/// The grid cell under `pointer`, if the pointer lies strictly inside
/// the grid's pixel bounds.
pub fn pixel_to_grid_cell(
    pointer: (i32, i32),
    extent: GridExtent,
    layout: &GridLayout,
) -> Option<GridCell> {
    if layout.cell_width <= 0 || layout.cell_height <= 0 || extent.is_empty() {
        return None;
    }
    let (edge_x, edge_y) = layout.edge(extent);
    let total_w = extent.width as i64 * layout.cell_width as i64;
    let total_h = extent.height as i64 * layout.cell_height as i64;
    let (px, py) = (pointer.0 as i64, pointer.1 as i64);

    let inside = px > edge_x && px < edge_x + total_w && py > edge_y && py < edge_y + total_h;
    if !inside {
        return None;
    }
    let col = (px - edge_x) / layout.cell_width as i64;
    let row = (py - edge_y) / layout.cell_height as i64;
    Some(GridCell::new(col as u16, row as u16))
}

/// Sticky form of [`pixel_to_grid_cell`].
///
/// Writes the cell under `pointer` into `cell` and returns `true`, or
/// returns `false` leaving `cell` exactly as it was.
pub fn probe_grid_cell(
    pointer: (i32, i32),
    extent: GridExtent,
    layout: &GridLayout,
    cell: &mut GridCell,
) -> bool {
    match pixel_to_grid_cell(pointer, extent, layout) {
        Some(hit) => {
            *cell = hit;
            true
        }
        None => false,
    }
}

/// Screen rectangle of `cell` in a grid of `extent`.
pub fn cell_rect(cell: GridCell, extent: GridExtent, layout: &GridLayout) -> PixelRect {
    let (edge_x, edge_y) = layout.edge(extent);
    PixelRect {
        x: (edge_x + cell.col as i64 * layout.cell_width as i64) as i32,
        y: (edge_y + cell.row as i64 * layout.cell_height as i64) as i32,
        w: layout.cell_width,
        h: layout.cell_height,
    }
}

/// Re-aim `position` at the cell under `pointer` on its active level.
///
/// Only when the pointer hits a cell are `grid` and the active level's
/// flat index rewritten; every other index is carried over unchanged.
/// Local indices use the position's current z-plane.
pub fn update_position(
    dims: &Dimensions,
    position: &Position,
    pointer: (i32, i32),
    layout: &GridLayout,
) -> Position {
    let extent = GridExtent::of(dims, position.level);
    let mut next = *position;
    if probe_grid_cell(pointer, extent, layout, &mut next.grid) {
        let (col, row) = (next.grid.col as usize, next.grid.row as usize);
        let index = match position.level {
            Level::Local => flatten3(
                col,
                row,
                position.local_z as usize,
                extent.width as usize,
                extent.height as usize,
            ),
            _ => flatten2(col, row, extent.height as usize),
        };
        next.set_active_index(index);
        log::trace!("pointer {pointer:?} -> {} cell {} ({next})", next.level, next.grid);
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn corner_layout() -> GridLayout {
        GridLayout {
            origin_x: 100,
            origin_y: 50,
            cell_width: 10,
            cell_height: 20,
            centered: false,
        }
    }

    #[test]
    fn maps_pixel_to_cell() {
        let extent = GridExtent::new(4, 3);
        let layout = corner_layout();
        assert_eq!(
            pixel_to_grid_cell((101, 51), extent, &layout),
            Some(GridCell::new(0, 0))
        );
        assert_eq!(
            pixel_to_grid_cell((125, 95), extent, &layout),
            Some(GridCell::new(2, 2))
        );
        assert_eq!(
            pixel_to_grid_cell((139, 109), extent, &layout),
            Some(GridCell::new(3, 2))
        );
    }

    #[test]
    fn edges_are_outside() {
        let extent = GridExtent::new(4, 3);
        let layout = corner_layout();
        assert_eq!(pixel_to_grid_cell((100, 60), extent, &layout), None);
        assert_eq!(pixel_to_grid_cell((140, 60), extent, &layout), None);
        assert_eq!(pixel_to_grid_cell((120, 50), extent, &layout), None);
        assert_eq!(pixel_to_grid_cell((120, 110), extent, &layout), None);
    }

    #[test]
    fn centered_layout_subtracts_half_extent() {
        let extent = GridExtent::new(4, 4);
        let layout = GridLayout::centered(100, 100, 10);
        // Grid spans (80, 80) .. (120, 120).
        assert_eq!(layout.edge(extent), (80, 80));
        assert_eq!(
            pixel_to_grid_cell((81, 119), extent, &layout),
            Some(GridCell::new(0, 3))
        );
        assert_eq!(pixel_to_grid_cell((79, 100), extent, &layout), None);
    }

    #[test]
    fn probe_outside_keeps_previous_cell() {
        let extent = GridExtent::new(4, 4);
        let layout = corner_layout();
        let mut cell = GridCell::default();
        assert!(probe_grid_cell((115, 95), extent, &layout, &mut cell));
        assert_eq!(cell, GridCell::new(1, 2));
        // One pixel past the right edge.
        assert!(!probe_grid_cell((141, 95), extent, &layout, &mut cell));
        assert_eq!(cell, GridCell::new(1, 2));
    }

    #[test]
    fn probe_outside_keeps_arbitrary_prior_output() {
        let extent = GridExtent::new(2, 2);
        let layout = corner_layout();
        let mut cell = GridCell::new(3, 4);
        assert!(!probe_grid_cell((0, 0), extent, &layout, &mut cell));
        assert_eq!(cell, GridCell::new(3, 4));
    }

    #[test]
    fn zero_cell_size_never_hits() {
        let layout = GridLayout {
            cell_width: 0,
            ..corner_layout()
        };
        assert!(layout.validate().is_err());
        assert_eq!(
            pixel_to_grid_cell((120, 60), GridExtent::new(4, 4), &layout),
            None
        );
        assert!(corner_layout().validate().is_ok());
    }

    #[test]
    fn cell_rect_is_inverse_of_mapping() {
        let extent = GridExtent::new(5, 3);
        let layout = GridLayout::centered(320, 240, 16);
        for i in 0..extent.len() {
            let cell = extent.cell_of(i).unwrap();
            let r = cell_rect(cell, extent, &layout);
            let centre = (r.x + r.w / 2, r.y + r.h / 2);
            assert_eq!(pixel_to_grid_cell(centre, extent, &layout), Some(cell));
        }
    }

    #[test]
    fn update_position_writes_only_active_index() {
        let dims = Dimensions::new(4, 4, 3, 3, 5, 5, 6, 6, 2);
        let layout = corner_layout();
        let start = Position {
            level: Level::Region,
            world_index: 7,
            realm_index: 2,
            region_index: 0,
            local_index: 11,
            ..Position::origin()
        };
        let next = update_position(&dims, &start, (135, 75), &layout);
        assert_eq!(next.grid, GridCell::new(3, 1));
        assert_eq!(next.region_index, flatten2(3, 1, 5));
        assert_eq!(
            (next.world_index, next.realm_index, next.local_index),
            (7, 2, 11)
        );
    }

    #[test]
    fn update_position_local_uses_z_plane() {
        let dims = Dimensions::new(1, 1, 1, 1, 1, 1, 4, 3, 5);
        let layout = corner_layout();
        let start = Position {
            level: Level::Local,
            local_z: 2,
            ..Position::origin()
        };
        let next = update_position(&dims, &start, (125, 75), &layout);
        assert_eq!(next.grid, GridCell::new(2, 1));
        assert_eq!(next.local_index, flatten3(2, 1, 2, 4, 3));
    }

    #[test]
    fn update_position_outside_is_identity() {
        let dims = Dimensions::uniform(4, 4, 1);
        let mut start = Position::origin();
        start.world_index = 6;
        start.grid = GridCell::new(1, 2);
        let next = update_position(&dims, &start, (0, 0), &corner_layout());
        assert_eq!(next, start);
    }

    proptest! {
        #[test]
        fn outside_probes_are_sticky(
            px in -500i32..500,
            py in -500i32..500,
            col in 0u16..8,
            row in 0u16..8,
        ) {
            let extent = GridExtent::new(4, 3);
            let layout = corner_layout();
            let mut cell = GridCell::new(col, row);
            let before = cell;
            let hit = probe_grid_cell((px, py), extent, &layout, &mut cell);
            if hit {
                prop_assert!(extent.contains(cell));
            } else {
                prop_assert_eq!(cell, before);
            }
        }
    }
}
