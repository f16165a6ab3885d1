//! Rectangular selection buffers.
//!
//! A [`SelectionBuffer`] remembers which flat indices of one container a
//! rectangle covered. It is consumed by exactly one of
//! [`apply`](SelectionBuffer::apply), [`apply_glyph`](SelectionBuffer::apply_glyph),
//! [`apply_color`](SelectionBuffer::apply_color) or
//! [`paste`](SelectionBuffer::paste); the buffer has no `Clone`, so a
//! second use does not compile.

use glyphmap_arena::{AccessError, AllocSite, AllocationError, World};
use glyphmap_core::{Container, GridCell, Level, Position, Tile};
use glyphmap_space::{flatten2, flatten3, GridExtent, SpaceError};

use crate::error::EditError;

/// One attribute written to every tile of a selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MassEdit {
    /// Overwrite the glyph.
    Glyph(u16),
    /// Overwrite the foreground colour index.
    Foreground(u8),
    /// Overwrite the background colour index.
    Background(u8),
}

impl MassEdit {
    /// Colour edit for the given channel.
    pub const fn color(color: u8, is_foreground: bool) -> Self {
        if is_foreground {
            Self::Foreground(color)
        } else {
            Self::Background(color)
        }
    }

    /// Write this attribute into `tile`.
    pub fn apply_to(self, tile: &mut Tile) {
        match self {
            Self::Glyph(glyph) => tile.glyph = glyph,
            Self::Foreground(fg) => tile.fg = fg,
            Self::Background(bg) => tile.bg = bg,
        }
    }
}

/// Flat index of `cell` in a grid of `extent` at `level`.
///
/// Local cells live on plane `z`; `cell` must lie inside `extent`.
pub(crate) fn cell_index(level: Level, cell: GridCell, z: u8, extent: GridExtent) -> usize {
    let (x, y) = (cell.col as usize, cell.row as usize);
    match level {
        Level::Local => flatten3(
            x,
            y,
            z as usize,
            extent.width as usize,
            extent.height as usize,
        ),
        _ => flatten2(x, y, extent.height as usize),
    }
}

/// The flat indices covered by a rectangle of one container.
///
/// Indices are stored column by column (`x` outer, `y` inner), starting
/// at the rectangle's lowest column and row.
#[derive(Debug, PartialEq, Eq)]
pub struct SelectionBuffer {
    level: Level,
    container: Container,
    z: u8,
    width: u16,
    height: u16,
    indices: Vec<usize>,
}

impl SelectionBuffer {
    /// Capture the rectangle with opposite corners `a` and `b`.
    ///
    /// The rectangle lives on `a`'s level and in `a`'s container, using
    /// each corner's `grid` cell. Local captures take the single plane
    /// `a.local_z`. The corners may be given in either order.
    pub fn capture(world: &World, a: &Position, b: &Position) -> Result<Self, EditError> {
        if a.level != b.level {
            return Err(EditError::LevelMismatch {
                expected: a.level,
                found: b.level,
            });
        }
        let level = a.level;
        let container = a.container();
        world.len_of(container)?;
        let extent = GridExtent::of(world.dims(), level);
        extent.check(a.grid)?;
        extent.check(b.grid)?;
        let z_height = world.dims().z_height;
        if level == Level::Local && a.local_z >= z_height {
            return Err(SpaceError::PlaneOutOfBounds {
                z: a.local_z,
                z_height,
            }
            .into());
        }

        let (x0, x1) = (a.grid.col.min(b.grid.col), a.grid.col.max(b.grid.col));
        let (y0, y1) = (a.grid.row.min(b.grid.row), a.grid.row.max(b.grid.row));
        let width = x1 - x0 + 1;
        let height = y1 - y0 + 1;
        let count = width as usize * height as usize;

        let mut indices = Vec::new();
        indices
            .try_reserve_exact(count)
            .map_err(|_| AllocationError {
                site: AllocSite::new(level, a.active_index()),
                requested: count,
            })?;
        for x in x0..=x1 {
            for y in y0..=y1 {
                indices.push(cell_index(level, GridCell::new(x, y), a.local_z, extent));
            }
        }
        log::debug!("captured {width}x{height} at {level} {container}");
        Ok(Self {
            level,
            container,
            z: a.local_z,
            width,
            height,
            indices,
        })
    }

    /// Level the tiles were captured from.
    pub fn level(&self) -> Level {
        self.level
    }

    /// Container the tiles were captured from.
    pub fn container(&self) -> Container {
        self.container
    }

    /// Plane of a local capture.
    pub fn z(&self) -> u8 {
        self.z
    }

    /// Columns covered.
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Rows covered.
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Number of captured indices.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Whether nothing was captured.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Captured flat indices, in capture order.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Write `edit` into every captured index of `dest`'s container.
    ///
    /// Every index is checked before any tile changes. Returns the
    /// number of tiles written.
    pub fn apply(
        self,
        world: &mut World,
        dest: &Position,
        edit: MassEdit,
    ) -> Result<usize, EditError> {
        let container = dest.container();
        let len = world.len_of(container)?;
        if let Some(&index) = self.indices.iter().find(|&&i| i >= len) {
            log::warn!("discarding selection: index {index} outside {container} (len {len})");
            return Err(AccessError::IndexOutOfRange {
                level: dest.level,
                index,
                len,
            }
            .into());
        }
        for &index in &self.indices {
            edit.apply_to(world.tile_at_mut(container, index)?);
        }
        log::debug!("applied {edit:?} to {} tiles of {container}", self.indices.len());
        Ok(self.indices.len())
    }

    /// [`apply`](Self::apply) a glyph.
    pub fn apply_glyph(
        self,
        world: &mut World,
        dest: &Position,
        glyph: u16,
    ) -> Result<usize, EditError> {
        self.apply(world, dest, MassEdit::Glyph(glyph))
    }

    /// [`apply`](Self::apply) a foreground or background colour.
    pub fn apply_color(
        self,
        world: &mut World,
        dest: &Position,
        color: u8,
        is_foreground: bool,
    ) -> Result<usize, EditError> {
        self.apply(world, dest, MassEdit::color(color, is_foreground))
    }

    /// Copy the captured tiles' appearance onto the rectangle anchored
    /// at `dest.grid`.
    ///
    /// The destination may be any level. It is walked in capture order;
    /// cells falling outside the destination grid are skipped, and the
    /// walk ends after the last captured tile. Returns the number of
    /// tiles written.
    pub fn paste(self, world: &mut World, dest: &Position) -> Result<usize, EditError> {
        let mut tiles: Vec<Tile> = Vec::new();
        tiles
            .try_reserve_exact(self.indices.len())
            .map_err(|_| AllocationError {
                site: AllocSite::new(self.level, 0),
                requested: self.indices.len(),
            })?;
        for &index in &self.indices {
            tiles.push(*world.tile_at(self.container, index)?);
        }

        let container = dest.container();
        world.len_of(container)?;
        let extent = GridExtent::of(world.dims(), dest.level);
        let height = self.height.max(1) as usize;
        let mut written = 0;
        for (k, tile) in tiles.iter().enumerate() {
            let (dx, dy) = ((k / height) as u16, (k % height) as u16);
            let col = dest.grid.col.checked_add(dx);
            let row = dest.grid.row.checked_add(dy);
            let (Some(col), Some(row)) = (col, row) else {
                continue;
            };
            let cell = GridCell::new(col, row);
            if !extent.contains(cell) {
                continue;
            }
            let index = cell_index(dest.level, cell, dest.local_z, extent);
            world.tile_at_mut(container, index)?.copy_appearance_from(tile);
            written += 1;
        }
        log::debug!(
            "pasted {written} of {} tiles from {} {} to {} {container}",
            tiles.len(),
            self.level,
            self.container,
            dest.level
        );
        Ok(written)
    }
}
