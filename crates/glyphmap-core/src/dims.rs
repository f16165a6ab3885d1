//! The extents record shared by every level of a world.

use std::fmt;

use crate::level::Level;

/// Every extent of a world, fixed when the world is allocated or loaded.
///
/// Each extent fits one byte, matching the file header. Zero extents are
/// legal and describe a degenerate (empty) level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Dimensions {
    /// Columns of the top-level world grid.
    pub world_width: u8,
    /// Rows of the top-level world grid.
    pub world_height: u8,
    /// Columns of each realm array.
    pub realm_width: u8,
    /// Rows of each realm array.
    pub realm_height: u8,
    /// Columns of each region array.
    pub region_width: u8,
    /// Rows of each region array.
    pub region_height: u8,
    /// Columns of each local tile plane.
    pub local_width: u8,
    /// Rows of each local tile plane.
    pub local_height: u8,
    /// Number of vertical planes in each local volume.
    pub z_height: u8,
}

/// Named size presets offered by the world creation menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SizePreset {
    /// 8×8 grids, 16×16 locals, 10 planes.
    Small,
    /// 12×12 grids, 24×24 locals, 50 planes.
    Medium,
    /// 16×16 grids, 48×48 locals, 128 planes.
    Large,
}

impl Dimensions {
    /// Create a dimensions record from the nine extents.
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        world_width: u8,
        world_height: u8,
        realm_width: u8,
        realm_height: u8,
        region_width: u8,
        region_height: u8,
        local_width: u8,
        local_height: u8,
        z_height: u8,
    ) -> Self {
        Self {
            world_width,
            world_height,
            realm_width,
            realm_height,
            region_width,
            region_height,
            local_width,
            local_height,
            z_height,
        }
    }

    /// Uniform dimensions: square grids of `grid` at the world, realm and
    /// region levels and square local planes of `local`.
    pub const fn uniform(grid: u8, local: u8, z_height: u8) -> Self {
        Self::new(grid, grid, grid, grid, grid, grid, local, local, z_height)
    }

    /// Dimensions for one of the creation-menu presets.
    pub const fn preset(preset: SizePreset) -> Self {
        match preset {
            SizePreset::Small => Self::uniform(8, 16, 10),
            SizePreset::Medium => Self::uniform(12, 24, 50),
            SizePreset::Large => Self::uniform(16, 48, 128),
        }
    }

    /// Columns and rows of the grid addressed at `level`.
    ///
    /// For [`Level::Local`] this is one z-plane.
    pub const fn extent(&self, level: Level) -> (usize, usize) {
        let (w, h) = match level {
            Level::World => (self.world_width, self.world_height),
            Level::Realm => (self.realm_width, self.realm_height),
            Level::Region => (self.region_width, self.region_height),
            Level::Local => (self.local_width, self.local_height),
        };
        (w as usize, h as usize)
    }

    /// Number of elements in one array at `level`.
    ///
    /// Local arrays include every z-plane.
    pub const fn array_len(&self, level: Level) -> usize {
        let (w, h) = self.extent(level);
        match level {
            Level::Local => w * h * self.z_height as usize,
            _ => w * h,
        }
    }

    /// Number of world cells.
    pub const fn world_cells(&self) -> usize {
        self.array_len(Level::World)
    }

    /// Number of tiles in one z-plane of a local volume.
    pub const fn local_plane(&self) -> usize {
        self.local_width as usize * self.local_height as usize
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "world {}x{}, realm {}x{}, region {}x{}, local {}x{}x{}",
            self.world_width,
            self.world_height,
            self.realm_width,
            self.realm_height,
            self.region_width,
            self.region_height,
            self.local_width,
            self.local_height,
            self.z_height
        )
    }
}
