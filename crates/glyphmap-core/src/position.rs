//! Addressed positions within a world.

use std::fmt;

use crate::dims::Dimensions;
use crate::level::Level;

/// A column/row pair within one level's grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridCell {
    /// Column (x).
    pub col: u16,
    /// Row (y).
    pub row: u16,
}

impl GridCell {
    /// Create a grid cell.
    pub const fn new(col: u16, row: u16) -> Self {
        Self { col, row }
    }
}

impl fmt::Display for GridCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

/// Path to the array whose elements are addressed at some level.
///
/// The world array has no parent; every deeper array is owned by exactly
/// one cell of the level above.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Container {
    /// The top-level world array.
    World,
    /// The realm array of one world cell.
    Realm {
        /// Owning world cell.
        world: usize,
    },
    /// The region array of one realm cell.
    Region {
        /// Owning world cell.
        world: usize,
        /// Owning realm cell.
        realm: usize,
    },
    /// The local tile volume of one region cell.
    Local {
        /// Owning world cell.
        world: usize,
        /// Owning realm cell.
        realm: usize,
        /// Owning region cell.
        region: usize,
    },
}

impl Container {
    /// The level whose elements this container holds.
    pub const fn level(&self) -> Level {
        match self {
            Self::World => Level::World,
            Self::Realm { .. } => Level::Realm,
            Self::Region { .. } => Level::Region,
            Self::Local { .. } => Level::Local,
        }
    }
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::World => write!(f, "world"),
            Self::Realm { world } => write!(f, "{world}"),
            Self::Region { world, realm } => write!(f, "{world}:{realm}"),
            Self::Local {
                world,
                realm,
                region,
            } => write!(f, "{world}:{realm}:{region}"),
        }
    }
}

/// One addressed cell: a level plus the flat index at every level.
///
/// Only the index matching `level` is live for the cell itself; the
/// indices of shallower levels name the containers it lives in. `grid`
/// remembers the last grid cell the active index was computed from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Position {
    /// Level this position addresses.
    pub level: Level,
    /// Flat index into the world array.
    pub world_index: usize,
    /// Flat index into the realm array of `world_index`.
    pub realm_index: usize,
    /// Flat index into the region array of `realm_index`.
    pub region_index: usize,
    /// Flat index into the local volume of `region_index`.
    pub local_index: usize,
    /// Active z-plane at the local level.
    pub local_z: u8,
    /// Last grid cell used to compute the active index.
    pub grid: GridCell,
}

impl Position {
    /// The origin of the world view: world cell 0, all indices zero.
    pub const fn origin() -> Self {
        Self {
            level: Level::World,
            world_index: 0,
            realm_index: 0,
            region_index: 0,
            local_index: 0,
            local_z: 0,
            grid: GridCell::new(0, 0),
        }
    }

    /// The flat index for the active level.
    pub const fn active_index(&self) -> usize {
        match self.level {
            Level::World => self.world_index,
            Level::Realm => self.realm_index,
            Level::Region => self.region_index,
            Level::Local => self.local_index,
        }
    }

    /// Overwrite the flat index for the active level only.
    pub fn set_active_index(&mut self, index: usize) {
        match self.level {
            Level::World => self.world_index = index,
            Level::Realm => self.realm_index = index,
            Level::Region => self.region_index = index,
            Level::Local => self.local_index = index,
        }
    }

    /// The array holding the addressed cell.
    pub const fn container(&self) -> Container {
        match self.level {
            Level::World => Container::World,
            Level::Realm => Container::Realm {
                world: self.world_index,
            },
            Level::Region => Container::Region {
                world: self.world_index,
                realm: self.realm_index,
            },
            Level::Local => Container::Local {
                world: self.world_index,
                realm: self.realm_index,
                region: self.region_index,
            },
        }
    }

    /// Enter the addressed cell, viewing its children from cell 0.
    ///
    /// Returns `None` at the local level.
    pub fn descend(&self) -> Option<Position> {
        let child = self.level.child()?;
        let mut next = *self;
        next.level = child;
        next.grid = GridCell::default();
        next.set_active_index(0);
        Some(next)
    }

    /// Return to the level above, keeping its previously selected cell.
    ///
    /// `grid` is recovered from the parent's index under `dims`. Returns
    /// `None` at the world level.
    pub fn ascend(&self, dims: &Dimensions) -> Option<Position> {
        let parent = self.level.parent()?;
        let mut next = *self;
        next.level = parent;
        let (_, height) = dims.extent(parent);
        let index = next.active_index();
        next.grid = match height {
            0 => GridCell::default(),
            h => GridCell::new((index / h) as u16, (index % h) as u16),
        };
        Some(next)
    }

    /// Move one z-plane up, clamped to the top plane of `dims`.
    pub fn raise_z(&mut self, dims: &Dimensions) {
        let top = dims.z_height.saturating_sub(1);
        self.local_z = self.local_z.saturating_add(1).min(top);
    }

    /// Move one z-plane down, clamped to plane 0.
    pub fn lower_z(&mut self) {
        self.local_z = self.local_z.saturating_sub(1);
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.level {
            Level::World => write!(f, "{}", self.world_index),
            Level::Realm => write!(f, "{}:{}", self.world_index, self.realm_index),
            Level::Region => write!(
                f,
                "{}:{}:{}",
                self.world_index, self.realm_index, self.region_index
            ),
            Level::Local => write!(
                f,
                "{}:{}:{}:{}@z{}",
                self.world_index,
                self.realm_index,
                self.region_index,
                self.local_index,
                self.local_z
            ),
        }
    }
}
