//! The nested world store and bounds-checked tile addressing.
//!
//! A [`World`] owns one fixed-extent array per level container:
//!
//! ```text
//! World.cells: [WorldCell; world_w * world_h]
//! └── WorldCell.realms: [RealmCell; realm_w * realm_h]
//!     └── RealmCell.regions: [RegionCell; region_w * region_h]
//!         └── RegionCell.tiles: [Tile; local_w * local_h * z]
//! ```
//!
//! Child arrays are `Option`s: a world built by
//! [`WorldAllocator::allocate_shallow`](crate::WorldAllocator::allocate_shallow)
//! has realm arrays but no region arrays until a world cell is
//! materialized. Worlds are only built and torn down by
//! [`WorldAllocator`](crate::WorldAllocator).

use glyphmap_core::{Container, Dimensions, Level, Position, Tile};

use crate::error::AccessError;

/// One cell of the world grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorldCell {
    /// The tile shown for this cell in the world view.
    pub tile: Tile,
    pub(crate) realms: Option<Box<[RealmCell]>>,
}

/// One cell of a realm array.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RealmCell {
    /// The tile shown for this cell in the realm view.
    pub tile: Tile,
    pub(crate) regions: Option<Box<[RegionCell]>>,
}

/// One cell of a region array.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegionCell {
    /// The tile shown for this cell in the region view.
    pub tile: Tile,
    pub(crate) tiles: Option<Box<[Tile]>>,
}

impl WorldCell {
    pub(crate) const fn template() -> Self {
        Self {
            tile: Tile::template(Level::World),
            realms: None,
        }
    }

    /// The realm array, if allocated.
    pub fn realms(&self) -> Option<&[RealmCell]> {
        self.realms.as_deref()
    }

    /// Mutable realm array, if allocated.
    pub fn realms_mut(&mut self) -> Option<&mut [RealmCell]> {
        self.realms.as_deref_mut()
    }
}

impl RealmCell {
    pub(crate) const fn template() -> Self {
        Self {
            tile: Tile::template(Level::Realm),
            regions: None,
        }
    }

    /// The region array, if materialized.
    pub fn regions(&self) -> Option<&[RegionCell]> {
        self.regions.as_deref()
    }

    /// Mutable region array, if materialized.
    pub fn regions_mut(&mut self) -> Option<&mut [RegionCell]> {
        self.regions.as_deref_mut()
    }
}

impl RegionCell {
    pub(crate) const fn template() -> Self {
        Self {
            tile: Tile::template(Level::Region),
            tiles: None,
        }
    }

    /// The local tile volume, if materialized.
    pub fn tiles(&self) -> Option<&[Tile]> {
        self.tiles.as_deref()
    }

    /// Mutable local tile volume, if materialized.
    pub fn tiles_mut(&mut self) -> Option<&mut [Tile]> {
        self.tiles.as_deref_mut()
    }
}

fn get<T>(items: &[T], level: Level, index: usize) -> Result<&T, AccessError> {
    let len = items.len();
    items
        .get(index)
        .ok_or(AccessError::IndexOutOfRange { level, index, len })
}

fn get_mut<T>(items: &mut [T], level: Level, index: usize) -> Result<&mut T, AccessError> {
    let len = items.len();
    items
        .get_mut(index)
        .ok_or(AccessError::IndexOutOfRange { level, index, len })
}

/// A complete or partially materialized tile world.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct World {
    pub(crate) dims: Dimensions,
    pub(crate) cells: Box<[WorldCell]>,
}

impl World {
    /// The extents this world was built with.
    pub fn dims(&self) -> &Dimensions {
        &self.dims
    }

    /// The world array.
    pub fn cells(&self) -> &[WorldCell] {
        &self.cells
    }

    /// Mutable world array.
    pub fn cells_mut(&mut self) -> &mut [WorldCell] {
        &mut self.cells
    }

    /// The realm array of world cell `world`.
    pub fn realm_cells(&self, world: usize) -> Result<&[RealmCell], AccessError> {
        get(&self.cells, Level::World, world)?
            .realms()
            .ok_or(AccessError::NotMaterialized {
                container: Container::Realm { world },
            })
    }

    /// Mutable realm array of world cell `world`.
    pub fn realm_cells_mut(&mut self, world: usize) -> Result<&mut [RealmCell], AccessError> {
        get_mut(&mut self.cells, Level::World, world)?
            .realms_mut()
            .ok_or(AccessError::NotMaterialized {
                container: Container::Realm { world },
            })
    }

    /// The region array of realm cell `realm` in world cell `world`.
    pub fn region_cells(&self, world: usize, realm: usize) -> Result<&[RegionCell], AccessError> {
        get(self.realm_cells(world)?, Level::Realm, realm)?
            .regions()
            .ok_or(AccessError::NotMaterialized {
                container: Container::Region { world, realm },
            })
    }

    /// Mutable region array of realm cell `realm` in world cell `world`.
    pub fn region_cells_mut(
        &mut self,
        world: usize,
        realm: usize,
    ) -> Result<&mut [RegionCell], AccessError> {
        get_mut(self.realm_cells_mut(world)?, Level::Realm, realm)?
            .regions_mut()
            .ok_or(AccessError::NotMaterialized {
                container: Container::Region { world, realm },
            })
    }

    /// The local volume under one region cell.
    pub fn local_tiles(
        &self,
        world: usize,
        realm: usize,
        region: usize,
    ) -> Result<&[Tile], AccessError> {
        get(self.region_cells(world, realm)?, Level::Region, region)?
            .tiles()
            .ok_or(AccessError::NotMaterialized {
                container: Container::Local {
                    world,
                    realm,
                    region,
                },
            })
    }

    /// Mutable local volume under one region cell.
    pub fn local_tiles_mut(
        &mut self,
        world: usize,
        realm: usize,
        region: usize,
    ) -> Result<&mut [Tile], AccessError> {
        get_mut(self.region_cells_mut(world, realm)?, Level::Region, region)?
            .tiles_mut()
            .ok_or(AccessError::NotMaterialized {
                container: Container::Local {
                    world,
                    realm,
                    region,
                },
            })
    }

    /// Number of tiles held by `container`.
    pub fn len_of(&self, container: Container) -> Result<usize, AccessError> {
        Ok(match container {
            Container::World => self.cells.len(),
            Container::Realm { world } => self.realm_cells(world)?.len(),
            Container::Region { world, realm } => self.region_cells(world, realm)?.len(),
            Container::Local {
                world,
                realm,
                region,
            } => self.local_tiles(world, realm, region)?.len(),
        })
    }

    /// Tile `index` of `container`.
    pub fn tile_at(&self, container: Container, index: usize) -> Result<&Tile, AccessError> {
        match container {
            Container::World => Ok(&get(&self.cells, Level::World, index)?.tile),
            Container::Realm { world } => {
                Ok(&get(self.realm_cells(world)?, Level::Realm, index)?.tile)
            }
            Container::Region { world, realm } => {
                Ok(&get(self.region_cells(world, realm)?, Level::Region, index)?.tile)
            }
            Container::Local {
                world,
                realm,
                region,
            } => get(self.local_tiles(world, realm, region)?, Level::Local, index),
        }
    }

    /// Mutable tile `index` of `container`.
    pub fn tile_at_mut(
        &mut self,
        container: Container,
        index: usize,
    ) -> Result<&mut Tile, AccessError> {
        match container {
            Container::World => Ok(&mut get_mut(&mut self.cells, Level::World, index)?.tile),
            Container::Realm { world } => {
                Ok(&mut get_mut(self.realm_cells_mut(world)?, Level::Realm, index)?.tile)
            }
            Container::Region { world, realm } => Ok(&mut get_mut(
                self.region_cells_mut(world, realm)?,
                Level::Region,
                index,
            )?
            .tile),
            Container::Local {
                world,
                realm,
                region,
            } => get_mut(
                self.local_tiles_mut(world, realm, region)?,
                Level::Local,
                index,
            ),
        }
    }

    /// The tile a position addresses.
    pub fn tile(&self, position: &Position) -> Result<&Tile, AccessError> {
        self.tile_at(position.container(), position.active_index())
    }

    /// Mutable tile a position addresses.
    pub fn tile_mut(&mut self, position: &Position) -> Result<&mut Tile, AccessError> {
        self.tile_at_mut(position.container(), position.active_index())
    }

    /// Whether every realm cell of world cell `world` has its region and
    /// local arrays.
    pub fn is_materialized(&self, world: usize) -> bool {
        self.realm_cells(world)
            .map(|realms| {
                realms.iter().all(|realm| {
                    realm
                        .regions()
                        .is_some_and(|regions| regions.iter().all(|r| r.tiles.is_some()))
                })
            })
            .unwrap_or(false)
    }

    /// Indices of the world cells that are fully materialized.
    pub fn materialized(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.cells.len()).filter(|&i| self.is_materialized(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocator::WorldAllocator;
    use crate::source::SystemSource;
    use glyphmap_core::GridCell;

    fn small() -> World {
        let dims = Dimensions::new(2, 2, 2, 3, 3, 2, 2, 2, 2);
        WorldAllocator::allocate(dims, &mut SystemSource).unwrap()
    }

    #[test]
    fn container_lengths_follow_dims() {
        let world = small();
        assert_eq!(world.len_of(Container::World).unwrap(), 4);
        assert_eq!(world.len_of(Container::Realm { world: 3 }).unwrap(), 6);
        assert_eq!(
            world
                .len_of(Container::Region { world: 1, realm: 5 })
                .unwrap(),
            6
        );
        assert_eq!(
            world
                .len_of(Container::Local {
                    world: 0,
                    realm: 0,
                    region: 5
                })
                .unwrap(),
            8
        );
    }

    #[test]
    fn fresh_tiles_use_level_templates() {
        let world = small();
        let mut pos = Position::origin();
        assert_eq!(*world.tile(&pos).unwrap(), Tile::template(Level::World));
        for level in [Level::Realm, Level::Region, Level::Local] {
            pos = pos.descend().unwrap();
            assert_eq!(pos.level, level);
            assert_eq!(*world.tile(&pos).unwrap(), Tile::template(level));
        }
    }

    #[test]
    fn out_of_range_index_is_an_error() {
        let world = small();
        assert_eq!(
            world.tile_at(Container::World, 4),
            Err(AccessError::IndexOutOfRange {
                level: Level::World,
                index: 4,
                len: 4
            })
        );
        assert!(matches!(
            world.tile_at(Container::Region { world: 0, realm: 6 }, 0),
            Err(AccessError::IndexOutOfRange {
                level: Level::Realm,
                index: 6,
                ..
            })
        ));
    }

    #[test]
    fn writes_land_only_at_the_addressed_tile() {
        let mut world = small();
        let pos = Position {
            level: Level::Local,
            world_index: 1,
            realm_index: 2,
            region_index: 3,
            local_index: 5,
            local_z: 1,
            grid: GridCell::new(0, 1),
        };
        world.tile_mut(&pos).unwrap().glyph = 99;
        let tiles = world.local_tiles(1, 2, 3).unwrap();
        for (i, t) in tiles.iter().enumerate() {
            assert_eq!(t.glyph == 99, i == 5);
        }
        assert_eq!(world.local_tiles(1, 2, 2).unwrap()[5].glyph, 3);
    }

    #[test]
    fn shallow_world_reports_unmaterialized_regions() {
        let dims = Dimensions::uniform(2, 2, 1);
        let world = WorldAllocator::allocate_shallow(dims, &mut SystemSource).unwrap();
        assert!(world.realm_cells(0).is_ok());
        assert_eq!(
            world.region_cells(0, 1),
            Err(AccessError::NotMaterialized {
                container: Container::Region { world: 0, realm: 1 }
            })
        );
        assert!(!world.is_materialized(0));
        assert_eq!(world.materialized().count(), 0);
        assert!(!world.is_materialized(4));
    }
}
