//! Building and tearing down worlds with prefix-exact rollback.
//!
//! Every array is acquired through an [`ArraySource`] in a fixed
//! depth-first order. When an acquisition fails, the arrays acquired so
//! far are exactly the ones named by a [`FreeBounds`] watermark, and
//! [`WorldAllocator::free`] releases precisely those before the error is
//! returned. The array that failed is never touched.

use glyphmap_core::{Dimensions, Level, Tile};

use crate::error::{AccessError, AllocationError, ArenaError};
use crate::source::{AllocSite, ArraySource};
use crate::world::{RealmCell, RegionCell, World, WorldCell};

/// Watermark naming how much of a world has been acquired.
///
/// World cells below `world` are released in full. At world cell
/// `world`, realm cells below `realm` are released in full, and at realm
/// cell `realm` only the local arrays of region cells below `region`.
/// Arrays that were never acquired are skipped, so a bound past the end
/// of a level means "all of it".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FreeBounds {
    /// First world cell not fully acquired.
    pub world: usize,
    /// First realm cell of `world` not fully acquired.
    pub realm: usize,
    /// First region cell of `realm` whose locals were not acquired.
    pub region: usize,
}

impl FreeBounds {
    /// Bounds covering a whole world of `dims`.
    pub const fn all(dims: &Dimensions) -> Self {
        Self {
            world: dims.world_cells(),
            realm: 0,
            region: 0,
        }
    }

    const fn at(world: usize, realm: usize, region: usize) -> Self {
        Self {
            world,
            realm,
            region,
        }
    }
}

/// Builds and frees [`World`]s.
pub struct WorldAllocator;

impl WorldAllocator {
    /// Allocate a complete world with every tile set to its level's
    /// default template.
    ///
    /// Order: world array, then for each world cell its realm array,
    /// then for each realm cell its region array followed by the local
    /// array of each region cell.
    pub fn allocate<S: ArraySource>(
        dims: Dimensions,
        source: &mut S,
    ) -> Result<World, AllocationError> {
        let mut world = Self::acquire_world(dims, source)?;
        match Self::fill_depth_first(&mut world, source) {
            Ok(()) => {
                log::debug!("allocated world ({dims})");
                Ok(world)
            }
            Err((err, bounds)) => {
                log::warn!("allocation of {} failed, rolling back to {bounds:?}", err.site);
                Self::free(world, bounds, source);
                Err(err)
            }
        }
    }

    fn acquire_world<S: ArraySource>(
        dims: Dimensions,
        source: &mut S,
    ) -> Result<World, AllocationError> {
        let cells = source.acquire(
            AllocSite::new(Level::World, 0),
            dims.world_cells(),
            WorldCell::template(),
        )?;
        Ok(World { dims, cells })
    }

    fn fill_depth_first<S: ArraySource>(
        world: &mut World,
        source: &mut S,
    ) -> Result<(), (AllocationError, FreeBounds)> {
        let dims = world.dims;
        let realm_len = dims.array_len(Level::Realm);
        let region_len = dims.array_len(Level::Region);
        let local_len = dims.array_len(Level::Local);

        for (i, cell) in world.cells.iter_mut().enumerate() {
            let realms = source
                .acquire(
                    AllocSite::new(Level::Realm, i),
                    realm_len,
                    RealmCell::template(),
                )
                .map_err(|e| (e, FreeBounds::at(i, 0, 0)))?;
            let realms = cell.realms.insert(realms);

            for (j, realm) in realms.iter_mut().enumerate() {
                let path = i * realm_len + j;
                let regions = source
                    .acquire(
                        AllocSite::new(Level::Region, path),
                        region_len,
                        RegionCell::template(),
                    )
                    .map_err(|e| (e, FreeBounds::at(i, j, 0)))?;
                let regions = realm.regions.insert(regions);

                for (k, region) in regions.iter_mut().enumerate() {
                    let tiles = source
                        .acquire(
                            AllocSite::new(Level::Local, path * region_len + k),
                            local_len,
                            Tile::template(Level::Local),
                        )
                        .map_err(|e| (e, FreeBounds::at(i, j, k)))?;
                    region.tiles = Some(tiles);
                }
            }
        }
        Ok(())
    }

    /// Allocate the world and realm arrays only, with default tiles.
    ///
    /// Region and local arrays are left for [`materialize`](Self::materialize).
    pub fn allocate_shallow<S: ArraySource>(
        dims: Dimensions,
        source: &mut S,
    ) -> Result<World, AllocationError> {
        Self::allocate_shallow_with(dims, source, |_, _| Ok(()))
    }

    /// [`allocate_shallow`](Self::allocate_shallow), handing every tile
    /// to `fill` as soon as its array is acquired.
    ///
    /// Tiles are visited in storage order: the world array, then each
    /// world cell's realm array. If `fill` or an acquisition fails,
    /// everything acquired so far is released and the error returned.
    /// This is the shape a streaming decoder needs.
    pub fn allocate_shallow_with<S, E, F>(
        dims: Dimensions,
        source: &mut S,
        mut fill: F,
    ) -> Result<World, E>
    where
        S: ArraySource,
        E: From<AllocationError>,
        F: FnMut(Level, &mut Tile) -> Result<(), E>,
    {
        let mut world = Self::acquire_world(dims, source)?;
        if let Err(e) = fill_tiles(
            world.cells.iter_mut().map(|c| &mut c.tile),
            Level::World,
            &mut fill,
        ) {
            Self::free(world, FreeBounds::at(0, 0, 0), source);
            return Err(e);
        }

        let realm_len = dims.array_len(Level::Realm);
        for i in 0..world.cells.len() {
            let realms = match source.acquire(
                AllocSite::new(Level::Realm, i),
                realm_len,
                RealmCell::template(),
            ) {
                Ok(realms) => realms,
                Err(e) => {
                    log::warn!("allocation of {} failed, rolling back", e.site);
                    Self::free(world, FreeBounds::at(i, 0, 0), source);
                    return Err(e.into());
                }
            };
            let realms = world.cells[i].realms.insert(realms);
            if let Err(e) = fill_tiles(
                realms.iter_mut().map(|r| &mut r.tile),
                Level::Realm,
                &mut fill,
            ) {
                Self::free(world, FreeBounds::at(i, 0, 0), source);
                return Err(e);
            }
        }
        Ok(world)
    }

    /// Build the region and local arrays of world cell `world_index`.
    ///
    /// The new arrays are assembled off to the side and only attached to
    /// the world once every one of them has been acquired; on failure the
    /// world is left exactly as it was. Any region arrays already attached
    /// to the cell are released and replaced.
    pub fn materialize<S: ArraySource>(
        world: &mut World,
        world_index: usize,
        source: &mut S,
    ) -> Result<(), ArenaError> {
        Self::build_regions(world, world_index, source, |_, _, _| Ok(()))
    }

    /// [`materialize`](Self::materialize), handing each region cell to
    /// `fill` once its local array exists.
    ///
    /// `fill` receives the realm index, the region index and the cell.
    /// Callback failures roll back the same way allocation failures do.
    pub fn build_regions<S, E, F>(
        world: &mut World,
        world_index: usize,
        source: &mut S,
        mut fill: F,
    ) -> Result<(), E>
    where
        S: ArraySource,
        E: From<AllocationError> + From<AccessError>,
        F: FnMut(usize, usize, &mut RegionCell) -> Result<(), E>,
    {
        let dims = world.dims;
        let realm_len = world.realm_cells(world_index)?.len();
        let region_len = dims.array_len(Level::Region);
        let local_len = dims.array_len(Level::Local);

        let mut batch: Vec<Box<[RegionCell]>> = Vec::new();
        batch
            .try_reserve_exact(realm_len)
            .map_err(|_| AllocationError {
                site: AllocSite::new(Level::Region, world_index * realm_len),
                requested: realm_len,
            })?;

        for j in 0..realm_len {
            let path = world_index * realm_len + j;
            let regions = source.acquire(
                AllocSite::new(Level::Region, path),
                region_len,
                RegionCell::template(),
            );
            let mut regions = match regions {
                Ok(regions) => regions,
                Err(e) => {
                    Self::discard_batch(source, batch, world_index);
                    return Err(e.into());
                }
            };
            let mut failure = None;
            for (k, region) in regions.iter_mut().enumerate() {
                let acquired = source.acquire(
                    AllocSite::new(Level::Local, path * region_len + k),
                    local_len,
                    Tile::template(Level::Local),
                );
                let filled = match acquired {
                    Ok(tiles) => {
                        region.tiles = Some(tiles);
                        fill(j, k, region)
                    }
                    Err(e) => Err(e.into()),
                };
                if let Err(e) = filled {
                    failure = Some(e);
                    break;
                }
            }
            if let Some(e) = failure {
                release_region_array(source, regions, usize::MAX);
                Self::discard_batch(source, batch, world_index);
                return Err(e);
            }
            batch.push(regions);
        }

        let realms = world.realm_cells_mut(world_index)?;
        for (realm, regions) in realms.iter_mut().zip(batch) {
            if let Some(old) = realm.regions.replace(regions) {
                release_region_array(source, old, usize::MAX);
            }
        }
        log::info!("materialized world cell {world_index}");
        Ok(())
    }

    fn discard_batch<S: ArraySource>(
        source: &mut S,
        batch: Vec<Box<[RegionCell]>>,
        world_index: usize,
    ) {
        log::warn!(
            "materializing world cell {world_index} failed, releasing {} region arrays",
            batch.len()
        );
        for regions in batch {
            release_region_array(source, regions, usize::MAX);
        }
    }

    /// Release a world's arrays, locals first and the world array last.
    ///
    /// Pass [`FreeBounds::all`] for a full teardown.
    pub fn free<S: ArraySource>(world: World, bounds: FreeBounds, source: &mut S) {
        let World { dims, mut cells } = world;
        let reach = bounds.world.saturating_add(1);
        for (i, cell) in cells.iter_mut().enumerate().take(reach) {
            let Some(realms) = cell.realms.take() else {
                continue;
            };
            if i < bounds.world {
                release_realm_array(source, realms, usize::MAX, 0);
            } else {
                release_realm_array(source, realms, bounds.realm, bounds.region);
            }
        }
        source.release(Level::World, cells);
        log::debug!("freed world ({dims}) up to {bounds:?}");
    }
}

fn fill_tiles<'a, E, F>(
    tiles: impl Iterator<Item = &'a mut Tile>,
    level: Level,
    fill: &mut F,
) -> Result<(), E>
where
    F: FnMut(Level, &mut Tile) -> Result<(), E>,
{
    for tile in tiles {
        fill(level, tile)?;
    }
    Ok(())
}

/// Release one realm array; realm cells below `realm_bound` in full and
/// the boundary cell's locals below `region_bound`.
fn release_realm_array<S: ArraySource>(
    source: &mut S,
    mut realms: Box<[RealmCell]>,
    realm_bound: usize,
    region_bound: usize,
) {
    let reach = realm_bound.saturating_add(1);
    for (j, realm) in realms.iter_mut().enumerate().take(reach) {
        let Some(regions) = realm.regions.take() else {
            continue;
        };
        let local_bound = if j < realm_bound {
            usize::MAX
        } else {
            region_bound
        };
        release_region_array(source, regions, local_bound);
    }
    source.release(Level::Realm, realms);
}

/// Release one region array and the locals of region cells below
/// `local_bound`.
fn release_region_array<S: ArraySource>(
    source: &mut S,
    mut regions: Box<[RegionCell]>,
    local_bound: usize,
) {
    for region in regions.iter_mut().take(local_bound) {
        if let Some(tiles) = region.tiles.take() {
            source.release(Level::Local, tiles);
        }
    }
    source.release(Level::Region, regions);
}
