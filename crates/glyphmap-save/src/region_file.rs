//! Region files: one per world cell, holding its region and local arrays.
//!
//! ```text
//! [header]
//! for each realm cell of the world cell:
//!     for each region cell:
//!         [region tile] [local tiles × local_w·local_h·z]
//! ```

use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;

use glyphmap_arena::{ArraySource, SystemSource, World, WorldAllocator};
use glyphmap_core::Container;

use crate::codec::{decode_header, decode_tile, encode_header, encode_tile};
use crate::error::StoreError;
use crate::world_file::write_atomically;

fn check_index(world: &World, world_index: usize) -> Result<(), StoreError> {
    let len = world.cells().len();
    if world_index >= len {
        return Err(StoreError::WorldIndexOutOfRange {
            index: world_index,
            len,
        });
    }
    Ok(())
}

/// Encode the region file of world cell `world_index`.
///
/// Fails with [`StoreError::NotMaterialized`] if any of the cell's
/// region or local arrays is missing.
pub fn write_region(
    w: &mut dyn Write,
    world: &World,
    world_index: usize,
) -> Result<(), StoreError> {
    check_index(world, world_index)?;
    encode_header(w, world.dims())?;
    for realm in 0..world.realm_cells(world_index)?.len() {
        for (region, cell) in world.region_cells(world_index, realm)?.iter().enumerate() {
            encode_tile(w, &cell.tile)?;
            let tiles = cell.tiles().ok_or(StoreError::NotMaterialized {
                container: Container::Local {
                    world: world_index,
                    realm,
                    region,
                },
            })?;
            for tile in tiles {
                encode_tile(w, tile)?;
            }
        }
    }
    Ok(())
}

/// Decode a region file into world cell `world_index`.
///
/// The header must match the world's dimensions exactly. The cell is
/// only updated if the whole file decodes; otherwise it is left as it
/// was and every array acquired for it is released.
pub fn read_region<S: ArraySource>(
    r: &mut dyn Read,
    world: &mut World,
    world_index: usize,
    source: &mut S,
) -> Result<(), StoreError> {
    check_index(world, world_index)?;
    let header = decode_header(r)?;
    if header.dims != *world.dims() {
        log::warn!(
            "region file for world cell {world_index} has dimensions {}, world has {}",
            header.dims,
            world.dims()
        );
        return Err(StoreError::DimensionMismatch {
            expected: *world.dims(),
            found: header.dims,
        });
    }
    WorldAllocator::build_regions(world, world_index, source, |_, _, cell| {
        cell.tile = decode_tile(r)?;
        if let Some(tiles) = cell.tiles_mut() {
            for tile in tiles {
                *tile = decode_tile(r)?;
            }
        }
        Ok(())
    })
}

/// Save the region file of world cell `world_index` to `path`.
pub fn save_region(
    world: &World,
    path: impl AsRef<Path>,
    world_index: usize,
) -> Result<(), StoreError> {
    let path = path.as_ref();
    check_index(world, world_index)?;
    if !world.is_materialized(world_index) {
        return Err(StoreError::NotMaterialized {
            container: Container::Realm { world: world_index },
        });
    }
    write_atomically(path, |w| write_region(w, world, world_index))?;
    log::info!("saved world cell {world_index} to {}", path.display());
    Ok(())
}

/// Load the region file at `path` into world cell `world_index`.
pub fn load_region(
    world: &mut World,
    path: impl AsRef<Path>,
    world_index: usize,
) -> Result<(), StoreError> {
    load_region_with(world, path, world_index, &mut SystemSource)
}

/// [`load_region`] with an explicit array source.
pub fn load_region_with<S: ArraySource>(
    world: &mut World,
    path: impl AsRef<Path>,
    world_index: usize,
    source: &mut S,
) -> Result<(), StoreError> {
    let path = path.as_ref();
    let mut reader = BufReader::new(File::open(path)?);
    read_region(&mut reader, world, world_index, source)?;
    log::info!("loaded world cell {world_index} from {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world_file::read_world;
    use crate::{HEADER_LEN, TILE_LEN};
    use glyphmap_core::{Dimensions, Level};
    use glyphmap_test_utils::{seeded_world, CountingSource};

    fn dims() -> Dimensions {
        Dimensions::new(2, 1, 2, 1, 1, 2, 2, 1, 2)
    }

    #[test]
    fn region_file_layout() {
        let world = seeded_world(dims(), 8);
        let mut buf = Vec::new();
        write_region(&mut buf, &world, 1).unwrap();
        // 2 realms × 2 regions × (1 region tile + 4 locals)
        assert_eq!(buf.len(), HEADER_LEN + 2 * 2 * 5 * TILE_LEN);

        // realm 1, region 0: region tile, then its locals
        let at = HEADER_LEN + 2 * 5 * TILE_LEN;
        let tile = decode_tile(&mut &buf[at..]).unwrap();
        assert_eq!(tile, world.region_cells(1, 1).unwrap()[0].tile);
        let local = decode_tile(&mut &buf[at + TILE_LEN..]).unwrap();
        assert_eq!(local, world.local_tiles(1, 1, 0).unwrap()[0]);
    }

    #[test]
    fn region_roundtrip_into_shallow_world() {
        let world = seeded_world(dims(), 21);
        let mut world_bytes = Vec::new();
        crate::world_file::write_world(&mut world_bytes, &world).unwrap();
        let mut loaded = read_world(&mut world_bytes.as_slice(), &mut SystemSource).unwrap();

        for i in 0..2 {
            let mut buf = Vec::new();
            write_region(&mut buf, &world, i).unwrap();
            read_region(&mut buf.as_slice(), &mut loaded, i, &mut SystemSource).unwrap();
        }
        assert_eq!(loaded, world);
    }

    #[test]
    fn unmaterialized_cell_cannot_be_written() {
        let mut src = SystemSource;
        let mut world = WorldAllocator::allocate_shallow(dims(), &mut src).unwrap();
        WorldAllocator::materialize(&mut world, 0, &mut src).unwrap();
        let mut buf = Vec::new();
        assert!(write_region(&mut buf, &world, 0).is_ok());
        buf.clear();
        assert!(matches!(
            write_region(&mut buf, &world, 1),
            Err(StoreError::NotMaterialized { .. })
        ));
        assert!(matches!(
            write_region(&mut buf, &world, 2),
            Err(StoreError::WorldIndexOutOfRange { index: 2, len: 2 })
        ));
    }

    #[test]
    fn dimension_mismatch_leaves_cell_unmaterialized() {
        let other = seeded_world(Dimensions::new(2, 1, 2, 1, 1, 2, 2, 2, 2), 1);
        let mut buf = Vec::new();
        write_region(&mut buf, &other, 0).unwrap();

        let mut source = CountingSource::new();
        let mut world = WorldAllocator::allocate_shallow(dims(), &mut source).unwrap();
        let live = source.live();
        let err = read_region(&mut buf.as_slice(), &mut world, 0, &mut source).unwrap_err();
        assert!(matches!(err, StoreError::DimensionMismatch { .. }));
        assert!(!world.is_materialized(0));
        assert_eq!(source.live(), live);
    }

    #[test]
    fn truncated_region_is_atomic() {
        let world = seeded_world(dims(), 4);
        let mut buf = Vec::new();
        write_region(&mut buf, &world, 0).unwrap();
        buf.truncate(buf.len() - TILE_LEN);

        let mut source = CountingSource::new();
        let mut target = WorldAllocator::allocate_shallow(dims(), &mut source).unwrap();
        let before = target.clone();
        let live = source.live();
        let err = read_region(&mut buf.as_slice(), &mut target, 0, &mut source).unwrap_err();
        assert!(matches!(err, StoreError::Io(_)));
        assert_eq!(target, before);
        assert_eq!(source.live(), live);
        assert_eq!(source.live_at(Level::Local), 0);
    }
}
