//! Benchmark profiles for the glyphmap world store.
//!
//! - [`reference_dims`]: 4×4 grids with 16×16×2 locals (~2M tiles fully built)
//! - [`wide_region_dims`]: one world cell with a 64×64 region grid, for
//!   selection benchmarks over large rectangles
//! - [`reference_world`]: a fully built reference world with a
//!   deterministic tile pattern

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use glyphmap_arena::{AllocationError, SystemSource, World, WorldAllocator};
use glyphmap_core::Dimensions;

/// Reference profile: 4×4 world, realm and region grids, 16×16 locals,
/// two planes.
pub const fn reference_dims() -> Dimensions {
    Dimensions::new(4, 4, 4, 4, 4, 4, 16, 16, 2)
}

/// One world cell and one realm cell holding a 64×64 region grid with
/// 4×4 single-plane locals.
pub const fn wide_region_dims() -> Dimensions {
    Dimensions::new(1, 1, 1, 1, 64, 64, 4, 4, 1)
}

/// Fully allocate `dims` and stamp every tile with a pattern derived
/// from `seed` and the tile's visiting order.
pub fn reference_world(dims: Dimensions, seed: u64) -> Result<World, AllocationError> {
    let mut world = WorldAllocator::allocate(dims, &mut SystemSource)?;
    let mut n = seed;
    let mut next = move || {
        n = n.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (n >> 33) as u16
    };
    for cell in world.cells_mut() {
        cell.tile.glyph = next();
        for realm in cell.realms_mut().into_iter().flatten() {
            realm.tile.glyph = next();
            for region in realm.regions_mut().into_iter().flatten() {
                region.tile.glyph = next();
                for tile in region.tiles_mut().into_iter().flatten() {
                    tile.glyph = next();
                    tile.fg = tile.glyph as u8;
                }
            }
        }
    }
    Ok(world)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyphmap_core::Level;

    #[test]
    fn reference_world_is_fully_built() {
        let dims = reference_dims();
        let world = reference_world(dims, 1).unwrap();
        assert_eq!(world.cells().len(), 16);
        assert!((0..16).all(|i| world.is_materialized(i)));
        assert_eq!(
            world.local_tiles(15, 15, 15).unwrap().len(),
            dims.array_len(Level::Local)
        );
    }

    #[test]
    fn reference_world_is_deterministic() {
        let a = reference_world(wide_region_dims(), 9).unwrap();
        let b = reference_world(wide_region_dims(), 9).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, reference_world(wide_region_dims(), 10).unwrap());
    }
}
