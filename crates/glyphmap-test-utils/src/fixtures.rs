//! World fixtures, proptest strategies and scratch directories.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use glyphmap_arena::{SystemSource, World, WorldAllocator};
use glyphmap_core::{Dimensions, Tile};
use proptest::prelude::*;

/// Deterministic tile stream seeded by `seed` (64-bit LCG).
pub struct TileStream {
    state: u64,
}

impl TileStream {
    pub fn new(seed: u64) -> Self {
        Self {
            state: seed ^ 0x9E37_79B9_7F4A_7C15,
        }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        self.state >> 11
    }

    pub fn next_tile(&mut self) -> Tile {
        let v = self.next_u64();
        Tile {
            glyph: v as u16,
            fg: (v >> 16) as u8,
            bg: (v >> 24) as u8,
            elevation: (v >> 32) as u8,
            temperature: (v >> 40) as u8,
            passable: (v >> 48) & 1 == 1,
        }
    }
}

/// Overwrite every tile of `world`, at every level, from `seed`.
pub fn scramble(world: &mut World, seed: u64) {
    let mut stream = TileStream::new(seed);
    for cell in world.cells_mut() {
        cell.tile = stream.next_tile();
        let Some(realms) = cell.realms_mut() else {
            continue;
        };
        for realm in realms {
            realm.tile = stream.next_tile();
            let Some(regions) = realm.regions_mut() else {
                continue;
            };
            for region in regions {
                region.tile = stream.next_tile();
                if let Some(tiles) = region.tiles_mut() {
                    for tile in tiles {
                        *tile = stream.next_tile();
                    }
                }
            }
        }
    }
}

/// A fully allocated world with every tile scrambled from `seed`.
pub fn seeded_world(dims: Dimensions, seed: u64) -> World {
    let mut world = WorldAllocator::allocate(dims, &mut SystemSource).unwrap();
    scramble(&mut world, seed);
    world
}

/// Small dimension tuples, zero extents included.
pub fn arb_dims() -> impl Strategy<Value = Dimensions> {
    (
        (0u8..4, 0u8..4, 0u8..4, 0u8..4),
        (0u8..4, 0u8..4, 0u8..4, 0u8..4, 0u8..3),
    )
        .prop_map(|((ww, wh, rw, rh), (gw, gh, lw, lh, z))| {
            Dimensions::new(ww, wh, rw, rh, gw, gh, lw, lh, z)
        })
}

/// Small dimension tuples where every extent is at least one.
pub fn arb_nonempty_dims() -> impl Strategy<Value = Dimensions> {
    (
        (1u8..4, 1u8..4, 1u8..4, 1u8..4),
        (1u8..4, 1u8..4, 1u8..5, 1u8..5, 1u8..3),
    )
        .prop_map(|((ww, wh, rw, rh), (gw, gh, lw, lh, z))| {
            Dimensions::new(ww, wh, rw, rh, gw, gh, lw, lh, z)
        })
}

/// Any tile.
pub fn arb_tile() -> impl Strategy<Value = Tile> {
    (
        any::<u16>(),
        any::<u8>(),
        any::<u8>(),
        any::<u8>(),
        any::<u8>(),
        any::<bool>(),
    )
        .prop_map(|(glyph, fg, bg, elevation, temperature, passable)| Tile {
            glyph,
            fg,
            bg,
            elevation,
            temperature,
            passable,
        })
}

static SCRATCH_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// A unique directory under the system temp dir, removed on drop.
pub struct ScratchDir {
    path: PathBuf,
}

impl ScratchDir {
    pub fn new(label: &str) -> Self {
        let n = SCRATCH_COUNTER.fetch_add(1, Ordering::Relaxed);
        let path = std::env::temp_dir().join(format!(
            "glyphmap-{label}-{}-{n}",
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&path);
        std::fs::create_dir_all(&path).unwrap();
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn join(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}
