//! Nested world storage for glyphmap.
//!
//! A [`World`] is four levels of fixed-extent arrays, each level's cells
//! owning the array of the level below. [`WorldAllocator`] is the only
//! way to build or tear one down, and every array it touches goes
//! through an [`ArraySource`], so allocation can fail cleanly and be
//! counted.
//!
//! # Rollback
//!
//! ```text
//! allocate: world ─▶ realm[0] ─▶ region[0,0] ─▶ local[0,0,0] ─▶ local[0,0,1] ─▶ …
//!                                                                 ✗ fails
//! free(FreeBounds { world: 0, realm: 0, region: 1 })
//!           releases local[0,0,0], region[0,0], realm[0], world
//! ```
//!
//! The array that failed was never acquired and is never released.
//! [`WorldAllocator::materialize`] takes the other route: it builds a
//! world cell's region arrays off to the side and attaches them only
//! when all have succeeded.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod allocator;
pub mod error;
pub mod source;
pub mod world;

pub use allocator::{FreeBounds, WorldAllocator};
pub use error::{AccessError, AllocationError, ArenaError};
pub use source::{try_alloc_array, AllocSite, ArraySource, SystemSource};
pub use world::{RealmCell, RegionCell, World, WorldCell};
