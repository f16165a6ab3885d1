//! Binary persistence for glyphmap worlds.
//!
//! Two file kinds share one header. The world file holds the world and
//! realm tiles; each world cell's region and local arrays live in a
//! region file of their own, loaded when the editor first descends
//! into that cell.
//!
//! # Format
//!
//! ```text
//! header  [MAGIC "CAFEBABE"] [VERSION u16] [realm w h] [region w h] [local w h] [z] [world w h]
//! world   [header] [world tile × W] [realm tile × R] × W
//! region  [header] ([region tile] [local tile × L] × G) × R
//! tile    [glyph u16] [fg] [bg] [elevation] [temperature] [passable 0|1]
//! ```
//!
//! Pointers are never written; arrays appear in memory order. Saves go
//! through a sibling temporary file that is renamed into place.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod codec;
pub mod error;
pub mod paths;
pub mod region_file;
pub mod world_file;

pub use codec::FileHeader;
pub use error::StoreError;
pub use paths::{load_all, save_all, WorldPaths};
pub use region_file::{load_region, load_region_with, read_region, save_region, write_region};
pub use world_file::{load, load_with, read_world, save, write_world};

/// Magic bytes at the start of every world and region file.
pub const MAGIC: [u8; 8] = *b"CAFEBABE";

/// Current binary format version.
///
/// History:
/// - v1: nine single-byte extents, world extent last; 7-byte tiles
pub const FORMAT_VERSION: u16 = 1;

/// Encoded size of a header in bytes.
pub const HEADER_LEN: usize = 8 + 2 + 9;

/// Encoded size of a tile in bytes.
pub const TILE_LEN: usize = 7;
