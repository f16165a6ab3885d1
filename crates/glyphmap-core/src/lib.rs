//! Core types for glyphmap tile worlds.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! value types shared by every other crate in the workspace: the leaf
//! [`Tile`], the four addressing [`Level`]s, the [`Dimensions`] record
//! that fixes every extent of a world, and the [`Position`] produced by
//! the indexer and consumed by the store and the selection buffer.
//!
//! # Nesting
//!
//! ```text
//! World grid (world_width × world_height)
//! └── Realm array per world cell (realm_width × realm_height)
//!     └── Region array per realm cell (region_width × region_height)
//!         └── Local tiles per region cell (local_width × local_height × z_height)
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod dims;
pub mod level;
pub mod position;
pub mod tile;

pub use dims::{Dimensions, SizePreset};
pub use level::Level;
pub use position::{Container, GridCell, Position};
pub use tile::Tile;
