//! Coordinate indexing for glyphmap grids.
//!
//! Every level of a world stores its cells in a flat array. This crate
//! converts between grid coordinates and those flat indices, and maps
//! pointer pixels onto grid cells for the editor.
//!
//! # Transforms
//!
//! - [`flatten2`] / [`unflatten2`]: world, realm and region grids
//! - [`flatten3`] / [`unflatten3`]: local volumes with a z-plane
//! - [`GridExtent`]: bounds-checked wrappers over the 2D pair
//!
//! # Pointer mapping
//!
//! [`pixel_to_grid_cell`] answers "which cell is under this pixel";
//! [`probe_grid_cell`] is its sticky in-out form, and
//! [`update_position`] applies it to a [`Position`](glyphmap_core::Position)
//! at the position's active level.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod extent;
pub mod index;
pub mod pointer;

pub use error::SpaceError;
pub use extent::GridExtent;
pub use index::{flatten2, flatten3, unflatten2, unflatten3};
pub use pointer::{
    cell_rect, pixel_to_grid_cell, probe_grid_cell, update_position, GridLayout, PixelRect,
};
