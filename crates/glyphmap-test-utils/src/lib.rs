//! Test utilities and mock collaborators for glyphmap development.
//!
//! - [`CountingSource`]: an [`ArraySource`](glyphmap_arena::ArraySource)
//!   that counts live arrays and fails on demand.
//! - [`ScriptedInput`] and [`RecordingCanvas`]: stand-ins for the
//!   frontend's input polling and drawing.
//! - [`fixtures`]: seeded worlds, proptest strategies, scratch dirs.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;
pub mod input;
pub mod source;

pub use fixtures::{arb_dims, arb_nonempty_dims, arb_tile, scramble, seeded_world, ScratchDir};
pub use input::{DrawCall, RecordingCanvas, ScriptedInput};
pub use source::CountingSource;
