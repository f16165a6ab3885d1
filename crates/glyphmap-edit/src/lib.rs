//! Selection buffers, mass edits and the editing session.
//!
//! [`EditorSession`] owns the one open [`World`](glyphmap_arena::World)
//! and drives it from an [`InputState`] once per tick, drawing through a
//! [`Canvas`]. Rectangular edits go through a [`SelectionBuffer`], which
//! is captured at one level and consumed by a single apply or paste,
//! possibly at another level.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod canvas;
pub mod config;
pub mod error;
pub mod input;
pub mod mode;
pub mod selection;
pub mod session;

pub use canvas::{Canvas, Rgba};
pub use config::EditorConfig;
pub use error::{ConfigError, EditError};
pub use input::{InputState, Key, MouseButton};
pub use mode::EditMode;
pub use selection::{MassEdit, SelectionBuffer};
pub use session::{Channel, EditorSession};
