//! Glyphmap: a multi-resolution tile world store for ASCII world editors.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! glyphmap sub-crates. For most users, adding `glyphmap` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use glyphmap::prelude::*;
//!
//! let mut session = EditorSession::new(EditorConfig::default()).unwrap();
//! session.new_world(Dimensions::uniform(4, 8, 2)).unwrap();
//!
//! // Enter world cell 0; its regions are built on first visit.
//! session.descend().unwrap();
//!
//! // Fill a 3×2 block of realm cells with glyph 5.
//! let a = Position { level: Level::Realm, grid: GridCell::new(0, 0), ..Position::origin() };
//! let b = Position { grid: GridCell::new(2, 1), ..a };
//! let world = session.world_mut().unwrap();
//! let buffer = SelectionBuffer::capture(world, &a, &b).unwrap();
//! assert_eq!(buffer.len(), 6);
//! buffer.apply_glyph(world, &a, 5).unwrap();
//! assert_eq!(world.tile_at(a.container(), 0).unwrap().glyph, 5);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `glyphmap-core` | `Tile`, `Level`, `Dimensions`, `Position` |
//! | [`space`] | `glyphmap-space` | Flat indexing and pointer-to-cell mapping |
//! | [`arena`] | `glyphmap-arena` | Nested world storage and its allocator |
//! | [`save`] | `glyphmap-save` | World and region files |
//! | [`edit`] | `glyphmap-edit` | Selection buffers and the editing session |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Tiles, levels, dimensions and positions (`glyphmap-core`).
pub use glyphmap_core as types;

/// Flat indexing and pointer-to-cell mapping (`glyphmap-space`).
///
/// [`space::update_position`] re-aims a [`types::Position`] at the cell
/// under the pointer.
pub use glyphmap_space as space;

/// Nested world storage (`glyphmap-arena`).
///
/// [`arena::WorldAllocator`] builds and frees [`arena::World`]s through
/// an [`arena::ArraySource`].
pub use glyphmap_arena as arena;

/// World and region files (`glyphmap-save`).
pub use glyphmap_save as save;

/// Selection buffers and the editing session (`glyphmap-edit`).
pub use glyphmap_edit as edit;

/// Common imports for typical glyphmap usage.
///
/// ```rust
/// use glyphmap::prelude::*;
/// let dims = Dimensions::preset(SizePreset::Small);
/// assert_eq!(dims.world_cells(), 64);
/// ```
pub mod prelude {
    // Data model
    pub use glyphmap_core::{Container, Dimensions, GridCell, Level, Position, SizePreset, Tile};

    // Indexing
    pub use glyphmap_space::{GridExtent, GridLayout, PixelRect, SpaceError};

    // Storage
    pub use glyphmap_arena::{
        AllocationError, ArraySource, FreeBounds, SystemSource, World, WorldAllocator,
    };

    // Files
    pub use glyphmap_save::{StoreError, WorldPaths};

    // Editing
    pub use glyphmap_edit::{
        Canvas, EditError, EditMode, EditorConfig, EditorSession, InputState, Key, MassEdit,
        MouseButton, Rgba, SelectionBuffer,
    };
}
