//! Editor modes.

use std::fmt;

/// What a primary click on the map does.
///
/// ```text
/// None/Brush ── click ──▶ select cell
/// Copy       ── click, click ──▶ capture ──▶ Paste
/// Paste      ── click ──▶ paste pending buffer ──▶ None
/// MassChange ── click, click ──▶ capture + apply ──▶ None
/// Select     ── click, click ──▶ capture, held as pending buffer
///            ── right click, F, B ──▶ apply to the held buffer
/// any        ── Escape ──▶ None, pending buffer released
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EditMode {
    /// Plain selection and painting.
    #[default]
    None,
    /// Painting the selected cell.
    Brush,
    /// Waiting for two corners to copy.
    Copy,
    /// Holding a copied buffer, waiting for a destination.
    Paste,
    /// Waiting for two corners to mass edit.
    MassChange,
    /// Waiting for two corners to capture for a later edit.
    Select,
}

impl EditMode {
    /// Whether primary clicks collect rectangle corners in this mode.
    pub const fn captures(self) -> bool {
        matches!(self, Self::Copy | Self::MassChange | Self::Select)
    }
}

impl fmt::Display for EditMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "none",
            Self::Brush => "brush",
            Self::Copy => "copy",
            Self::Paste => "paste",
            Self::MassChange => "mass change",
            Self::Select => "select",
        };
        f.write_str(name)
    }
}
