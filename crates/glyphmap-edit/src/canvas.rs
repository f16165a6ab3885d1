//! Drawing seam.

use glyphmap_space::PixelRect;

/// An RGBA colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgba {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha.
    pub a: u8,
}

impl Rgba {
    /// Create an opaque-or-not colour.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Outline of the selected cell.
    pub const SELECTED: Rgba = Rgba::new(255, 255, 0, 255);
    /// Outline of the cell under the pointer.
    pub const HIGHLIGHTED: Rgba = Rgba::new(255, 0, 255, 255);
    /// Outline of every other cell.
    pub const GRID: Rgba = Rgba::new(0, 128, 128, 255);
}

/// Where the editor draws.
///
/// Glyph colours are palette indices; the frontend owns the palette and
/// the glyph atlas.
pub trait Canvas {
    /// Outline a rectangle.
    fn draw_rect(&mut self, rect: PixelRect, color: Rgba);

    /// Blit `glyph` into `rect` with palette colours `fg` and `bg`.
    fn draw_glyph(&mut self, rect: PixelRect, glyph: u16, fg: u8, bg: u8);
}
