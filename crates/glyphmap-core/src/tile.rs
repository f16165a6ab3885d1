//! The leaf tile and its per-level default templates.

use crate::level::Level;

/// One tile of the world.
///
/// Every level carries tiles: each world, realm and region cell holds a
/// representative tile shown when the editor views that zoom level, and
/// every local cell is a tile. Higher-level tiles are editor-authored,
/// never derived from their children.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Tile {
    /// Index into the glyph atlas.
    pub glyph: u16,
    /// Foreground colour palette index.
    pub fg: u8,
    /// Background colour palette index.
    pub bg: u8,
    /// Elevation.
    pub elevation: u8,
    /// Temperature.
    pub temperature: u8,
    /// Whether entities may walk through this tile.
    pub passable: bool,
}

/// Default temperature of freshly allocated tiles.
pub const DEFAULT_TEMPERATURE: u8 = 20;

/// Default tiles per level, indexed by [`Level::depth`].
///
/// | level  | glyph | fg | bg |
/// |--------|-------|----|----|
/// | world  | 0     | 15 | 0  |
/// | realm  | 1     | 14 | 1  |
/// | region | 2     | 13 | 2  |
/// | local  | 3     | 12 | 3  |
///
/// All templates share elevation 0, temperature 20, impassable.
pub const LEVEL_TEMPLATES: [Tile; 4] = [
    Tile::template_row(0, 15, 0),
    Tile::template_row(1, 14, 1),
    Tile::template_row(2, 13, 2),
    Tile::template_row(3, 12, 3),
];

impl Tile {
    const fn template_row(glyph: u16, fg: u8, bg: u8) -> Self {
        Self {
            glyph,
            fg,
            bg,
            elevation: 0,
            temperature: DEFAULT_TEMPERATURE,
            passable: false,
        }
    }

    /// The default tile for freshly allocated cells at `level`.
    pub const fn template(level: Level) -> Self {
        LEVEL_TEMPLATES[level.depth()]
    }

    /// Copy the shared appearance attributes (glyph and both colours)
    /// from `other`, leaving elevation, temperature and passability alone.
    pub fn copy_appearance_from(&mut self, other: &Tile) {
        self.glyph = other.glyph;
        self.fg = other.fg;
        self.bg = other.bg;
    }
}
