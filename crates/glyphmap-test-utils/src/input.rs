//! Scripted input and recording canvas collaborators.

use glyphmap_edit::{Canvas, InputState, Key, MouseButton, Rgba};
use glyphmap_space::PixelRect;

/// Input state driven by the test instead of a window.
///
/// Clicks and key presses are queued and consumed by the session the
/// same way a real frontend clears a handled event.
#[derive(Clone, Debug, Default)]
pub struct ScriptedInput {
    pub pointer: (i32, i32),
    pub held: Vec<MouseButton>,
    pub clicks: Vec<MouseButton>,
    pub keys: Vec<Key>,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the pointer.
    pub fn at(mut self, x: i32, y: i32) -> Self {
        self.pointer = (x, y);
        self
    }

    /// Hold a button down for the next tick.
    pub fn hold(mut self, button: MouseButton) -> Self {
        self.held.push(button);
        self
    }

    /// Queue a click.
    pub fn click(mut self, button: MouseButton) -> Self {
        self.clicks.push(button);
        self
    }

    /// Queue a key press.
    pub fn press(mut self, key: Key) -> Self {
        self.keys.push(key);
        self
    }

    /// Whether every queued event has been consumed.
    pub fn drained(&self) -> bool {
        self.clicks.is_empty() && self.keys.is_empty()
    }
}

impl InputState for ScriptedInput {
    fn pointer(&self) -> (i32, i32) {
        self.pointer
    }

    fn is_down(&self, button: MouseButton) -> bool {
        self.held.contains(&button) || self.clicks.contains(&button)
    }

    fn take_click(&mut self, button: MouseButton) -> bool {
        match self.clicks.iter().position(|&b| b == button) {
            Some(i) => {
                self.clicks.remove(i);
                true
            }
            None => false,
        }
    }

    fn take_key(&mut self, key: Key) -> bool {
        match self.keys.iter().position(|&k| k == key) {
            Some(i) => {
                self.keys.remove(i);
                true
            }
            None => false,
        }
    }
}

/// One recorded draw call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DrawCall {
    Rect { rect: PixelRect, color: Rgba },
    Glyph { rect: PixelRect, glyph: u16, fg: u8, bg: u8 },
}

/// A canvas that remembers what it was asked to draw.
#[derive(Clone, Debug, Default)]
pub struct RecordingCanvas {
    pub calls: Vec<DrawCall>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rectangles drawn, in order.
    pub fn rects(&self) -> Vec<(PixelRect, Rgba)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Rect { rect, color } => Some((*rect, *color)),
                DrawCall::Glyph { .. } => None,
            })
            .collect()
    }

    /// Glyphs drawn, in order.
    pub fn glyphs(&self) -> Vec<(PixelRect, u16)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Glyph { rect, glyph, .. } => Some((*rect, *glyph)),
                DrawCall::Rect { .. } => None,
            })
            .collect()
    }
}

impl Canvas for RecordingCanvas {
    fn draw_rect(&mut self, rect: PixelRect, color: Rgba) {
        self.calls.push(DrawCall::Rect { rect, color });
    }

    fn draw_glyph(&mut self, rect: PixelRect, glyph: u16, fg: u8, bg: u8) {
        self.calls.push(DrawCall::Glyph { rect, glyph, fg, bg });
    }
}
