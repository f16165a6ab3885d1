//! Input polling seam.
//!
//! The frontend owns the window and its event queue; the editor only
//! asks for the pointer position and whether a button or key fired
//! during the current tick.

/// Mouse buttons the editor reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left button: select cells and drive selections.
    Primary,
    /// Right button: paint the current glyph.
    Secondary,
}

/// Keys the editor reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Cancel the current mode and any pending selection.
    Escape,
    /// Paint the current colour as foreground.
    F,
    /// Paint the current colour as background.
    B,
    /// Enter the selected cell.
    Enter,
    /// Return to the level above.
    Backspace,
    /// Move one z-plane up.
    PageUp,
    /// Move one z-plane down.
    PageDown,
}

/// Current pointer, button and key state, as seen by one editor tick.
///
/// `take_*` consume the event so it is handled once, the way a
/// frontend clears a handled key or click.
pub trait InputState {
    /// Pointer position in window pixels.
    fn pointer(&self) -> (i32, i32);

    /// Whether `button` is held this tick.
    fn is_down(&self, button: MouseButton) -> bool;

    /// Consume a click of `button`, returning whether one was pending.
    fn take_click(&mut self, button: MouseButton) -> bool;

    /// Consume a press of `key`, returning whether one was pending.
    fn take_key(&mut self, key: Key) -> bool;
}
