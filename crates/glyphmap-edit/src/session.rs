//! The editing session: one open world and the editor state around it.

use glyphmap_arena::{ArraySource, FreeBounds, SystemSource, World, WorldAllocator};
use glyphmap_core::{Dimensions, Level, Position};
use glyphmap_save::{load_region_with, load_with, save_all, WorldPaths};
use glyphmap_space::{cell_rect, flatten3, pixel_to_grid_cell, update_position, GridExtent};

use crate::canvas::{Canvas, Rgba};
use crate::config::EditorConfig;
use crate::error::{ConfigError, EditError};
use crate::input::{InputState, Key, MouseButton};
use crate::mode::EditMode;
use crate::selection::{cell_index, MassEdit, SelectionBuffer};

/// Tile attribute written by mass changes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Channel {
    /// The current glyph.
    #[default]
    Glyph,
    /// The current colour, as foreground.
    Foreground,
    /// The current colour, as background.
    Background,
}

/// Owner of the open world and everything the editor does to it.
///
/// Every array of the world is acquired from and released to the
/// session's [`ArraySource`]. At most one [`SelectionBuffer`] is pending
/// at a time; changing mode, cancelling or closing the world releases
/// it.
pub struct EditorSession<S: ArraySource = SystemSource> {
    config: EditorConfig,
    source: S,
    world: Option<World>,
    origin: Option<WorldPaths>,
    mode: EditMode,
    pending: Option<SelectionBuffer>,
    anchor: Option<Position>,
    selected: Position,
    highlighted: Position,
    glyph: u16,
    color: u8,
    channel: Channel,
}

impl EditorSession<SystemSource> {
    /// A session with no world open, allocating from the system heap.
    pub fn new(config: EditorConfig) -> Result<Self, ConfigError> {
        Self::with_source(config, SystemSource)
    }
}

impl<S: ArraySource> EditorSession<S> {
    /// A session with no world open, allocating from `source`.
    pub fn with_source(config: EditorConfig, source: S) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            source,
            world: None,
            origin: None,
            mode: EditMode::None,
            pending: None,
            anchor: None,
            selected: Position::origin(),
            highlighted: Position::origin(),
            glyph: 0,
            color: 0,
            channel: Channel::Glyph,
        })
    }

    // ── Accessors ───────────────────────────────────────────────

    /// The validated configuration.
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// The array source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// The open world.
    pub fn world(&self) -> Option<&World> {
        self.world.as_ref()
    }

    /// Where the open world's unvisited cells are read from, if it was
    /// loaded or saved.
    pub fn origin(&self) -> Option<&WorldPaths> {
        self.origin.as_ref()
    }

    /// The open world, mutably.
    pub fn world_mut(&mut self) -> Option<&mut World> {
        self.world.as_mut()
    }

    /// Current mode.
    pub fn mode(&self) -> EditMode {
        self.mode
    }

    /// The selected cell.
    pub fn selected(&self) -> &Position {
        &self.selected
    }

    /// The cell under the pointer.
    pub fn highlighted(&self) -> &Position {
        &self.highlighted
    }

    /// The buffer waiting to be pasted or applied.
    pub fn pending(&self) -> Option<&SelectionBuffer> {
        self.pending.as_ref()
    }

    /// First corner of a selection in progress.
    pub fn anchor(&self) -> Option<&Position> {
        self.anchor.as_ref()
    }

    /// Current glyph.
    pub fn glyph(&self) -> u16 {
        self.glyph
    }

    /// Current colour index.
    pub fn color(&self) -> u8 {
        self.color
    }

    // ── World lifecycle ─────────────────────────────────────────

    /// Replace the open world with a fresh one of `dims`.
    ///
    /// Only the world and realm arrays are built; each world cell is
    /// materialized on first [`descend`](Self::descend).
    pub fn new_world(&mut self, dims: Dimensions) -> Result<(), EditError> {
        let world = WorldAllocator::allocate_shallow(dims, &mut self.source)?;
        self.install(world, None);
        log::info!("created world {dims}");
        Ok(())
    }

    /// Release the open world. Returns whether one was open.
    pub fn close_world(&mut self) -> bool {
        self.reset_view();
        self.origin = None;
        let Some(world) = self.world.take() else {
            return false;
        };
        let dims = *world.dims();
        WorldAllocator::free(world, FreeBounds::all(&dims), &mut self.source);
        true
    }

    /// Save the world file and every visited world cell under `paths`.
    ///
    /// Cells of a loaded world that were never entered are read from
    /// the save they came from first, so nothing saved earlier is lost.
    /// `paths` then becomes the world's origin.
    pub fn save(&mut self, paths: &WorldPaths) -> Result<(), EditError> {
        let world = self.world.as_mut().ok_or(EditError::NoWorld)?;
        if let Some(origin) = &self.origin {
            for index in 0..world.cells().len() {
                if !world.is_materialized(index) && origin.has_region_file(index) {
                    load_region_with(world, origin.region_file(index), index, &mut self.source)?;
                }
            }
        }
        save_all(world, paths)?;
        self.origin = Some(paths.clone());
        Ok(())
    }

    /// Replace the open world with the one saved under `paths`.
    ///
    /// Only the world file is read here. Each world cell's region file is
    /// read from `paths` when the cell is first entered. On failure the
    /// open world is kept.
    pub fn load(&mut self, paths: &WorldPaths) -> Result<(), EditError> {
        let world = load_with(paths.world_file(), &mut self.source)?;
        let dims = *world.dims();
        self.install(world, Some(paths.clone()));
        log::info!("loaded world {dims} from {}", paths.root.display());
        Ok(())
    }

    fn install(&mut self, world: World, origin: Option<WorldPaths>) {
        self.close_world();
        self.world = Some(world);
        self.origin = origin;
        self.mode = EditMode::None;
    }

    fn reset_view(&mut self) {
        self.discard_pending();
        self.anchor = None;
        self.selected = Position::origin();
        self.highlighted = Position::origin();
    }

    // ── Modes and selections ────────────────────────────────────

    /// Switch mode. Leaving a mode drops its pending buffer and any
    /// half-made selection.
    pub fn set_mode(&mut self, mode: EditMode) {
        if mode == self.mode {
            return;
        }
        self.discard_pending();
        self.anchor = None;
        log::debug!("mode {} -> {mode}", self.mode);
        self.mode = mode;
    }

    /// Return to [`EditMode::None`] without touching the world.
    pub fn cancel(&mut self) {
        self.set_mode(EditMode::None);
    }

    fn discard_pending(&mut self) {
        if let Some(buffer) = self.pending.take() {
            log::warn!(
                "discarding pending {}x{} selection from {}",
                buffer.width(),
                buffer.height(),
                buffer.container()
            );
        }
    }

    /// Set the glyph painted by brushes and mass changes.
    pub fn select_glyph(&mut self, glyph: u16) {
        self.glyph = glyph;
    }

    /// Set the colour painted by brushes and mass changes.
    pub fn select_color(&mut self, color: u8) {
        self.color = color;
    }

    /// Set which attribute a mass change writes.
    pub fn set_mass_channel(&mut self, channel: Channel) {
        self.channel = channel;
    }

    fn edit_for(&self, channel: Channel) -> MassEdit {
        match channel {
            Channel::Glyph => MassEdit::Glyph(self.glyph),
            Channel::Foreground => MassEdit::Foreground(self.color),
            Channel::Background => MassEdit::Background(self.color),
        }
    }

    /// Write `edit` into the selected cell.
    pub fn paint(&mut self, edit: MassEdit) -> Result<(), EditError> {
        let world = self.world.as_mut().ok_or(EditError::NoWorld)?;
        edit.apply_to(world.tile_mut(&self.selected)?);
        Ok(())
    }

    /// Remember `corner` as the first corner of a selection.
    pub fn begin_selection(&mut self, corner: Position) {
        self.anchor = Some(corner);
    }

    /// Close the selection at `corner` and act on it for the current mode.
    ///
    /// - `Copy`: capture, then switch to `Paste`.
    /// - `Select`: capture and hold the buffer.
    /// - `MassChange`: capture, apply the mass channel, return to `None`.
    ///
    /// Without a first corner the selection is the single cell `corner`.
    pub fn finish_selection(&mut self, corner: Position) -> Result<(), EditError> {
        let anchor = self.anchor.take().unwrap_or(corner);
        if !self.mode.captures() {
            return Ok(());
        }
        let world = self.world.as_ref().ok_or(EditError::NoWorld)?;
        let buffer = SelectionBuffer::capture(world, &anchor, &corner)?;
        match self.mode {
            EditMode::Copy | EditMode::Select => {
                self.discard_pending();
                self.pending = Some(buffer);
                if self.mode == EditMode::Copy {
                    self.mode = EditMode::Paste;
                }
            }
            _ => {
                let edit = self.edit_for(self.channel);
                self.mode = EditMode::None;
                let world = self.world.as_mut().ok_or(EditError::NoWorld)?;
                buffer.apply(world, &anchor, edit)?;
            }
        }
        Ok(())
    }

    /// Paste the pending buffer at `dest` and leave `Paste` mode.
    pub fn paste_pending(&mut self, dest: Position) -> Result<usize, EditError> {
        let buffer = self.pending.take().ok_or(EditError::NoPendingBuffer)?;
        if self.mode == EditMode::Paste {
            self.mode = EditMode::None;
        }
        let world = self.world.as_mut().ok_or(EditError::NoWorld)?;
        buffer.paste(world, &dest)
    }

    /// Write `edit` into every tile of the pending buffer, in the
    /// selected cell's container.
    pub fn apply_pending(&mut self, edit: MassEdit) -> Result<usize, EditError> {
        let buffer = self.pending.take().ok_or(EditError::NoPendingBuffer)?;
        let world = self.world.as_mut().ok_or(EditError::NoWorld)?;
        buffer.apply(world, &self.selected, edit)
    }

    // ── Navigation ──────────────────────────────────────────────

    /// Enter the selected cell. Returns `false` at the local level.
    ///
    /// Entering a world cell for the first time loads its region file
    /// from the save the world came from, or builds default regions if
    /// there is none. A world made by [`new_world`](Self::new_world)
    /// always gets defaults.
    pub fn descend(&mut self) -> Result<bool, EditError> {
        let Some(next) = self.selected.descend() else {
            return Ok(false);
        };
        let world = self.world.as_mut().ok_or(EditError::NoWorld)?;
        world.tile(&self.selected)?;
        if self.selected.level == Level::World && !world.is_materialized(next.world_index) {
            let index = next.world_index;
            match &self.origin {
                Some(origin) if origin.has_region_file(index) => {
                    load_region_with(world, origin.region_file(index), index, &mut self.source)?;
                }
                _ => WorldAllocator::materialize(world, index, &mut self.source)?,
            }
        }
        self.anchor = None;
        self.selected = next;
        self.highlighted = next;
        Ok(true)
    }

    /// Return to the level above. Returns `false` at the world level.
    pub fn ascend(&mut self) -> bool {
        let Some(world) = &self.world else {
            return false;
        };
        let Some(prev) = self.selected.ascend(world.dims()) else {
            return false;
        };
        self.anchor = None;
        self.selected = prev;
        self.highlighted = prev;
        true
    }

    /// Move the local view one plane up.
    pub fn raise_z(&mut self) {
        if let Some(world) = &self.world {
            let dims = *world.dims();
            self.selected.raise_z(&dims);
            self.reindex_local(&dims);
        }
    }

    /// Move the local view one plane down.
    pub fn lower_z(&mut self) {
        if let Some(world) = &self.world {
            let dims = *world.dims();
            self.selected.lower_z();
            self.reindex_local(&dims);
        }
    }

    fn reindex_local(&mut self, dims: &Dimensions) {
        if self.selected.level != Level::Local {
            return;
        }
        let extent = GridExtent::of(dims, Level::Local);
        if extent.contains(self.selected.grid) {
            self.selected.local_index = flatten3(
                self.selected.grid.col as usize,
                self.selected.grid.row as usize,
                self.selected.local_z as usize,
                extent.width as usize,
                extent.height as usize,
            );
        }
        self.highlighted = self.selected;
    }

    // ── Tick ────────────────────────────────────────────────────

    /// Run one editor tick against `input`.
    ///
    /// Escape cancels first. The pointer then moves the highlight, a
    /// held primary button moves the selection, and a primary click on
    /// the grid drives the current mode. Secondary clicks and the
    /// `F`/`B` keys paint, into the pending selection in `Select` mode
    /// and into the selected cell otherwise. Navigation keys run last.
    pub fn update<I: InputState>(&mut self, input: &mut I) -> Result<(), EditError> {
        if input.take_key(Key::Escape) {
            self.cancel();
        }
        let Some(world) = &self.world else {
            return Ok(());
        };
        let dims = *world.dims();
        let layout = self.config.layout;
        let pointer = input.pointer();

        if self.highlighted.container() != self.selected.container()
            || self.highlighted.local_z != self.selected.local_z
        {
            self.highlighted = self.selected;
        }
        self.highlighted = update_position(&dims, &self.highlighted, pointer, &layout);

        if input.is_down(MouseButton::Primary) {
            self.selected = update_position(&dims, &self.selected, pointer, &layout);
        }
        let extent = GridExtent::of(&dims, self.selected.level);
        let on_grid = pixel_to_grid_cell(pointer, extent, &layout).is_some();
        if input.take_click(MouseButton::Primary) && on_grid {
            match self.mode {
                mode if mode.captures() => {
                    if self.anchor.is_some() {
                        self.finish_selection(self.selected)?;
                    } else {
                        self.begin_selection(self.selected);
                    }
                }
                EditMode::Paste => {
                    self.paste_pending(self.selected)?;
                }
                _ => {}
            }
        }

        for (fired, channel) in [
            (input.take_click(MouseButton::Secondary), Channel::Glyph),
            (input.take_key(Key::F), Channel::Foreground),
            (input.take_key(Key::B), Channel::Background),
        ] {
            if !fired {
                continue;
            }
            let edit = self.edit_for(channel);
            if self.mode == EditMode::Select && self.pending.is_some() {
                self.apply_pending(edit)?;
            } else {
                self.paint(edit)?;
            }
        }

        if input.take_key(Key::PageUp) {
            self.raise_z();
        }
        if input.take_key(Key::PageDown) {
            self.lower_z();
        }
        if input.take_key(Key::Enter) {
            self.descend()?;
        }
        if input.take_key(Key::Backspace) {
            self.ascend();
        }
        Ok(())
    }

    // ── Drawing ─────────────────────────────────────────────────

    /// Draw the grid of the selected level: each visible cell's glyph,
    /// then its outline. Returns the number of cells drawn.
    pub fn draw<C: Canvas>(&self, canvas: &mut C) -> usize {
        let Some(world) = &self.world else {
            return 0;
        };
        let level = self.selected.level;
        let extent = GridExtent::of(world.dims(), level);
        let container = self.selected.container();
        let mut drawn = 0;
        for i in 0..extent.len() {
            let Ok(cell) = extent.cell_of(i) else {
                continue;
            };
            let index = cell_index(level, cell, self.selected.local_z, extent);
            let rect = cell_rect(cell, extent, &self.config.layout);
            if let Ok(tile) = world.tile_at(container, index) {
                canvas.draw_glyph(rect, tile.glyph, tile.fg, tile.bg);
            }
            let outline = if index == self.selected.active_index() {
                Rgba::SELECTED
            } else if index == self.highlighted.active_index() {
                Rgba::HIGHLIGHTED
            } else {
                Rgba::GRID
            };
            canvas.draw_rect(rect, outline);
            drawn += 1;
        }
        drawn
    }
}

impl<S: ArraySource> Drop for EditorSession<S> {
    fn drop(&mut self) {
        self.close_world();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyphmap_core::GridCell;

    fn session() -> EditorSession {
        let mut s = EditorSession::new(EditorConfig::default()).unwrap();
        s.new_world(Dimensions::new(3, 3, 2, 2, 2, 2, 4, 4, 2)).unwrap();
        s
    }

    fn cell(level: Level, col: u16, row: u16) -> Position {
        let mut pos = Position {
            level,
            grid: GridCell::new(col, row),
            ..Position::origin()
        };
        pos.set_active_index(col as usize * 3 + row as usize);
        pos
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut cfg = EditorConfig::default();
        cfg.layout.cell_width = -1;
        assert!(EditorSession::new(cfg).is_err());
    }

    #[test]
    fn operations_without_world_fail() {
        let mut s = EditorSession::new(EditorConfig::default()).unwrap();
        assert!(matches!(s.paint(MassEdit::Glyph(1)), Err(EditError::NoWorld)));
        assert!(matches!(s.descend(), Err(EditError::NoWorld)));
        assert!(!s.close_world());
    }

    #[test]
    fn copy_switches_to_paste_and_paste_consumes() {
        let mut s = session();
        s.set_mode(EditMode::Copy);
        s.begin_selection(cell(Level::World, 0, 0));
        s.finish_selection(cell(Level::World, 1, 0)).unwrap();
        assert_eq!(s.mode(), EditMode::Paste);
        assert_eq!(s.pending().map(SelectionBuffer::len), Some(2));

        assert_eq!(s.paste_pending(cell(Level::World, 0, 2)).unwrap(), 2);
        assert!(s.pending().is_none());
        assert_eq!(s.mode(), EditMode::None);
        assert!(matches!(
            s.paste_pending(cell(Level::World, 0, 0)),
            Err(EditError::NoPendingBuffer)
        ));
    }

    #[test]
    fn mass_change_applies_and_resets() {
        let mut s = session();
        s.select_color(7);
        s.set_mass_channel(Channel::Foreground);
        s.set_mode(EditMode::MassChange);
        s.begin_selection(cell(Level::World, 0, 0));
        s.finish_selection(cell(Level::World, 2, 2)).unwrap();
        assert_eq!(s.mode(), EditMode::None);
        assert!(s.pending().is_none());
        assert!(s.world().unwrap().cells().iter().all(|c| c.tile.fg == 7));
    }

    #[test]
    fn leaving_paste_discards_buffer() {
        let mut s = session();
        s.set_mode(EditMode::Copy);
        s.finish_selection(cell(Level::World, 1, 1)).unwrap();
        assert!(s.pending().is_some());
        s.set_mode(EditMode::Brush);
        assert!(s.pending().is_none());
    }

    #[test]
    fn descend_materializes_once() {
        let mut s = session();
        assert!(!s.world().unwrap().is_materialized(0));
        assert!(s.descend().unwrap());
        assert!(s.world().unwrap().is_materialized(0));
        assert_eq!(s.selected().level, Level::Realm);
        assert!(s.descend().unwrap());
        assert!(s.descend().unwrap());
        assert!(!s.descend().unwrap());
        assert_eq!(s.selected().level, Level::Local);
        while s.ascend() {}
        assert_eq!(s.selected().level, Level::World);
    }

    #[test]
    fn z_change_follows_grid_cell() {
        let mut s = session();
        for _ in 0..3 {
            s.descend().unwrap();
        }
        s.selected.grid = GridCell::new(1, 2);
        s.raise_z();
        assert_eq!(s.selected().local_z, 1);
        assert_eq!(s.selected().local_index, flatten3(1, 2, 1, 4, 4));
        s.raise_z();
        assert_eq!(s.selected().local_z, 1);
        s.lower_z();
        assert_eq!(s.selected().local_index, flatten3(1, 2, 0, 4, 4));
    }
}
