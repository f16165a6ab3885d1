//! Editing sessions driven by scripted input.

use glyphmap_arena::{SystemSource, WorldAllocator};
use glyphmap_core::{Dimensions, GridCell, Level};
use glyphmap_edit::{EditMode, EditorConfig, EditorSession, Key, MassEdit, MouseButton, Rgba};
use glyphmap_save::WorldPaths;
use glyphmap_space::{cell_rect, flatten2, GridExtent, GridLayout};
use glyphmap_test_utils::{CountingSource, RecordingCanvas, ScratchDir, ScriptedInput};

fn dims() -> Dimensions {
    Dimensions::new(3, 3, 2, 2, 2, 2, 4, 4, 2)
}

/// Pixel at the centre of `cell` in a grid of `w`×`h` under the default layout.
fn centre(w: u16, h: u16, col: u16, row: u16) -> (i32, i32) {
    let r = cell_rect(
        GridCell::new(col, row),
        GridExtent::new(w, h),
        &GridLayout::default(),
    );
    (r.x + r.w / 2, r.y + r.h / 2)
}

fn click_at(col: u16, row: u16) -> ScriptedInput {
    let (x, y) = centre(3, 3, col, row);
    ScriptedInput::new().at(x, y).click(MouseButton::Primary)
}

fn session() -> EditorSession<CountingSource> {
    let mut s = EditorSession::with_source(EditorConfig::default(), CountingSource::new()).unwrap();
    s.new_world(dims()).unwrap();
    s
}

#[test]
fn click_selects_and_right_click_paints() {
    let mut s = session();
    s.select_glyph(9);
    let mut input = click_at(1, 2).click(MouseButton::Secondary);
    s.update(&mut input).unwrap();
    assert!(input.drained());

    let index = flatten2(1, 2, 3);
    assert_eq!(s.selected().world_index, index);
    assert_eq!(s.world().unwrap().cells()[index].tile.glyph, 9);
}

#[test]
fn colour_keys_paint_foreground_and_background() {
    let mut s = session();
    s.select_color(3);
    let mut input = click_at(2, 0).press(Key::F);
    s.update(&mut input).unwrap();
    s.select_color(4);
    s.update(&mut ScriptedInput::new().press(Key::B)).unwrap();

    let tile = s.world().unwrap().cells()[flatten2(2, 0, 3)].tile;
    assert_eq!((tile.fg, tile.bg), (3, 4));
}

#[test]
fn pointer_moves_highlight_only() {
    let mut s = session();
    let (x, y) = centre(3, 3, 2, 1);
    s.update(&mut ScriptedInput::new().at(x, y)).unwrap();
    assert_eq!(s.highlighted().world_index, flatten2(2, 1, 3));
    assert_eq!(s.selected().world_index, 0);

    // off the grid: both stay
    s.update(&mut ScriptedInput::new().at(0, 0)).unwrap();
    assert_eq!(s.highlighted().world_index, flatten2(2, 1, 3));
}

#[test]
fn copy_then_paste_by_clicks() {
    let mut s = session();
    let glyph_at = |s: &EditorSession<CountingSource>, col, row| {
        s.world().unwrap().cells()[flatten2(col, row, 3)].tile.glyph
    };
    s.select_glyph(21);
    s.update(&mut click_at(0, 0).click(MouseButton::Secondary))
        .unwrap();

    s.set_mode(EditMode::Copy);
    s.update(&mut click_at(0, 0)).unwrap();
    assert!(s.anchor().is_some());
    s.update(&mut click_at(1, 1)).unwrap();
    assert_eq!(s.mode(), EditMode::Paste);
    assert_eq!(s.pending().map(|b| b.len()), Some(4));

    s.update(&mut click_at(2, 2)).unwrap();
    assert_eq!(s.mode(), EditMode::None);
    assert!(s.pending().is_none());
    assert_eq!(glyph_at(&s, 2, 2), 21);
}

#[test]
fn mass_change_by_clicks() {
    let mut s = session();
    s.select_glyph(5);
    s.set_mode(EditMode::MassChange);
    s.update(&mut click_at(2, 0)).unwrap();
    s.update(&mut click_at(1, 1)).unwrap();
    assert_eq!(s.mode(), EditMode::None);

    let world = s.world().unwrap();
    for col in 0..3 {
        for row in 0..3 {
            let inside = (1..=2).contains(&col) && row <= 1;
            let glyph = world.cells()[flatten2(col, row, 3)].tile.glyph;
            assert_eq!(glyph == 5, inside, "({col}, {row})");
        }
    }
}

#[test]
fn select_mode_applies_keys_to_whole_selection() {
    let mut s = session();
    s.select_color(12);
    s.set_mode(EditMode::Select);
    s.update(&mut click_at(0, 0)).unwrap();
    s.update(&mut click_at(0, 2)).unwrap();
    assert!(s.pending().is_some());

    s.update(&mut ScriptedInput::new().press(Key::B)).unwrap();
    assert!(s.pending().is_none());
    let cells = s.world().unwrap().cells();
    assert!((0..3).all(|row| cells[flatten2(0, row, 3)].tile.bg == 12));
    assert_ne!(cells[flatten2(1, 0, 3)].tile.bg, 12);
}

#[test]
fn escape_releases_pending_buffer_without_editing() {
    let mut s = session();
    let before = s.world().unwrap().clone();
    s.set_mode(EditMode::Copy);
    s.update(&mut click_at(0, 0)).unwrap();
    s.update(&mut click_at(2, 2)).unwrap();
    assert!(s.pending().is_some());

    s.update(&mut ScriptedInput::new().press(Key::Escape)).unwrap();
    assert_eq!(s.mode(), EditMode::None);
    assert!(s.pending().is_none());
    assert_eq!(s.world().unwrap(), &before);
}

#[test]
fn draw_outlines_every_visible_cell() {
    let mut s = session();
    let (x, y) = centre(3, 3, 2, 2);
    s.update(&mut ScriptedInput::new().at(x, y)).unwrap();

    let mut canvas = RecordingCanvas::new();
    assert_eq!(s.draw(&mut canvas), 9);
    let rects = canvas.rects();
    assert_eq!(rects.len(), 9);
    assert_eq!(canvas.glyphs().len(), 9);
    let count = |c: Rgba| rects.iter().filter(|(_, color)| *color == c).count();
    assert_eq!(count(Rgba::SELECTED), 1);
    assert_eq!(count(Rgba::HIGHLIGHTED), 1);
    assert_eq!(count(Rgba::GRID), 7);
    assert_eq!(rects[0].1, Rgba::SELECTED);
}

#[test]
fn keys_navigate_levels_and_planes() {
    let mut s = session();
    for _ in 0..3 {
        s.update(&mut ScriptedInput::new().press(Key::Enter)).unwrap();
    }
    assert_eq!(s.selected().level, Level::Local);
    assert!(s.world().unwrap().is_materialized(0));

    s.update(&mut ScriptedInput::new().press(Key::PageUp)).unwrap();
    assert_eq!(s.selected().local_z, 1);
    s.update(&mut ScriptedInput::new().press(Key::PageDown)).unwrap();
    assert_eq!(s.selected().local_z, 0);

    let mut canvas = RecordingCanvas::new();
    assert_eq!(s.draw(&mut canvas), 16);

    s.update(&mut ScriptedInput::new().press(Key::Backspace)).unwrap();
    assert_eq!(s.selected().level, Level::Region);
}

#[test]
fn ascend_selects_the_cell_it_left() {
    let mut s = session();
    s.update(&mut click_at(2, 1)).unwrap();
    s.descend().unwrap();
    assert!(s.ascend());
    assert_eq!(s.selected().grid, GridCell::new(2, 1));

    s.set_mode(EditMode::Select);
    let here = *s.selected();
    s.begin_selection(here);
    s.finish_selection(here).unwrap();
    assert_eq!(s.pending().unwrap().indices(), &[flatten2(2, 1, 3)]);
}

#[test]
fn closing_releases_every_array() {
    let mut s = session();
    s.descend().unwrap();
    s.ascend();
    s.update(&mut click_at(2, 2)).unwrap();
    s.descend().unwrap();
    assert!(s.source().live() > 0);
    assert!(s.close_world());
    assert_eq!(s.source().live(), 0);
    assert!(s.world().is_none());
}

#[test]
fn failed_new_world_keeps_current_one() {
    let mut s = EditorSession::with_source(
        EditorConfig::default(),
        CountingSource::fail_on_nth(2),
    )
    .unwrap();
    s.new_world(Dimensions::new(1, 1, 1, 1, 1, 1, 1, 1, 1)).unwrap();
    let before = s.world().unwrap().clone();
    assert!(s.new_world(dims()).is_err());
    assert_eq!(s.world().unwrap(), &before);
    assert!(s.close_world());
    assert_eq!(s.source().live(), 0);
}

#[test]
fn save_then_load_through_sessions() {
    let dir = ScratchDir::new("session-save");
    let config = EditorConfig {
        save_root: dir.join("world"),
        ..EditorConfig::default()
    };
    let paths = config.paths();

    let mut s = EditorSession::new(config.clone()).unwrap();
    s.new_world(dims()).unwrap();
    s.descend().unwrap();
    s.descend().unwrap();
    s.paint(MassEdit::Glyph(77)).unwrap();
    s.save(&paths).unwrap();
    assert!(paths.has_region_file(0));
    assert!(!paths.has_region_file(1));

    // cells are read from the save when first entered
    let mut t = EditorSession::new(config).unwrap();
    t.load(&paths).unwrap();
    assert_eq!(t.origin(), Some(&paths));
    assert!(!t.world().unwrap().is_materialized(0));
    t.descend().unwrap();
    assert_eq!(t.world(), s.world());

    // saving elsewhere carries cells that were never entered
    let mut u = EditorSession::new(EditorConfig::default()).unwrap();
    u.load(&paths).unwrap();
    let copy = WorldPaths::new(dir.join("copy"));
    u.save(&copy).unwrap();
    assert!(copy.has_region_file(0));
    assert_eq!(u.origin(), Some(&copy));
    assert_eq!(u.world(), s.world());
}

#[test]
fn new_world_ignores_saves_under_save_root() {
    let dir = ScratchDir::new("session-fresh");
    let config = EditorConfig {
        save_root: dir.join("world"),
        ..EditorConfig::default()
    };
    let mut s = EditorSession::new(config.clone()).unwrap();
    s.new_world(dims()).unwrap();
    s.descend().unwrap();
    s.descend().unwrap();
    s.paint(MassEdit::Glyph(77)).unwrap();
    s.save(&config.paths()).unwrap();

    // same extents: template tiles, not the saved ones
    let mut t = EditorSession::new(config.clone()).unwrap();
    t.new_world(dims()).unwrap();
    assert!(t.origin().is_none());
    t.descend().unwrap();
    let mut fresh = WorldAllocator::allocate_shallow(dims(), &mut SystemSource).unwrap();
    WorldAllocator::materialize(&mut fresh, 0, &mut SystemSource).unwrap();
    assert_eq!(t.world(), Some(&fresh));

    // other extents: still enterable
    let mut u = EditorSession::new(config).unwrap();
    u.new_world(Dimensions::uniform(2, 3, 1)).unwrap();
    assert!(u.descend().unwrap());
    assert!(u.world().unwrap().is_materialized(0));
}

#[test]
fn new_world_forgets_previous_origin() {
    let dir = ScratchDir::new("session-origin");
    let paths = WorldPaths::new(dir.join("world"));
    let mut s = EditorSession::new(EditorConfig::default()).unwrap();
    s.new_world(dims()).unwrap();
    s.descend().unwrap();
    s.descend().unwrap();
    s.paint(MassEdit::Glyph(77)).unwrap();
    s.save(&paths).unwrap();
    assert_eq!(s.origin(), Some(&paths));

    s.new_world(dims()).unwrap();
    assert!(s.origin().is_none());
    s.descend().unwrap();
    assert_ne!(s.world().unwrap().region_cells(0, 0).unwrap()[0].tile.glyph, 77);
}
