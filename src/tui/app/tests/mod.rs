pub(crate) use super::*;
pub(crate) use crate::layout::LayoutEntry;
pub(crate) use crate::tui::test_utils::{make_app, render_app_to_buffer};

mod basic;

/// Seeded app after one 120x40 render, so hit-testing and scrolling know
/// the grid area (columns 0..120, rows 1..39, 12 grid columns of 10 cells).
pub(crate) fn rendered_app() -> App {
    let mut app = make_app();
    render_app_to_buffer(&mut app, 120, 40);
    app
}

pub(crate) fn entry(app: &App, id: &str) -> LayoutEntry {
    app.dashboard
        .layout(app.breakpoint)
        .iter()
        .find(|e| e.id == id)
        .cloned()
        .unwrap_or_else(|| panic!("no layout entry '{id}'"))
}

pub(crate) fn assert_no_overlap(layout: &[LayoutEntry]) {
    for (i, a) in layout.iter().enumerate() {
        for b in layout.iter().skip(i + 1) {
            assert!(!a.collides(b), "{a:?} overlaps {b:?}");
        }
    }
}
