//! Shared test utilities for TUI testing with ratatui TestBackend.
//!
//! Provides helper functions for creating test terminals, extracting buffer
//! content, asserting colors, and building apps over the seeded dashboard.

#![cfg(test)]

use crate::config::Config;
use crate::dashboard::Dashboard;
use crate::tui::app::App;
use ratatui::{backend::TestBackend, buffer::Buffer, style::Color, Terminal};
use std::time::Duration;

/// Creates a Terminal with TestBackend at the specified dimensions.
pub fn test_terminal(width: u16, height: u16) -> Terminal<TestBackend> {
    let backend = TestBackend::new(width, height);
    Terminal::new(backend).expect("failed to create test terminal")
}

/// Extracts all text from a specific row in the buffer as a single String.
pub fn row_text(buffer: &Buffer, row: u16) -> String {
    let area = buffer.area();
    if row >= area.height {
        return String::new();
    }
    (0..area.width)
        .map(|col| {
            buffer
                .cell((col, row))
                .map(|cell| cell.symbol())
                .unwrap_or(" ")
        })
        .collect()
}

/// Checks if a specific row contains the given substring.
pub fn row_contains(buffer: &Buffer, row: u16, text: &str) -> bool {
    row_text(buffer, row).contains(text)
}

/// Finds the first row index that contains the given text, or None if not found.
pub fn find_row_with_text(buffer: &Buffer, text: &str) -> Option<u16> {
    let area = buffer.area();
    (0..area.height).find(|row| row_contains(buffer, *row, text))
}

/// Column (in cells) where `text` starts in `row`.
pub fn find_col_in_row(buffer: &Buffer, row: u16, text: &str) -> Option<u16> {
    let row_string = row_text(buffer, row);
    let byte = row_string.find(text)?;
    Some(row_string[..byte].chars().count() as u16)
}

/// Asserts that the cell at (col, row) has the specified foreground color.
pub fn assert_fg_color(buffer: &Buffer, col: u16, row: u16, color: Color) {
    let cell = buffer
        .cell((col, row))
        .unwrap_or_else(|| panic!("cell at ({}, {}) does not exist", col, row));
    assert_eq!(
        cell.fg, color,
        "expected fg color {:?} at ({}, {}), got {:?}",
        color, col, row, cell.fg
    );
}

/// Finds the first occurrence of `text` in the specified row and checks
/// if the first character of that text has the specified foreground color.
pub fn assert_text_fg_in_row(buffer: &Buffer, row: u16, text: &str, color: Color) {
    let col = find_col_in_row(buffer, row, text).unwrap_or_else(|| {
        panic!(
            "text '{}' not found in row {}: '{}'",
            text,
            row,
            row_text(buffer, row)
        )
    });
    assert_fg_color(buffer, col, row, color);
}

/// App over the seeded dashboard (default configuration).
pub fn make_app() -> App {
    let dashboard = Dashboard::from_config(&Config::default()).expect("default config is valid");
    App::new(dashboard, Duration::from_millis(250), None)
}

/// Renders the full dashboard to a buffer and returns the buffer for inspection.
pub fn render_app_to_buffer(app: &mut App, width: u16, height: u16) -> Buffer {
    let mut terminal = test_terminal(width, height);
    terminal
        .draw(|frame| {
            crate::tui::ui::render_dashboard(frame, app);
        })
        .expect("draw failed");
    terminal.backend().buffer().clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_has_requested_size() {
        let terminal = test_terminal(80, 24);
        let size = terminal.size().expect("should have size");
        assert_eq!(size.width, 80);
        assert_eq!(size.height, 24);
    }

    #[test]
    fn row_text_extracts_row_content() {
        let mut terminal = test_terminal(20, 5);
        terminal
            .draw(|frame| {
                let para = ratatui::widgets::Paragraph::new("Hello World");
                frame.render_widget(para, frame.area());
            })
            .expect("draw failed");
        let buffer = terminal.backend().buffer();
        assert!(row_text(buffer, 0).contains("Hello World"));
        assert_eq!(row_text(buffer, 9), "");
    }

    #[test]
    fn find_col_counts_cells_not_bytes() {
        let mut terminal = test_terminal(20, 1);
        terminal
            .draw(|frame| {
                let para = ratatui::widgets::Paragraph::new("■ ab");
                frame.render_widget(para, frame.area());
            })
            .expect("draw failed");
        let buffer = terminal.backend().buffer();
        assert_eq!(find_col_in_row(buffer, 0, "ab"), Some(2));
        assert_eq!(find_row_with_text(buffer, "zz"), None);
    }
}
