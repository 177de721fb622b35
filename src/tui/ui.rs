//! Main rendering orchestration for the TUI dashboard.
//!
//! Provides the top-level `render_dashboard` function that composes the top
//! bar, the card grid, the footer and, while it is open, the creation form.

use crate::layout::grid::Viewport;
use crate::tui::app::App;
use crate::tui::views::card::{render_card, render_missing};
use crate::tui::views::form::render_form;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use std::time::Instant;

/// Header text displayed at the top of the dashboard.
pub const HEADER_TEXT: &str = "Movable Dashboard";

/// Label of the button that opens the creation form.
pub const ADD_CHART_TEXT: &str = "[a] Add New Chart";

/// Footer text showing available keybindings.
const FOOTER_TEXT: &str =
    "[Tab] Focus  [←↑↓→] Move  [Shift+←↑↓→] Resize  [PgUp/PgDn] Scroll  [b] Breakpoint  [q] Quit";

/// Shown when the active layout has no entries.
pub const EMPTY_GRID_TEXT: &str = "No widgets yet. Press [a] to add a chart.";

/// Version string shown in the header (right-aligned).
const VERSION_TEXT: &str = concat!("v", env!("CARGO_PKG_VERSION"));

/// Renders the full dashboard: top bar, grid, footer and form overlay.
///
/// Resolves the active breakpoint from the grid width (unless overridden),
/// clamps the scroll offset to the content and records the grid area in
/// `app` for mouse hit-testing.
pub fn render_dashboard(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    let [top, grid_area, footer] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    app.breakpoint = app.breakpoint_override.unwrap_or_else(|| {
        app.dashboard
            .layouts()
            .grid()
            .breakpoint_for_width(grid_area.width)
    });
    app.grid_area = Some(grid_area);
    if let Some(viewport) = app.viewport() {
        let max = viewport.max_scroll(&app.dashboard.layout(app.breakpoint));
        app.scroll = app.scroll.min(max);
    }

    let app: &App = app;
    render_top_bar(frame, top, app);
    if let Some(viewport) = app.viewport() {
        render_grid(frame, viewport, app);
    }
    render_footer(frame, footer, app);

    if app.dashboard.form().is_open() {
        render_form(frame, area, app.dashboard.form().draft());
    }
}

fn render_top_bar(frame: &mut Frame, area: Rect, app: &App) {
    let fixed = if app.breakpoint_override.is_some() {
        " (fixed)"
    } else {
        ""
    };
    let breakpoint = format!("{} · {} cols{fixed}  ", app.breakpoint, app.columns());

    let left = Line::from(vec![
        Span::styled(
            HEADER_TEXT,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            ADD_CHART_TEXT,
            Style::default().fg(Color::Black).bg(Color::Green),
        ),
    ]);
    let right = Line::from(vec![
        Span::styled(breakpoint, Style::default().fg(Color::Yellow)),
        Span::styled(VERSION_TEXT, Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(left), area);
    // Right side only when it does not cover the left side
    let needed = (left_width() + right.width() + 1) as u16;
    if area.width >= needed {
        frame.render_widget(Paragraph::new(right).alignment(Alignment::Right), area);
    }
}

fn left_width() -> usize {
    HEADER_TEXT.chars().count() + 2 + ADD_CHART_TEXT.chars().count()
}

fn render_grid(frame: &mut Frame, viewport: Viewport, app: &App) {
    let layout = app.dashboard.layout(app.breakpoint);
    if layout.is_empty() {
        let y = viewport.area.y + viewport.area.height / 2;
        let line = Rect::new(viewport.area.x, y, viewport.area.width, 1.min(viewport.area.height));
        frame.render_widget(
            Paragraph::new(EMPTY_GRID_TEXT)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            line,
        );
        return;
    }

    for cell in viewport.cell_rects(&layout) {
        let focused = app.focused.as_deref() == Some(cell.id);
        match app.dashboard.widget(cell.id) {
            Some(widget) => render_card(frame, cell.rect, widget, focused),
            None => render_missing(frame, cell.rect, cell.id),
        }
    }
}

fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let line = match &app.status_message {
        Some((msg, expiry)) if Instant::now() < *expiry => {
            Line::from(Span::styled(msg.clone(), Style::default().fg(Color::Yellow)))
        }
        _ => {
            let mut spans = vec![Span::styled(FOOTER_TEXT, Style::default().fg(Color::DarkGray))];
            if let Some(viewport) = app.viewport() {
                let max = viewport.max_scroll(&app.dashboard.layout(app.breakpoint));
                if max > 0 {
                    spans.push(Span::styled(
                        format!("  ↕ {}/{}", app.scroll, max),
                        Style::default().fg(Color::DarkGray),
                    ));
                }
            }
            Line::from(spans)
        }
    };
    frame.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::dashboard::{Dashboard, DashboardAction};
    use crate::layout::Breakpoint;
    use crate::tui::test_utils::{
        assert_fg_color, assert_text_fg_in_row, find_col_in_row, find_row_with_text, make_app,
        render_app_to_buffer,
    };
    use std::time::Duration;

    #[test]
    fn top_bar_shows_title_button_and_breakpoint() {
        let mut app = make_app();
        let buffer = render_app_to_buffer(&mut app, 120, 40);
        assert_eq!(find_row_with_text(&buffer, HEADER_TEXT), Some(0));
        assert_eq!(find_row_with_text(&buffer, ADD_CHART_TEXT), Some(0));
        assert_eq!(find_row_with_text(&buffer, "lg · 12 cols"), Some(0));
        assert_text_fg_in_row(&buffer, 0, HEADER_TEXT, Color::Cyan);
    }

    #[test]
    fn seeded_cards_and_charts_render() {
        let mut app = make_app();
        let buffer = render_app_to_buffer(&mut app, 120, 40);
        for title in [
            "Sales Overview",
            "User Activity",
            "Recent Orders",
            "Top Products",
            "Quick Actions",
            "Sales and Profit",
            "Customer Trends",
            "Product Distribution",
        ] {
            assert!(find_row_with_text(&buffer, title).is_some(), "{title} missing");
        }
        // a and b share the first grid row, side by side
        let row = find_row_with_text(&buffer, "Sales Overview").expect("a");
        assert_eq!(row, 1);
        assert!(find_col_in_row(&buffer, 1, "User Activity").expect("b") >= 60);
    }

    #[test]
    fn narrow_terminal_uses_smaller_breakpoint() {
        let mut app = make_app();
        let buffer = render_app_to_buffer(&mut app, 60, 40);
        assert_eq!(app.breakpoint, Breakpoint::Xs);
        assert_eq!(find_row_with_text(&buffer, "xs · 4 cols"), Some(0));
        assert!(find_row_with_text(&buffer, "Sales Overview").is_some());
    }

    #[test]
    fn breakpoint_override_wins_over_width() {
        let dashboard = Dashboard::from_config(&Config::default()).expect("default config");
        let mut app = App::new(dashboard, Duration::from_millis(250), Some(Breakpoint::Sm));
        let buffer = render_app_to_buffer(&mut app, 120, 40);
        assert_eq!(app.breakpoint, Breakpoint::Sm);
        assert!(find_row_with_text(&buffer, "sm · 6 cols (fixed)").is_some());
    }

    #[test]
    fn focused_card_border_is_cyan() {
        let mut app = make_app();
        app.focused = Some("a".to_string());
        let buffer = render_app_to_buffer(&mut app, 120, 40);
        assert_fg_color(&buffer, 0, 1, Color::Cyan);
        assert_fg_color(&buffer, 60, 1, Color::DarkGray);
    }

    #[test]
    fn scroll_is_clamped_to_content() {
        let mut app = make_app();
        app.scroll = 999;
        render_app_to_buffer(&mut app, 120, 40);
        assert_eq!(app.scroll, 2);
    }

    #[test]
    fn scrolled_grid_hides_top_rows() {
        let mut app = make_app();
        render_app_to_buffer(&mut app, 120, 20);
        app.scroll = 8;
        let buffer = render_app_to_buffer(&mut app, 120, 20);
        assert!(find_row_with_text(&buffer, "Sales Overview").is_none());
        assert!(find_row_with_text(&buffer, "Recent Orders").is_some());
        assert!(find_row_with_text(&buffer, "↕ 8/").is_some());
    }

    #[test]
    fn status_message_replaces_hints() {
        let mut app = make_app();
        app.set_status("Added chart-1");
        let buffer = render_app_to_buffer(&mut app, 120, 40);
        assert_eq!(find_row_with_text(&buffer, "Added chart-1"), Some(39));
        assert!(find_row_with_text(&buffer, "[Tab] Focus").is_none());
    }

    #[test]
    fn form_overlay_is_drawn_when_open() {
        let mut app = make_app();
        app.dispatch(DashboardAction::OpenForm);
        let buffer = render_app_to_buffer(&mut app, 120, 40);
        assert!(find_row_with_text(&buffer, "Data source").is_some());
        assert!(find_row_with_text(&buffer, "X axis title").is_some());
    }

    #[test]
    fn chart_parse_error_stays_in_its_card() {
        let mut config = Config::default();
        let pie = config
            .charts
            .iter_mut()
            .find(|c| c.id == "h")
            .expect("seeded pie");
        pie.points = vec![crate::charts::DataPoint::new("A", "abc")];
        let dashboard = Dashboard::from_config(&config).expect("config");
        let mut app = App::new(dashboard, Duration::from_millis(250), None);
        let buffer = render_app_to_buffer(&mut app, 120, 40);

        let error_row = find_row_with_text(&buffer, "Cannot draw chart").expect("error shown");
        assert!(error_row > 28, "inside h, which starts at terminal row 29");
        assert!(find_row_with_text(&buffer, "Sales Overview").is_some());
        assert!(find_row_with_text(&buffer, "Customer Trends").is_some());
    }

    #[test]
    fn huge_submitted_bar_value_renders_with_the_rest_of_the_dashboard() {
        use crate::form::{Axis, FormEdit};

        let mut app = make_app();
        app.dispatch(DashboardAction::OpenForm);
        for edit in [
            FormEdit::SetDataSource("sales".into()),
            FormEdit::SetPair {
                index: 0,
                axis: Axis::X,
                value: "Jan".into(),
            },
            FormEdit::SetPair {
                index: 0,
                axis: Axis::Y,
                value: "1e16".into(),
            },
        ] {
            app.dispatch(DashboardAction::Edit(edit));
        }
        let outcome = app.dispatch(DashboardAction::SubmitForm);
        assert!(matches!(outcome, crate::dashboard::Outcome::ChartAdded(_)));

        let buffer = render_app_to_buffer(&mut app, 120, 60);
        assert!(find_row_with_text(&buffer, "Sales Bar Chart").is_some());
        assert!(find_row_with_text(&buffer, "Sales Overview").is_some());
    }

    #[test]
    fn unsupported_chart_type_renders_placeholder() {
        let mut config = Config::default();
        if let Some(chart) = config.charts.iter_mut().find(|c| c.id == "g") {
            chart.kind = "scatter".to_string();
        }
        let dashboard = Dashboard::from_config(&config).expect("config");
        let mut app = App::new(dashboard, Duration::from_millis(250), None);
        let buffer = render_app_to_buffer(&mut app, 120, 40);
        assert!(find_row_with_text(&buffer, "Unsupported chart type").is_some());
        assert!(find_row_with_text(&buffer, "Sales and Profit").is_some());
    }

    #[test]
    fn empty_layout_shows_hint() {
        let dashboard = Dashboard::from_parts(
            crate::layout::LayoutManager::new(Default::default()),
            Default::default(),
            Default::default(),
        );
        let mut app = App::new(dashboard, Duration::from_millis(250), None);
        let buffer = render_app_to_buffer(&mut app, 80, 20);
        assert!(find_row_with_text(&buffer, EMPTY_GRID_TEXT).is_some());
    }

    #[test]
    fn tiny_terminal_does_not_panic() {
        let mut app = make_app();
        app.dispatch(DashboardAction::OpenForm);
        for (w, h) in [(1, 1), (10, 2), (20, 3), (30, 8)] {
            render_app_to_buffer(&mut app, w, h);
        }
    }
}
