//! "Add New Chart" modal overlay.
//!
//! Renders the chart draft as a centered form: type selector, data source,
//! axis titles and one row per axis pair. The focused field is highlighted
//! and the last validation failure is shown in red below the fields.

use crate::form::{Axis, ChartDraft, FormField};
use crate::charts::ChartKind;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Modal title.
pub const FORM_TITLE: &str = " Add New Chart ";

/// Key hints shown at the bottom of the form.
pub const FORM_HINTS: &str =
    "Tab: next  ←/→: type  Ctrl-N: add point  Ctrl-D: remove point  Enter: save  Esc: cancel";

/// One-line notice drawn instead of the modal when the terminal is too small.
pub const FORM_TOO_SMALL_TEXT: &str = "Form open: enlarge terminal or press Esc to cancel";

const LABEL_WIDTH: usize = 13;

fn field_style(focused: bool) -> Style {
    if focused {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    }
}

fn text_field<'a>(label: &str, value: &str, focused: bool) -> Line<'a> {
    let shown = if focused {
        format!("{value}_")
    } else if value.is_empty() {
        " ".to_string()
    } else {
        value.to_string()
    };
    Line::from(vec![
        Span::raw(format!("{label:<LABEL_WIDTH$}")),
        Span::styled(shown, field_style(focused)),
    ])
}

fn kind_selector<'a>(selected: ChartKind, focused: bool) -> Line<'a> {
    let mut spans = vec![Span::raw(format!("{:<LABEL_WIDTH$}", "Type"))];
    for kind in ChartKind::ALL {
        let style = if kind == selected {
            field_style(focused).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let text = if kind == selected {
            format!("({})", kind.label())
        } else {
            format!(" {} ", kind.label())
        };
        spans.push(Span::styled(text, style));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

/// Builds the form's lines for `draft`.
pub fn form_lines(draft: &ChartDraft) -> Vec<Line<'static>> {
    let focus = draft.focus;
    let mut lines = vec![
        kind_selector(draft.kind, focus == FormField::Kind),
        text_field("Data source", &draft.data_source, focus == FormField::DataSource),
        text_field("X axis title", &draft.axis_titles.x, focus == FormField::XTitle),
        text_field("Y axis title", &draft.axis_titles.y, focus == FormField::YTitle),
        Line::from(""),
        Line::from(Span::styled(
            "Data points",
            Style::default().add_modifier(Modifier::UNDERLINED),
        )),
    ];
    if draft.pairs.is_empty() {
        lines.push(Line::from(Span::styled(
            "  (none, press Ctrl-N)",
            Style::default().fg(Color::DarkGray),
        )));
    }
    for (i, pair) in draft.pairs.iter().enumerate() {
        let x_focused = focus == FormField::Pair(i, Axis::X);
        let y_focused = focus == FormField::Pair(i, Axis::Y);
        let show = |value: &str, focused: bool| {
            if focused {
                format!("{value}_")
            } else if value.is_empty() {
                "…".to_string()
            } else {
                value.to_string()
            }
        };
        lines.push(Line::from(vec![
            Span::raw(format!("{:>3}. x: ", i + 1)),
            Span::styled(show(&pair.x, x_focused), field_style(x_focused)),
            Span::raw("  y: "),
            Span::styled(show(&pair.y, y_focused), field_style(y_focused)),
        ]));
    }
    if let Some(error) = &draft.error {
        lines.push(Line::from(""));
        for issue in &error.issues {
            lines.push(Line::from(Span::styled(
                format!("✗ {issue}"),
                Style::default().fg(Color::Red),
            )));
        }
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        FORM_HINTS,
        Style::default().fg(Color::DarkGray),
    )));
    lines
}

/// Renders the form modal centered in `area`.
pub fn render_form(frame: &mut Frame, area: Rect, draft: &ChartDraft) {
    let lines = form_lines(draft);
    let modal_width = 64u16.min(area.width.saturating_sub(2));
    let wanted = lines.len() as u16 + 4;
    let modal_height = wanted.min(area.height.saturating_sub(2));
    if modal_width < 20 || modal_height < 5 {
        render_too_small(frame, area);
        return;
    }

    let x = area.x + (area.width.saturating_sub(modal_width)) / 2;
    let y = area.y + (area.height.saturating_sub(modal_height)) / 2;
    let modal_area = Rect::new(x, y, modal_width, modal_height);

    frame.render_widget(Clear, modal_area);
    let block = Block::default()
        .title(FORM_TITLE)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(modal_area);
    frame.render_widget(block, modal_area);

    // Keep the focused pair visible when the list is taller than the modal.
    let focus_line = match draft.focus {
        FormField::Pair(i, _) => 6 + i as u16,
        _ => 0,
    };
    let scroll = focus_line.saturating_sub(inner.height.saturating_sub(1));
    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).scroll((scroll, 0)),
        inner,
    );
}

/// Keys still reach the form, so say so on the middle row.
fn render_too_small(frame: &mut Frame, area: Rect) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let row = Rect::new(area.x, area.y + area.height / 2, area.width, 1);
    frame.render_widget(Clear, row);
    frame.render_widget(
        Paragraph::new(FORM_TOO_SMALL_TEXT).style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        row,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{ChartForm, FormEdit};
    use crate::tui::test_utils::{find_row_with_text, test_terminal};

    fn open_form() -> ChartForm {
        let mut form = ChartForm::new();
        form.open();
        form
    }

    fn draw(draft: &ChartDraft) -> ratatui::buffer::Buffer {
        let mut terminal = test_terminal(80, 30);
        terminal
            .draw(|frame| render_form(frame, frame.area(), draft))
            .expect("draw failed");
        terminal.backend().buffer().clone()
    }

    #[test]
    fn form_shows_all_fields() {
        let form = open_form();
        let buffer = draw(form.draft());
        assert!(find_row_with_text(&buffer, "Add New Chart").is_some());
        assert!(find_row_with_text(&buffer, "(Bar)").is_some());
        assert!(find_row_with_text(&buffer, "Data source").is_some());
        assert!(find_row_with_text(&buffer, "X axis title").is_some());
        assert!(find_row_with_text(&buffer, "1. x:").is_some());
        assert!(find_row_with_text(&buffer, "2. x:").is_none());
    }

    #[test]
    fn form_shows_typed_values_and_pairs() {
        let mut form = open_form();
        form.apply(FormEdit::SetDataSource("sales".into()));
        form.apply(FormEdit::SetKind(ChartKind::Pie));
        form.apply(FormEdit::AddPair);
        form.apply(FormEdit::SetPair {
            index: 1,
            axis: Axis::X,
            value: "Feb".into(),
        });
        let buffer = draw(form.draft());
        assert!(find_row_with_text(&buffer, "(Pie)").is_some());
        assert!(find_row_with_text(&buffer, "sales").is_some());
        assert!(find_row_with_text(&buffer, "2. x: Feb").is_some());
    }

    #[test]
    fn validation_issues_are_listed() {
        let mut form = open_form();
        let err = form.validate().expect_err("blank form");
        form.reject(err);
        let buffer = draw(form.draft());
        assert!(find_row_with_text(&buffer, "✗ data source is required").is_some());
        assert!(find_row_with_text(&buffer, "point 1: x label is required").is_some());
    }

    #[test]
    fn focused_field_is_highlighted() {
        let mut form = open_form();
        form.apply(FormEdit::Focus(FormField::DataSource));
        let lines = form_lines(form.draft());
        let value_span = &lines[1].spans[1];
        assert_eq!(value_span.style.bg, Some(Color::Yellow));
        assert_eq!(value_span.content, "_");
    }

    #[test]
    fn tiny_area_shows_notice_instead_of_modal() {
        let form = open_form();
        let mut terminal = test_terminal(18, 4);
        terminal
            .draw(|frame| render_form(frame, frame.area(), form.draft()))
            .expect("draw failed");
        let buffer = terminal.backend().buffer();
        assert!(find_row_with_text(buffer, "Add New Chart").is_none());
        assert_eq!(find_row_with_text(buffer, "Form open"), Some(2));
    }

    #[test]
    fn notice_fits_a_single_cell() {
        let form = open_form();
        let mut terminal = test_terminal(1, 1);
        terminal
            .draw(|frame| render_form(frame, frame.area(), form.draft()))
            .expect("draw failed");
        assert_eq!(terminal.backend().buffer()[(0, 0)].symbol(), "F");
    }
}
