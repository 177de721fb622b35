//! Grid card drawing: a bordered, titled box around one widget.

use super::chart::render_chart_widget;
use crate::widgets::Widget;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

/// Draws a card for `widget` into `area`. A focused card gets a thick cyan
/// border.
pub fn render_card(frame: &mut Frame, area: Rect, widget: Widget<'_>, focused: bool) {
    let (border_style, border_type) = if focused {
        (
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            BorderType::Thick,
        )
    } else {
        (Style::default().fg(Color::DarkGray), BorderType::Rounded)
    };
    let block = Block::default()
        .title(Span::styled(
            format!(" {} ", widget.title()),
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(border_style);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    match widget {
        Widget::Card(card) => {
            let lines: Vec<Line> = card.body.lines().into_iter().map(Line::from).collect();
            frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
        }
        Widget::Chart(chart) => render_chart_widget(frame, inner, chart),
        Widget::Unsupported(chart) => {
            let paragraph = Paragraph::new(vec![
                Line::from(Span::styled(
                    "Unsupported chart type",
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                )),
                Line::from(format!("'{}' is not bar, line or pie", chart.type_name)),
            ])
            .wrap(Wrap { trim: true });
            frame.render_widget(paragraph, inner);
        }
    }
}

/// Draws a card for a layout entry that names no widget.
pub fn render_missing(frame: &mut Frame, area: Rect, id: &str) {
    let block = Block::default()
        .title(format!(" {id} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(
        Paragraph::new("Missing widget").style(Style::default().fg(Color::Red)),
        inner,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::test_utils::{assert_fg_color, find_row_with_text, row_text, test_terminal};
    use crate::widgets::{CardBody, StaticCard, UnsupportedChart};

    fn draw(widget: Widget<'_>, focused: bool) -> ratatui::buffer::Buffer {
        let mut terminal = test_terminal(40, 6);
        terminal
            .draw(|frame| render_card(frame, frame.area(), widget, focused))
            .expect("draw failed");
        terminal.backend().buffer().clone()
    }

    #[test]
    fn static_card_shows_title_and_lines() {
        let card = StaticCard::new(
            "d",
            "Top Products",
            CardBody::List {
                ordered: true,
                items: vec!["Product A".to_string(), "Product B".to_string()],
            },
        );
        let buffer = draw(Widget::Card(&card), false);
        assert!(row_text(&buffer, 0).contains("Top Products"));
        assert_eq!(find_row_with_text(&buffer, "1. Product A"), Some(1));
        assert_eq!(find_row_with_text(&buffer, "2. Product B"), Some(2));
    }

    #[test]
    fn focused_card_has_cyan_border() {
        let card = StaticCard::new("a", "Sales", CardBody::Text { lines: vec![] });
        let buffer = draw(Widget::Card(&card), true);
        assert_fg_color(&buffer, 0, 0, Color::Cyan);
        let buffer = draw(Widget::Card(&card), false);
        assert_fg_color(&buffer, 0, 0, Color::DarkGray);
    }

    #[test]
    fn unsupported_chart_shows_placeholder() {
        let chart = UnsupportedChart {
            id: "z".to_string(),
            title: "Odd".to_string(),
            type_name: "scatter".to_string(),
        };
        let buffer = draw(Widget::Unsupported(&chart), false);
        assert!(find_row_with_text(&buffer, "Unsupported chart type").is_some());
        assert!(find_row_with_text(&buffer, "scatter").is_some());
    }

    #[test]
    fn missing_widget_is_marked() {
        let mut terminal = test_terminal(20, 4);
        terminal
            .draw(|frame| render_missing(frame, frame.area(), "q"))
            .expect("draw failed");
        let buffer = terminal.backend().buffer();
        assert!(find_row_with_text(buffer, "Missing widget").is_some());
    }
}
