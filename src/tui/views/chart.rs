//! Chart widget drawing.
//!
//! Turns a [`ChartView`] into ratatui widgets: `BarChart` for bars, `Chart`
//! with a line dataset for lines, and labeled proportional bars for pies.
//! A chart whose values cannot be parsed draws its error instead, leaving
//! neighbouring cards alone.

use crate::charts::{render_chart, CartesianPoint, ChartDefinition, ChartView, PieSlice};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Bar, BarChart, BarGroup, Chart, Dataset, GraphType, Paragraph, Wrap},
    Frame,
};

/// Series colors: blue, green, amber, red.
pub const SERIES_COLORS: [Color; 4] = [
    Color::Rgb(0x3b, 0x82, 0xf6),
    Color::Rgb(0x10, 0xb9, 0x81),
    Color::Rgb(0xf5, 0x9e, 0x0b),
    Color::Rgb(0xef, 0x44, 0x44),
];

/// Text shown in a chart card with no points.
pub const EMPTY_CHART_TEXT: &str = "No data yet";

/// Height of the tallest bar in `BarChart` units. Every bar is scaled
/// against the chart's largest value, so heights stay in `0..=BAR_RESOLUTION`
/// whatever the magnitude of the data.
const BAR_RESOLUTION: f64 = 10_000.0;

/// Draws `chart` into `area` (the card's inner area).
pub fn render_chart_widget(frame: &mut Frame, area: Rect, chart: &ChartDefinition) {
    match render_chart(chart) {
        Ok(ChartView::Empty) => render_empty(frame, area),
        Ok(ChartView::Bar { titles, points }) => render_bar(frame, area, &titles, &points),
        Ok(ChartView::Line { titles, points }) => render_line(frame, area, &titles, &points),
        Ok(ChartView::Pie(slices)) => render_pie(frame, area, &slices),
        Err(e) => {
            tracing::debug!(chart = %chart.id, error = %e, "chart cannot be drawn");
            let paragraph = Paragraph::new(vec![
                Line::from(Span::styled(
                    "Cannot draw chart",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(e.to_string(), Style::default().fg(Color::Red))),
            ])
            .wrap(Wrap { trim: true });
            frame.render_widget(paragraph, area);
        }
    }
}

fn render_empty(frame: &mut Frame, area: Rect) {
    let y = area.y + area.height / 2;
    let line_area = Rect::new(area.x, y.min(area.bottom().saturating_sub(1)), area.width, 1);
    let paragraph = Paragraph::new(EMPTY_CHART_TEXT)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, line_area);
}

/// Splits off one line each for the y title (top) and x title (bottom) when
/// they are set. Returns the remaining plot area.
fn with_axis_titles(frame: &mut Frame, area: Rect, titles: &(String, String)) -> Rect {
    let (x_title, y_title) = titles;
    let [top, plot, bottom] = Layout::vertical([
        Constraint::Length(u16::from(!y_title.is_empty())),
        Constraint::Min(0),
        Constraint::Length(u16::from(!x_title.is_empty())),
    ])
    .areas(area);
    let title_style = Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC);
    if !y_title.is_empty() {
        frame.render_widget(Paragraph::new(y_title.as_str()).style(title_style), top);
    }
    if !x_title.is_empty() {
        frame.render_widget(
            Paragraph::new(x_title.as_str())
                .style(title_style)
                .alignment(Alignment::Right),
            bottom,
        );
    }
    plot
}

fn format_value(value: f64) -> String {
    if value.abs() >= 1e15 {
        format!("{value:.3e}")
    } else if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value:.2}")
    }
}

/// `value` as a bar height relative to `max`. Values are non-negative.
fn bar_height(value: f64, max: f64) -> u64 {
    if max > 0.0 {
        ((value / max).clamp(0.0, 1.0) * BAR_RESOLUTION).round() as u64
    } else {
        0
    }
}

fn render_bar(frame: &mut Frame, area: Rect, titles: &(String, String), points: &[CartesianPoint]) {
    let plot = with_axis_titles(frame, area, titles);
    let count = points.len() as u16;
    let gap = 1;
    let bar_width = (plot.width.saturating_sub(count.saturating_sub(1) * gap) / count.max(1)).max(1);
    let max = points.iter().map(|p| p.value).fold(0.0, f64::max);
    let bars: Vec<Bar> = points
        .iter()
        .map(|p| {
            Bar::default()
                .value(bar_height(p.value, max))
                .text_value(format_value(p.value))
                .label(Line::from(p.label.clone()))
                .style(Style::default().fg(SERIES_COLORS[1]))
        })
        .collect();
    let chart = BarChart::default()
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(gap)
        .value_style(Style::default().fg(Color::Black).bg(SERIES_COLORS[1]));
    frame.render_widget(chart, plot);
}

fn bounds(points: &[CartesianPoint]) -> [f64; 2] {
    let min = points.iter().map(|p| p.value).fold(f64::INFINITY, f64::min);
    let max = points.iter().map(|p| p.value).fold(f64::NEG_INFINITY, f64::max);
    if (max - min).abs() < f64::EPSILON {
        [min - 1.0, max + 1.0]
    } else {
        [min, max]
    }
}

fn render_line(frame: &mut Frame, area: Rect, titles: &(String, String), points: &[CartesianPoint]) {
    let data: Vec<(f64, f64)> = points
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.value))
        .collect();
    let [y_min, y_max] = bounds(points);
    let x_max = (points.len().saturating_sub(1)).max(1) as f64;
    let x_labels: Vec<Line> = match (points.first(), points.last()) {
        (Some(first), Some(last)) if points.len() > 1 => {
            vec![Line::from(first.label.clone()), Line::from(last.label.clone())]
        }
        (Some(only), _) => vec![Line::from(only.label.clone())],
        _ => Vec::new(),
    };

    let dataset = Dataset::default()
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(SERIES_COLORS[2]))
        .data(&data);
    let (x_title, y_title) = titles;
    let chart = Chart::new(vec![dataset])
        .x_axis(
            Axis::default()
                .title(x_title.as_str())
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title(y_title.as_str())
                .style(Style::default().fg(Color::Gray))
                .bounds([y_min, y_max])
                .labels([format_value(y_min), format_value(y_max)]),
        );
    frame.render_widget(chart, area);
}

/// One line per slice: colored swatch, label, share bar and percentage.
pub fn pie_lines(slices: &[PieSlice], width: u16) -> Vec<Line<'static>> {
    let label_width = slices
        .iter()
        .map(|s| s.label.chars().count())
        .max()
        .unwrap_or(0)
        .min(16);
    // swatch + space + label + space + bar + " 100.0%"
    let bar_room = (width as usize).saturating_sub(label_width + 10);
    slices
        .iter()
        .enumerate()
        .map(|(i, slice)| {
            let color = SERIES_COLORS[i % SERIES_COLORS.len()];
            let filled = ((slice.percent / 100.0) * bar_room as f64).round() as usize;
            let label: String = slice.label.chars().take(label_width).collect();
            Line::from(vec![
                Span::styled("■ ", Style::default().fg(color)),
                Span::raw(format!("{label:<label_width$} ")),
                Span::styled("█".repeat(filled.min(bar_room)), Style::default().fg(color)),
                Span::raw(format!(" {:.1}%", slice.percent)),
            ])
        })
        .collect()
}

fn render_pie(frame: &mut Frame, area: Rect, slices: &[PieSlice]) {
    frame.render_widget(Paragraph::new(pie_lines(slices, area.width)), area);
}
