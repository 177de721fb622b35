//! Shapes a [`ChartDefinition`] into the records a chart widget draws.
//!
//! Rendering is a pure dispatch on [`ChartKind`]. Values are parsed here so a
//! bad point fails only the chart that owns it.

use super::{ChartDefinition, ChartKind, DataPoint};
use thiserror::Error;

/// A point on a bar or line chart.
#[derive(Debug, Clone, PartialEq)]
pub struct CartesianPoint {
    /// Category label on the x axis.
    pub label: String,
    /// Parsed value.
    pub value: f64,
}

/// One slice of a pie chart.
#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    /// Display text.
    pub label: String,
    /// Parsed value.
    pub value: f64,
    /// Share of the total in percent (0 when the total is 0).
    pub percent: f64,
}

/// Render-ready view of a chart.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartView {
    /// The chart has no points; draw a placeholder instead of a canvas.
    Empty,
    /// Bar chart with axis titles.
    Bar {
        /// Axis titles as `(x, y)`.
        titles: (String, String),
        /// Bars in order.
        points: Vec<CartesianPoint>,
    },
    /// Line chart with axis titles.
    Line {
        /// Axis titles as `(x, y)`.
        titles: (String, String),
        /// Points in order.
        points: Vec<CartesianPoint>,
    },
    /// Pie chart slices.
    Pie(Vec<PieSlice>),
}

/// A point whose value cannot be plotted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValueParseError {
    /// The y label is not a finite number.
    #[error("point {} ('{label}'): '{value}' is not a number", .index + 1)]
    NotANumber {
        /// Zero-based index of the point.
        index: usize,
        /// The point's x label.
        label: String,
        /// The offending y text.
        value: String,
    },

    /// Bars grow up from zero, so their values must be zero or positive.
    #[error("point {} ('{label}'): bar value cannot be negative ({value})", .index + 1)]
    NegativeBar {
        /// Zero-based index of the point.
        index: usize,
        /// The point's x label.
        label: String,
        /// The offending y text.
        value: String,
    },

    /// Pie slices must be zero or positive.
    #[error("point {} ('{label}'): pie slice cannot be negative ({value})", .index + 1)]
    NegativeSlice {
        /// Zero-based index of the point.
        index: usize,
        /// The point's x label.
        label: String,
        /// The offending y text.
        value: String,
    },
}

/// Maps a chart definition to its view model.
pub fn render_chart(chart: &ChartDefinition) -> Result<ChartView, ValueParseError> {
    if chart.points.is_empty() {
        return Ok(ChartView::Empty);
    }
    let titles = || (chart.axis_titles.x.clone(), chart.axis_titles.y.clone());
    match chart.kind {
        ChartKind::Bar => Ok(ChartView::Bar {
            titles: titles(),
            points: bar_points(&chart.points)?,
        }),
        ChartKind::Line => Ok(ChartView::Line {
            titles: titles(),
            points: cartesian_points(&chart.points)?,
        }),
        ChartKind::Pie => pie_slices(&chart.points).map(ChartView::Pie),
    }
}

fn parse_value(index: usize, point: &DataPoint) -> Result<f64, ValueParseError> {
    point
        .y
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ValueParseError::NotANumber {
            index,
            label: point.x.clone(),
            value: point.y.clone(),
        })
}

fn cartesian_points(points: &[DataPoint]) -> Result<Vec<CartesianPoint>, ValueParseError> {
    points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            Ok(CartesianPoint {
                label: p.x.clone(),
                value: parse_value(i, p)?,
            })
        })
        .collect()
}

fn bar_points(points: &[DataPoint]) -> Result<Vec<CartesianPoint>, ValueParseError> {
    let parsed = cartesian_points(points)?;
    match parsed.iter().position(|p| p.value < 0.0) {
        Some(index) => Err(ValueParseError::NegativeBar {
            index,
            label: points[index].x.clone(),
            value: points[index].y.clone(),
        }),
        None => Ok(parsed),
    }
}

fn pie_slices(points: &[DataPoint]) -> Result<Vec<PieSlice>, ValueParseError> {
    let values = points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let value = parse_value(i, p)?;
            if value < 0.0 {
                return Err(ValueParseError::NegativeSlice {
                    index: i,
                    label: p.x.clone(),
                    value: p.y.clone(),
                });
            }
            Ok(value)
        })
        .collect::<Result<Vec<f64>, _>>()?;

    // Shares are taken of values scaled by the largest one, so the sum of
    // large finite values cannot overflow.
    let max = values.iter().copied().fold(0.0, f64::max);
    let total: f64 = if max > 0.0 {
        values.iter().map(|v| v / max).sum()
    } else {
        0.0
    };
    Ok(points
        .iter()
        .zip(values)
        .map(|(p, value)| PieSlice {
            label: p.x.clone(),
            value,
            percent: if total > 0.0 {
                value / max / total * 100.0
            } else {
                0.0
            },
        })
        .collect())
}
