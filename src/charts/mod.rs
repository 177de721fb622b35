//! Chart definitions and the append-only chart registry.
//!
//! A [`ChartDefinition`] is immutable once registered. Identifiers come from
//! a monotonic counter (`chart-1`, `chart-2`, ...) and are never reused.

pub mod render;

pub use render::{render_chart, CartesianPoint, ChartView, PieSlice, ValueParseError};

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Supported chart types.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    /// Vertical bars, one per point.
    #[default]
    Bar,
    /// Points joined by a line.
    Line,
    /// Share of a whole, one slice per point.
    Pie,
}

impl ChartKind {
    /// All kinds in form order.
    pub const ALL: [ChartKind; 3] = [ChartKind::Bar, ChartKind::Line, ChartKind::Pie];

    /// Capitalized name used in titles ("Bar", "Line", "Pie").
    pub fn label(self) -> &'static str {
        match self {
            ChartKind::Bar => "Bar",
            ChartKind::Line => "Line",
            ChartKind::Pie => "Pie",
        }
    }

    /// Next kind in form order, wrapping around.
    pub fn next(self) -> Self {
        match self {
            ChartKind::Bar => ChartKind::Line,
            ChartKind::Line => ChartKind::Pie,
            ChartKind::Pie => ChartKind::Bar,
        }
    }

    /// Previous kind in form order, wrapping around.
    pub fn previous(self) -> Self {
        match self {
            ChartKind::Bar => ChartKind::Pie,
            ChartKind::Line => ChartKind::Bar,
            ChartKind::Pie => ChartKind::Line,
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ChartKind::Bar => "bar",
            ChartKind::Line => "line",
            ChartKind::Pie => "pie",
        };
        f.write_str(s)
    }
}

impl FromStr for ChartKind {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bar" => Ok(ChartKind::Bar),
            "line" => Ok(ChartKind::Line),
            "pie" => Ok(ChartKind::Pie),
            _ => Err(ChartError::UnknownChartType(s.to_string())),
        }
    }
}

/// Identifier of a registered chart.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChartId(String);

impl ChartId {
    /// Wraps an existing identifier (used for seeded charts).
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn from_sequence(seq: u64) -> Self {
        Self(format!("chart-{seq}"))
    }
}

impl fmt::Display for ChartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Titles drawn along the x and y axes. Either may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisTitles {
    /// Horizontal axis title.
    pub x: String,
    /// Vertical axis title.
    pub y: String,
}

/// One labeled data point. `y` stays textual until rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataPoint {
    /// Category label.
    pub x: String,
    /// Value, parsed as a number when the chart is drawn.
    pub y: String,
}

impl DataPoint {
    /// Creates a new point.
    pub fn new(x: impl Into<String>, y: impl Into<String>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
        }
    }
}

/// A chart as stored in the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartDefinition {
    /// Unique identifier; also the layout entry id.
    pub id: ChartId,
    /// Chart type.
    #[serde(rename = "type")]
    pub kind: ChartKind,
    /// Free-text label of the data source.
    pub data_source: String,
    /// Card title.
    pub title: String,
    /// Axis titles (ignored by pie charts).
    pub axis_titles: AxisTitles,
    /// Plotted points in order.
    pub points: Vec<DataPoint>,
}

/// A validated chart waiting for an identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewChart {
    /// Chart type.
    pub kind: ChartKind,
    /// Free-text label of the data source.
    pub data_source: String,
    /// Axis titles.
    pub axis_titles: AxisTitles,
    /// Points, already checked to be non-blank.
    pub points: Vec<DataPoint>,
}

impl NewChart {
    /// Title derived from the data source and type, e.g. `Sales Bar Chart`.
    pub fn title(&self) -> String {
        format!(
            "{} {} Chart",
            capitalize(self.data_source.trim()),
            self.kind.label()
        )
    }

    fn into_definition(self, id: ChartId) -> ChartDefinition {
        let title = self.title();
        ChartDefinition {
            id,
            kind: self.kind,
            data_source: self.data_source,
            title,
            axis_titles: self.axis_titles,
            points: self.points,
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Errors raised by the chart model.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChartError {
    /// The type name does not match any supported chart.
    #[error("unsupported chart type '{0}' (expected bar, line or pie)")]
    UnknownChartType(String),

    /// A chart with this id is already registered.
    #[error("chart id '{0}' is already registered")]
    DuplicateId(String),
}

/// Ordered, append-only collection of charts.
#[derive(Debug, Clone, Default)]
pub struct ChartRegistry {
    charts: Vec<ChartDefinition>,
    reserved: HashSet<String>,
    next_seq: u64,
}

impl ChartRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks ids owned by other widgets so generated chart ids avoid them.
    pub fn reserve_ids<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reserved.extend(ids.into_iter().map(Into::into));
    }

    /// Registers a new chart and returns its freshly assigned id.
    pub fn add_chart(&mut self, chart: NewChart) -> ChartId {
        let (seq, id) = self.next_free();
        self.next_seq = seq;
        tracing::info!(id = %id, kind = %chart.kind, points = chart.points.len(), "chart added");
        self.charts.push(chart.into_definition(id.clone()));
        id
    }

    /// The id the next [`add_chart`](Self::add_chart) call will assign.
    pub fn peek_next_id(&self) -> ChartId {
        self.next_free().1
    }

    /// Registers a chart that already carries its id (seeded from config).
    pub fn insert_seeded(&mut self, chart: ChartDefinition) -> Result<(), ChartError> {
        if self.is_taken(chart.id.as_str()) {
            return Err(ChartError::DuplicateId(chart.id.to_string()));
        }
        self.charts.push(chart);
        Ok(())
    }

    /// All charts in insertion order.
    pub fn list_charts(&self) -> &[ChartDefinition] {
        &self.charts
    }

    /// Looks up a chart by id.
    pub fn get(&self, id: &str) -> Option<&ChartDefinition> {
        self.charts.iter().find(|c| c.id.as_str() == id)
    }

    /// Number of registered charts.
    pub fn len(&self) -> usize {
        self.charts.len()
    }

    /// Returns `true` when no chart is registered.
    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }

    fn is_taken(&self, id: &str) -> bool {
        self.reserved.contains(id) || self.get(id).is_some()
    }

    fn next_free(&self) -> (u64, ChartId) {
        let mut seq = self.next_seq;
        loop {
            seq += 1;
            let id = ChartId::from_sequence(seq);
            if !self.is_taken(id.as_str()) {
                return (seq, id);
            }
        }
    }
}
