//! TOML configuration schema types for the Movable Dashboard.
//!
//! All structs derive `Deserialize` and `Serialize` with defaults via
//! `#[serde(default)]`, so an empty file yields the stock dashboard: five
//! KPI cards, three sample charts and the seeded large layout.
//!
//! Duration fields use human-readable strings (e.g. `"250ms"`) parsed by the
//! `humantime` crate. Breakpoint names and chart types stay as strings here
//! and are checked by [`Config::validate`] and the dashboard builder, so an
//! unknown chart type degrades to a placeholder instead of failing the load.

use crate::charts::{AxisTitles, DataPoint};
use crate::config::error::ConfigError;
use crate::layout::{seeded_layout, Breakpoint, BreakpointSpec, GridSpec, LayoutEntry, Placement};
use crate::widgets::{seeded_cards, StaticCard};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

// ---------------------------------------------------------------------------
// Top-level Config
// ---------------------------------------------------------------------------

/// Root configuration encompassing all sections.
///
/// ```toml
/// [tui]
/// [grid.breakpoints]
/// [grid.columns]
/// [[cards]]
/// [[charts]]
/// [[layout.lg]]
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Terminal UI behavior.
    pub tui: TuiConfig,
    /// Grid geometry overrides.
    pub grid: GridConfig,
    /// Static cards.
    pub cards: Vec<StaticCard>,
    /// Charts present at startup.
    pub charts: Vec<ChartConfig>,
    /// Stored layouts keyed by breakpoint name.
    pub layout: BTreeMap<String, Vec<LayoutEntry>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tui: TuiConfig::default(),
            grid: GridConfig::default(),
            cards: seeded_cards(),
            charts: seeded_charts(),
            layout: BTreeMap::from([(Breakpoint::Lg.name().to_string(), seeded_layout())]),
        }
    }
}

impl Config {
    /// Parsed tick interval of the event loop.
    pub fn tick_rate(&self) -> Result<Duration, ConfigError> {
        let rate = humantime::parse_duration(self.tui.tick_rate.trim()).map_err(|e| {
            ConfigError::InvalidValue {
                field: "tui.tick_rate".to_string(),
                message: e.to_string(),
            }
        })?;
        if rate.is_zero() {
            return Err(ConfigError::InvalidValue {
                field: "tui.tick_rate".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        Ok(rate)
    }

    /// Grid geometry with configured overrides applied to the built-ins.
    pub fn grid_spec(&self) -> Result<GridSpec, ConfigError> {
        let defaults = GridSpec::default();
        let mut specs = BTreeMap::new();
        for (name, width) in &self.grid.breakpoints {
            let bp = parse_breakpoint("grid.breakpoints", name)?;
            specs.insert(bp, BreakpointSpec::new(*width, defaults.columns(bp)));
        }
        for (name, columns) in &self.grid.columns {
            let bp = parse_breakpoint("grid.columns", name)?;
            if *columns == 0 {
                return Err(ConfigError::InvalidValue {
                    field: format!("grid.columns.{name}"),
                    message: "must be at least 1".to_string(),
                });
            }
            let min_width = specs
                .get(&bp)
                .map(|s: &BreakpointSpec| s.min_width)
                .unwrap_or_else(|| defaults.spec(bp).min_width);
            specs.insert(bp, BreakpointSpec::new(min_width, *columns));
        }
        Ok(GridSpec::new(specs, self.tui.row_height))
    }

    /// Stored layouts with breakpoint names parsed, widest first.
    pub fn layouts(&self) -> Result<Vec<(Breakpoint, Vec<LayoutEntry>)>, ConfigError> {
        let mut layouts = self
            .layout
            .iter()
            .map(|(name, entries)| Ok((parse_breakpoint("layout", name)?, entries.clone())))
            .collect::<Result<Vec<_>, ConfigError>>()?;
        layouts.sort_by_key(|(bp, _)| *bp);
        Ok(layouts)
    }

    /// Checks every value that plain TOML parsing cannot.
    ///
    /// Unknown chart types are not errors: they load as placeholders.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.tick_rate()?;
        self.grid_spec()?;
        for (bp, entries) in self.layouts()? {
            for (i, entry) in entries.iter().enumerate() {
                if entry.w == 0 || entry.h == 0 {
                    return Err(ConfigError::InvalidValue {
                        field: format!("layout.{bp}[{i}]"),
                        message: format!("entry '{}' must have non-zero w and h", entry.id),
                    });
                }
                if entries[..i].iter().any(|e| e.id == entry.id) {
                    return Err(ConfigError::InvalidValue {
                        field: format!("layout.{bp}"),
                        message: format!("duplicate entry id '{}'", entry.id),
                    });
                }
            }
        }
        let mut seen: Vec<&str> = Vec::new();
        let ids = self
            .cards
            .iter()
            .map(|c| c.id.as_str())
            .chain(self.charts.iter().map(|c| c.id.as_str()));
        for id in ids {
            if id.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "cards/charts".to_string(),
                    message: "widget id must not be blank".to_string(),
                });
            }
            if seen.contains(&id) {
                return Err(ConfigError::InvalidValue {
                    field: "cards/charts".to_string(),
                    message: format!("duplicate widget id '{id}'"),
                });
            }
            seen.push(id);
        }
        Ok(())
    }
}

fn parse_breakpoint(section: &str, name: &str) -> Result<Breakpoint, ConfigError> {
    name.parse().map_err(|e: crate::layout::ParseBreakpointError| {
        ConfigError::InvalidValue {
            field: format!("{section}.{name}"),
            message: e.to_string(),
        }
    })
}

// ---------------------------------------------------------------------------
// TUI
// ---------------------------------------------------------------------------

/// Terminal UI settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct TuiConfig {
    /// Event-loop tick as a human-readable duration (e.g. `"250ms"`).
    pub tick_rate: String,
    /// Logging verbosity when `MDASH_LOG` is not set.
    pub log_level: LogLevel,
    /// Log file used while the TUI owns the terminal. Empty disables logging
    /// in the TUI.
    pub log_file: String,
    /// Where new charts are placed.
    pub placement: Placement,
    /// Terminal rows per grid row.
    pub row_height: u16,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            tick_rate: "250ms".to_string(),
            log_level: LogLevel::Info,
            log_file: String::new(),
            placement: Placement::Bottom,
            row_height: crate::layout::DEFAULT_ROW_HEIGHT,
        }
    }
}

/// Log verbosity levels (kebab-case in TOML).
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum LogLevel {
    /// Only errors.
    Error,
    /// Errors and warnings.
    Warn,
    /// Informational messages (default).
    Info,
    /// Debug-level detail.
    Debug,
    /// Full trace output.
    Trace,
}

impl LogLevel {
    /// Directive string understood by `EnvFilter`.
    pub fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// Overrides for breakpoint widths and column counts, keyed by breakpoint
/// name. Missing keys keep the built-in values.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct GridConfig {
    /// Minimum terminal width per breakpoint.
    pub breakpoints: BTreeMap<String, u16>,
    /// Grid columns per breakpoint.
    pub columns: BTreeMap<String, u16>,
}

// ---------------------------------------------------------------------------
// Charts
// ---------------------------------------------------------------------------

/// A chart as written in the config file.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ChartConfig {
    /// Layout id.
    pub id: String,
    /// Chart type name; unknown names load as a placeholder.
    #[serde(rename = "type")]
    pub kind: String,
    /// Data source label.
    pub data_source: String,
    /// Card title. Empty derives `<Source> <Type> Chart`.
    pub title: String,
    /// Axis titles.
    pub axis_titles: AxisTitles,
    /// Points in order.
    pub points: Vec<DataPoint>,
}

/// The three sample charts of a fresh dashboard (`f`, `g`, `h`).
pub fn seeded_charts() -> Vec<ChartConfig> {
    let points = |pairs: &[(&str, &str)]| {
        pairs
            .iter()
            .map(|(x, y)| DataPoint::new(*x, *y))
            .collect::<Vec<_>>()
    };
    let titles = |x: &str, y: &str| AxisTitles {
        x: x.to_string(),
        y: y.to_string(),
    };
    vec![
        ChartConfig {
            id: "f".to_string(),
            kind: "bar".to_string(),
            data_source: "sales".to_string(),
            title: "Sales and Profit".to_string(),
            axis_titles: titles("Month", "Sales"),
            points: points(&[("Jan", "4000"), ("Feb", "3000"), ("Mar", "5000"), ("Apr", "4500")]),
        },
        ChartConfig {
            id: "g".to_string(),
            kind: "line".to_string(),
            data_source: "customers".to_string(),
            title: "Customer Trends".to_string(),
            axis_titles: titles("Month", "Customers"),
            points: points(&[("Jan", "120"), ("Feb", "180"), ("Mar", "160"), ("Apr", "240")]),
        },
        ChartConfig {
            id: "h".to_string(),
            kind: "pie".to_string(),
            data_source: "products".to_string(),
            title: "Product Distribution".to_string(),
            axis_titles: AxisTitles::default(),
            points: points(&[("Product A", "45"), ("Product B", "30"), ("Product C", "25")]),
        },
    ]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
