//! Application state: layouts, charts, widgets and the creation form.
//!
//! [`Dashboard`] owns every piece of mutable state and changes only through
//! [`Dashboard::apply`]. Chart submission is atomic: the chart and one layout
//! entry per stored breakpoint are committed together, or nothing changes.

use crate::charts::{ChartDefinition, ChartError, ChartId, ChartKind, ChartRegistry, NewChart};
use crate::config::schema::{ChartConfig, Config};
use crate::config::ConfigError;
use crate::form::{ChartForm, FormEdit, ValidationError};
use crate::layout::{Breakpoint, LayoutEntry, LayoutError, LayoutManager, Placement};
use crate::widgets::{StaticCard, UnsupportedChart, Widget, WidgetSet};
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// Width of a new chart's layout entry, in grid columns.
pub const NEW_CHART_WIDTH: u16 = 6;
/// Height of a new chart's layout entry, in grid rows.
pub const NEW_CHART_HEIGHT: u16 = 3;
/// Size given to configured widgets that have no layout entry.
const CARD_SIZE: (u16, u16) = (4, 2);

/// Everything that can change dashboard state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardAction {
    /// Show the creation form.
    OpenForm,
    /// Close the form and discard the draft.
    CancelForm,
    /// Edit the open form.
    Edit(FormEdit),
    /// Validate and commit the draft.
    SubmitForm,
    /// Store the layout reported after a move/resize gesture.
    Rearrange {
        /// Breakpoint the gesture happened at.
        breakpoint: Breakpoint,
        /// Full layout after the gesture.
        layout: Vec<LayoutEntry>,
    },
}

/// Result of applying an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing changed (e.g. editing a closed form).
    Unchanged,
    /// State changed.
    Updated,
    /// A chart was committed with this id.
    ChartAdded(ChartId),
    /// The draft failed validation; the form stays open.
    Rejected(ValidationError),
    /// The commit could not happen; nothing changed.
    Failed(DashboardError),
}

/// Commit failures that leave the dashboard untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DashboardError {
    /// The generated chart id already names another widget.
    #[error("id '{0}' is already used by another widget")]
    IdTaken(String),

    /// A layout could not take the new entry.
    #[error(transparent)]
    Layout(#[from] LayoutError),
}

/// Serializable view of the dashboard, used by `mdash dump`.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<'a> {
    /// Effective layout of every breakpoint, keyed by name.
    pub layouts: BTreeMap<&'static str, Vec<LayoutEntry>>,
    /// Breakpoints with a stored (not derived) layout.
    pub stored: Vec<Breakpoint>,
    /// Registered charts in insertion order.
    pub charts: &'a [ChartDefinition],
    /// Static cards.
    pub cards: &'a [StaticCard],
    /// Configured charts with an unknown type.
    pub unsupported: &'a [UnsupportedChart],
}

/// The application-state object.
#[derive(Debug, Clone)]
pub struct Dashboard {
    layouts: LayoutManager,
    charts: ChartRegistry,
    widgets: WidgetSet,
    form: ChartForm,
    placement: Placement,
    warnings: Vec<String>,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::from_parts(LayoutManager::default(), ChartRegistry::new(), WidgetSet::new())
    }
}

impl Dashboard {
    /// Builds a dashboard from already assembled parts.
    pub fn from_parts(layouts: LayoutManager, charts: ChartRegistry, widgets: WidgetSet) -> Self {
        let mut charts = charts;
        charts.reserve_ids(widgets.ids().map(str::to_string).collect::<Vec<_>>());
        Self {
            layouts,
            charts,
            widgets,
            form: ChartForm::new(),
            placement: Placement::default(),
            warnings: Vec::new(),
        }
    }

    /// Builds the startup dashboard from configuration.
    ///
    /// Cards and charts are seeded first. Layout entries that name no widget
    /// are dropped, and widgets missing from a stored layout are appended to
    /// it. Each such repair is logged and recorded in [`warnings`](Self::warnings).
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let grid = config.grid_spec()?;
        let mut warnings = Vec::new();

        let mut widgets = WidgetSet::new();
        for card in &config.cards {
            if !widgets.add_card(card.clone()) {
                warnings.push(format!("duplicate card id '{}' ignored", card.id));
            }
        }

        let mut charts = ChartRegistry::new();
        for chart in &config.charts {
            if widgets.contains(&chart.id) {
                warnings.push(format!("chart id '{}' is already used by a card", chart.id));
                continue;
            }
            match seeded_chart(chart) {
                Ok(definition) => {
                    if let Err(e) = charts.insert_seeded(definition) {
                        warnings.push(e.to_string());
                    }
                }
                Err(e) => {
                    warnings.push(format!("chart '{}': {e}", chart.id));
                    widgets.add_unsupported(UnsupportedChart {
                        id: chart.id.clone(),
                        title: placeholder_title(chart),
                        type_name: chart.kind.clone(),
                    });
                }
            }
        }

        let mut layouts = LayoutManager::new(grid);
        for (bp, entries) in config.layouts()? {
            layouts = layouts.with_layout(bp, entries);
        }

        let mut dashboard = Self::from_parts(layouts, charts, widgets);
        dashboard.placement = config.tui.placement;
        dashboard.warnings = warnings;
        dashboard.reconcile();
        for warning in &dashboard.warnings {
            tracing::warn!("{warning}");
        }
        tracing::info!(
            cards = dashboard.widgets.cards().len(),
            charts = dashboard.charts.len(),
            "dashboard initialized"
        );
        Ok(dashboard)
    }

    fn reconcile(&mut self) {
        let (widgets, charts) = (&self.widgets, &self.charts);
        let removed = self
            .layouts
            .retain(|id| widgets.resolve(charts, id).is_some());
        for id in removed {
            self.warnings
                .push(format!("layout entry '{id}' has no widget and was dropped"));
        }

        let mut stored: Vec<Breakpoint> = self.layouts.stored_breakpoints().collect();
        if stored.is_empty() {
            stored.push(Breakpoint::Lg);
        }
        let missing: Vec<(String, (u16, u16))> = self
            .widget_ids()
            .into_iter()
            .map(|(id, is_chart)| {
                let size = if is_chart {
                    (NEW_CHART_WIDTH, NEW_CHART_HEIGHT)
                } else {
                    CARD_SIZE
                };
                (id, size)
            })
            .collect();
        for bp in stored {
            for (id, (w, h)) in &missing {
                if self.layouts.layout(bp).iter().any(|e| &e.id == id) {
                    continue;
                }
                match self.layouts.append_entry(bp, id, *w, *h, Placement::Bottom) {
                    Ok(_) => self
                        .warnings
                        .push(format!("widget '{id}' had no {bp} layout entry; appended")),
                    Err(e) => self.warnings.push(e.to_string()),
                }
            }
        }
    }

    /// Every widget id with a flag telling whether it is a chart, in
    /// card, placeholder, chart order.
    fn widget_ids(&self) -> Vec<(String, bool)> {
        let cards = self.widgets.cards().iter().map(|c| (c.id.clone(), false));
        let unsupported = self.widgets.unsupported().iter().map(|c| (c.id.clone(), true));
        let charts = self
            .charts
            .list_charts()
            .iter()
            .map(|c| (c.id.to_string(), true));
        cards.chain(unsupported).chain(charts).collect()
    }

    /// Applies one action.
    pub fn apply(&mut self, action: DashboardAction) -> Outcome {
        match action {
            DashboardAction::OpenForm => {
                if self.form.is_open() {
                    return Outcome::Unchanged;
                }
                self.form.open();
                Outcome::Updated
            }
            DashboardAction::CancelForm => {
                if !self.form.is_open() {
                    return Outcome::Unchanged;
                }
                self.form.cancel();
                Outcome::Updated
            }
            DashboardAction::Edit(edit) => {
                if self.form.apply(edit) {
                    Outcome::Updated
                } else {
                    Outcome::Unchanged
                }
            }
            DashboardAction::SubmitForm => self.submit(),
            DashboardAction::Rearrange { breakpoint, layout } => {
                self.layouts.on_user_rearrange(breakpoint, layout);
                Outcome::Updated
            }
        }
    }

    fn submit(&mut self) -> Outcome {
        if !self.form.is_open() {
            return Outcome::Unchanged;
        }
        let chart = match self.form.validate() {
            Ok(chart) => chart,
            Err(e) => {
                self.form.reject(e.clone());
                return Outcome::Rejected(e);
            }
        };
        match self.commit(chart) {
            Ok(id) => {
                self.form.complete();
                Outcome::ChartAdded(id)
            }
            Err(e) => {
                tracing::error!(error = %e, "chart commit failed");
                Outcome::Failed(e)
            }
        }
    }

    fn commit(&mut self, chart: NewChart) -> Result<ChartId, DashboardError> {
        let id = self.charts.peek_next_id();
        if self.widgets.contains(id.as_str()) || self.layouts.contains(id.as_str()) {
            return Err(DashboardError::IdTaken(id.to_string()));
        }

        let mut breakpoints: Vec<Breakpoint> = self.layouts.stored_breakpoints().collect();
        if breakpoints.is_empty() {
            breakpoints.push(Breakpoint::Lg);
        }
        let mut layouts = self.layouts.clone();
        for bp in breakpoints {
            layouts.append_entry(bp, id.as_str(), NEW_CHART_WIDTH, NEW_CHART_HEIGHT, self.placement)?;
        }

        let assigned = self.charts.add_chart(chart);
        debug_assert_eq!(assigned, id);
        self.layouts = layouts;
        Ok(assigned)
    }

    /// Effective layout at `breakpoint`.
    pub fn layout(&self, breakpoint: Breakpoint) -> std::borrow::Cow<'_, [LayoutEntry]> {
        self.layouts.layout(breakpoint)
    }

    /// Layout manager.
    pub fn layouts(&self) -> &LayoutManager {
        &self.layouts
    }

    /// Chart registry.
    pub fn charts(&self) -> &ChartRegistry {
        &self.charts
    }

    /// Static cards and placeholders.
    pub fn widgets(&self) -> &WidgetSet {
        &self.widgets
    }

    /// Creation form.
    pub fn form(&self) -> &ChartForm {
        &self.form
    }

    /// Placement hint for new charts.
    pub fn placement(&self) -> Placement {
        self.placement
    }

    /// Sets the placement hint for new charts.
    pub fn set_placement(&mut self, placement: Placement) {
        self.placement = placement;
    }

    /// Repairs made while building from configuration.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Resolves a layout id to its widget.
    pub fn widget(&self, id: &str) -> Option<Widget<'_>> {
        self.widgets.resolve(&self.charts, id)
    }

    /// Serializable view for `mdash dump`.
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            layouts: Breakpoint::ALL
                .into_iter()
                .map(|bp| (bp.name(), self.layouts.layout(bp).into_owned()))
                .collect(),
            stored: self.layouts.stored_breakpoints().collect(),
            charts: self.charts.list_charts(),
            cards: self.widgets.cards(),
            unsupported: self.widgets.unsupported(),
        }
    }
}

fn seeded_chart(config: &ChartConfig) -> Result<ChartDefinition, ChartError> {
    let kind: ChartKind = config.kind.parse()?;
    let title = if config.title.trim().is_empty() {
        NewChart {
            kind,
            data_source: config.data_source.clone(),
            axis_titles: config.axis_titles.clone(),
            points: Vec::new(),
        }
        .title()
    } else {
        config.title.clone()
    };
    Ok(ChartDefinition {
        id: ChartId::new(config.id.clone()),
        kind,
        data_source: config.data_source.clone(),
        title,
        axis_titles: config.axis_titles.clone(),
        points: config.points.clone(),
    })
}

fn placeholder_title(config: &ChartConfig) -> String {
    if config.title.trim().is_empty() {
        format!("{} chart", config.data_source.trim())
    } else {
        config.title.clone()
    }
}
