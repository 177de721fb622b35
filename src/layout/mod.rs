//! Responsive layout state for the dashboard grid.
//!
//! Each [`Breakpoint`] owns an ordered list of [`LayoutEntry`] values, one per
//! widget. The [`LayoutManager`] stores these lists, replaces them wholesale
//! after a move/resize gesture, and appends new entries when a chart is
//! created. Breakpoints without a stored layout borrow one from the nearest
//! wider breakpoint, clamped to their column count.

pub mod grid;
mod presets;

pub use presets::{seeded_layout, BreakpointSpec, GridSpec, DEFAULT_ROW_HEIGHT};

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A named terminal-width tier with its own column count and layout.
///
/// Variants are ordered widest first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    /// Large terminals.
    Lg,
    /// Medium terminals.
    Md,
    /// Small terminals.
    Sm,
    /// Extra small terminals.
    Xs,
    /// Anything narrower.
    Xxs,
}

impl Breakpoint {
    /// All breakpoints, widest first.
    pub const ALL: [Breakpoint; 5] = [
        Breakpoint::Lg,
        Breakpoint::Md,
        Breakpoint::Sm,
        Breakpoint::Xs,
        Breakpoint::Xxs,
    ];

    /// Short lowercase name used in config files and the CLI.
    pub fn name(self) -> &'static str {
        match self {
            Breakpoint::Lg => "lg",
            Breakpoint::Md => "md",
            Breakpoint::Sm => "sm",
            Breakpoint::Xs => "xs",
            Breakpoint::Xxs => "xxs",
        }
    }

    fn rank(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error type for parsing a [`Breakpoint`] from a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseBreakpointError(pub String);

impl fmt::Display for ParseBreakpointError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid breakpoint: {} (expected one of lg, md, sm, xs, xxs)",
            self.0
        )
    }
}

impl std::error::Error for ParseBreakpointError {}

impl FromStr for Breakpoint {
    type Err = ParseBreakpointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lg" => Ok(Breakpoint::Lg),
            "md" => Ok(Breakpoint::Md),
            "sm" => Ok(Breakpoint::Sm),
            "xs" => Ok(Breakpoint::Xs),
            "xxs" => Ok(Breakpoint::Xxs),
            _ => Err(ParseBreakpointError(s.to_string())),
        }
    }
}

/// Position and size of one widget on the grid, in grid units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutEntry {
    /// Widget identifier. Unique within one breakpoint.
    pub id: String,
    /// Column of the left edge.
    pub x: u16,
    /// Row of the top edge.
    pub y: u16,
    /// Width in columns.
    pub w: u16,
    /// Height in rows.
    pub h: u16,
}

impl LayoutEntry {
    /// Creates a new entry.
    pub fn new(id: impl Into<String>, x: u16, y: u16, w: u16, h: u16) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            w,
            h,
        }
    }

    /// First row below this entry.
    pub fn bottom(&self) -> u16 {
        self.y.saturating_add(self.h)
    }

    /// First column right of this entry.
    pub fn right(&self) -> u16 {
        self.x.saturating_add(self.w)
    }

    /// Returns `true` if the two entries overlap. An entry never collides
    /// with itself (same id).
    pub fn collides(&self, other: &LayoutEntry) -> bool {
        self.id != other.id
            && self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// Where a newly appended entry should land.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Placement {
    /// Below every existing entry, at column 0.
    #[default]
    Bottom,
    /// The lowest row where the entry fits, leftmost column first.
    FirstAvailableRow,
}

/// Errors raised by [`LayoutManager`] mutations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// The id already has an entry at this breakpoint.
    #[error("layout for {breakpoint} already has an entry with id '{id}'")]
    DuplicateId {
        /// Breakpoint whose layout was being modified.
        breakpoint: Breakpoint,
        /// Offending widget id.
        id: String,
    },
}

/// Holds the per-breakpoint layouts of the dashboard.
#[derive(Debug, Clone)]
pub struct LayoutManager {
    layouts: BTreeMap<Breakpoint, Vec<LayoutEntry>>,
    grid: GridSpec,
}

impl LayoutManager {
    /// Creates an empty manager for the given grid.
    pub fn new(grid: GridSpec) -> Self {
        Self {
            layouts: BTreeMap::new(),
            grid,
        }
    }

    /// Builder-style helper storing `entries` for `breakpoint`.
    pub fn with_layout(mut self, breakpoint: Breakpoint, entries: Vec<LayoutEntry>) -> Self {
        self.layouts.insert(breakpoint, entries);
        self
    }

    /// Grid geometry (breakpoint widths, columns, row height).
    pub fn grid(&self) -> &GridSpec {
        &self.grid
    }

    /// Breakpoints that have a stored layout, widest first.
    pub fn stored_breakpoints(&self) -> impl Iterator<Item = Breakpoint> + '_ {
        self.layouts.keys().copied()
    }

    /// Returns the layout for `breakpoint`.
    ///
    /// A stored layout is borrowed as-is. Otherwise one is derived from the
    /// nearest wider stored breakpoint (or the nearest narrower one when no
    /// wider exists) by clamping entries to this breakpoint's columns and
    /// compacting. Derived layouts are not stored.
    pub fn layout(&self, breakpoint: Breakpoint) -> Cow<'_, [LayoutEntry]> {
        if let Some(entries) = self.layouts.get(&breakpoint) {
            return Cow::Borrowed(entries.as_slice());
        }
        match self.nearest_stored(breakpoint) {
            Some(source) => Cow::Owned(self.derive(source, breakpoint)),
            None => Cow::Owned(Vec::new()),
        }
    }

    /// Replaces the stored layout for `breakpoint` with the positions reported
    /// after a move/resize gesture. Other breakpoints are untouched.
    pub fn on_user_rearrange(&mut self, breakpoint: Breakpoint, new_layout: Vec<LayoutEntry>) {
        tracing::debug!(
            breakpoint = %breakpoint,
            entries = new_layout.len(),
            "layout rearranged"
        );
        self.layouts.insert(breakpoint, new_layout);
    }

    /// Appends an entry for a newly created widget.
    ///
    /// The width is clamped to the breakpoint's columns and the row is chosen
    /// from `placement`. A breakpoint with no stored layout first materializes
    /// its derived layout.
    pub fn append_entry(
        &mut self,
        breakpoint: Breakpoint,
        id: &str,
        w: u16,
        h: u16,
        placement: Placement,
    ) -> Result<LayoutEntry, LayoutError> {
        let cols = self.grid.columns(breakpoint);
        let mut entries = self.layout(breakpoint).into_owned();
        if entries.iter().any(|e| e.id == id) {
            return Err(LayoutError::DuplicateId {
                breakpoint,
                id: id.to_string(),
            });
        }

        let w = w.clamp(1, cols);
        let h = h.max(1);
        let (x, y) = match placement {
            Placement::Bottom => (0, grid::bottom(&entries)),
            Placement::FirstAvailableRow => grid::first_fit(&entries, w, h, cols),
        };
        let entry = LayoutEntry::new(id, x, y, w, h);
        entries.push(entry.clone());
        self.layouts.insert(breakpoint, entries);
        Ok(entry)
    }

    /// Returns `true` if any stored breakpoint has an entry with this id.
    pub fn contains(&self, id: &str) -> bool {
        self.layouts
            .values()
            .any(|entries| entries.iter().any(|e| e.id == id))
    }

    /// Drops stored entries whose id fails `keep`, returning the removed ids.
    pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) -> Vec<String> {
        let mut removed = Vec::new();
        for entries in self.layouts.values_mut() {
            entries.retain(|e| {
                let kept = keep(&e.id);
                if !kept {
                    removed.push(e.id.clone());
                }
                kept
            });
        }
        removed
    }

    fn nearest_stored(&self, breakpoint: Breakpoint) -> Option<Breakpoint> {
        let wider = Breakpoint::ALL[..breakpoint.rank()]
            .iter()
            .rev()
            .find(|bp| self.layouts.contains_key(bp));
        let narrower = Breakpoint::ALL[breakpoint.rank()..]
            .iter()
            .find(|bp| self.layouts.contains_key(bp));
        wider.or(narrower).copied()
    }

    fn derive(&self, source: Breakpoint, target: Breakpoint) -> Vec<LayoutEntry> {
        let cols = self.grid.columns(target);
        let clamped: Vec<LayoutEntry> = self.layouts[&source]
            .iter()
            .map(|e| {
                let w = e.w.clamp(1, cols);
                let x = e.x.min(cols - w);
                LayoutEntry::new(e.id.clone(), x, e.y, w, e.h)
            })
            .collect();
        grid::compact(&clamped, None)
    }
}

impl Default for LayoutManager {
    fn default() -> Self {
        Self::new(GridSpec::default()).with_layout(Breakpoint::Lg, seeded_layout())
    }
}
