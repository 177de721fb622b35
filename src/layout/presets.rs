//! Built-in grid geometry and the seeded dashboard layout.
//!
//! Breakpoint widths are terminal columns, scaled down from the pixel
//! breakpoints of the browser version of this dashboard (1200/996/768/480/0
//! pixels become 120/100/77/48/0 columns). Column counts are unchanged.

use super::{Breakpoint, LayoutEntry};
use std::collections::BTreeMap;

/// Default number of terminal rows per grid row.
pub const DEFAULT_ROW_HEIGHT: u16 = 4;

/// Width threshold and column count of one breakpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakpointSpec {
    /// Minimum terminal width (columns) for this breakpoint to apply.
    pub min_width: u16,
    /// Number of grid columns.
    pub columns: u16,
}

impl BreakpointSpec {
    /// Creates a new breakpoint spec. A column count of zero is raised to one.
    pub const fn new(min_width: u16, columns: u16) -> Self {
        Self {
            min_width,
            columns: if columns == 0 { 1 } else { columns },
        }
    }
}

/// Grid geometry for every breakpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridSpec {
    specs: BTreeMap<Breakpoint, BreakpointSpec>,
    row_height: u16,
}

impl GridSpec {
    /// Creates a grid from explicit specs. Breakpoints missing from `specs`
    /// keep their built-in values.
    pub fn new(specs: impl IntoIterator<Item = (Breakpoint, BreakpointSpec)>, row_height: u16) -> Self {
        let mut grid = Self::default();
        grid.specs.extend(specs);
        grid.row_height = row_height.max(1);
        grid
    }

    /// Picks the widest breakpoint whose minimum width fits `width`.
    pub fn breakpoint_for_width(&self, width: u16) -> Breakpoint {
        Breakpoint::ALL
            .into_iter()
            .find(|bp| self.spec(*bp).min_width <= width)
            .unwrap_or(Breakpoint::Xxs)
    }

    /// Column count for `breakpoint`.
    pub fn columns(&self, breakpoint: Breakpoint) -> u16 {
        self.spec(breakpoint).columns
    }

    /// Terminal rows per grid row.
    pub fn row_height(&self) -> u16 {
        self.row_height
    }

    /// Spec for `breakpoint`.
    pub fn spec(&self, breakpoint: Breakpoint) -> BreakpointSpec {
        self.specs
            .get(&breakpoint)
            .copied()
            .unwrap_or_else(|| builtin_spec(breakpoint))
    }
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            specs: Breakpoint::ALL
                .into_iter()
                .map(|bp| (bp, builtin_spec(bp)))
                .collect(),
            row_height: DEFAULT_ROW_HEIGHT,
        }
    }
}

fn builtin_spec(breakpoint: Breakpoint) -> BreakpointSpec {
    match breakpoint {
        Breakpoint::Lg => BreakpointSpec::new(120, 12),
        Breakpoint::Md => BreakpointSpec::new(100, 10),
        Breakpoint::Sm => BreakpointSpec::new(77, 6),
        Breakpoint::Xs => BreakpointSpec::new(48, 4),
        Breakpoint::Xxs => BreakpointSpec::new(0, 2),
    }
}

/// The large-breakpoint layout the dashboard starts with: five KPI cards
/// (`a`..`e`) and three seeded charts (`f`, `g`, `h`).
pub fn seeded_layout() -> Vec<LayoutEntry> {
    vec![
        LayoutEntry::new("a", 0, 0, 6, 2),
        LayoutEntry::new("b", 6, 0, 6, 2),
        LayoutEntry::new("c", 0, 2, 4, 2),
        LayoutEntry::new("d", 4, 2, 4, 2),
        LayoutEntry::new("e", 8, 2, 4, 2),
        LayoutEntry::new("f", 0, 4, 6, 3),
        LayoutEntry::new("g", 6, 4, 6, 3),
        LayoutEntry::new("h", 0, 7, 6, 3),
    ]
}
