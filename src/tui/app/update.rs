use super::*;
use crate::layout::grid::Viewport;
use crate::layout::LayoutEntry;

impl App {
    /// Grid columns at the active breakpoint.
    pub fn columns(&self) -> u16 {
        self.dashboard.layouts().grid().columns(self.breakpoint)
    }

    /// Viewport of the last render pass, with the current scroll offset.
    pub fn viewport(&self) -> Option<Viewport> {
        Some(Viewport {
            area: self.grid_area?,
            cols: self.columns(),
            row_height: self.dashboard.layouts().grid().row_height(),
            scroll: self.scroll,
        })
    }

    /// Ids in reading order (top to bottom, then left to right).
    fn focus_order(&self) -> Vec<String> {
        let mut entries: Vec<LayoutEntry> = self.dashboard.layout(self.breakpoint).into_owned();
        entries.sort_by_key(|e| (e.y, e.x));
        entries.into_iter().map(|e| e.id).collect()
    }

    fn step_focus(&mut self, forward: bool) {
        let order = self.focus_order();
        if order.is_empty() {
            self.focused = None;
            return;
        }
        let current = self
            .focused
            .as_ref()
            .and_then(|id| order.iter().position(|o| o == id));
        let len = order.len();
        let next = match (current, forward) {
            (None, true) => 0,
            (None, false) => len - 1,
            (Some(i), true) => (i + 1) % len,
            (Some(i), false) => (i + len - 1) % len,
        };
        self.focused = Some(order[next].clone());
        self.ensure_focus_visible();
    }

    /// Focuses the next card in reading order, wrapping around.
    pub fn focus_next(&mut self) {
        self.step_focus(true);
    }

    /// Focuses the previous card in reading order, wrapping around.
    pub fn focus_previous(&mut self) {
        self.step_focus(false);
    }

    /// Layout change that moves the focused card by (`dx`, `dy`) cells, or
    /// `None` when nothing is focused or the card cannot move that way.
    pub fn move_focused(&self, dx: i32, dy: i32) -> Option<DashboardAction> {
        let id = self.focused.as_deref()?;
        let layout = self.dashboard.layout(self.breakpoint);
        let updated = grid::move_entry(&layout, id, dx, dy, self.columns());
        self.rearrangement(&layout, updated)
    }

    /// Layout change that resizes the focused card by (`dw`, `dh`) cells.
    pub fn resize_focused(&self, dw: i32, dh: i32) -> Option<DashboardAction> {
        let id = self.focused.as_deref()?;
        let layout = self.dashboard.layout(self.breakpoint);
        let updated = grid::resize_entry(&layout, id, dw, dh, self.columns());
        self.rearrangement(&layout, updated)
    }

    fn rearrangement(
        &self,
        before: &[LayoutEntry],
        after: Vec<LayoutEntry>,
    ) -> Option<DashboardAction> {
        (before != after.as_slice()).then(|| DashboardAction::Rearrange {
            breakpoint: self.breakpoint,
            layout: after,
        })
    }

    /// Scrolls the grid by `delta` terminal rows, clamped to the content.
    pub fn scroll_by(&mut self, delta: i32) {
        let max = match self.viewport() {
            Some(viewport) => viewport.max_scroll(&self.dashboard.layout(self.breakpoint)),
            None => 0,
        };
        self.scroll = (self.scroll as i32 + delta).clamp(0, max as i32) as u16;
    }

    /// Scrolls just enough to show the focused card. No-op before the first
    /// render.
    pub fn ensure_focus_visible(&mut self) {
        let (Some(viewport), Some(id)) = (self.viewport(), self.focused.as_deref()) else {
            return;
        };
        let layout = self.dashboard.layout(self.breakpoint);
        let Some(entry) = layout.iter().find(|e| e.id == id) else {
            return;
        };
        let top = entry.y.saturating_mul(viewport.row_height);
        let bottom = entry.bottom().saturating_mul(viewport.row_height);
        let height = viewport.area.height;
        let scroll = if top < self.scroll {
            top
        } else if bottom > self.scroll.saturating_add(height) {
            bottom.saturating_sub(height).min(top)
        } else {
            self.scroll
        };
        self.scroll = scroll;
    }

    /// Cycles the forced breakpoint: width-driven, then `lg` through `xxs`,
    /// then back to width-driven.
    pub fn cycle_breakpoint_override(&mut self) {
        let next = match self.breakpoint_override {
            None => Some(Breakpoint::ALL[0]),
            Some(bp) => Breakpoint::ALL
                .iter()
                .position(|b| *b == bp)
                .and_then(|i| Breakpoint::ALL.get(i + 1))
                .copied(),
        };
        tracing::debug!(?next, "breakpoint override changed");
        self.breakpoint_override = next;
        if let Some(bp) = next {
            self.breakpoint = bp;
        }
        self.scroll = 0;
    }
}
