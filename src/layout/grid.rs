//! Grid mechanics: packing, move/resize gestures, and mapping entries onto
//! terminal cells.
//!
//! Layouts are compacted vertically: entries float up until they touch
//! another entry. During a gesture the moved entry is pinned and everything
//! else packs around it, hopping above it when there is room.

use super::LayoutEntry;
use ratatui::layout::Rect;

/// First free row below every entry (0 for an empty layout).
pub fn bottom(layout: &[LayoutEntry]) -> u16 {
    layout.iter().map(LayoutEntry::bottom).max().unwrap_or(0)
}

/// Lowest row (then leftmost column) where a `w`×`h` entry fits without
/// overlapping anything. Always succeeds: the row below the layout is free.
pub fn first_fit(layout: &[LayoutEntry], w: u16, h: u16, cols: u16) -> (u16, u16) {
    let w = w.clamp(1, cols.max(1));
    let last_row = bottom(layout);
    for y in 0..=last_row {
        for x in 0..=(cols.max(1) - w) {
            let probe = LayoutEntry::new("", x, y, w, h);
            if !layout.iter().any(|e| probe.collides(e)) {
                return (x, y);
            }
        }
    }
    (0, last_row)
}

/// Packs `layout` vertically, keeping the input order.
///
/// With `pinned`, that entry keeps its position and the others are pushed
/// below it or hop above it.
pub fn compact(layout: &[LayoutEntry], pinned: Option<&str>) -> Vec<LayoutEntry> {
    let mut placed: Vec<LayoutEntry> = layout
        .iter()
        .filter(|e| Some(e.id.as_str()) == pinned)
        .cloned()
        .collect();

    let mut order: Vec<&LayoutEntry> = layout
        .iter()
        .filter(|e| Some(e.id.as_str()) != pinned)
        .collect();
    order.sort_by_key(|e| (e.y, e.x));

    for original in order {
        let mut entry = original.clone();
        float_up(&mut entry, &placed, pinned);
        while let Some(below) = placed
            .iter()
            .filter(|p| entry.collides(p))
            .map(LayoutEntry::bottom)
            .max()
        {
            entry.y = below;
        }
        placed.push(entry);
    }

    layout
        .iter()
        .filter_map(|e| placed.iter().find(|p| p.id == e.id).cloned())
        .collect()
}

fn float_up(entry: &mut LayoutEntry, placed: &[LayoutEntry], pinned: Option<&str>) {
    while entry.y > 0 {
        let mut probe = entry.clone();
        probe.y -= 1;
        match placed.iter().find(|p| probe.collides(p)) {
            None => entry.y -= 1,
            Some(blocker) if Some(blocker.id.as_str()) == pinned => {
                let Some(hop) = blocker.y.checked_sub(entry.h) else {
                    break;
                };
                probe.y = hop;
                if placed.iter().any(|p| probe.collides(p)) {
                    break;
                }
                entry.y = hop;
            }
            Some(_) => break,
        }
    }
}

/// Moves the entry `id` by (`dx`, `dy`) grid cells, clamped to the grid, and
/// repacks the rest around it. Unknown ids return the layout unchanged.
pub fn move_entry(layout: &[LayoutEntry], id: &str, dx: i32, dy: i32, cols: u16) -> Vec<LayoutEntry> {
    let mut moved = layout.to_vec();
    let Some(entry) = moved.iter_mut().find(|e| e.id == id) else {
        return moved;
    };
    let max_x = cols.saturating_sub(entry.w) as i32;
    entry.x = (entry.x as i32 + dx).clamp(0, max_x) as u16;
    entry.y = (entry.y as i32 + dy).clamp(0, u16::MAX as i32) as u16;
    compact(&moved, Some(id))
}

/// Grows or shrinks the entry `id` by (`dw`, `dh`) cells. Width stays within
/// the grid and both dimensions stay at least one cell.
pub fn resize_entry(layout: &[LayoutEntry], id: &str, dw: i32, dh: i32, cols: u16) -> Vec<LayoutEntry> {
    let mut resized = layout.to_vec();
    let Some(entry) = resized.iter_mut().find(|e| e.id == id) else {
        return resized;
    };
    let max_w = cols.saturating_sub(entry.x).max(1) as i32;
    entry.w = (entry.w as i32 + dw).clamp(1, max_w) as u16;
    entry.h = (entry.h as i32 + dh).clamp(1, u16::MAX as i32) as u16;
    compact(&resized, Some(id))
}

/// Viewport for mapping grid units to terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// Terminal area the grid is drawn into.
    pub area: Rect,
    /// Number of grid columns at the active breakpoint.
    pub cols: u16,
    /// Terminal rows per grid row.
    pub row_height: u16,
    /// Rows scrolled off the top.
    pub scroll: u16,
}

/// Terminal rectangle of one laid-out widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect<'a> {
    /// Widget id.
    pub id: &'a str,
    /// Visible rectangle, already clipped to the viewport.
    pub rect: Rect,
}

impl Viewport {
    fn column_edge(&self, col: u16) -> u16 {
        let cols = self.cols.max(1) as u32;
        let col = (col as u32).min(cols);
        self.area.x + (col * self.area.width as u32 / cols) as u16
    }

    /// Total height of `layout` in terminal rows.
    pub fn content_height(&self, layout: &[LayoutEntry]) -> u16 {
        bottom(layout).saturating_mul(self.row_height)
    }

    /// Largest useful scroll offset for `layout`.
    pub fn max_scroll(&self, layout: &[LayoutEntry]) -> u16 {
        self.content_height(layout)
            .saturating_sub(self.area.height)
    }

    /// Maps every visible entry to its clipped terminal rectangle, in layout
    /// order. Entries scrolled fully out of view are skipped.
    pub fn cell_rects<'a>(&self, layout: &'a [LayoutEntry]) -> Vec<CellRect<'a>> {
        let top = self.area.y as i32;
        let bottom = top + self.area.height as i32;
        layout
            .iter()
            .filter_map(|entry| {
                let left = self.column_edge(entry.x);
                let right = self.column_edge(entry.right());
                let y0 = top + entry.y as i32 * self.row_height as i32 - self.scroll as i32;
                let y1 = y0 + entry.h as i32 * self.row_height as i32;
                let (y0, y1) = (y0.max(top), y1.min(bottom));
                if y0 >= y1 || left >= right {
                    return None;
                }
                Some(CellRect {
                    id: entry.id.as_str(),
                    rect: Rect::new(left, y0 as u16, right - left, (y1 - y0) as u16),
                })
            })
            .collect()
    }

    /// Grid cell under the terminal position, or `None` outside the area.
    pub fn grid_cell(&self, column: u16, row: u16) -> Option<(u16, u16)> {
        let area = self.area;
        if column < area.x
            || row < area.y
            || column >= area.x + area.width
            || row >= area.y + area.height
        {
            return None;
        }
        let gx = (column - area.x) as u32 * self.cols.max(1) as u32 / area.width.max(1) as u32;
        let gy = (row - area.y + self.scroll) / self.row_height.max(1);
        Some((gx as u16, gy))
    }

    /// Id of the entry under the terminal position.
    pub fn entry_at<'a>(&self, layout: &'a [LayoutEntry], column: u16, row: u16) -> Option<&'a str> {
        let (gx, gy) = self.grid_cell(column, row)?;
        layout
            .iter()
            .find(|e| gx >= e.x && gx < e.right() && gy >= e.y && gy < e.bottom())
            .map(|e| e.id.as_str())
    }
}
