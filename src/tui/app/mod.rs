//! Application state and main event loop for the TUI.
//!
//! Manages terminal setup/teardown, panic hooks, and the core render loop.
//! Dashboard state lives in [`Dashboard`]; `App` adds what only the terminal
//! needs: focus, scrolling, the active breakpoint and in-flight mouse drags.

mod update;

use crate::dashboard::{Dashboard, DashboardAction, Outcome};
use crate::layout::{grid, Breakpoint};
use crate::tui::event::{handle_key_event, Action, Event, EventHandler};
use crate::tui::ui::render_dashboard;
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::layout::Rect;
use ratatui::prelude::{CrosstermBackend, Terminal};
use std::io::{self, stdout};
use std::time::{Duration, Instant};

/// How long a footer status message stays visible.
pub const STATUS_MESSAGE_DURATION: Duration = Duration::from_secs(3);

/// Terminal rows scrolled per mouse wheel notch.
pub const WHEEL_SCROLL: i32 = 3;

/// What a left-button drag is doing to its card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DragMode {
    /// Moving; `grab` is the grid cell offset of the pointer inside the card.
    Move { grab: (u16, u16) },
    /// Resizing from the bottom-right corner.
    Resize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Drag {
    id: String,
    mode: DragMode,
}

/// Core application state for the TUI.
#[derive(Debug)]
pub struct App {
    /// Whether the application should exit.
    pub should_quit: bool,
    /// Count of ticks processed (useful for testing/diagnostics).
    pub tick_count: u64,
    /// Layouts, charts, cards and the creation form.
    pub dashboard: Dashboard,
    /// Id of the focused card.
    pub focused: Option<String>,
    /// Terminal rows scrolled off the top of the grid.
    pub scroll: u16,
    /// Breakpoint forced from the CLI or the `b` key; `None` follows the
    /// terminal width.
    pub breakpoint_override: Option<Breakpoint>,
    /// Breakpoint used by the last render pass.
    pub breakpoint: Breakpoint,
    /// Grid area of the last render pass. Mouse hit-testing maps through it;
    /// `None` until the first render.
    pub grid_area: Option<Rect>,
    /// Temporary status message shown in footer, with expiry time.
    pub status_message: Option<(String, Instant)>,
    drag: Option<Drag>,
    tick_rate: Duration,
}

impl App {
    /// Creates an app over `dashboard`.
    ///
    /// Configuration repairs made while building the dashboard are announced
    /// in the footer.
    pub fn new(
        dashboard: Dashboard,
        tick_rate: Duration,
        breakpoint_override: Option<Breakpoint>,
    ) -> Self {
        let mut app = Self {
            should_quit: false,
            tick_count: 0,
            dashboard,
            focused: None,
            scroll: 0,
            breakpoint_override,
            breakpoint: breakpoint_override.unwrap_or(Breakpoint::Lg),
            grid_area: None,
            status_message: None,
            drag: None,
            tick_rate,
        };
        let repairs = app.dashboard.warnings().len();
        if repairs > 0 {
            app.set_status(format!(
                "Repaired {repairs} configuration issue(s); see the log for details"
            ));
        }
        app
    }

    /// Shows `message` in the footer for [`STATUS_MESSAGE_DURATION`].
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some((message.into(), Instant::now() + STATUS_MESSAGE_DURATION));
    }

    /// Clears the status message if its expiry time has passed. Returns
    /// `true` when a message was cleared.
    pub fn expire_status_message(&mut self) -> bool {
        match &self.status_message {
            Some((_, expiry)) if Instant::now() >= *expiry => {
                self.status_message = None;
                true
            }
            _ => false,
        }
    }

    /// Applies `action` to the dashboard and updates focus and the footer
    /// from the outcome.
    pub fn dispatch(&mut self, action: DashboardAction) -> Outcome {
        let rearranged = matches!(action, DashboardAction::Rearrange { .. });
        let outcome = self.dashboard.apply(action);
        match &outcome {
            Outcome::ChartAdded(id) => {
                self.focused = Some(id.to_string());
                self.ensure_focus_visible();
                let title = self
                    .dashboard
                    .charts()
                    .get(id.as_str())
                    .map(|c| c.title.clone())
                    .unwrap_or_default();
                self.set_status(format!("Added \"{title}\" as {id}"));
            }
            Outcome::Failed(e) => self.set_status(format!("Could not add chart: {e}")),
            Outcome::Updated if rearranged => self.ensure_focus_visible(),
            Outcome::Updated | Outcome::Unchanged | Outcome::Rejected(_) => {}
        }
        outcome
    }

    /// Carries out an input [`Action`].
    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::Quit => self.should_quit = true,
            Action::Dispatch(action) => {
                self.dispatch(action);
            }
        }
    }

    /// Handles a mouse event and returns the resulting action.
    ///
    /// Left-press on a card focuses it and starts a drag: from the card's
    /// bottom-right corner the drag resizes, anywhere else it moves. Drags
    /// change the layout in whole grid cells. The wheel scrolls. Mouse input
    /// is ignored while the form is open.
    pub fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Action {
        if self.dashboard.form().is_open() {
            return Action::None;
        }
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.start_drag(mouse.column, mouse.row);
                Action::None
            }
            MouseEventKind::Drag(MouseButton::Left) => self
                .drag_to(mouse.column, mouse.row)
                .map_or(Action::None, Action::Dispatch),
            MouseEventKind::Up(MouseButton::Left) => {
                self.drag = None;
                Action::None
            }
            MouseEventKind::ScrollDown => {
                self.scroll_by(WHEEL_SCROLL);
                Action::None
            }
            MouseEventKind::ScrollUp => {
                self.scroll_by(-WHEEL_SCROLL);
                Action::None
            }
            _ => Action::None,
        }
    }

    fn start_drag(&mut self, column: u16, row: u16) {
        self.drag = None;
        let Some(viewport) = self.viewport() else {
            return;
        };
        let layout = self.dashboard.layout(self.breakpoint).into_owned();
        let Some(entry) = viewport
            .entry_at(&layout, column, row)
            .and_then(|id| layout.iter().find(|e| e.id == id))
        else {
            self.focused = None;
            return;
        };

        let on_corner = viewport
            .cell_rects(&layout)
            .iter()
            .find(|c| c.id == entry.id)
            .is_some_and(|c| column + 1 == c.rect.right() && row + 1 == c.rect.bottom());
        let mode = if on_corner {
            DragMode::Resize
        } else {
            let (gx, gy) = viewport.grid_cell(column, row).unwrap_or((entry.x, entry.y));
            DragMode::Move {
                grab: (gx.saturating_sub(entry.x), gy.saturating_sub(entry.y)),
            }
        };
        tracing::trace!(id = %entry.id, ?mode, "drag started");
        self.focused = Some(entry.id.clone());
        self.drag = Some(Drag {
            id: entry.id.clone(),
            mode,
        });
    }

    fn drag_to(&mut self, column: u16, row: u16) -> Option<DashboardAction> {
        let drag = self.drag.clone()?;
        let viewport = self.viewport()?;
        let (gx, gy) = viewport.grid_cell(column, row)?;
        let layout = self.dashboard.layout(self.breakpoint).into_owned();
        let entry = layout.iter().find(|e| e.id == drag.id)?;

        let updated = match drag.mode {
            DragMode::Move { grab } => {
                let dx = gx as i32 - grab.0 as i32 - entry.x as i32;
                let dy = gy as i32 - grab.1 as i32 - entry.y as i32;
                grid::move_entry(&layout, &drag.id, dx, dy, viewport.cols)
            }
            DragMode::Resize => {
                let dw = gx as i32 + 1 - entry.right() as i32;
                let dh = gy as i32 + 1 - entry.bottom() as i32;
                grid::resize_entry(&layout, &drag.id, dw, dh, viewport.cols)
            }
        };
        (updated != layout).then(|| DashboardAction::Rearrange {
            breakpoint: self.breakpoint,
            layout: updated,
        })
    }

    /// Runs the TUI application: sets up terminal, enters event loop, restores on exit.
    pub async fn run(&mut self) -> io::Result<()> {
        // Install panic hook that restores terminal before printing panic info
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = restore_terminal();
            original_hook(panic_info);
        }));

        setup_terminal()?;

        let result = self.event_loop().await;

        restore_terminal()?;
        result
    }

    /// Main event loop: renders UI and processes events.
    async fn event_loop(&mut self) -> io::Result<()> {
        let backend = CrosstermBackend::new(stdout());
        let mut terminal = Terminal::new(backend)?;
        let event_handler = EventHandler::new(self.tick_rate);
        let mut reader = EventStream::new();

        let mut should_render = true;
        loop {
            if should_render {
                terminal.draw(|frame| {
                    render_dashboard(frame, self);
                })?;
            }

            let event = event_handler.next(&mut reader).await?;
            should_render = match event {
                Event::Key(key) => {
                    let action = handle_key_event(self, key);
                    self.handle_action(action);
                    true
                }
                Event::Mouse(mouse) => {
                    let action = self.handle_mouse_event(mouse);
                    self.handle_action(action);
                    true
                }
                Event::Tick => {
                    self.tick_count += 1;
                    self.expire_status_message()
                }
                Event::Resize(_, _) => true,
            };

            if self.should_quit {
                tracing::debug!(ticks = self.tick_count, "quitting");
                return Ok(());
            }
        }
    }
}

/// Enables raw mode and switches to the alternate screen.
fn setup_terminal() -> io::Result<()> {
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen, EnableMouseCapture)?;
    Ok(())
}

/// Restores the terminal to its original state.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
    Ok(())
}

#[cfg(test)]
mod tests;
