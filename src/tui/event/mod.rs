//! Event handling for the TUI.
//!
//! Wraps crossterm events and adds a tick variant for periodic UI refresh.
//! Keys map to [`Action`]s; state changes go through
//! [`Dashboard::apply`](crate::dashboard::Dashboard::apply) via
//! [`Action::Dispatch`].

use crate::dashboard::DashboardAction;
use crate::form::{FormEdit, FormField};
use crate::tui::app::App;
use crossterm::event::{
    Event as CrosstermEvent, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
    MouseEvent,
};
use futures::StreamExt;
use std::time::Duration;
use tokio::time::interval;

/// Terminal rows scrolled by `PgUp`/`PgDn`.
pub const PAGE_SCROLL: i32 = 10;

/// Application-level event variants.
#[derive(Debug, Clone, Copy)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// A mouse event occurred.
    Mouse(MouseEvent),
    /// Terminal was resized.
    Resize(u16, u16),
    /// Periodic tick for UI refresh.
    Tick,
}

/// Event handler that merges terminal input events with periodic ticks.
pub struct EventHandler {
    /// Tick interval duration.
    tick_rate: Duration,
}

impl EventHandler {
    /// Creates a new EventHandler with the specified tick rate.
    pub fn new(tick_rate: Duration) -> Self {
        Self { tick_rate }
    }

    /// Waits for the next event, returning either a terminal event or a tick.
    ///
    /// Uses `tokio::select!` to race between crossterm input and the tick timer.
    pub async fn next(&self, reader: &mut EventStream) -> std::io::Result<Event> {
        let mut tick = interval(self.tick_rate);
        // Consume the first immediate tick
        tick.tick().await;

        loop {
            tokio::select! {
                maybe_event = reader.next() => {
                    match maybe_event {
                        // Windows reports releases too
                        Some(Ok(CrosstermEvent::Key(key))) if key.kind == KeyEventKind::Press => {
                            return Ok(Event::Key(key))
                        }
                        Some(Ok(CrosstermEvent::Mouse(mouse))) => return Ok(Event::Mouse(mouse)),
                        Some(Ok(CrosstermEvent::Resize(w, h))) => return Ok(Event::Resize(w, h)),
                        Some(Err(e)) => return Err(e),
                        // Ignore key releases, focus and paste events
                        Some(Ok(_)) => continue,
                        None => return Err(std::io::Error::new(
                            std::io::ErrorKind::UnexpectedEof,
                            "event stream ended",
                        )),
                    }
                }
                _ = tick.tick() => {
                    return Ok(Event::Tick);
                }
            }
        }
    }
}

/// Action produced by handling an input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// No action to take.
    None,
    /// Quit the application.
    Quit,
    /// Apply a state change to the dashboard.
    Dispatch(DashboardAction),
}

impl From<FormEdit> for Action {
    fn from(edit: FormEdit) -> Self {
        Action::Dispatch(DashboardAction::Edit(edit))
    }
}

/// Handles a key event by dispatching to the appropriate app method or action.
///
/// While the creation form is open every printable key edits the form and
/// only Ctrl-C quits. Otherwise grid navigation applies.
pub fn handle_key_event(app: &mut App, key: KeyEvent) -> Action {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && key.code == KeyCode::Char('c') {
        return Action::Quit;
    }
    if app.dashboard.form().is_open() {
        return handle_form_key(app, key);
    }

    let shift = key.modifiers.contains(KeyModifiers::SHIFT);
    match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Tab | KeyCode::Char('j') => {
            app.focus_next();
            Action::None
        }
        KeyCode::BackTab | KeyCode::Char('k') => {
            app.focus_previous();
            Action::None
        }
        KeyCode::Left if shift => rearrange(app.resize_focused(-1, 0)),
        KeyCode::Right if shift => rearrange(app.resize_focused(1, 0)),
        KeyCode::Up if shift => rearrange(app.resize_focused(0, -1)),
        KeyCode::Down if shift => rearrange(app.resize_focused(0, 1)),
        KeyCode::Char('H') => rearrange(app.resize_focused(-1, 0)),
        KeyCode::Char('L') => rearrange(app.resize_focused(1, 0)),
        KeyCode::Char('K') => rearrange(app.resize_focused(0, -1)),
        KeyCode::Char('J') => rearrange(app.resize_focused(0, 1)),
        KeyCode::Left => rearrange(app.move_focused(-1, 0)),
        KeyCode::Right => rearrange(app.move_focused(1, 0)),
        KeyCode::Up => rearrange(app.move_focused(0, -1)),
        KeyCode::Down => rearrange(app.move_focused(0, 1)),
        KeyCode::PageUp => {
            app.scroll_by(-PAGE_SCROLL);
            Action::None
        }
        KeyCode::PageDown => {
            app.scroll_by(PAGE_SCROLL);
            Action::None
        }
        KeyCode::Home => {
            app.scroll = 0;
            Action::None
        }
        KeyCode::Char('b') => {
            app.cycle_breakpoint_override();
            Action::None
        }
        KeyCode::Char('a') => Action::Dispatch(DashboardAction::OpenForm),
        KeyCode::Esc => {
            app.focused = None;
            Action::None
        }
        _ => Action::None,
    }
}

fn rearrange(action: Option<DashboardAction>) -> Action {
    action.map_or(Action::None, Action::Dispatch)
}

/// Handles key events while the creation form is open.
fn handle_form_key(app: &App, key: KeyEvent) -> Action {
    let focus = app.dashboard.form().draft().focus;
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => Action::Dispatch(DashboardAction::CancelForm),
        KeyCode::Enter => Action::Dispatch(DashboardAction::SubmitForm),
        KeyCode::Tab | KeyCode::Down => FormEdit::FocusNext.into(),
        KeyCode::BackTab | KeyCode::Up => FormEdit::FocusPrevious.into(),
        KeyCode::Left if focus == FormField::Kind => FormEdit::CycleKind { forward: false }.into(),
        KeyCode::Right if focus == FormField::Kind => FormEdit::CycleKind { forward: true }.into(),
        KeyCode::Char(' ') if focus == FormField::Kind => {
            FormEdit::CycleKind { forward: true }.into()
        }
        KeyCode::Char('n') if ctrl => FormEdit::AddPair.into(),
        KeyCode::Char('d') if ctrl => match focus {
            FormField::Pair(index, _) => FormEdit::RemovePair(index).into(),
            _ => Action::None,
        },
        KeyCode::Backspace => FormEdit::Backspace.into(),
        KeyCode::Char(c) if !ctrl && focus != FormField::Kind => FormEdit::InsertChar(c).into(),
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests;
