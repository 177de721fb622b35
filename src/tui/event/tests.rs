use super::*;
use crate::charts::ChartKind;
use crate::form::Axis;
use crate::tui::test_utils::make_app;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

fn make_key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
    KeyEvent {
        code,
        modifiers,
        kind: KeyEventKind::Press,
        state: KeyEventState::NONE,
    }
}

fn key(code: KeyCode) -> KeyEvent {
    make_key(code, KeyModifiers::NONE)
}

/// Feeds `keys` through the handler and carries out each resulting action.
fn press_all(app: &mut App, keys: impl IntoIterator<Item = KeyEvent>) {
    for k in keys {
        let action = handle_key_event(app, k);
        app.handle_action(action);
    }
}

fn type_text(app: &mut App, text: &str) {
    press_all(app, text.chars().map(|c| key(KeyCode::Char(c))));
}

fn open_form_app() -> App {
    let mut app = make_app();
    press_all(&mut app, [key(KeyCode::Char('a'))]);
    assert!(app.dashboard.form().is_open());
    app
}

#[test]
fn test_event_handler_creation() {
    let handler = EventHandler::new(Duration::from_millis(250));
    assert_eq!(handler.tick_rate, Duration::from_millis(250));
}

#[test]
fn test_event_resize_variant() {
    let event = Event::Resize(80, 24);
    assert!(matches!(event, Event::Resize(80, 24)));
    assert!(format!("{:?}", Event::Tick).contains("Tick"));
}

// --- grid keys ---

#[test]
fn test_q_and_ctrl_c_quit() {
    let mut app = make_app();
    assert_eq!(handle_key_event(&mut app, key(KeyCode::Char('q'))), Action::Quit);
    assert_eq!(
        handle_key_event(&mut app, make_key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
        Action::Quit
    );
}

#[test]
fn test_tab_and_j_k_move_focus() {
    let mut app = make_app();
    assert_eq!(handle_key_event(&mut app, key(KeyCode::Tab)), Action::None);
    assert_eq!(app.focused.as_deref(), Some("a"));
    handle_key_event(&mut app, key(KeyCode::Char('j')));
    assert_eq!(app.focused.as_deref(), Some("b"));
    handle_key_event(&mut app, make_key(KeyCode::BackTab, KeyModifiers::SHIFT));
    assert_eq!(app.focused.as_deref(), Some("a"));
    handle_key_event(&mut app, key(KeyCode::Char('k')));
    assert_eq!(app.focused.as_deref(), Some("h"), "wraps backwards");
}

#[test]
fn test_arrows_without_focus_do_nothing() {
    let mut app = make_app();
    for code in [KeyCode::Left, KeyCode::Right, KeyCode::Up, KeyCode::Down] {
        assert_eq!(handle_key_event(&mut app, key(code)), Action::None);
    }
}

#[test]
fn test_arrow_moves_focused_card() {
    let mut app = make_app();
    app.focused = Some("c".to_string());
    let action = handle_key_event(&mut app, key(KeyCode::Right));
    let Action::Dispatch(DashboardAction::Rearrange { breakpoint, layout }) = action else {
        panic!("expected rearrange, got {action:?}");
    };
    assert_eq!(breakpoint, crate::layout::Breakpoint::Lg);
    let c = layout.iter().find(|e| e.id == "c").expect("c");
    assert_eq!(c.x, 1);
}

#[test]
fn test_shift_arrow_and_capital_letters_resize() {
    let mut app = make_app();
    app.focused = Some("a".to_string());
    let shift_down = handle_key_event(&mut app, make_key(KeyCode::Down, KeyModifiers::SHIFT));
    let capital_j = handle_key_event(&mut app, make_key(KeyCode::Char('J'), KeyModifiers::SHIFT));
    assert_eq!(shift_down, capital_j);
    app.handle_action(shift_down);
    let a = app
        .dashboard
        .layout(crate::layout::Breakpoint::Lg)
        .iter()
        .find(|e| e.id == "a")
        .cloned()
        .expect("a");
    assert_eq!(a.h, 3);
}

#[test]
fn test_esc_clears_focus() {
    let mut app = make_app();
    app.focused = Some("a".to_string());
    assert_eq!(handle_key_event(&mut app, key(KeyCode::Esc)), Action::None);
    assert!(app.focused.is_none());
}

#[test]
fn test_a_opens_form() {
    let mut app = make_app();
    assert_eq!(
        handle_key_event(&mut app, key(KeyCode::Char('a'))),
        Action::Dispatch(DashboardAction::OpenForm)
    );
}

#[test]
fn test_b_cycles_breakpoint() {
    let mut app = make_app();
    handle_key_event(&mut app, key(KeyCode::Char('b')));
    assert_eq!(app.breakpoint_override, Some(crate::layout::Breakpoint::Lg));
    handle_key_event(&mut app, key(KeyCode::Char('b')));
    assert_eq!(app.breakpoint_override, Some(crate::layout::Breakpoint::Md));
}

#[test]
fn test_unknown_keys_return_none() {
    let mut app = make_app();
    for code in [KeyCode::Char('z'), KeyCode::Enter, KeyCode::F(1)] {
        assert_eq!(handle_key_event(&mut app, key(code)), Action::None, "{code:?}");
    }
}

// --- form keys ---

#[test]
fn test_q_types_into_form_instead_of_quitting() {
    let mut app = open_form_app();
    press_all(&mut app, [key(KeyCode::Tab)]);
    assert_eq!(
        handle_key_event(&mut app, key(KeyCode::Char('q'))),
        Action::from(FormEdit::InsertChar('q'))
    );
    assert_eq!(
        handle_key_event(&mut app, make_key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
        Action::Quit
    );
}

#[test]
fn test_form_esc_cancels() {
    let mut app = open_form_app();
    type_text(&mut app, " ");
    press_all(&mut app, [key(KeyCode::Esc)]);
    assert!(!app.dashboard.form().is_open());
}

#[test]
fn test_form_left_right_cycle_type_only_on_type_field() {
    let mut app = open_form_app();
    press_all(&mut app, [key(KeyCode::Right)]);
    assert_eq!(app.dashboard.form().draft().kind, ChartKind::Line);
    press_all(&mut app, [key(KeyCode::Left), key(KeyCode::Left)]);
    assert_eq!(app.dashboard.form().draft().kind, ChartKind::Pie);

    press_all(&mut app, [key(KeyCode::Tab)]);
    assert_eq!(handle_key_event(&mut app, key(KeyCode::Right)), Action::None);
}

#[test]
fn test_form_ctrl_n_and_ctrl_d_edit_pairs() {
    let mut app = open_form_app();
    press_all(&mut app, [make_key(KeyCode::Char('n'), KeyModifiers::CONTROL)]);
    let draft = app.dashboard.form().draft();
    assert_eq!(draft.pairs.len(), 2);
    assert_eq!(draft.focus, FormField::Pair(1, Axis::X));

    press_all(&mut app, [make_key(KeyCode::Char('d'), KeyModifiers::CONTROL)]);
    let draft = app.dashboard.form().draft();
    assert_eq!(draft.pairs.len(), 1);
    assert_eq!(draft.focus, FormField::Pair(0, Axis::X));

    press_all(&mut app, [key(KeyCode::BackTab)]);
    assert_eq!(
        handle_key_event(&mut app, make_key(KeyCode::Char('d'), KeyModifiers::CONTROL)),
        Action::None,
        "Ctrl-D outside a pair does nothing"
    );
}

#[test]
fn test_form_enter_on_blank_draft_shows_error() {
    let mut app = open_form_app();
    press_all(&mut app, [key(KeyCode::Enter)]);
    assert!(app.dashboard.form().is_open());
    assert!(app.dashboard.form().draft().error.is_some());
    assert_eq!(app.dashboard.charts().len(), 3, "only the seeded charts");
}

#[test]
fn test_form_submission_end_to_end() {
    let mut app = open_form_app();
    let charts_before = app.dashboard.charts().len();

    press_all(&mut app, [key(KeyCode::Tab)]);
    type_text(&mut app, "salez");
    press_all(&mut app, [key(KeyCode::Backspace)]);
    type_text(&mut app, "s");
    press_all(&mut app, [key(KeyCode::Tab)]);
    type_text(&mut app, "Month");
    press_all(&mut app, [key(KeyCode::Tab), key(KeyCode::Tab)]);
    type_text(&mut app, "Jan");
    press_all(&mut app, [key(KeyCode::Tab)]);
    type_text(&mut app, "10");
    press_all(&mut app, [key(KeyCode::Enter)]);

    assert!(!app.dashboard.form().is_open());
    assert_eq!(app.dashboard.charts().len(), charts_before + 1);
    let chart = app
        .dashboard
        .charts()
        .list_charts()
        .last()
        .expect("new chart");
    assert_eq!(chart.data_source, "sales");
    assert_eq!(chart.axis_titles.x, "Month");
    assert_eq!(chart.points.len(), 1);
    assert_eq!(chart.points[0].x, "Jan");
    assert_eq!(chart.points[0].y, "10");
    assert_eq!(app.focused.as_deref(), Some(chart.id.as_str()));
    assert!(app
        .dashboard
        .layout(crate::layout::Breakpoint::Lg)
        .iter()
        .any(|e| e.id == chart.id.as_str()));
}
