use super::*;
use crate::config::Config;
use std::time::{Duration, Instant};

#[test]
fn test_app_new() {
    let app = make_app();
    assert!(!app.should_quit);
    assert_eq!(app.tick_count, 0);
    assert!(app.focused.is_none());
    assert_eq!(app.scroll, 0);
    assert_eq!(app.breakpoint, Breakpoint::Lg);
    assert!(app.breakpoint_override.is_none());
    assert!(app.grid_area.is_none());
    assert!(app.status_message.is_none());
    assert!(!app.dashboard.form().is_open());
}

#[test]
fn test_app_new_with_breakpoint_override() {
    let app = App::new(
        Dashboard::default(),
        Duration::from_millis(100),
        Some(Breakpoint::Xs),
    );
    assert_eq!(app.breakpoint, Breakpoint::Xs);
    assert_eq!(app.breakpoint_override, Some(Breakpoint::Xs));
    assert_eq!(app.columns(), 4);
}

#[test]
fn test_config_repairs_are_announced() {
    let mut config = Config::default();
    config
        .layout
        .entry("lg".to_string())
        .or_default()
        .push(LayoutEntry::new("ghost", 0, 20, 2, 2));
    let dashboard = Dashboard::from_config(&config).expect("valid config");
    let app = App::new(dashboard, Duration::from_millis(250), None);
    let (message, _) = app.status_message.as_ref().expect("status message");
    assert!(message.contains("Repaired 1"), "{message}");
}

#[test]
fn test_expire_status_message() {
    let mut app = make_app();
    app.set_status("fresh");
    assert!(!app.expire_status_message());
    assert!(app.status_message.is_some());

    app.status_message = Some((
        "old".to_string(),
        Instant::now().checked_sub(Duration::from_secs(1)).unwrap_or_else(Instant::now),
    ));
    assert!(app.expire_status_message());
    assert!(app.status_message.is_none());
    assert!(!app.expire_status_message());
}

#[test]
fn test_quit_action_sets_flag() {
    let mut app = make_app();
    app.handle_action(Action::None);
    assert!(!app.should_quit);
    app.handle_action(Action::Quit);
    assert!(app.should_quit);
}

#[test]
fn test_dispatch_opens_and_cancels_form() {
    let mut app = make_app();
    assert_eq!(app.dispatch(DashboardAction::OpenForm), Outcome::Updated);
    assert!(app.dashboard.form().is_open());
    assert_eq!(app.dispatch(DashboardAction::OpenForm), Outcome::Unchanged);
    assert_eq!(app.dispatch(DashboardAction::CancelForm), Outcome::Updated);
    assert!(!app.dashboard.form().is_open());
}

#[test]
fn test_rejected_submission_keeps_focus_and_status() {
    let mut app = make_app();
    app.focused = Some("a".to_string());
    app.dispatch(DashboardAction::OpenForm);
    let outcome = app.dispatch(DashboardAction::SubmitForm);
    assert!(matches!(outcome, Outcome::Rejected(_)));
    assert_eq!(app.focused.as_deref(), Some("a"));
    assert!(app.status_message.is_none());
    assert!(app.dashboard.form().draft().error.is_some());
}

#[test]
fn test_focus_follows_reading_order() {
    let mut app = make_app();
    let mut seen = Vec::new();
    for _ in 0..8 {
        app.focus_next();
        seen.push(app.focused.clone().expect("focused"));
    }
    assert_eq!(seen, vec!["a", "b", "c", "d", "e", "f", "g", "h"]);
    app.focus_next();
    assert_eq!(app.focused.as_deref(), Some("a"), "wraps to the first card");
}

#[test]
fn test_focus_previous_starts_from_last() {
    let mut app = make_app();
    app.focus_previous();
    assert_eq!(app.focused.as_deref(), Some("h"));
    app.focus_previous();
    assert_eq!(app.focused.as_deref(), Some("g"));
}

#[test]
fn test_focus_on_empty_layout_is_none() {
    let mut app = App::new(
        Dashboard::from_parts(
            crate::layout::LayoutManager::new(Default::default()),
            Default::default(),
            Default::default(),
        ),
        Duration::from_millis(250),
        None,
    );
    app.focus_next();
    assert!(app.focused.is_none());
}

#[test]
fn test_cycle_breakpoint_override() {
    let mut app = make_app();
    let mut seen = Vec::new();
    for _ in 0..6 {
        app.cycle_breakpoint_override();
        seen.push(app.breakpoint_override);
    }
    assert_eq!(
        seen,
        vec![
            Some(Breakpoint::Lg),
            Some(Breakpoint::Md),
            Some(Breakpoint::Sm),
            Some(Breakpoint::Xs),
            Some(Breakpoint::Xxs),
            None,
        ]
    );
}

#[test]
fn test_viewport_requires_render() {
    let app = make_app();
    assert!(app.viewport().is_none());
    let app = rendered_app();
    let viewport = app.viewport().expect("rendered");
    assert_eq!(viewport.area, Rect::new(0, 1, 120, 38));
    assert_eq!(viewport.cols, 12);
    assert_eq!(viewport.row_height, 4);
}

#[test]
fn test_app_debug_format() {
    let app = make_app();
    let debug = format!("{:?}", app);
    assert!(debug.contains("should_quit"));
    assert!(debug.contains("dashboard"));
    assert!(debug.contains("focused"));
}
