//! Movable dashboard library
//!
//! A terminal dashboard made of cards on a responsive grid. Cards can be
//! moved and resized per breakpoint, and users add bar, line or pie charts
//! through a creation form.
//!
//! The pieces, bottom up:
//! - [`layout`]: breakpoints, per-breakpoint layouts and grid packing
//! - [`charts`]: chart definitions, the registry and pure chart rendering
//! - [`form`]: the chart creation form and its validation
//! - [`widgets`]: static cards and the id-to-widget lookup
//! - [`dashboard`]: the application-state object tying them together
//! - [`tui`]: the ratatui front end

/// Chart types, definitions, the chart registry and chart rendering.
pub mod charts;

/// Configuration loading, defaults and XDG path resolution.
pub mod config;

/// Application state and the actions that change it.
pub mod dashboard;

/// Chart creation form state and validation.
pub mod form;

/// Grid layouts per breakpoint.
pub mod layout;

/// Tracing subscriber setup.
pub mod logging;

/// TUI module providing the terminal user interface for the dashboard.
pub mod tui;

/// Static cards and widget lookup.
pub mod widgets;
