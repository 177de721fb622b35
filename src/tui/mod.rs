//! Terminal UI for the movable dashboard.
//!
//! Built on ratatui and crossterm: a grid of cards that can be focused,
//! moved and resized from the keyboard or mouse, plus a modal form for
//! adding charts.

pub mod app;
pub mod event;
pub mod ui;
pub mod views;

#[cfg(test)]
pub(crate) mod test_utils;
