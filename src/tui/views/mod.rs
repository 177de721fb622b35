//! Drawing for the pieces of the dashboard: grid cards, charts and the
//! creation form.

pub mod card;
pub mod chart;
pub mod form;
