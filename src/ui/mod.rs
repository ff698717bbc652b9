//! egui widgets for the dashboard. Each function draws one part of the window
//! from the current [`crate::state::AppState`] or [`crate::pipeline::DashboardView`].

pub mod map;
pub mod panels;
pub mod plot;
pub mod table;
