//! Per-station weather dashboard: a pure data pipeline (`data`) behind an
//! egui front end (`app`, `ui`).

pub mod app;
pub mod color;
pub mod data;
pub mod error;
pub mod state;
pub mod ui;
