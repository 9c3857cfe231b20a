//! egui dashboard: controller, UI state, view projections and renderer.

pub mod controller;
pub mod state;
pub mod ui;
pub mod view_model;
