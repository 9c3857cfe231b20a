//! Library exports for the IncomeLens dashboard and its tests.
/// Inference service client and wire types.
pub mod api;
/// Application directory resolution.
pub mod app_dirs;
/// Persisted dashboard configuration.
pub mod config;
/// Shared egui UI modules.
pub mod egui_app;
/// Display formatting and input normalization.
pub mod formatters;
/// Feature-name heuristics for form generation.
pub mod heuristics;
/// Locally persisted prediction history.
pub mod history;
/// Shared HTTP agent helpers.
pub mod http_client;
/// Tracing subscriber setup.
pub mod logging;
