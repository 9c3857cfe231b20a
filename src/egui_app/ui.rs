//! egui renderer for the application UI.
mod charts;
mod chrome;
mod form_panel;
mod history_panel;
mod result_panel;
mod style;
mod update;

use crate::config::AppConfig;
use crate::egui_app::controller::DashboardController;
use eframe::egui;

/// Minimum window size that keeps the form and result panels usable.
pub const MIN_VIEWPORT_SIZE: egui::Vec2 = egui::vec2(860.0, 560.0);

/// Renders the egui UI using the shared controller state.
pub struct EguiApp {
    controller: DashboardController,
}

impl EguiApp {
    /// Create the app and start connecting to the inference service.
    pub fn new(config: &AppConfig) -> Result<Self, String> {
        let mut controller = DashboardController::from_config(config)
            .map_err(|err| format!("Failed to open history storage: {err}"))?;
        controller.start();
        Ok(Self { controller })
    }

    /// Install the dashboard palette on the context.
    pub fn apply_style(&self, ctx: &egui::Context) {
        let mut visuals = egui::Visuals::dark();
        style::apply_visuals(&mut visuals);
        ctx.set_visuals(visuals);
    }
}
