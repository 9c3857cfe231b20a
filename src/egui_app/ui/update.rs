use std::time::Duration;

use eframe::egui::{self, Frame, Margin};

use super::EguiApp;
use super::style;

/// Repaint cadence while a request is outstanding.
const PENDING_REPAINT: Duration = Duration::from_millis(100);

impl eframe::App for EguiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.controller.poll_background_jobs();
        self.render_ui(ctx);
        if self.controller.has_pending_jobs() {
            ctx.request_repaint_after(PENDING_REPAINT);
        }
    }
}

impl EguiApp {
    fn render_ui(&mut self, ctx: &egui::Context) {
        let palette = style::palette();
        self.render_header(ctx);
        self.render_footer(ctx);
        egui::SidePanel::left("form_panel")
            .resizable(true)
            .default_width(400.0)
            .min_width(320.0)
            .frame(
                Frame::new()
                    .fill(palette.bg_secondary)
                    .stroke(style::section_stroke())
                    .inner_margin(Margin::same(12)),
            )
            .show(ctx, |ui| self.render_form_panel(ui));
        egui::CentralPanel::default()
            .frame(
                Frame::new()
                    .fill(palette.bg_primary)
                    .inner_margin(Margin::same(12)),
            )
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .id_salt("results_scroll")
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        self.render_result_panel(ui);
                        ui.add_space(16.0);
                        self.render_history_panel(ui);
                    });
            });
    }
}
