use eframe::egui::{self, Frame, Margin, RichText, StrokeKind};

use super::EguiApp;
use super::style;
use crate::egui_app::view_model::{self, BadgeView};

impl EguiApp {
    pub(super) fn render_header(&mut self, ctx: &egui::Context) {
        let palette = style::palette();
        egui::TopBottomPanel::top("header")
            .frame(
                Frame::new()
                    .fill(palette.bg_primary)
                    .stroke(style::section_stroke())
                    .inner_margin(Margin::symmetric(12, 8)),
            )
            .show(ctx, |ui| {
                let health = self.controller.ui.health.as_ref();
                let api = view_model::api_badge(health);
                let model = view_model::model_badge(health);
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new("IncomeLens")
                            .strong()
                            .size(18.0)
                            .color(palette.text_primary),
                    );
                    ui.label(
                        RichText::new("Adult income classifier").color(palette.text_muted),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        badge(ui, &model);
                        ui.add_space(8.0);
                        badge(ui, &api);
                    });
                });
            });
    }

    pub(super) fn render_footer(&mut self, ctx: &egui::Context) {
        let palette = style::palette();
        egui::TopBottomPanel::bottom("footer")
            .frame(
                Frame::new()
                    .fill(palette.bg_primary)
                    .stroke(style::section_stroke())
                    .inner_margin(Margin::symmetric(12, 4)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new("Backend").color(palette.text_muted));
                    ui.separator();
                    ui.label(RichText::new(&self.controller.ui.api_base).monospace());
                    ui.separator();
                    ui.label(RichText::new("Model").color(palette.text_muted));
                    ui.separator();
                    ui.label(self.controller.model_name());
                });
            });
    }
}

fn badge(ui: &mut egui::Ui, badge: &BadgeView) {
    let color = style::status_color(badge.ok);
    ui.label(RichText::new(&badge.text).color(color));
    let (rect, _) = ui.allocate_exact_size(egui::vec2(10.0, 10.0), egui::Sense::hover());
    ui.painter().rect_filled(rect, 0.0, color);
    ui.painter()
        .rect_stroke(rect, 0.0, style::section_stroke(), StrokeKind::Inside);
}
