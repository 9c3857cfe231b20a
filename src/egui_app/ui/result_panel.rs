use eframe::egui::{self, Frame, Margin, RichText};

use super::EguiApp;
use super::{charts, style};
use crate::egui_app::state::PredictPhase;
use crate::egui_app::view_model::{self, ResultView};

impl EguiApp {
    pub(super) fn render_result_panel(&mut self, ui: &mut egui::Ui) {
        let palette = style::palette();
        Frame::new()
            .fill(palette.bg_secondary)
            .stroke(style::section_stroke())
            .inner_margin(Margin::same(12))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(RichText::new("Prediction").strong().color(palette.text_primary));
                ui.add_space(6.0);
                let fallback_model = self
                    .controller
                    .ui
                    .health
                    .as_ref()
                    .and_then(|health| health.model_name.as_deref());
                let predict_failed = self.controller.ui.predict_phase == PredictPhase::Failed;
                if let Some(error) = self.controller.ui.error.as_ref().filter(|_| predict_failed) {
                    ui.label(RichText::new(error).color(palette.warning));
                    ui.add_space(4.0);
                }
                match &self.controller.ui.result {
                    Some(result) => {
                        let view = view_model::result_view(result, fallback_model);
                        render_result(ui, &view);
                    }
                    None if self.controller.is_predicting() => {
                        ui.horizontal(|ui| {
                            ui.spinner();
                            ui.label(RichText::new("Predicting…").color(palette.text_muted));
                        });
                    }
                    None => {
                        ui.label(
                            RichText::new("Fill in the form and press Predict.")
                                .color(palette.text_muted),
                        );
                    }
                }
            });
    }
}

fn render_result(ui: &mut egui::Ui, view: &ResultView) {
    let palette = style::palette();
    ui.horizontal(|ui| {
        ui.label(
            RichText::new(&view.label)
                .size(24.0)
                .strong()
                .color(palette.accent_ice),
        );
        ui.add_space(12.0);
        ui.label(RichText::new(&view.probability).size(20.0));
    });
    ui.add_space(4.0);
    charts::probability_bar(ui, view.confidence);
    ui.add_space(6.0);
    egui::Grid::new("result_details")
        .num_columns(2)
        .spacing([12.0, 4.0])
        .show(ui, |ui| {
            for (name, value) in [
                ("Threshold", &view.threshold),
                ("Positive label", &view.positive_label),
                ("Model", &view.model),
            ] {
                ui.label(RichText::new(name).color(palette.text_muted));
                ui.label(value);
                ui.end_row();
            }
        });
    if view.factors.is_empty() {
        return;
    }
    ui.add_space(10.0);
    ui.label(RichText::new("Top factors").strong());
    ui.add_space(4.0);
    let peak = view
        .factors
        .iter()
        .map(|factor| factor.magnitude.abs())
        .fold(0.0_f32, f32::max);
    egui::Grid::new("result_factors")
        .num_columns(4)
        .spacing([12.0, 4.0])
        .striped(true)
        .show(ui, |ui| {
            ui.label(RichText::new("Feature").color(palette.text_muted));
            ui.label(RichText::new("Weight").color(palette.text_muted));
            ui.label(RichText::new("Importance").color(palette.text_muted));
            ui.label("");
            ui.end_row();
            for factor in &view.factors {
                ui.label(&factor.label);
                ui.label(RichText::new(&factor.weight).monospace());
                ui.label(RichText::new(&factor.importance).monospace());
                charts::factor_bar(ui, factor.magnitude, peak);
                ui.end_row();
            }
        });
}
