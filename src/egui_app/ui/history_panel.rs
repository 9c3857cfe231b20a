use eframe::egui::{self, Frame, Margin, RichText};

use super::EguiApp;
use super::{charts, style};
use crate::egui_app::view_model;

impl EguiApp {
    pub(super) fn render_history_panel(&mut self, ui: &mut egui::Ui) {
        let palette = style::palette();
        Frame::new()
            .fill(palette.bg_secondary)
            .stroke(style::section_stroke())
            .inner_margin(Margin::same(12))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                let has_history = !self.controller.ui.history.is_empty();
                ui.horizontal(|ui| {
                    ui.label(RichText::new("History").strong().color(palette.text_primary));
                    ui.label(
                        RichText::new(format!("({})", self.controller.ui.history.len()))
                            .color(palette.text_muted),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui
                            .add_enabled(has_history, egui::Button::new("Clear history"))
                            .clicked()
                        {
                            self.controller.clear_history();
                        }
                    });
                });
                if !has_history {
                    ui.label(RichText::new("No predictions yet.").color(palette.text_muted));
                    return;
                }
                ui.add_space(6.0);
                charts::trend_line(ui, &view_model::history_trend(&self.controller.ui.history));
                ui.add_space(6.0);
                let rows = view_model::history_rows(
                    &self.controller.ui.history,
                    view_model::local_offset(),
                );
                egui::Grid::new("history_rows")
                    .num_columns(4)
                    .spacing([16.0, 4.0])
                    .striped(true)
                    .show(ui, |ui| {
                        for header in ["Time", "Label", "Probability", "Model"] {
                            ui.label(RichText::new(header).color(palette.text_muted));
                        }
                        ui.end_row();
                        for row in &rows {
                            ui.label(RichText::new(&row.time).monospace());
                            ui.label(&row.label);
                            ui.label(&row.probability);
                            ui.label(RichText::new(&row.model).color(palette.text_muted));
                            ui.end_row();
                        }
                    });
            });
    }
}
