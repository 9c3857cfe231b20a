use eframe::egui::{self, RichText};

use super::EguiApp;
use super::style;
use crate::egui_app::state::SchemaPhase;
use crate::egui_app::view_model;

const LABEL_WIDTH: f32 = 130.0;

impl EguiApp {
    pub(super) fn render_form_panel(&mut self, ui: &mut egui::Ui) {
        let palette = style::palette();
        ui.label(RichText::new("Applicant").strong().color(palette.text_primary));
        ui.add_space(6.0);
        match self.controller.ui.schema_phase {
            SchemaPhase::Init | SchemaPhase::Loading => {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label(RichText::new("Loading schema…").color(palette.text_muted));
                });
            }
            SchemaPhase::Failed => self.render_connection_failure(ui),
            SchemaPhase::Ready => self.render_form(ui),
        }
    }

    fn render_connection_failure(&mut self, ui: &mut egui::Ui) {
        let palette = style::palette();
        if let Some(error) = &self.controller.ui.error {
            ui.label(RichText::new(error).color(palette.warning));
        }
        ui.label(
            RichText::new(format!("Backend: {}", self.controller.ui.api_base))
                .color(palette.text_muted),
        );
        ui.add_space(8.0);
        if ui.button("Reconnect").clicked() {
            self.controller.reconnect();
        }
    }

    fn render_form(&mut self, ui: &mut egui::Ui) {
        let palette = style::palette();
        let predicting = self.controller.is_predicting();
        ui.horizontal(|ui| {
            if ui.button("Fill example").clicked() {
                self.controller.fill_example();
            }
            if ui.button("Clear").clicked() {
                self.controller.clear();
            }
        });
        ui.add_space(8.0);

        let rows = view_model::field_rows(self.controller.fields(), &self.controller.ui.form);
        let mut submit_requested = false;
        let footer_height = 96.0;
        egui::ScrollArea::vertical()
            .id_salt("form_fields_scroll")
            .max_height((ui.available_height() - footer_height).max(120.0))
            .show(ui, |ui| {
                egui::Grid::new("form_fields")
                    .num_columns(2)
                    .spacing([8.0, 6.0])
                    .show(ui, |ui| {
                        for row in &rows {
                            ui.add_sized(
                                [LABEL_WIDTH, 20.0],
                                egui::Label::new(
                                    RichText::new(&row.label).color(palette.text_muted),
                                )
                                .truncate(),
                            )
                            .on_hover_text(&row.name);
                            let mut value = row.value.clone();
                            let response = ui.add(
                                egui::TextEdit::singleline(&mut value)
                                    .hint_text(row.hint)
                                    .desired_width(f32::INFINITY),
                            );
                            if response.changed() {
                                self.controller.set_field(&row.name, value);
                            }
                            if response.lost_focus()
                                && ui.input(|i| i.key_pressed(egui::Key::Enter))
                            {
                                submit_requested = true;
                            }
                            ui.end_row();
                        }
                    });
            });

        ui.add_space(10.0);
        let label = view_model::submit_label(self.controller.ui.predict_phase);
        ui.horizontal(|ui| {
            let button = egui::Button::new(RichText::new(label).strong());
            if ui.add_enabled(!predicting, button).clicked() {
                submit_requested = true;
            }
            if predicting {
                ui.spinner();
            }
        });
        if submit_requested {
            self.controller.submit();
        }
    }
}
