#![deny(missing_docs)]

//! Entry point for the egui-based IncomeLens dashboard.
#![cfg_attr(
    all(not(debug_assertions), target_os = "windows"),
    windows_subsystem = "windows"
)]
use eframe::egui;
use incomelens::config;
use incomelens::egui_app::ui::{EguiApp, MIN_VIEWPORT_SIZE};
use incomelens::logging;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(err) = logging::init() {
        eprintln!("Logging disabled: {err}");
    }

    let viewport = egui::ViewportBuilder::default()
        .with_min_inner_size(MIN_VIEWPORT_SIZE)
        .with_inner_size([1180.0, 760.0]);

    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "IncomeLens ML",
        native_options,
        Box::new(|cc| {
            let launched = config::load_or_default()
                .map_err(|err| format!("Failed to load config: {err}"))
                .and_then(|cfg| EguiApp::new(&cfg));
            match launched {
                Ok(app) => {
                    app.apply_style(&cc.egui_ctx);
                    Ok(Box::new(app))
                }
                Err(err) => {
                    tracing::error!("{err}");
                    Ok(Box::new(LaunchError { message: err }))
                }
            }
        }),
    )?;
    Ok(())
}

/// Minimal fallback app to display initialization errors.
struct LaunchError {
    message: String,
}

impl eframe::App for LaunchError {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("Failed to start UI");
                ui.label(&self.message);
            });
        });
    }
}
