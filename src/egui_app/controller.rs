//! Dashboard controller: owns all UI state and bridges the inference client,
//! history store and egui renderer.

mod form;
mod jobs;
mod predictions;
mod startup;

#[cfg(test)]
mod test_support;

pub use form::EXAMPLE_VALUES;
pub use predictions::{HISTORY_LIMIT, PREDICT_FALLBACK_ERROR};
pub use startup::CONNECTION_ERROR;

use std::sync::Arc;

use crate::api::{HttpInferenceClient, InferenceApi};
use crate::app_dirs::AppDirError;
use crate::config::AppConfig;
use crate::egui_app::state::*;
use crate::formatters::PLACEHOLDER;
use crate::heuristics::FieldSpec;
use crate::history::HistoryStore;
use jobs::{ControllerJobs, JobMessage};

/// Maintains dashboard state and bridges core logic to the egui UI.
///
/// All mutation happens on the UI thread. Network calls run on worker threads
/// and are applied when [`DashboardController::poll_background_jobs`] drains
/// their results, once per frame.
pub struct DashboardController {
    /// State read by the renderer.
    pub ui: UiState,
    api: Arc<dyn InferenceApi>,
    history_store: HistoryStore,
    jobs: ControllerJobs,
}

impl DashboardController {
    /// Create a controller and load persisted history.
    pub fn new(
        api: Arc<dyn InferenceApi>,
        history_store: HistoryStore,
        api_base: impl Into<String>,
    ) -> Self {
        let history = history_store.load();
        tracing::info!(
            entries = history.len(),
            "Loaded prediction history from {}",
            history_store.path().display()
        );
        let ui = UiState {
            history,
            api_base: api_base.into(),
            ..UiState::default()
        };
        Self {
            ui,
            api,
            history_store,
            jobs: ControllerJobs::new(),
        }
    }

    /// Create a controller talking HTTP to the configured service.
    pub fn from_config(config: &AppConfig) -> Result<Self, AppDirError> {
        let client = HttpInferenceClient::new(&config.api_base_url, config.request_timeout());
        let history_store = HistoryStore::in_app_dir()?;
        Ok(Self::new(
            Arc::new(client),
            history_store,
            config.api_base_url.clone(),
        ))
    }

    /// Apply results from finished background requests.
    pub fn poll_background_jobs(&mut self) {
        while let Some(message) = self.jobs.try_recv_message() {
            match message {
                JobMessage::StartupLoaded(outcome) => {
                    self.jobs.clear_startup();
                    self.apply_startup_outcome(outcome);
                }
                JobMessage::PredictFinished(outcome) => {
                    self.jobs.clear_predict();
                    self.apply_predict_outcome(outcome.result);
                }
            }
        }
    }

    /// Whether a request is still running and the UI should keep repainting.
    pub fn has_pending_jobs(&self) -> bool {
        self.jobs.startup_in_progress() || self.jobs.predict_in_progress()
    }

    /// Fields to render, in schema order.
    pub fn fields(&self) -> &[FieldSpec] {
        &self.ui.fields
    }

    /// The service answered the health check.
    pub fn api_online(&self) -> bool {
        self.ui.health.is_some()
    }

    /// The service reports a loaded model.
    ///
    /// False until a health response arrives; a response that omits the flag
    /// counts as loaded.
    pub fn model_loaded(&self) -> bool {
        self.ui
            .health
            .as_ref()
            .is_some_and(|health| health.model_loaded)
    }

    /// Model name from the health check, or a placeholder.
    pub fn model_name(&self) -> &str {
        self.ui
            .health
            .as_ref()
            .and_then(|health| health.model_name.as_deref())
            .unwrap_or(PLACEHOLDER)
    }

    /// A prediction request is in flight.
    pub fn is_predicting(&self) -> bool {
        self.ui.predict_phase == PredictPhase::Predicting
    }

    /// Schema loaded and form ready for input.
    pub fn schema_ready(&self) -> bool {
        self.ui.schema_phase == SchemaPhase::Ready
    }
}
