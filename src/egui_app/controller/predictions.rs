use std::time::{SystemTime, UNIX_EPOCH};

use super::*;
use crate::api::{ApiError, Features, PredictionResult};
use crate::formatters::normalize_value;
use crate::history::HistoryEntry;

/// Maximum number of entries kept in the prediction history.
pub const HISTORY_LIMIT: usize = 20;
/// Shown when a prediction fails without a server-provided detail.
pub const PREDICT_FALLBACK_ERROR: &str = "Prediction failed. Check backend logs.";

impl DashboardController {
    /// Send the current form to the service.
    ///
    /// Ignored until the schema is loaded and while a previous request is
    /// still in flight.
    pub fn submit(&mut self) {
        if !self.schema_ready() {
            tracing::debug!("Schema not loaded; ignoring submit");
            return;
        }
        if self.is_predicting() {
            tracing::debug!("Prediction already in flight; ignoring submit");
            return;
        }
        self.ui.error = None;
        self.ui.result = None;
        self.ui.predict_phase = PredictPhase::Predicting;
        let features = self.normalized_features();
        tracing::info!(features = features.len(), "Submitting prediction");
        self.jobs.begin_predict(Arc::clone(&self.api), features);
    }

    /// Empty the history in memory and on disk.
    pub fn clear_history(&mut self) {
        self.ui.history.clear();
        self.history_store.save(&self.ui.history);
        tracing::info!("Prediction history cleared");
    }

    /// Form values coerced per field kind, as sent to `/predict`.
    pub(super) fn normalized_features(&self) -> Features {
        self.ui
            .fields
            .iter()
            .map(|field| {
                let value = normalize_value(field.kind, self.ui.form.get(&field.name));
                (field.name.clone(), value)
            })
            .collect()
    }

    pub(super) fn apply_predict_outcome(&mut self, outcome: Result<PredictionResult, ApiError>) {
        match outcome {
            Ok(result) => {
                let entry = self.history_entry_for(&result, now_epoch_ms());
                tracing::info!(
                    label = %entry.label,
                    probability = entry.probability,
                    "Prediction succeeded"
                );
                self.ui.result = Some(result);
                self.ui.predict_phase = PredictPhase::Succeeded;
                self.push_history(entry);
            }
            Err(err) => {
                tracing::warn!("Prediction failed: {err}");
                self.ui.result = None;
                self.ui.error = Some(predict_error_message(&err));
                self.ui.predict_phase = PredictPhase::Failed;
            }
        }
    }

    fn history_entry_for(&self, result: &PredictionResult, timestamp: i64) -> HistoryEntry {
        let model = result
            .model
            .clone()
            .or_else(|| {
                self.ui
                    .health
                    .as_ref()
                    .and_then(|health| health.model_name.clone())
            })
            .unwrap_or_else(|| PLACEHOLDER.to_string());
        HistoryEntry {
            timestamp,
            label: result
                .label
                .clone()
                .unwrap_or_else(|| PLACEHOLDER.to_string()),
            probability: result
                .probability
                .filter(|p| p.is_finite())
                .unwrap_or(0.0),
            model,
        }
    }

    fn push_history(&mut self, entry: HistoryEntry) {
        self.ui.history.insert(0, entry);
        self.ui.history.truncate(HISTORY_LIMIT);
        self.history_store.save(&self.ui.history);
    }
}

fn predict_error_message(err: &ApiError) -> String {
    err.detail()
        .map(str::to_string)
        .unwrap_or_else(|| PREDICT_FALLBACK_ERROR.to_string())
}

fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}
