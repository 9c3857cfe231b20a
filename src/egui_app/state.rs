//! Shared state types for the egui UI.

use std::collections::BTreeMap;

use crate::api::{HealthStatus, ModelSchema, PredictionResult};
use crate::heuristics::FieldSpec;
use crate::history::HistoryEntry;

/// Top-level UI model consumed by the egui renderer.
#[derive(Clone, Debug, Default)]
pub struct UiState {
    /// Progress of the health + schema fetch.
    pub schema_phase: SchemaPhase,
    /// Progress of the current prediction request.
    pub predict_phase: PredictPhase,
    /// Last health response, kept even when the schema fetch failed.
    pub health: Option<HealthStatus>,
    /// Schema for this session, immutable once loaded.
    pub schema: Option<ModelSchema>,
    /// Form fields in schema order.
    pub fields: Vec<FieldSpec>,
    /// Raw text for every field.
    pub form: FormState,
    /// Most recent successful prediction.
    pub result: Option<PredictionResult>,
    /// Connection or prediction error shown to the user.
    pub error: Option<String>,
    /// Past predictions, newest first.
    pub history: Vec<HistoryEntry>,
    /// Configured service URL, shown for diagnostics.
    pub api_base: String,
}

/// Lifecycle of the startup health and schema fetch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SchemaPhase {
    /// Nothing requested yet.
    #[default]
    Init,
    /// Health or schema request in flight.
    Loading,
    /// Schema loaded and form initialized.
    Ready,
    /// Health or schema request failed.
    Failed,
}

/// Lifecycle of a prediction request.
///
/// `Succeeded` and `Failed` accept a new submit exactly like `Idle`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PredictPhase {
    /// No request made yet.
    #[default]
    Idle,
    /// Request in flight; submitting is disabled.
    Predicting,
    /// Last request returned a result.
    Succeeded,
    /// Last request failed.
    Failed,
}

/// Raw text entered for each schema feature.
///
/// Keys are exactly the schema's feature names; unknown names are rejected.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormState {
    values: BTreeMap<String, String>,
}

impl FormState {
    /// Create an empty entry for every feature.
    pub fn for_features(features: &[String]) -> Self {
        Self {
            values: features
                .iter()
                .map(|name| (name.clone(), String::new()))
                .collect(),
        }
    }

    /// Raw value for a feature, if it is part of the schema.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Overwrite one known entry. Returns `false` for names outside the schema.
    pub fn set(&mut self, name: &str, value: impl Into<String>) -> bool {
        match self.values.get_mut(name) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    /// Reset every entry to the empty string.
    pub fn reset(&mut self) {
        self.values.values_mut().for_each(String::clear);
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the form has no fields.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
