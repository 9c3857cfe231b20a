use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use super::*;
use crate::api::{ApiError, Features, HealthStatus, ModelSchema, PredictionResult};
use tempfile::TempDir;

/// In-memory stand-in for the inference service.
pub(super) struct ScriptedApi {
    pub(super) health: Option<HealthStatus>,
    pub(super) features: Option<Vec<String>>,
    predictions: Mutex<VecDeque<Result<PredictionResult, ApiError>>>,
    pub(super) sent: Mutex<Vec<Features>>,
}

impl ScriptedApi {
    pub(super) fn online(features: &[&str]) -> Self {
        Self {
            health: Some(HealthStatus {
                model_loaded: true,
                model_name: Some("logreg".to_string()),
            }),
            features: Some(features.iter().map(|name| name.to_string()).collect()),
            predictions: Mutex::new(VecDeque::new()),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn offline() -> Self {
        Self {
            health: None,
            features: None,
            ..Self::online(&[])
        }
    }

    pub(super) fn without_schema() -> Self {
        Self {
            features: None,
            ..Self::online(&[])
        }
    }

    pub(super) fn queue_prediction(&self, result: Result<PredictionResult, ApiError>) {
        self.predictions.lock().unwrap().push_back(result);
    }

    pub(super) fn sent(&self) -> Vec<Features> {
        self.sent.lock().unwrap().clone()
    }
}

impl InferenceApi for ScriptedApi {
    fn get_health(&self) -> Result<HealthStatus, ApiError> {
        self.health
            .clone()
            .ok_or_else(|| ApiError::Transport("connection refused".to_string()))
    }

    fn get_schema(&self) -> Result<ModelSchema, ApiError> {
        match &self.features {
            Some(features) => Ok(ModelSchema {
                expected_features: features.clone(),
            }),
            None => Err(ApiError::Status {
                code: 503,
                detail: Some("Model not loaded. Train the model first.".to_string()),
                body: String::new(),
            }),
        }
    }

    fn predict(&self, features: &Features) -> Result<PredictionResult, ApiError> {
        self.sent.lock().unwrap().push(features.clone());
        self.predictions
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(prediction("<=50K", Some(0.23))))
    }
}

pub(super) fn prediction(label: &str, probability: Option<f64>) -> PredictionResult {
    PredictionResult {
        label: Some(label.to_string()),
        probability,
        threshold: Some(0.5),
        positive_label: Some(">50K".to_string()),
        model: Some("logreg".to_string()),
        top_factors: Vec::new(),
    }
}

/// Controller wired to a scripted API and a throwaway history file.
pub(super) struct Harness {
    pub(super) controller: DashboardController,
    pub(super) api: Arc<ScriptedApi>,
    pub(super) store: HistoryStore,
    _dir: TempDir,
}

impl Harness {
    pub(super) fn new(api: ScriptedApi) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let store = HistoryStore::new(dir.path().join("history.json"));
        Self::with_store(api, store, dir)
    }

    pub(super) fn with_store(api: ScriptedApi, store: HistoryStore, dir: TempDir) -> Self {
        let api = Arc::new(api);
        let controller = DashboardController::new(
            api.clone() as Arc<dyn InferenceApi>,
            store.clone(),
            "http://127.0.0.1:8000",
        );
        Self {
            controller,
            api,
            store,
            _dir: dir,
        }
    }

    /// Start and wait until the schema phase settles.
    pub(super) fn started(api: ScriptedApi) -> Self {
        let mut harness = Self::new(api);
        harness.controller.start();
        harness.settle();
        harness
    }

    /// Poll until no background request is pending.
    pub(super) fn settle(&mut self) {
        for _ in 0..400 {
            self.controller.poll_background_jobs();
            if !self.controller.has_pending_jobs() {
                return;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        panic!("background jobs did not finish");
    }

    pub(super) fn submit_and_settle(&mut self) {
        self.controller.submit();
        self.settle();
    }
}
