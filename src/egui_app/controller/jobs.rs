use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender, TryRecvError};
use std::thread;

use crate::api::{ApiError, Features, HealthStatus, InferenceApi, ModelSchema, PredictionResult};

pub(super) enum JobMessage {
    StartupLoaded(StartupOutcome),
    PredictFinished(PredictOutcome),
}

/// Result of the sequential health + schema fetch.
///
/// `schema` is `None` when the health check failed and the schema was never requested.
#[derive(Debug)]
pub(super) struct StartupOutcome {
    pub(super) health: Result<HealthStatus, ApiError>,
    pub(super) schema: Option<Result<ModelSchema, ApiError>>,
}

#[derive(Debug)]
pub(super) struct PredictOutcome {
    pub(super) result: Result<PredictionResult, ApiError>,
}

pub(super) struct ControllerJobs {
    message_tx: Sender<JobMessage>,
    message_rx: Receiver<JobMessage>,
    startup_in_progress: bool,
    predict_in_progress: bool,
}

impl ControllerJobs {
    pub(super) fn new() -> Self {
        let (message_tx, message_rx) = std::sync::mpsc::channel::<JobMessage>();
        Self {
            message_tx,
            message_rx,
            startup_in_progress: false,
            predict_in_progress: false,
        }
    }

    pub(super) fn try_recv_message(&self) -> Option<JobMessage> {
        match self.message_rx.try_recv() {
            Ok(message) => Some(message),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }

    pub(super) fn startup_in_progress(&self) -> bool {
        self.startup_in_progress
    }

    pub(super) fn predict_in_progress(&self) -> bool {
        self.predict_in_progress
    }

    pub(super) fn begin_startup(&mut self, api: Arc<dyn InferenceApi>) {
        if self.startup_in_progress {
            return;
        }
        self.startup_in_progress = true;
        let tx = self.message_tx.clone();
        thread::spawn(move || {
            let outcome = guarded(|| fetch_health_then_schema(api.as_ref())).unwrap_or_else(
                |err| StartupOutcome {
                    health: Err(err),
                    schema: None,
                },
            );
            let _ = tx.send(JobMessage::StartupLoaded(outcome));
        });
    }

    pub(super) fn clear_startup(&mut self) {
        self.startup_in_progress = false;
    }

    pub(super) fn begin_predict(&mut self, api: Arc<dyn InferenceApi>, features: Features) {
        if self.predict_in_progress {
            return;
        }
        self.predict_in_progress = true;
        let tx = self.message_tx.clone();
        thread::spawn(move || {
            let result = guarded(|| api.predict(&features)).and_then(|result| result);
            let _ = tx.send(JobMessage::PredictFinished(PredictOutcome { result }));
        });
    }

    pub(super) fn clear_predict(&mut self) {
        self.predict_in_progress = false;
    }
}

fn fetch_health_then_schema(api: &dyn InferenceApi) -> StartupOutcome {
    let health = api.get_health();
    let schema = health.is_ok().then(|| api.get_schema());
    StartupOutcome { health, schema }
}

/// Run worker code, turning a panic into an error so every job reports back.
fn guarded<T>(work: impl FnOnce() -> T) -> Result<T, ApiError> {
    panic::catch_unwind(AssertUnwindSafe(work)).map_err(|_| {
        tracing::error!("Inference worker panicked");
        ApiError::Transport("request worker stopped unexpectedly".to_string())
    })
}
