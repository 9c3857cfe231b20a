use super::jobs::StartupOutcome;
use super::*;
use crate::heuristics::fields_for_schema;

/// Shown when the health check or schema fetch fails.
pub const CONNECTION_ERROR: &str = "Failed to connect to backend or load schema.";

impl DashboardController {
    /// Fetch health, then schema, in the background.
    pub fn start(&mut self) {
        if self.ui.schema_phase == SchemaPhase::Loading {
            return;
        }
        tracing::info!("Connecting to inference service at {}", self.ui.api_base);
        self.ui.error = None;
        self.ui.schema_phase = SchemaPhase::Loading;
        self.jobs.begin_startup(Arc::clone(&self.api));
    }

    /// Retry startup after a connection failure.
    pub fn reconnect(&mut self) {
        if self.ui.schema_phase == SchemaPhase::Failed {
            self.start();
        }
    }

    pub(super) fn apply_startup_outcome(&mut self, outcome: StartupOutcome) {
        let health = match outcome.health {
            Ok(health) => health,
            Err(err) => {
                tracing::warn!("Health check failed: {err}");
                self.ui.health = None;
                self.fail_startup();
                return;
            }
        };
        tracing::info!(
            model_loaded = health.model_loaded,
            model = health.model_name.as_deref().unwrap_or(PLACEHOLDER),
            "Inference service online"
        );
        self.ui.health = Some(health);

        match outcome.schema {
            Some(Ok(schema)) => {
                tracing::info!(
                    features = schema.expected_features.len(),
                    "Schema loaded"
                );
                self.ui.fields = fields_for_schema(&schema.expected_features);
                self.ui.form = FormState::for_features(&schema.expected_features);
                self.ui.schema = Some(schema);
                self.ui.schema_phase = SchemaPhase::Ready;
            }
            Some(Err(err)) => {
                tracing::warn!("Schema fetch failed: {err}");
                self.fail_startup();
            }
            None => self.fail_startup(),
        }
    }

    fn fail_startup(&mut self) {
        self.ui.schema = None;
        self.ui.fields.clear();
        self.ui.form = FormState::default();
        self.ui.schema_phase = SchemaPhase::Failed;
        self.ui.error = Some(CONNECTION_ERROR.to_string());
    }
}
