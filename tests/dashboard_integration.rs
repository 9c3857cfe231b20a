mod support;

use std::time::Duration;

use incomelens::config;
use incomelens::egui_app::controller::{CONNECTION_ERROR, DashboardController};
use incomelens::egui_app::state::{PredictPhase, SchemaPhase};
use incomelens::history::{HISTORY_KEY, HistoryStore};
use support::{
    incomelens_env::IncomeLensEnvGuard,
    stub_service::{StubService, closed_base_url},
};
use tempfile::TempDir;

const PREDICTION: &str = r#"{
    "label": ">50K",
    "probability": 0.81,
    "threshold": 0.5,
    "positive_label": ">50K",
    "model": "logreg",
    "top_factors": [{"feature": "capital-gain", "weight": 1.2}]
}"#;

struct DashboardHarness {
    _env: IncomeLensEnvGuard,
    temp: TempDir,
}

impl DashboardHarness {
    fn with_backend(api_base: &str) -> Self {
        let temp = tempfile::tempdir().expect("create tempdir");
        let env = IncomeLensEnvGuard::set_config_home(temp.path().to_path_buf());
        let config_path = config::config_path().expect("config path");
        std::fs::write(
            &config_path,
            format!("api_base_url = \"{api_base}/\"\nrequest_timeout_secs = 5\n"),
        )
        .expect("write config");
        Self { _env: env, temp }
    }

    fn controller(&self) -> DashboardController {
        let config = config::load_or_default().expect("load config");
        DashboardController::from_config(&config).expect("controller")
    }

    fn history_path(&self) -> std::path::PathBuf {
        self.temp
            .path()
            .join(".incomelens")
            .join(format!("{HISTORY_KEY}.json"))
    }
}

fn settle(controller: &mut DashboardController) {
    for _ in 0..1000 {
        controller.poll_background_jobs();
        if !controller.has_pending_jobs() {
            return;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    panic!("requests did not finish");
}

#[test]
fn startup_predict_and_history_round_trip_over_http() {
    let service = StubService::start(&["age", "workclass", "hours-per-week"], PREDICTION);
    let harness = DashboardHarness::with_backend(&service.base_url);

    let mut controller = harness.controller();
    assert_eq!(controller.ui.api_base, service.base_url);
    controller.start();
    settle(&mut controller);
    assert_eq!(controller.ui.schema_phase, SchemaPhase::Ready);
    assert!(controller.model_loaded());
    assert_eq!(controller.fields().len(), 3);

    controller.fill_example();
    controller.set_field("hours-per-week", "not a number");
    controller.submit();
    settle(&mut controller);

    assert_eq!(controller.ui.predict_phase, PredictPhase::Succeeded);
    let result = controller.ui.result.as_ref().expect("prediction result");
    assert_eq!(result.label.as_deref(), Some(">50K"));
    assert_eq!(result.top_factors.len(), 1);

    let bodies = service.predict_bodies();
    assert_eq!(bodies.len(), 1);
    let sent: serde_json::Value = serde_json::from_str(&bodies[0]).expect("request json");
    assert_eq!(sent["features"]["age"], serde_json::json!(37.0));
    assert_eq!(sent["features"]["workclass"], serde_json::json!("Private"));
    assert!(sent["features"]["hours-per-week"].is_null());

    assert!(harness.history_path().exists());
    let reopened = harness.controller();
    assert_eq!(reopened.ui.history.len(), 1);
    assert_eq!(reopened.ui.history[0].label, ">50K");
    assert_eq!(
        HistoryStore::new(harness.history_path()).load(),
        reopened.ui.history
    );
}

#[test]
fn unreachable_backend_fails_startup_and_reconnect_retries() {
    let harness = DashboardHarness::with_backend(&closed_base_url());
    let mut controller = harness.controller();
    controller.start();
    settle(&mut controller);
    assert_eq!(controller.ui.schema_phase, SchemaPhase::Failed);
    assert_eq!(controller.ui.error.as_deref(), Some(CONNECTION_ERROR));
    assert!(!controller.api_online());

    controller.reconnect();
    assert_eq!(controller.ui.schema_phase, SchemaPhase::Loading);
    settle(&mut controller);
    assert_eq!(controller.ui.schema_phase, SchemaPhase::Failed);
}
