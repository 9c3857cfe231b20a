//! Client for the IncomeLens inference service.
//!
//! Three blocking calls (`/health`, `/schema`, `/predict`), no retries and no
//! caching. The controller runs them on worker threads and only ever sees
//! [`ApiError`] values, which it turns into display strings.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::http_client;

const MAX_HEALTH_RESPONSE_BYTES: usize = 16 * 1024;
const MAX_SCHEMA_RESPONSE_BYTES: usize = 256 * 1024;
const MAX_PREDICT_RESPONSE_BYTES: usize = 256 * 1024;

/// Value submitted for one feature. `None` in a [`Features`] map is sent as `null`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FeatureValue {
    /// A finite number.
    Number(f64),
    /// Free text.
    Text(String),
}

/// Request features keyed by schema name.
pub type Features = BTreeMap<String, Option<FeatureValue>>;

/// Service health as reported by `/health`.
#[derive(Clone, Debug, PartialEq)]
pub struct HealthStatus {
    /// Whether the service has a trained model available.
    pub model_loaded: bool,
    /// Name of the loaded model, if reported.
    pub model_name: Option<String>,
}

/// Feature layout the model expects, from `/schema`.
///
/// Only the feature list is read; any other keys in the body are ignored.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ModelSchema {
    /// Ordered feature names.
    pub expected_features: Vec<String>,
}

/// One feature's contribution to a prediction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TopFactor {
    /// Feature name as known to the model.
    pub feature: String,
    /// Signed coefficient for linear models.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// Unsigned importance for tree models.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub importance: Option<f64>,
}

impl TopFactor {
    /// Value plotted in the factor chart: importance, then weight, then zero.
    pub fn magnitude(&self) -> f64 {
        self.importance
            .or(self.weight)
            .filter(|value| value.is_finite())
            .unwrap_or(0.0)
    }
}

/// Outcome of a single `/predict` call.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(from = "PredictionWire")]
pub struct PredictionResult {
    /// Predicted class label.
    pub label: Option<String>,
    /// Probability of the positive class, when the model exposes one.
    pub probability: Option<f64>,
    /// Decision threshold applied to `probability`.
    pub threshold: Option<f64>,
    /// Label counted as the positive class.
    pub positive_label: Option<String>,
    /// Model that produced the prediction.
    pub model: Option<String>,
    /// Explanation entries, most influential first.
    pub top_factors: Vec<TopFactor>,
}

// One slot per spelling; a body may carry both.
#[derive(Debug, Deserialize)]
struct PredictionWire {
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    probability: Option<f64>,
    #[serde(default)]
    threshold: Option<f64>,
    #[serde(default)]
    positive_label: Option<String>,
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    model_name: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    top_factors: Vec<TopFactor>,
}

impl From<PredictionWire> for PredictionResult {
    fn from(wire: PredictionWire) -> Self {
        Self {
            label: wire.label,
            probability: wire.probability,
            threshold: wire.threshold,
            positive_label: wire.positive_label,
            model: first_name([wire.model, wire.model_name]),
            top_factors: wire.top_factors,
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<TopFactor>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<TopFactor>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Deserialize)]
struct HealthWire {
    #[serde(default)]
    model_loaded: Option<bool>,
    #[serde(default)]
    loaded: Option<bool>,
    #[serde(default)]
    model_name: Option<String>,
    #[serde(default)]
    model: Option<String>,
}

impl From<HealthWire> for HealthStatus {
    fn from(wire: HealthWire) -> Self {
        Self {
            model_loaded: wire.model_loaded.or(wire.loaded).unwrap_or(true),
            model_name: first_name([wire.model_name, wire.model]),
        }
    }
}

/// First spelling that carries a non-blank name.
fn first_name<const N: usize>(candidates: [Option<String>; N]) -> Option<String> {
    candidates
        .into_iter()
        .flatten()
        .find(|name| !name.trim().is_empty())
}

#[derive(Serialize)]
struct PredictRequest<'a> {
    features: &'a Features,
}

/// Failures raised by the inference client.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The service could not be reached or the request timed out.
    #[error("HTTP error: {0}")]
    Transport(String),
    /// The service answered with a non-success status.
    #[error("HTTP {code}: {}", detail.as_deref().unwrap_or(body.as_str()))]
    Status {
        /// HTTP status code.
        code: u16,
        /// Server-provided `detail` message, when the body carried one.
        detail: Option<String>,
        /// Raw (bounded) response body.
        body: String,
    },
    /// The response body could not be read or decoded.
    #[error("Invalid response: {0}")]
    Decode(String),
}

impl ApiError {
    /// The most specific server-provided explanation, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Status {
                detail: Some(detail),
                ..
            } => Some(detail.as_str()),
            _ => None,
        }
    }
}

/// Operations the dashboard needs from the inference service.
pub trait InferenceApi: Send + Sync {
    /// Fetch service health.
    fn get_health(&self) -> Result<HealthStatus, ApiError>;
    /// Fetch the ordered feature schema.
    fn get_schema(&self) -> Result<ModelSchema, ApiError>;
    /// Request a prediction for one row of features.
    fn predict(&self, features: &Features) -> Result<PredictionResult, ApiError>;
}

/// Blocking HTTP implementation of [`InferenceApi`].
#[derive(Clone, Debug)]
pub struct HttpInferenceClient {
    base_url: String,
    agent: ureq::Agent,
}

impl HttpInferenceClient {
    /// Create a client for `base_url` with a per-request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            agent: http_client::build_agent(timeout),
        }
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn read_json<T: serde::de::DeserializeOwned>(
        response: ureq::Response,
        max_bytes: usize,
    ) -> Result<T, ApiError> {
        let body = http_client::read_response_text(response, max_bytes)
            .map_err(|err| ApiError::Decode(err.to_string()))?;
        serde_json::from_str(&body).map_err(|err| ApiError::Decode(err.to_string()))
    }
}

impl InferenceApi for HttpInferenceClient {
    fn get_health(&self) -> Result<HealthStatus, ApiError> {
        let response = self
            .agent
            .get(&self.url("/health"))
            .set("Accept", "application/json")
            .call()
            .map_err(|err| map_call_error(err, MAX_HEALTH_RESPONSE_BYTES))?;
        let wire: HealthWire = Self::read_json(response, MAX_HEALTH_RESPONSE_BYTES)?;
        Ok(wire.into())
    }

    fn get_schema(&self) -> Result<ModelSchema, ApiError> {
        let response = self
            .agent
            .get(&self.url("/schema"))
            .set("Accept", "application/json")
            .call()
            .map_err(|err| map_call_error(err, MAX_SCHEMA_RESPONSE_BYTES))?;
        Self::read_json(response, MAX_SCHEMA_RESPONSE_BYTES)
    }

    fn predict(&self, features: &Features) -> Result<PredictionResult, ApiError> {
        let response = self
            .agent
            .post(&self.url("/predict"))
            .set("Accept", "application/json")
            .send_json(PredictRequest { features })
            .map_err(|err| map_call_error(err, MAX_PREDICT_RESPONSE_BYTES))?;
        Self::read_json(response, MAX_PREDICT_RESPONSE_BYTES)
    }
}

fn map_call_error(err: ureq::Error, max_bytes: usize) -> ApiError {
    match err {
        ureq::Error::Status(code, response) => {
            let body = http_client::read_response_text(response, max_bytes)
                .unwrap_or_else(|err| err.to_string());
            ApiError::Status {
                code,
                detail: parse_detail(&body),
                body,
            }
        }
        ureq::Error::Transport(err) => ApiError::Transport(err.to_string()),
    }
}

/// Extract the `detail` field from an error body.
///
/// Validation errors carry structured detail; it is rendered as compact JSON.
fn parse_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body.trim()).ok()?;
    match value.get("detail")? {
        serde_json::Value::Null => None,
        serde_json::Value::String(text) if text.trim().is_empty() => None,
        serde_json::Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}
