//! Helpers to convert controller state into egui-facing view structs.

use time::UtcOffset;

use crate::api::{HealthStatus, PredictionResult, TopFactor};
use crate::egui_app::state::{FormState, PredictPhase};
use crate::formatters::{
    NUMBER_DIGITS, PLACEHOLDER, clamp_unit, format_number, format_percent, format_timestamp,
    pretty_label,
};
use crate::heuristics::{FieldKind, FieldSpec};
use crate::history::HistoryEntry;

/// Factors shown in the result panel.
pub const MAX_FACTOR_ROWS: usize = 8;
/// Points plotted in the history trend.
pub const TREND_POINTS: usize = 12;

/// One editable row of the prediction form.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldRowView {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    pub hint: &'static str,
    pub value: String,
}

/// Status pill in the header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BadgeView {
    pub text: String,
    pub ok: bool,
}

/// Formatted copy of the latest prediction.
#[derive(Clone, Debug, PartialEq)]
pub struct ResultView {
    pub label: String,
    pub probability: String,
    pub threshold: String,
    pub positive_label: String,
    pub model: String,
    /// Bar fill in `[0, 1]`.
    pub confidence: f32,
    pub factors: Vec<FactorRowView>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FactorRowView {
    pub label: String,
    pub weight: String,
    pub importance: String,
    /// Signed value used for the bar length.
    pub magnitude: f32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryRowView {
    pub time: String,
    pub label: String,
    pub probability: String,
    pub model: String,
}

/// Build form rows in schema order.
pub fn field_rows(fields: &[FieldSpec], form: &FormState) -> Vec<FieldRowView> {
    fields
        .iter()
        .map(|field| FieldRowView {
            name: field.name.clone(),
            label: pretty_label(&field.name),
            kind: field.kind,
            hint: field.kind.placeholder(),
            value: form.get(&field.name).unwrap_or_default().to_string(),
        })
        .collect()
}

pub fn api_badge(health: Option<&HealthStatus>) -> BadgeView {
    let ok = health.is_some();
    BadgeView {
        text: format!("API: {}", if ok { "Online" } else { "Offline" }),
        ok,
    }
}

pub fn model_badge(health: Option<&HealthStatus>) -> BadgeView {
    let ok = health.is_some_and(|health| health.model_loaded);
    BadgeView {
        text: format!("Model: {}", if ok { "Loaded" } else { "Not loaded" }),
        ok,
    }
}

/// Caption for the submit button.
pub fn submit_label(phase: PredictPhase) -> &'static str {
    match phase {
        PredictPhase::Predicting => "Predicting…",
        _ => "Predict",
    }
}

/// Format a prediction. `fallback_model` comes from the health check.
pub fn result_view(result: &PredictionResult, fallback_model: Option<&str>) -> ResultView {
    ResultView {
        label: text_or_placeholder(result.label.as_deref()),
        probability: format_percent(result.probability),
        threshold: format_number(result.threshold, 2),
        positive_label: text_or_placeholder(result.positive_label.as_deref()),
        model: text_or_placeholder(result.model.as_deref().or(fallback_model)),
        confidence: clamp_unit(result.probability) as f32,
        factors: result
            .top_factors
            .iter()
            .take(MAX_FACTOR_ROWS)
            .map(factor_row)
            .collect(),
    }
}

fn factor_row(factor: &TopFactor) -> FactorRowView {
    FactorRowView {
        label: pretty_label(&factor.feature),
        weight: format_number(factor.weight, NUMBER_DIGITS),
        importance: format_number(factor.importance, NUMBER_DIGITS),
        magnitude: factor.magnitude() as f32,
    }
}

fn text_or_placeholder(value: Option<&str>) -> String {
    value
        .filter(|text| !text.is_empty())
        .unwrap_or(PLACEHOLDER)
        .to_string()
}

/// History rows, newest first, timestamps rendered in `offset`.
pub fn history_rows(history: &[HistoryEntry], offset: UtcOffset) -> Vec<HistoryRowView> {
    history
        .iter()
        .map(|entry| HistoryRowView {
            time: format_timestamp(entry.timestamp, offset),
            label: entry.label.clone(),
            probability: format_percent(Some(entry.probability)),
            model: entry.model.clone(),
        })
        .collect()
}

/// Probabilities of the most recent runs, oldest first, for the trend line.
pub fn history_trend(history: &[HistoryEntry]) -> Vec<f32> {
    history
        .iter()
        .take(TREND_POINTS)
        .rev()
        .map(|entry| clamp_unit(Some(entry.probability)) as f32)
        .collect()
}

/// Offset used for history timestamps, falling back to UTC when the local
/// offset cannot be determined.
pub fn local_offset() -> UtcOffset {
    UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC)
}
