//! Display formatting and input normalization. Pure functions only.

use time::{OffsetDateTime, UtcOffset, format_description::FormatItem, macros::format_description};

use crate::api::FeatureValue;
use crate::heuristics::FieldKind;

/// Shown wherever a value is missing or not finite.
pub const PLACEHOLDER: &str = "—";
/// Digits used for factor weights and importances.
pub const NUMBER_DIGITS: usize = 4;

/// Coerce raw form input into the value sent to the service.
///
/// Empty or absent input becomes `None` (JSON `null`). Numeric fields that do
/// not parse to a finite number also become `None`. Text passes through as is.
pub fn normalize_value(kind: FieldKind, raw: Option<&str>) -> Option<FeatureValue> {
    let raw = raw.filter(|value| !value.is_empty())?;
    match kind {
        FieldKind::Number => raw
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|number| number.is_finite())
            .map(FeatureValue::Number),
        FieldKind::Text => Some(FeatureValue::Text(raw.to_string())),
    }
}

/// Turn a feature name like `hours-per-week` into `Hours Per Week`.
pub fn pretty_label(name: &str) -> String {
    name.split(['.', '-', '_', ' '])
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Format a probability in `[0, 1]` as a percentage with one decimal.
pub fn format_percent(probability: Option<f64>) -> String {
    match probability.filter(|p| p.is_finite()) {
        Some(p) => format!("{:.1}%", p * 100.0),
        None => PLACEHOLDER.to_string(),
    }
}

/// Format a magnitude with a fixed number of decimals.
pub fn format_number(value: Option<f64>, digits: usize) -> String {
    match value.filter(|v| v.is_finite()) {
        Some(v) => format!("{v:.digits$}"),
        None => PLACEHOLDER.to_string(),
    }
}

/// Clamp a probability into `[0, 1]`, mapping missing or non-finite values to zero.
pub fn clamp_unit(probability: Option<f64>) -> f64 {
    probability
        .filter(|p| p.is_finite())
        .map(|p| p.clamp(0.0, 1.0))
        .unwrap_or(0.0)
}

/// Render an epoch-millisecond timestamp as `HH:MM:SS` in the given offset.
pub fn format_timestamp(epoch_ms: i64, offset: UtcOffset) -> String {
    const TIME_FORMAT: &[FormatItem<'_>] = format_description!("[hour]:[minute]:[second]");
    OffsetDateTime::from_unix_timestamp_nanos(i128::from(epoch_ms) * 1_000_000)
        .ok()
        .and_then(|at| at.to_offset(offset).format(TIME_FORMAT).ok())
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}
