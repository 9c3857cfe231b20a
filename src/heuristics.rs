//! Name-based guesses about how a feature should be edited.
//!
//! The service schema only lists feature names, so the input kind is inferred
//! by substring matching. A feature literally named `countryNum` is treated as
//! numeric; that false positive is accepted until the schema declares types.

/// Substrings that mark a feature as numeric, matched against the lower-cased name.
pub const NUMERIC_HINTS: &[&str] = &[
    "age",
    "hours",
    "capital",
    "fnlwgt",
    "education-num",
    "education_num",
    "education.num",
    "gain",
    "loss",
    "per-week",
    "per_week",
    "per.week",
    "num",
    "count",
];

/// How a form field is edited and normalized.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Parsed as a finite number before submission.
    Number,
    /// Sent through as entered.
    Text,
}

impl FieldKind {
    /// Example text shown in an empty input.
    pub fn placeholder(self) -> &'static str {
        match self {
            Self::Number => "e.g., 40",
            Self::Text => "e.g., Private",
        }
    }
}

/// One input field derived from a schema entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    /// Feature name exactly as the service expects it.
    pub name: String,
    /// Inferred input kind.
    pub kind: FieldKind,
}

/// Guess the input kind for a feature name.
pub fn guess_input_kind(feature_name: &str) -> FieldKind {
    let lower = feature_name.to_lowercase();
    if NUMERIC_HINTS.iter().any(|hint| lower.contains(hint)) {
        FieldKind::Number
    } else {
        FieldKind::Text
    }
}

/// Build the ordered field list for a schema.
pub fn fields_for_schema(features: &[String]) -> Vec<FieldSpec> {
    features
        .iter()
        .map(|name| FieldSpec {
            name: name.clone(),
            kind: guess_input_kind(name),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn census_features_classify_as_expected() {
        let numeric = [
            "age",
            "fnlwgt",
            "education-num",
            "education.num",
            "capital-gain",
            "capital.loss",
            "hours-per-week",
            "hours.per.week",
        ];
        for name in numeric {
            assert_eq!(guess_input_kind(name), FieldKind::Number, "{name}");
        }
        let text = [
            "workclass",
            "education",
            "marital-status",
            "occupation",
            "relationship",
            "race",
            "sex",
            "native-country",
        ];
        for name in text {
            assert_eq!(guess_input_kind(name), FieldKind::Text, "{name}");
        }
    }

    #[test]
    fn matching_ignores_case() {
        assert_eq!(guess_input_kind("AGE"), FieldKind::Number);
        assert_eq!(guess_input_kind("Hours_Per_Week"), FieldKind::Number);
        assert_eq!(guess_input_kind("WorkClass"), FieldKind::Text);
    }

    #[test]
    fn substring_heuristic_keeps_known_false_positives() {
        assert_eq!(guess_input_kind("countryNum"), FieldKind::Number);
        assert_eq!(guess_input_kind("account"), FieldKind::Number);
        assert_eq!(guess_input_kind("stage"), FieldKind::Number);
        assert_eq!(guess_input_kind("city"), FieldKind::Text);
    }

    #[test]
    fn every_hint_on_its_own_is_numeric() {
        for hint in NUMERIC_HINTS {
            assert_eq!(guess_input_kind(&format!("x_{hint}_y")), FieldKind::Number);
        }
    }

    #[test]
    fn fields_follow_schema_order() {
        let schema = vec!["workclass".to_string(), "age".to_string()];
        let fields = fields_for_schema(&schema);
        assert_eq!(
            fields,
            vec![
                FieldSpec {
                    name: "workclass".into(),
                    kind: FieldKind::Text,
                },
                FieldSpec {
                    name: "age".into(),
                    kind: FieldKind::Number,
                },
            ]
        );
    }
}
