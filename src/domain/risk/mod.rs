// SPDX-License-Identifier: MPL-2.0
//! Risk-factor form values and prediction results.
//!
//! The form is a fixed set of eleven fields, each carried as a string exactly
//! as the user (or smart fill) entered it. Conversion to numbers is left to
//! the prediction collaborator; the form only enforces its validation
//! contract (see [`FormState::validate`]).

use std::collections::BTreeMap;
use std::fmt;

// =============================================================================
// Fields
// =============================================================================

/// Kind of value a field accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Free numeric input (integer or decimal).
    Numeric,
    /// `male` or `female`.
    Gender,
    /// `yes` or `no`.
    YesNo,
}

impl ValueKind {
    /// Allowed values for choice fields, `None` for numeric input.
    #[must_use]
    pub fn choices(self) -> Option<&'static [&'static str]> {
        match self {
            ValueKind::Numeric => None,
            ValueKind::Gender => Some(&["male", "female"]),
            ValueKind::YesNo => Some(&["no", "yes"]),
        }
    }
}

/// One of the risk-factor form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldName {
    Age,
    Height,
    Weight,
    Gender,
    ApHi,
    ApLo,
    Cholesterol,
    Glucose,
    Smoke,
    Alco,
    Active,
}

impl FieldName {
    /// All fields in form order.
    pub const ALL: [FieldName; 11] = [
        FieldName::Age,
        FieldName::Height,
        FieldName::Weight,
        FieldName::Gender,
        FieldName::ApHi,
        FieldName::ApLo,
        FieldName::Cholesterol,
        FieldName::Glucose,
        FieldName::Smoke,
        FieldName::Alco,
        FieldName::Active,
    ];

    /// Wire name used by the extraction and prediction collaborators.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            FieldName::Age => "age",
            FieldName::Height => "height",
            FieldName::Weight => "weight",
            FieldName::Gender => "gender",
            FieldName::ApHi => "ap_hi",
            FieldName::ApLo => "ap_lo",
            FieldName::Cholesterol => "cholesterol",
            FieldName::Glucose => "glucose",
            FieldName::Smoke => "smoke",
            FieldName::Alco => "alco",
            FieldName::Active => "active",
        }
    }

    /// Parses a wire name.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.key() == key)
    }

    #[must_use]
    pub fn value_kind(self) -> ValueKind {
        match self {
            FieldName::Gender => ValueKind::Gender,
            FieldName::Smoke | FieldName::Alco | FieldName::Active => ValueKind::YesNo,
            _ => ValueKind::Numeric,
        }
    }

    /// Whether the stored user profile can supply this field.
    #[must_use]
    pub fn has_profile_fallback(self) -> bool {
        matches!(
            self,
            FieldName::Age | FieldName::Height | FieldName::Weight | FieldName::Gender
        )
    }

    /// i18n key of the field label.
    #[must_use]
    pub fn label_key(self) -> String {
        format!("form-field-{}", self.key().replace('_', "-"))
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Returns `true` when the value is absent or only whitespace.
#[must_use]
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

// =============================================================================
// FormState
// =============================================================================

/// Why a field failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldProblem {
    /// Required field left blank.
    Missing,
    /// Numeric field that does not parse as a number.
    NotANumber,
    /// Choice field holding a value outside its options.
    UnknownChoice,
}

impl FieldProblem {
    #[must_use]
    pub fn i18n_key(self) -> &'static str {
        match self {
            FieldProblem::Missing => "form-error-required",
            FieldProblem::NotANumber => "form-error-number",
            FieldProblem::UnknownChoice => "form-error-choice",
        }
    }
}

/// A field-level validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldIssue {
    pub field: FieldName,
    pub problem: FieldProblem,
}

/// Values of every risk-factor field, blank by default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    values: [String; 11],
}

impl FormState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, field: FieldName) -> &str {
        &self.values[field.index()]
    }

    pub fn set(&mut self, field: FieldName, value: impl Into<String>) {
        self.values[field.index()] = value.into();
    }

    /// Resets every field to blank.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Iterates `(field, value)` pairs in form order.
    pub fn iter(&self) -> impl Iterator<Item = (FieldName, &str)> {
        FieldName::ALL
            .into_iter()
            .map(move |field| (field, self.get(field)))
    }

    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.values.iter().all(|value| is_blank(value))
    }

    /// Checks the form's own validation contract: every field is required,
    /// numeric fields parse as numbers and choice fields hold a known option.
    ///
    /// Returns every failing field so they can be flagged at once.
    pub fn validate(&self) -> Result<(), Vec<FieldIssue>> {
        let issues: Vec<FieldIssue> = self
            .iter()
            .filter_map(|(field, value)| {
                check_field(field, value).map(|problem| FieldIssue { field, problem })
            })
            .collect();

        if issues.is_empty() {
            Ok(())
        } else {
            Err(issues)
        }
    }
}

fn check_field(field: FieldName, value: &str) -> Option<FieldProblem> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some(FieldProblem::Missing);
    }
    match field.value_kind().choices() {
        None => match trimmed.parse::<f64>() {
            Ok(number) if number.is_finite() => None,
            _ => Some(FieldProblem::NotANumber),
        },
        Some(options) => {
            if options.iter().any(|option| option.eq_ignore_ascii_case(trimmed)) {
                None
            } else {
                Some(FieldProblem::UnknownChoice)
            }
        }
    }
}

// =============================================================================
// Extraction input and stored profile
// =============================================================================

/// Values the extraction collaborator found in a report.
///
/// Fields it did not find read as the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedData {
    values: BTreeMap<FieldName, String>,
}

impl ExtractedData {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds from wire pairs, ignoring keys that are not form fields.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        let values = pairs
            .into_iter()
            .filter_map(|(key, value)| {
                FieldName::from_key(key.as_ref()).map(|field| (field, value.into()))
            })
            .collect();
        Self { values }
    }

    #[must_use]
    pub fn with(mut self, field: FieldName, value: impl Into<String>) -> Self {
        self.values.insert(field, value.into());
        self
    }

    #[must_use]
    pub fn get(&self, field: FieldName) -> &str {
        self.values.get(&field).map_or("", String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Attributes stored for the signed-in user; read-only input to smart fill.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserProfile {
    pub age: Option<String>,
    pub height: Option<String>,
    pub weight: Option<String>,
    pub gender: Option<String>,
}

impl UserProfile {
    /// Returns the stored value for a field, if the profile covers it.
    #[must_use]
    pub fn get(&self, field: FieldName) -> Option<&str> {
        let value = match field {
            FieldName::Age => &self.age,
            FieldName::Height => &self.height,
            FieldName::Weight => &self.weight,
            FieldName::Gender => &self.gender,
            _ => return None,
        };
        value.as_deref()
    }
}

// =============================================================================
// Prediction
// =============================================================================

/// Probability above which a specialist search is offered.
pub const SPECIALIST_THRESHOLD: f64 = 50.0;

/// Probability above which the risk is high.
pub const HIGH_RISK_THRESHOLD: f64 = 75.0;

/// Response of the prediction collaborator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictionResult {
    /// Probability of cardiovascular disease, in percent (0–100).
    pub probability: f64,
    /// Binary verdict when the collaborator returns one.
    pub prediction: Option<u8>,
}

impl PredictionResult {
    #[must_use]
    pub fn new(probability: f64) -> Self {
        Self {
            probability,
            prediction: None,
        }
    }

    /// Whether the specialist search should be offered.
    #[must_use]
    pub fn needs_specialist(&self) -> bool {
        self.probability > SPECIALIST_THRESHOLD
    }
}

/// Risk tier derived from a probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskTier {
    Low,
    Moderate,
    High,
}

impl RiskTier {
    /// Classifies a probability; boundaries fall into the lower tier.
    #[must_use]
    pub fn from_probability(probability: f64) -> Self {
        if probability > HIGH_RISK_THRESHOLD {
            RiskTier::High
        } else if probability > SPECIALIST_THRESHOLD {
            RiskTier::Moderate
        } else {
            RiskTier::Low
        }
    }

    #[must_use]
    pub fn i18n_key(self) -> &'static str {
        match self {
            RiskTier::Low => "result-tier-low",
            RiskTier::Moderate => "result-tier-moderate",
            RiskTier::High => "result-tier-high",
        }
    }

    /// English label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            RiskTier::Low => "Low Risk",
            RiskTier::Moderate => "Moderate Risk",
            RiskTier::High => "High Risk",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
