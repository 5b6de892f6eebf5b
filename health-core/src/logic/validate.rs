//! Input Collector & Validator
//!
//! Turns a `RawSubmission` (whatever the form or API handed us) into a
//! `FeatureVector`, walking the schema's fields in feature order.
//!
//! Two behaviors are policy, not hard-coded:
//! - `RangePolicy`: `Advisory` lets out-of-range values through (the form
//!   widgets carry the limits), `Reject` turns them into errors.
//! - `ReportMode`: stop at the first bad field, or collect every one.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::logic::domain::DomainId;
use crate::logic::features::FeatureVector;
use crate::logic::schema::{DomainSchema, FieldKind, FieldSpec};

// ============================================================================
// RAW INPUT
// ============================================================================

/// A value as entered: text from a form field or a number from an API client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
}

impl RawValue {
    fn is_blank(&self) -> bool {
        matches!(self, RawValue::Text(s) if s.trim().is_empty())
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Number(n) => write!(f, "{n}"),
            RawValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Text(s.to_string())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        RawValue::Text(s)
    }
}

impl From<f64> for RawValue {
    fn from(n: f64) -> Self {
        RawValue::Number(n)
    }
}

/// One form submission, keyed by field name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSubmission {
    pub domain: DomainId,
    #[serde(default)]
    pub values: HashMap<String, RawValue>,
}

impl RawSubmission {
    pub fn new(domain: DomainId) -> Self {
        Self { domain, values: HashMap::new() }
    }

    /// Builder-style setter
    pub fn with(mut self, name: &str, value: impl Into<RawValue>) -> Self {
        self.values.insert(name.to_string(), value.into());
        self
    }

    pub fn set(&mut self, name: &str, value: impl Into<RawValue>) {
        self.values.insert(name.to_string(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&RawValue> {
        self.values.get(name)
    }
}

// ============================================================================
// ERRORS
// ============================================================================

/// A rejected field, named by its display label
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please enter a value for '{0}'.")]
    MissingField(String),

    #[error("'{0}' must be a numeric value. Got: {1}")]
    NotNumeric(String, String),

    #[error("'{0}' is not one of the offered options. Got: {1}")]
    UnknownOption(String, String),

    #[error("'{0}' must be a whole number. Got: {1}")]
    NotInteger(String, f64),

    #[error("'{label}' must be between {} and {}. Got: {value}", fmt_bound(.min), fmt_bound(.max))]
    OutOfRange {
        label: String,
        value: f64,
        min: Option<f64>,
        max: Option<f64>,
    },

    #[error("submission for {actual} cannot be validated against the {expected} schema")]
    WrongDomain { expected: DomainId, actual: DomainId },
}

fn fmt_bound(bound: &Option<f64>) -> String {
    bound.map_or_else(|| "-".to_string(), |b| b.to_string())
}

/// Every error reported for one submission, in field order
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    pub fn first(&self) -> Option<&ValidationError> {
        self.0.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<ValidationError> {
        self.0
    }

    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(|e| e.to_string()).collect()
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(err: ValidationError) -> Self {
        Self(vec![err])
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.messages().join(" "))
    }
}

impl std::error::Error for ValidationErrors {}

// ============================================================================
// POLICY
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RangePolicy {
    /// Limits are guidance for the form widgets; values outside pass through
    #[default]
    #[serde(rename = "ui-level-clamp")]
    Advisory,
    /// Values outside `min`/`max` (and fractional integers) are rejected
    #[serde(rename = "hard-reject")]
    Reject,
}

impl FromStr for RangePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ui-level-clamp" | "advisory" => Ok(RangePolicy::Advisory),
            "hard-reject" | "reject" => Ok(RangePolicy::Reject),
            other => Err(format!("unknown range policy '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportMode {
    #[default]
    FirstError,
    AllErrors,
}

impl FromStr for ReportMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first-error" | "first" => Ok(ReportMode::FirstError),
            "all-errors" | "all" => Ok(ReportMode::AllErrors),
            other => Err(format!("unknown report mode '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValidationPolicy {
    pub range: RangePolicy,
    pub report: ReportMode,
}

// ============================================================================
// VALIDATOR
// ============================================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct Validator {
    policy: ValidationPolicy,
}

impl Validator {
    pub fn new(policy: ValidationPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> ValidationPolicy {
        self.policy
    }

    /// Stop at the first rejected field
    pub fn validate(
        &self,
        schema: &DomainSchema,
        raw: &RawSubmission,
    ) -> Result<FeatureVector, ValidationError> {
        check_domain(schema, raw)?;

        let mut values = Vec::with_capacity(schema.len());
        for field in schema.fields() {
            values.push(self.field_value(field, raw.get(&field.name))?);
        }

        log_unknown_keys(schema, raw);
        Ok(FeatureVector::from_validated(schema.domain, values))
    }

    /// Check every field and report all rejections together
    pub fn validate_all(
        &self,
        schema: &DomainSchema,
        raw: &RawSubmission,
    ) -> Result<FeatureVector, ValidationErrors> {
        check_domain(schema, raw)?;

        let mut values = Vec::with_capacity(schema.len());
        let mut errors = Vec::new();
        for field in schema.fields() {
            match self.field_value(field, raw.get(&field.name)) {
                Ok(value) => values.push(value),
                Err(err) => errors.push(err),
            }
        }

        if !errors.is_empty() {
            return Err(ValidationErrors(errors));
        }

        log_unknown_keys(schema, raw);
        Ok(FeatureVector::from_validated(schema.domain, values))
    }

    /// Validate using the configured report mode
    pub fn check(
        &self,
        schema: &DomainSchema,
        raw: &RawSubmission,
    ) -> Result<FeatureVector, ValidationErrors> {
        match self.policy.report {
            ReportMode::FirstError => self.validate(schema, raw).map_err(ValidationErrors::from),
            ReportMode::AllErrors => self.validate_all(schema, raw),
        }
    }

    fn field_value(&self, field: &FieldSpec, raw: Option<&RawValue>) -> Result<f64, ValidationError> {
        let raw = match raw {
            Some(value) if !value.is_blank() => value,
            _ => {
                return match (field.required, field.constraints.default) {
                    (false, Some(default)) => Ok(default),
                    _ => Err(ValidationError::MissingField(field.label.clone())),
                };
            }
        };

        let value = match field.kind {
            FieldKind::Categorical => categorical_code(field, raw)? as f64,
            FieldKind::Continuous | FieldKind::Integer => parse_number(field, raw)?,
        };

        if field.kind == FieldKind::Integer
            && value.fract() != 0.0
            && self.policy.range == RangePolicy::Reject
        {
            return Err(ValidationError::NotInteger(field.label.clone(), value));
        }

        if field.is_numeric() && !field.constraints.contains(value) {
            match self.policy.range {
                RangePolicy::Reject => {
                    return Err(ValidationError::OutOfRange {
                        label: field.label.clone(),
                        value,
                        min: field.constraints.min,
                        max: field.constraints.max,
                    });
                }
                RangePolicy::Advisory => {
                    log::debug!(
                        "'{}' = {} is outside the advised range [{}, {}]",
                        field.name,
                        value,
                        fmt_bound(&field.constraints.min),
                        fmt_bound(&field.constraints.max),
                    );
                }
            }
        }

        Ok(value)
    }
}

/// Validate with the default policy (advisory ranges, first error wins)
pub fn validate(schema: &DomainSchema, raw: &RawSubmission) -> Result<FeatureVector, ValidationError> {
    Validator::default().validate(schema, raw)
}

/// Parse a decimal number; `NaN` and infinities are not accepted
pub fn parse_number_text(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_number(field: &FieldSpec, raw: &RawValue) -> Result<f64, ValidationError> {
    let parsed = match raw {
        RawValue::Number(n) => Some(*n).filter(|v| v.is_finite()),
        RawValue::Text(text) => parse_number_text(text),
    };
    parsed.ok_or_else(|| ValidationError::NotNumeric(field.label.clone(), raw.to_string()))
}

/// Accepts the display option, or the numeric code itself
fn categorical_code(field: &FieldSpec, raw: &RawValue) -> Result<i64, ValidationError> {
    let unknown = || ValidationError::UnknownOption(field.label.clone(), raw.to_string());
    let mapping = field.mapping.as_ref().ok_or_else(unknown)?;

    let by_code = |n: f64| {
        if n.is_finite() && n.fract() == 0.0 && mapping.contains_code(n as i64) {
            Some(n as i64)
        } else {
            None
        }
    };

    let code = match raw {
        RawValue::Number(n) => by_code(*n),
        RawValue::Text(text) => mapping
            .code_for(text)
            .or_else(|| parse_number_text(text).and_then(by_code)),
    };
    code.ok_or_else(unknown)
}

fn check_domain(schema: &DomainSchema, raw: &RawSubmission) -> Result<(), ValidationError> {
    if schema.domain != raw.domain {
        return Err(ValidationError::WrongDomain { expected: schema.domain, actual: raw.domain });
    }
    Ok(())
}

fn log_unknown_keys(schema: &DomainSchema, raw: &RawSubmission) {
    for key in raw.values.keys() {
        if schema.field(key).is_none() {
            log::debug!("Ignoring unknown field '{}' in {} submission", key, schema.domain);
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
