//! Schema Types

use serde::Serialize;

use crate::constants::POSITIVE_CLASS;
use crate::logic::domain::DomainId;
use crate::logic::features::layout;
use crate::logic::model::ClassLabel;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SchemaError {
    #[error("field '{field}' has an empty categorical mapping")]
    EmptyMapping { field: String },

    #[error("field '{field}' offers option '{option}' more than once")]
    DuplicateOption { field: String, option: String },

    #[error("field '{field}' maps two options to code {code}")]
    DuplicateCode { field: String, code: i64 },

    #[error("field '{field}' is declared more than once in {domain}")]
    DuplicateField { domain: DomainId, field: String },

    #[error("{domain} fields {actual:?} do not match the feature layout {expected:?}")]
    LayoutMismatch {
        domain: DomainId,
        expected: Vec<String>,
        actual: Vec<String>,
    },

    #[error("field '{field}' is categorical but declares no mapping")]
    MissingMapping { field: String },

    #[error("optional field '{field}' needs a default value")]
    MissingDefault { field: String },
}

// ============================================================================
// CATEGORICAL MAPPING
// ============================================================================

/// One selectable option of a categorical field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoricalOption {
    pub label: String,
    pub code: i64,
}

/// Display label → numeric code table, total and injective by construction
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CategoricalMapping {
    options: Vec<CategoricalOption>,
}

impl CategoricalMapping {
    pub fn new(field: &str, options: &[(&str, i64)]) -> Result<Self, SchemaError> {
        if options.is_empty() {
            return Err(SchemaError::EmptyMapping { field: field.to_string() });
        }

        let mut checked: Vec<CategoricalOption> = Vec::with_capacity(options.len());
        for &(label, code) in options {
            if checked.iter().any(|o| o.label.eq_ignore_ascii_case(label)) {
                return Err(SchemaError::DuplicateOption {
                    field: field.to_string(),
                    option: label.to_string(),
                });
            }
            if checked.iter().any(|o| o.code == code) {
                return Err(SchemaError::DuplicateCode { field: field.to_string(), code });
            }
            checked.push(CategoricalOption { label: label.to_string(), code });
        }

        Ok(Self { options: checked })
    }

    pub fn options(&self) -> &[CategoricalOption] {
        &self.options
    }

    /// Code for a display option (trimmed, case-insensitive)
    pub fn code_for(&self, label: &str) -> Option<i64> {
        let label = label.trim();
        self.options
            .iter()
            .find(|o| o.label.eq_ignore_ascii_case(label))
            .map(|o| o.code)
    }

    /// Display option for a code
    pub fn label_for(&self, code: i64) -> Option<&str> {
        self.options.iter().find(|o| o.code == code).map(|o| o.label.as_str())
    }

    pub fn contains_code(&self, code: i64) -> bool {
        self.label_for(code).is_some()
    }
}

// ============================================================================
// FIELD SPEC
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Continuous,
    Integer,
    Categorical,
}

/// Range guidance. Only enforced when the range policy is `Reject`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Constraints {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub default: Option<f64>,
    pub step: Option<f64>,
}

impl Constraints {
    pub fn contains(&self, value: f64) -> bool {
        self.min.map_or(true, |min| value >= min) && self.max.map_or(true, |max| value <= max)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSpec {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,
    pub unit: Option<String>,
    pub constraints: Constraints,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mapping: Option<CategoricalMapping>,
}

impl FieldSpec {
    pub fn continuous(name: &str, label: &str) -> Self {
        Self::with_kind(name, label, FieldKind::Continuous)
    }

    pub fn integer(name: &str, label: &str) -> Self {
        let mut field = Self::with_kind(name, label, FieldKind::Integer);
        field.constraints.step = Some(1.0);
        field
    }

    pub fn categorical(name: &str, label: &str, options: &[(&str, i64)]) -> Result<Self, SchemaError> {
        let mut field = Self::with_kind(name, label, FieldKind::Categorical);
        field.mapping = Some(CategoricalMapping::new(name, options)?);
        Ok(field)
    }

    fn with_kind(name: &str, label: &str, kind: FieldKind) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind,
            required: true,
            unit: None,
            constraints: Constraints::default(),
            mapping: None,
        }
    }

    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.constraints.min = Some(min);
        self.constraints.max = Some(max);
        self
    }

    pub fn min(mut self, min: f64) -> Self {
        self.constraints.min = Some(min);
        self
    }

    pub fn step(mut self, step: f64) -> Self {
        self.constraints.step = Some(step);
        self
    }

    pub fn unit(mut self, unit: &str) -> Self {
        self.unit = Some(unit.to_string());
        self
    }

    /// Mark the field optional; blank input falls back to `default`
    pub fn optional(mut self, default: f64) -> Self {
        self.required = false;
        self.constraints.default = Some(default);
        self
    }

    pub fn is_numeric(&self) -> bool {
        self.kind != FieldKind::Categorical
    }
}

// ============================================================================
// DOMAIN SCHEMA
// ============================================================================

/// Outcome messages shown for each predicted class
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutcomeMessages {
    pub positive: String,
    pub negative: String,
}

impl OutcomeMessages {
    pub fn new(positive: &str, negative: &str) -> Self {
        Self { positive: positive.to_string(), negative: negative.to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DomainSchema {
    pub domain: DomainId,
    pub title: String,
    fields: Vec<FieldSpec>,
    pub positive_class: ClassLabel,
    pub messages: OutcomeMessages,
}

impl DomainSchema {
    /// Field names must be unique and follow the domain's feature layout exactly.
    pub fn new(
        domain: DomainId,
        title: &str,
        fields: Vec<FieldSpec>,
        messages: OutcomeMessages,
    ) -> Result<Self, SchemaError> {
        for (i, field) in fields.iter().enumerate() {
            if fields[..i].iter().any(|f| f.name == field.name) {
                return Err(SchemaError::DuplicateField { domain, field: field.name.clone() });
            }
            if field.kind == FieldKind::Categorical && field.mapping.is_none() {
                return Err(SchemaError::MissingMapping { field: field.name.clone() });
            }
            if !field.required && field.constraints.default.is_none() {
                return Err(SchemaError::MissingDefault { field: field.name.clone() });
            }
        }

        let expected = layout(domain);
        if fields.len() != expected.len()
            || fields.iter().zip(expected).any(|(f, name)| f.name != *name)
        {
            return Err(SchemaError::LayoutMismatch {
                domain,
                expected: expected.iter().map(|s| s.to_string()).collect(),
                actual: fields.iter().map(|f| f.name.clone()).collect(),
            });
        }

        Ok(Self {
            domain,
            title: title.to_string(),
            fields,
            positive_class: POSITIVE_CLASS,
            messages,
        })
    }

    /// Fields in model feature order
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn message_for(&self, is_positive: bool) -> &str {
        if is_positive {
            &self.messages.positive
        } else {
            &self.messages.negative
        }
    }
}
