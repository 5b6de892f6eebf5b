//! Health Assistant Core
//!
//! Input validation and prediction dispatch for the three screening
//! domains (diabetes, heart disease, Parkinson's).
//!
//! ## Pipeline
//! ```text
//! RawSubmission ──▶ Validator ──▶ FeatureVector ──▶ Dispatcher ──▶ Outcome
//!                      ▲                               │
//!                 DomainSchema                    ModelRegistry
//! ```
//!
//! The presentation layer only ever calls [`HealthAssistant::submit`].

pub mod constants;
pub mod logic;

pub use logic::assistant::{model_unavailable_message, DomainAvailability, HealthAssistant, SubmitError};
pub use logic::config::CoreConfig;
pub use logic::dispatch::{predict, DispatchError, Outcome};
pub use logic::domain::{DomainId, ParseDomainError};
pub use logic::features::{FeatureVector, LayoutInfo};
pub use logic::model::{
    ClassLabel, Classifier, InferenceError, LoadError, ModelRegistry, ModelStatus,
};
pub use logic::schema::{DomainSchema, FieldKind, FieldSpec, SchemaError, SchemaSet};
pub use logic::validate::{
    validate, RangePolicy, RawSubmission, RawValue, ReportMode, ValidationError,
    ValidationErrors, ValidationPolicy, Validator,
};
