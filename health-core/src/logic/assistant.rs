//! Health Assistant - the one entry point a front-end needs
//!
//! `submit` runs a raw submission through the same steps the form does:
//! model availability → validation → prediction.

use serde::Serialize;
use std::sync::Arc;

use crate::logic::config::CoreConfig;
use crate::logic::dispatch::{self, DispatchError, Outcome};
use crate::logic::domain::DomainId;
use crate::logic::model::ModelRegistry;
use crate::logic::schema::{DomainSchema, SchemaError, SchemaSet};
use crate::logic::validate::{RawSubmission, ValidationErrors, ValidationPolicy, Validator};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

impl SubmitError {
    /// Text safe to show the user; internal causes stay in the logs
    pub fn user_message(&self) -> String {
        match self {
            SubmitError::Validation(errors) => errors.to_string(),
            SubmitError::Dispatch(DispatchError::ModelUnavailable { domain, .. }) => {
                model_unavailable_message(*domain)
            }
            SubmitError::Dispatch(_) => {
                "The prediction could not be completed. Please try again later.".to_string()
            }
        }
    }
}

/// Shown instead of a result when a domain's model could not be loaded
pub fn model_unavailable_message(domain: DomainId) -> String {
    let noun = match domain {
        DomainId::Diabetes => "Diabetes",
        DomainId::HeartDisease => "Heart disease",
        DomainId::Parkinsons => "Parkinson's",
    };
    format!("{noun} model is not loaded.")
}

/// Whether a domain can currently take submissions
#[derive(Debug, Clone, Serialize)]
pub struct DomainAvailability {
    pub domain: DomainId,
    pub title: &'static str,
    pub available: bool,
    pub reason: Option<String>,
}

pub struct HealthAssistant {
    schemas: SchemaSet,
    registry: Arc<ModelRegistry>,
    validator: Validator,
}

impl HealthAssistant {
    pub fn new(registry: Arc<ModelRegistry>, policy: ValidationPolicy) -> Result<Self, SchemaError> {
        Ok(Self {
            schemas: SchemaSet::builtin()?,
            registry,
            validator: Validator::new(policy),
        })
    }

    /// Register every configured artifact and, if asked, load them now.
    /// A missing or broken artifact only disables its own domain.
    pub fn from_config(config: &CoreConfig) -> Result<Self, SchemaError> {
        let registry = ModelRegistry::new();
        for domain in DomainId::ALL {
            registry.register_candidates(domain, config.artifact_candidates(domain));
        }

        if config.eager_load {
            for (domain, result) in registry.load_all() {
                if result.is_ok() {
                    log::info!("{} model ready", domain);
                }
            }
        }

        Self::new(Arc::new(registry), config.validation)
    }

    pub fn registry(&self) -> &Arc<ModelRegistry> {
        &self.registry
    }

    pub fn schemas(&self) -> &SchemaSet {
        &self.schemas
    }

    pub fn schema(&self, domain: DomainId) -> &DomainSchema {
        self.schemas.get(domain)
    }

    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    pub fn is_available(&self, domain: DomainId) -> bool {
        self.registry.is_available(domain)
    }

    pub fn availability(&self) -> Vec<DomainAvailability> {
        DomainId::ALL
            .into_iter()
            .map(|domain| {
                let reason = self.registry.classifier(domain).err().map(|e| e.to_string());
                DomainAvailability {
                    domain,
                    title: domain.title(),
                    available: reason.is_none(),
                    reason,
                }
            })
            .collect()
    }

    /// Validate and predict one submission
    pub fn submit(&self, raw: &RawSubmission) -> Result<Outcome, SubmitError> {
        let domain = raw.domain;
        let schema = self.schemas.get(domain);

        // Reported before any field problems, as the form does
        self.registry
            .classifier(domain)
            .map_err(|reason| DispatchError::ModelUnavailable { domain, reason })?;

        let features = self.validator.check(schema, raw)?;
        let outcome = dispatch::predict(schema, &features, &self.registry)?;

        log::info!("{} submission → {}", domain, if outcome.is_positive { "positive" } else { "negative" });
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::model::{LoadError, ModelRegistry};
    use crate::logic::validate::ValidationError;

    #[test]
    fn test_user_messages() {
        let err = SubmitError::Dispatch(DispatchError::ModelUnavailable {
            domain: DomainId::HeartDisease,
            reason: LoadError::NotConfigured(DomainId::HeartDisease),
        });
        assert_eq!(err.user_message(), "Heart disease model is not loaded.");

        let err = SubmitError::from(ValidationErrors::from(ValidationError::MissingField("Age".into())));
        assert_eq!(err.user_message(), "Please enter a value for 'Age'.");
    }

    #[test]
    fn test_from_config_with_no_models() {
        let dir = tempfile::tempdir().unwrap();
        let config = CoreConfig { model_dir: dir.path().to_path_buf(), ..Default::default() };

        let assistant = HealthAssistant::from_config(&config).unwrap();
        let availability = assistant.availability();
        assert_eq!(availability.len(), 3);
        assert!(availability.iter().all(|a| !a.available));
        assert!(availability[0].reason.as_deref().unwrap().contains("not found"));
    }

    #[test]
    fn test_json_artifact_added_after_start() {
        let dir = tempfile::tempdir().unwrap();
        let config = CoreConfig { model_dir: dir.path().to_path_buf(), ..Default::default() };
        let assistant = HealthAssistant::from_config(&config).unwrap();
        assert!(!assistant.is_available(DomainId::Diabetes));

        let artifact = serde_json::json!({
            "format": "linear",
            "domain": "diabetes",
            "coefficients": vec![0.0; 8],
            "intercept": 1.0,
        });
        std::fs::write(dir.path().join("diabetes_model.json"), artifact.to_string()).unwrap();
        assert!(assistant.is_available(DomainId::Diabetes));
    }

    #[test]
    fn test_new_uses_policy() {
        let policy = ValidationPolicy::default();
        let assistant = HealthAssistant::new(Arc::new(ModelRegistry::new()), policy).unwrap();
        assert_eq!(assistant.validator().policy(), policy);
        assert_eq!(assistant.schema(DomainId::Parkinsons).len(), 22);
    }
}
