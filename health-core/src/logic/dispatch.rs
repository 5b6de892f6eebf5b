//! Prediction Dispatcher
//!
//! Hands a validated `FeatureVector` to the domain's classifier and maps
//! the returned label onto the schema's outcome messages. Stateless apart
//! from the latency counters kept in the registry.

use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::logic::domain::DomainId;
use crate::logic::features::{FeatureVector, LayoutMismatchError};
use crate::logic::model::{ClassLabel, InferenceError, LoadError, ModelRegistry};
use crate::logic::schema::DomainSchema;

/// Prediction output shown to the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    pub domain: DomainId,
    pub is_positive: bool,
    pub label: ClassLabel,
    pub message: String,
    pub inference_time_us: u64,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DispatchError {
    #[error("The {domain} model is not available: {reason}")]
    ModelUnavailable { domain: DomainId, reason: LoadError },

    #[error("Prediction failed for {domain}: {cause}")]
    InferenceFailed { domain: DomainId, cause: InferenceError },

    #[error("feature vector for {actual} passed to the {expected} dispatcher")]
    DomainMismatch { expected: DomainId, actual: DomainId },

    #[error("Stale feature vector: {0}")]
    StaleLayout(#[from] LayoutMismatchError),
}

/// Run the domain's classifier on one validated sample
pub fn predict(
    schema: &DomainSchema,
    features: &FeatureVector,
    registry: &ModelRegistry,
) -> Result<Outcome, DispatchError> {
    let domain = schema.domain;
    if features.domain() != domain {
        return Err(DispatchError::DomainMismatch { expected: domain, actual: features.domain() });
    }
    features.validate()?;

    let classifier = registry
        .classifier(domain)
        .map_err(|reason| DispatchError::ModelUnavailable { domain, reason })?;

    let start_time = Instant::now();
    let label = classifier.predict(features).map_err(|cause| {
        log::error!(
            "{} classifier ({}) failed: {} | input: {}",
            domain,
            classifier.kind(),
            cause,
            features.to_log_entry()
        );
        DispatchError::InferenceFailed { domain, cause }
    })?;
    let inference_time_us = start_time.elapsed().as_micros() as u64;
    registry.record_inference(domain, inference_time_us);

    let is_positive = label == schema.positive_class;
    log::debug!("{} prediction: label={} positive={} ({}us)", domain, label, is_positive, inference_time_us);

    Ok(Outcome {
        domain,
        is_positive,
        label,
        message: schema.message_for(is_positive).to_string(),
        inference_time_us,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::features::FEATURE_VERSION;
    use crate::logic::model::Classifier;
    use crate::logic::schema::SchemaSet;
    use crate::logic::validate::{validate, RawSubmission};
    use std::sync::Arc;

    struct Fixed(ClassLabel);

    impl Classifier for Fixed {
        fn predict(&self, _: &FeatureVector) -> Result<ClassLabel, InferenceError> {
            Ok(self.0)
        }

        fn kind(&self) -> &'static str {
            "fixed"
        }
    }

    struct Broken;

    impl Classifier for Broken {
        fn predict(&self, _: &FeatureVector) -> Result<ClassLabel, InferenceError> {
            Err(InferenceError::new("input rank mismatch"))
        }

        fn kind(&self) -> &'static str {
            "broken"
        }
    }

    fn parkinsons_vector(schemas: &SchemaSet) -> FeatureVector {
        let schema = schemas.get(DomainId::Parkinsons);
        let mut raw = RawSubmission::new(DomainId::Parkinsons);
        for field in schema.fields() {
            raw.set(&field.name, "0.5");
        }
        validate(schema, &raw).unwrap()
    }

    #[test]
    fn test_label_other_than_positive_is_negative() {
        let schemas = SchemaSet::builtin().unwrap();
        let registry = ModelRegistry::new().with_classifier(DomainId::Parkinsons, Arc::new(Fixed(2)));
        let schema = schemas.get(DomainId::Parkinsons);

        let outcome = predict(schema, &parkinsons_vector(&schemas), &registry).unwrap();
        assert!(!outcome.is_positive);
        assert_eq!(outcome.label, 2);
        assert_eq!(outcome.message, "The person does not have Parkinson's disease");
    }

    #[test]
    fn test_inference_failure_propagates() {
        let schemas = SchemaSet::builtin().unwrap();
        let registry = ModelRegistry::new().with_classifier(DomainId::Parkinsons, Arc::new(Broken));
        let schema = schemas.get(DomainId::Parkinsons);

        let err = predict(schema, &parkinsons_vector(&schemas), &registry).unwrap_err();
        assert_eq!(
            err,
            DispatchError::InferenceFailed {
                domain: DomainId::Parkinsons,
                cause: InferenceError::new("input rank mismatch"),
            }
        );
        assert_eq!(registry.status()[2].inference_count, 0);
    }

    #[test]
    fn test_domain_mismatch() {
        let schemas = SchemaSet::builtin().unwrap();
        let registry = ModelRegistry::new().with_classifier(DomainId::Diabetes, Arc::new(Fixed(1)));

        let err = predict(schemas.get(DomainId::Diabetes), &parkinsons_vector(&schemas), &registry)
            .unwrap_err();
        assert!(matches!(err, DispatchError::DomainMismatch { .. }));
    }

    #[test]
    fn test_stale_layout_never_reaches_classifier() {
        let schemas = SchemaSet::builtin().unwrap();
        let registry = ModelRegistry::new().with_classifier(DomainId::Parkinsons, Arc::new(Broken));
        let schema = schemas.get(DomainId::Parkinsons);

        let stale = parkinsons_vector(&schemas).with_layout(FEATURE_VERSION + 1, 0);
        let err = predict(schema, &stale, &registry).unwrap_err();
        match err {
            DispatchError::StaleLayout(mismatch) => {
                assert_eq!(mismatch.actual_version, FEATURE_VERSION + 1);
                assert_eq!(mismatch.expected_version, FEATURE_VERSION);
            }
            other => panic!("expected stale layout, got {other:?}"),
        }
    }

    #[test]
    fn test_latency_recorded() {
        let schemas = SchemaSet::builtin().unwrap();
        let registry = ModelRegistry::new().with_classifier(DomainId::Parkinsons, Arc::new(Fixed(1)));
        let schema = schemas.get(DomainId::Parkinsons);

        predict(schema, &parkinsons_vector(&schemas), &registry).unwrap();
        predict(schema, &parkinsons_vector(&schemas), &registry).unwrap();
        assert_eq!(registry.status()[2].inference_count, 2);
    }
}
