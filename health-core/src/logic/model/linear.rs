//! Linear classifier artifact
//!
//! JSON export of a standardized linear model (SVM with linear kernel,
//! logistic regression):
//!
//! ```json
//! {
//!   "format": "linear",
//!   "domain": "diabetes",
//!   "layout_hash": 123456789,
//!   "classes": [0, 1],
//!   "coefficients": [0.3, 1.1, ...],
//!   "intercept": -0.8,
//!   "scaler": { "mean": [...], "scale": [...] }
//! }
//! ```
//!
//! `decision = intercept + Σ coef·(x − mean)/scale`; `classes[1]` when positive.

use serde::Deserialize;

use crate::logic::domain::DomainId;
use crate::logic::features::{layout, layout_hash, FeatureVector};
use super::inference::{check_arity, ClassLabel, Classifier, InferenceError};

pub const LINEAR_FORMAT: &str = "linear";

#[derive(Debug, Deserialize)]
struct LinearArtifact {
    format: String,
    #[serde(default)]
    domain: Option<DomainId>,
    #[serde(default)]
    feature_names: Option<Vec<String>>,
    #[serde(default)]
    layout_hash: Option<u32>,
    #[serde(default = "default_classes")]
    classes: [ClassLabel; 2],
    coefficients: Vec<f64>,
    intercept: f64,
    #[serde(default)]
    scaler: Option<ScalerParams>,
}

fn default_classes() -> [ClassLabel; 2] {
    [0, 1]
}

/// StandardScaler parameters from training
#[derive(Debug, Clone, Deserialize)]
struct ScalerParams {
    mean: Vec<f64>,
    scale: Vec<f64>,
}

#[derive(Debug, Clone)]
pub struct LinearClassifier {
    classes: [ClassLabel; 2],
    coefficients: Vec<f64>,
    intercept: f64,
    mean: Vec<f64>,
    scale: Vec<f64>,
}

impl LinearClassifier {
    /// Unscaled model with classes `[0, 1]`
    pub fn new(coefficients: Vec<f64>, intercept: f64) -> Self {
        let n = coefficients.len();
        Self {
            classes: default_classes(),
            coefficients,
            intercept,
            mean: vec![0.0; n],
            scale: vec![1.0; n],
        }
    }

    /// Parse and check an artifact against the domain it is loaded for
    pub fn from_json(bytes: &[u8], domain: DomainId) -> Result<Self, InferenceError> {
        let artifact: LinearArtifact = serde_json::from_slice(bytes)
            .map_err(|e| InferenceError(format!("Invalid linear artifact: {}", e)))?;

        if artifact.format != LINEAR_FORMAT {
            return Err(InferenceError(format!("Unsupported format '{}'", artifact.format)));
        }

        if let Some(trained_for) = artifact.domain {
            if trained_for != domain {
                return Err(InferenceError(format!(
                    "Artifact was trained for {}, not {}",
                    trained_for, domain
                )));
            }
        }

        let expected = layout(domain);
        if let Some(names) = &artifact.feature_names {
            if names.iter().map(String::as_str).ne(expected.iter().copied()) {
                return Err(InferenceError(format!(
                    "Feature names {:?} do not match layout {:?}",
                    names, expected
                )));
            }
        }

        if let Some(hash) = artifact.layout_hash {
            if hash != layout_hash(domain) {
                return Err(InferenceError(format!(
                    "Layout hash {:08x} does not match {:08x}",
                    hash,
                    layout_hash(domain)
                )));
            }
        }

        let n = expected.len();
        if artifact.coefficients.len() != n {
            return Err(InferenceError(format!(
                "Expected {} coefficients, got {}",
                n,
                artifact.coefficients.len()
            )));
        }

        if artifact.coefficients.iter().any(|c| !c.is_finite()) || !artifact.intercept.is_finite() {
            return Err(InferenceError("Non-finite model parameters".to_string()));
        }

        let mut model = Self::new(artifact.coefficients, artifact.intercept);
        model.classes = artifact.classes;

        if let Some(scaler) = artifact.scaler {
            if scaler.mean.len() != n || scaler.scale.len() != n {
                return Err(InferenceError(format!(
                    "Scaler expects {} features, got mean={} scale={}",
                    n,
                    scaler.mean.len(),
                    scaler.scale.len()
                )));
            }
            if scaler.scale.iter().any(|s| !s.is_finite() || *s == 0.0) {
                return Err(InferenceError("Scaler contains a zero or non-finite scale".to_string()));
            }
            model.mean = scaler.mean;
            model.scale = scaler.scale;
        }

        Ok(model)
    }

    /// Signed distance from the decision boundary
    pub fn decision(&self, x: &[f64]) -> f64 {
        self.coefficients
            .iter()
            .zip(x)
            .zip(self.mean.iter().zip(&self.scale))
            .map(|((coef, value), (mean, scale))| coef * (value - mean) / scale)
            .sum::<f64>()
            + self.intercept
    }
}

impl Classifier for LinearClassifier {
    fn predict(&self, features: &FeatureVector) -> Result<ClassLabel, InferenceError> {
        check_arity(features, self.coefficients.len())?;

        let decision = self.decision(features.as_slice());
        if !decision.is_finite() {
            return Err(InferenceError("Decision value is not finite".to_string()));
        }

        Ok(if decision > 0.0 { self.classes[1] } else { self.classes[0] })
    }

    fn kind(&self) -> &'static str {
        "linear"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diabetes_json(coefficients: &[f64], extra: &str) -> Vec<u8> {
        format!(
            r#"{{"format": "linear", "domain": "diabetes", "coefficients": {:?}, "intercept": -1.0{}}}"#,
            coefficients, extra
        )
        .into_bytes()
    }

    #[test]
    fn test_decision_with_scaler() {
        let json = diabetes_json(
            &[0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
            r#", "scaler": {"mean": [0,100,0,0,0,0,0,0], "scale": [1,10,1,1,1,1,1,1]}"#,
        );
        let model = LinearClassifier::from_json(&json, DomainId::Diabetes).unwrap();

        // (130 - 100) / 10 - 1 = 2
        let x = [2.0, 130.0, 80.0, 25.0, 90.0, 28.5, 0.5, 35.0];
        assert!((model.decision(&x) - 2.0).abs() < 1e-12);

        let x = [2.0, 105.0, 80.0, 25.0, 90.0, 28.5, 0.5, 35.0];
        assert!(model.decision(&x) < 0.0);
    }

    #[test]
    fn test_rejects_wrong_arity() {
        let json = diabetes_json(&[1.0, 2.0], "");
        let err = LinearClassifier::from_json(&json, DomainId::Diabetes).unwrap_err();
        assert!(err.0.contains("Expected 8 coefficients"));
    }

    #[test]
    fn test_rejects_other_domain() {
        let json = diabetes_json(&[0.0; 8], "");
        assert!(LinearClassifier::from_json(&json, DomainId::HeartDisease).is_err());
    }

    #[test]
    fn test_rejects_layout_hash_mismatch() {
        let json = diabetes_json(&[0.0; 8], r#", "layout_hash": 1"#);
        assert!(LinearClassifier::from_json(&json, DomainId::Diabetes).is_err());

        let extra = format!(r#", "layout_hash": {}"#, layout_hash(DomainId::Diabetes));
        let json = diabetes_json(&[0.0; 8], &extra);
        assert!(LinearClassifier::from_json(&json, DomainId::Diabetes).is_ok());
    }

    #[test]
    fn test_rejects_zero_scale() {
        let json = diabetes_json(
            &[0.0; 8],
            r#", "scaler": {"mean": [0,0,0,0,0,0,0,0], "scale": [1,0,1,1,1,1,1,1]}"#,
        );
        assert!(LinearClassifier::from_json(&json, DomainId::Diabetes).is_err());
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(LinearClassifier::from_json(b"not json", DomainId::Diabetes).is_err());
        assert!(LinearClassifier::from_json(
            br#"{"format": "tree", "coefficients": [], "intercept": 0}"#,
            DomainId::Diabetes
        )
        .is_err());
    }
}
