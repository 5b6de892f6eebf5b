//! Inference - Classifier contract shared by every artifact format
//!
//! A classifier sees one validated `FeatureVector` and returns one class
//! label. The registry owns classifiers; the dispatcher calls them.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::logic::domain::DomainId;
use crate::logic::features::FeatureVector;

/// Numeric class label returned by a model
pub type ClassLabel = i64;

// ============================================================================
// ERROR HANDLING
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("InferenceError: {0}")]
pub struct InferenceError(pub String);

impl InferenceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

// ============================================================================
// CLASSIFIER TRAIT
// ============================================================================

/// Trait for loaded models (ONNX, linear, test stubs)
pub trait Classifier: Send + Sync {
    /// Predict the class of a single sample
    fn predict(&self, features: &FeatureVector) -> Result<ClassLabel, InferenceError>;

    /// Short name of the backing implementation, for status reporting
    fn kind(&self) -> &'static str;
}

/// Rejects vectors whose arity differs from what the model was built for
pub(crate) fn check_arity(features: &FeatureVector, expected: usize) -> Result<(), InferenceError> {
    if features.len() != expected {
        return Err(InferenceError(format!(
            "Expected {} features, got {}",
            expected,
            features.len()
        )));
    }
    Ok(())
}

// ============================================================================
// METADATA
// ============================================================================

/// Model metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub domain: DomainId,
    pub model_path: String,
    pub model_type: String, // "onnx", "linear" or an injected classifier's kind
    pub features: usize,
    pub checksum_verified: bool,
    pub loaded_at: chrono::DateTime<chrono::Utc>,
}

impl ModelMetadata {
    pub fn new(domain: DomainId, path: &Path, classifier: &dyn Classifier, checksum_verified: bool) -> Self {
        Self {
            domain,
            model_path: path.display().to_string(),
            model_type: classifier.kind().to_string(),
            features: crate::logic::features::feature_count(domain),
            checksum_verified,
            loaded_at: chrono::Utc::now(),
        }
    }
}

// ============================================================================
// LATENCY STATS
// ============================================================================

/// Per-domain latency counters
#[derive(Debug, Default)]
pub struct InferenceStats {
    latency_sum_us: AtomicU64,
    count: AtomicU64,
}

impl InferenceStats {
    pub fn record(&self, micros: u64) {
        self.latency_sum_us.fetch_add(micros, Ordering::Relaxed);
        self.count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    pub fn avg_latency_ms(&self) -> f32 {
        let sum = self.latency_sum_us.load(Ordering::Relaxed);
        let count = self.count();
        if count > 0 { (sum as f32 / count as f32) / 1000.0 } else { 0.0 }
    }
}
