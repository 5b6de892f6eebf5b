//! Feature Vector - Core data structure for model input
//!
//! **Versioned feature vector bound to one domain layout**
//!
//! A `FeatureVector` can only be produced by the validator, so every
//! value in it has passed the field rules and its length always equals
//! the domain's layout length.

use serde::Serialize;

use crate::logic::domain::DomainId;
use super::layout::{
    layout, layout_hash, feature_index, validate_layout, LayoutMismatchError, FEATURE_VERSION,
};

/// Versioned Feature Vector with layout metadata
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureVector {
    domain: DomainId,
    version: u8,
    layout_hash: u32,
    values: Vec<f64>,
}

impl FeatureVector {
    /// Built by `validate` once every field has been accepted.
    /// Callers guarantee `values.len()` matches the domain layout.
    pub(crate) fn from_validated(domain: DomainId, values: Vec<f64>) -> Self {
        debug_assert_eq!(values.len(), layout(domain).len());
        Self {
            domain,
            version: FEATURE_VERSION,
            layout_hash: layout_hash(domain),
            values,
        }
    }

    pub fn domain(&self) -> DomainId {
        self.domain
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    pub fn layout_hash(&self) -> u32 {
        self.layout_hash
    }

    /// Values in layout order
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Values narrowed to `f32` for runtimes that take single precision tensors
    pub fn to_f32(&self) -> Vec<f32> {
        self.values.iter().map(|&v| v as f32).collect()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get feature by index
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    /// Get feature by name
    pub fn get_by_name(&self, name: &str) -> Option<f64> {
        feature_index(self.domain, name).and_then(|i| self.get(i))
    }

    /// Feature names in the same order as `as_slice`
    pub fn feature_names(&self) -> &'static [&'static str] {
        layout(self.domain)
    }

    /// Vector stamped with another layout, as one built before a layout change would be
    #[cfg(test)]
    pub(crate) fn with_layout(mut self, version: u8, layout_hash: u32) -> Self {
        self.version = version;
        self.layout_hash = layout_hash;
        self
    }

    /// Validate that this vector is compatible with the current layout
    pub fn validate(&self) -> Result<(), LayoutMismatchError> {
        validate_layout(self.domain, self.version, self.layout_hash)
    }

    /// Convert to JSON-serializable format for logging
    pub fn to_log_entry(&self) -> serde_json::Value {
        serde_json::json!({
            "domain": self.domain,
            "feature_version": self.version,
            "layout_hash": self.layout_hash,
            "values": self.values,
            "named_values": self.feature_names().iter()
                .zip(self.values.iter())
                .map(|(name, value)| (name.to_string(), *value))
                .collect::<std::collections::BTreeMap<_, _>>(),
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================
