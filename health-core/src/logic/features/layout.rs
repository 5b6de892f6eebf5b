//! Feature Layout - Centralized Feature Definition
//!
//! **CRITICAL: This file controls the feature order every model was trained on**
//!
//! ## Rules (NEVER break these):
//! 1. Add feature → increment FEATURE_VERSION
//! 2. Change order → increment FEATURE_VERSION
//! 3. Remove feature → increment FEATURE_VERSION
//!
//! Schemas are checked against these lists at construction, and model
//! artifacts carrying a layout hash are checked against them at load.

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};

use crate::logic::domain::DomainId;

// ============================================================================
// FEATURE VERSION
// ============================================================================

/// Current feature layout version
/// MUST be incremented when any layout changes
pub const FEATURE_VERSION: u8 = 1;

// ============================================================================
// FEATURE LAYOUTS (Authoritative source)
// ============================================================================

/// Pima Indians diabetes columns
pub const DIABETES_LAYOUT: &[&str] = &[
    "Pregnancies",              // 0: count
    "Glucose",                  // 1: mg/dL
    "BloodPressure",            // 2: mmHg
    "SkinThickness",            // 3: mm
    "Insulin",                  // 4: µU/mL
    "BMI",                      // 5
    "DiabetesPedigreeFunction", // 6
    "Age",                      // 7: years
];

/// UCI heart disease columns
pub const HEART_DISEASE_LAYOUT: &[&str] = &[
    "age", "sex", "cp", "trestbps", "chol", "fbs", "restecg",
    "thalach", "exang", "oldpeak", "slope", "ca", "thal",
];

/// UCI Parkinson's voice measurements
pub const PARKINSONS_LAYOUT: &[&str] = &[
    // === Frequency (0-2) ===
    "fo", "fhi", "flo",
    // === Jitter (3-7) ===
    "Jitter_percent", "Jitter_Abs", "RAP", "PPQ", "DDP",
    // === Shimmer (8-13) ===
    "Shimmer", "Shimmer_dB", "APQ3", "APQ5", "APQ", "DDA",
    // === Noise (14-15) ===
    "NHR", "HNR",
    // === Nonlinear (16-21) ===
    "RPDE", "DFA", "spread1", "spread2", "D2", "PPE",
];

/// Ordered feature names for a domain
pub fn layout(domain: DomainId) -> &'static [&'static str] {
    match domain {
        DomainId::Diabetes => DIABETES_LAYOUT,
        DomainId::HeartDisease => HEART_DISEASE_LAYOUT,
        DomainId::Parkinsons => PARKINSONS_LAYOUT,
    }
}

/// Number of features a domain's model consumes
pub fn feature_count(domain: DomainId) -> usize {
    layout(domain).len()
}

// ============================================================================
// LAYOUT HASH
// ============================================================================

/// Compute CRC32 hash of a domain's feature layout
pub fn layout_hash(domain: DomainId) -> u32 {
    let mut hasher = Hasher::new();

    hasher.update(&[FEATURE_VERSION]);
    hasher.update(domain.as_str().as_bytes());
    hasher.update(&[0]);

    for name in layout(domain) {
        hasher.update(name.as_bytes());
        hasher.update(&[0]); // Separator
    }

    hasher.finalize()
}

// ============================================================================
// LAYOUT INFO
// ============================================================================

/// Complete layout information for serialization/logging
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutInfo {
    pub domain: DomainId,
    pub version: u8,
    pub hash: u32,
    pub feature_count: usize,
    pub feature_names: Vec<String>,
}

impl LayoutInfo {
    pub fn for_domain(domain: DomainId) -> Self {
        Self {
            domain,
            version: FEATURE_VERSION,
            hash: layout_hash(domain),
            feature_count: feature_count(domain),
            feature_names: layout(domain).iter().map(|s| s.to_string()).collect(),
        }
    }
}

// ============================================================================
// LAYOUT VALIDATION
// ============================================================================

/// Error when feature layout doesn't match expected
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "feature layout mismatch for {domain}: expected v{expected_version} (hash: {expected_hash:08x}), \
     got v{actual_version} (hash: {actual_hash:08x})"
)]
pub struct LayoutMismatchError {
    pub domain: DomainId,
    pub expected_version: u8,
    pub expected_hash: u32,
    pub actual_version: u8,
    pub actual_hash: u32,
}

/// Validate that incoming data matches the domain's current layout
pub fn validate_layout(
    domain: DomainId,
    incoming_version: u8,
    incoming_hash: u32,
) -> Result<(), LayoutMismatchError> {
    let current_hash = layout_hash(domain);

    if incoming_version != FEATURE_VERSION || incoming_hash != current_hash {
        return Err(LayoutMismatchError {
            domain,
            expected_version: FEATURE_VERSION,
            expected_hash: current_hash,
            actual_version: incoming_version,
            actual_hash: incoming_hash,
        });
    }

    Ok(())
}

// ============================================================================
// FEATURE INDEX LOOKUP
// ============================================================================

/// Get feature index by name
pub fn feature_index(domain: DomainId, name: &str) -> Option<usize> {
    layout(domain).iter().position(|&n| n == name)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_counts() {
        assert_eq!(feature_count(DomainId::Diabetes), 8);
        assert_eq!(feature_count(DomainId::HeartDisease), 13);
        assert_eq!(feature_count(DomainId::Parkinsons), 22);
    }

    #[test]
    fn test_layout_names_unique() {
        for domain in DomainId::ALL {
            let names = layout(domain);
            for (i, name) in names.iter().enumerate() {
                assert_eq!(feature_index(domain, name), Some(i), "{domain}/{name}");
            }
        }
    }

    #[test]
    fn test_layout_hash_differs_per_domain() {
        let hashes: Vec<u32> = DomainId::ALL.iter().map(|d| layout_hash(*d)).collect();
        assert_ne!(hashes[0], hashes[1]);
        assert_ne!(hashes[1], hashes[2]);
        assert_ne!(hashes[0], hashes[2]);
    }

    #[test]
    fn test_validate_layout() {
        let domain = DomainId::HeartDisease;
        assert!(validate_layout(domain, FEATURE_VERSION, layout_hash(domain)).is_ok());
        assert!(validate_layout(domain, FEATURE_VERSION + 1, layout_hash(domain)).is_err());
        assert!(validate_layout(domain, FEATURE_VERSION, layout_hash(DomainId::Diabetes)).is_err());
    }

    #[test]
    fn test_layout_info() {
        let info = LayoutInfo::for_domain(DomainId::Parkinsons);
        assert_eq!(info.version, FEATURE_VERSION);
        assert_eq!(info.feature_names.len(), info.feature_count);
        assert_eq!(info.hash, layout_hash(DomainId::Parkinsons));
    }
}
