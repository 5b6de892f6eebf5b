//! Screening domains
//!
//! One `DomainId` per disease context. Each owns a feature layout,
//! a field schema and (at most) one classifier.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DomainId {
    Diabetes,
    HeartDisease,
    Parkinsons,
}

impl DomainId {
    /// All domains in navigation order
    pub const ALL: [DomainId; 3] = [
        DomainId::Diabetes,
        DomainId::HeartDisease,
        DomainId::Parkinsons,
    ];

    /// Stable slug used in URLs, config keys and artifact files
    pub fn as_str(&self) -> &'static str {
        match self {
            DomainId::Diabetes => "diabetes",
            DomainId::HeartDisease => "heart_disease",
            DomainId::Parkinsons => "parkinsons",
        }
    }

    /// Navigation / page title
    pub fn title(&self) -> &'static str {
        match self {
            DomainId::Diabetes => "Diabetes Prediction",
            DomainId::HeartDisease => "Heart Disease Prediction",
            DomainId::Parkinsons => "Parkinsons Prediction",
        }
    }

    /// Artifact file stem inside the model directory
    pub fn artifact_stem(&self) -> &'static str {
        match self {
            DomainId::Diabetes => "diabetes_model",
            DomainId::HeartDisease => "heart_disease_model",
            DomainId::Parkinsons => "parkinsons_model",
        }
    }

    /// Environment variable overriding the artifact path
    pub fn path_env_var(&self) -> &'static str {
        match self {
            DomainId::Diabetes => "DIABETES_MODEL_PATH",
            DomainId::HeartDisease => "HEART_DISEASE_MODEL_PATH",
            DomainId::Parkinsons => "PARKINSONS_MODEL_PATH",
        }
    }
}

impl fmt::Display for DomainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown screening domain '{0}'")]
pub struct ParseDomainError(pub String);

impl FromStr for DomainId {
    type Err = ParseDomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "diabetes" => Ok(DomainId::Diabetes),
            "heart_disease" | "heart" => Ok(DomainId::HeartDisease),
            "parkinsons" | "parkinson" => Ok(DomainId::Parkinsons),
            _ => Err(ParseDomainError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_round_trip() {
        for domain in DomainId::ALL {
            assert_eq!(domain.as_str().parse::<DomainId>(), Ok(domain));
        }
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!("heart-disease".parse::<DomainId>(), Ok(DomainId::HeartDisease));
        assert_eq!(" Parkinson ".parse::<DomainId>(), Ok(DomainId::Parkinsons));
        assert!("cancer".parse::<DomainId>().is_err());
    }

    #[test]
    fn test_serde_uses_slug() {
        let json = serde_json::to_string(&DomainId::HeartDisease).unwrap();
        assert_eq!(json, "\"heart_disease\"");
    }
}
