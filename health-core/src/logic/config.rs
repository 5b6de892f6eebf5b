//! Core configuration
//!
//! Where artifacts live, whether they are loaded up front, and which
//! validation policy is active.

use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};

use crate::constants::{self, ARTIFACT_EXTENSIONS};
use crate::logic::domain::DomainId;
use crate::logic::validate::ValidationPolicy;

#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// Directory searched for `<stem>.onnx` / `<stem>.json`
    pub model_dir: PathBuf,

    /// Explicit per-domain artifact paths (override `model_dir`)
    pub artifacts: BTreeMap<DomainId, PathBuf>,

    /// Load every model at start-up instead of on first use
    pub eager_load: bool,

    pub validation: ValidationPolicy,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from(constants::DEFAULT_MODEL_DIR),
            artifacts: BTreeMap::new(),
            eager_load: true,
            validation: ValidationPolicy::default(),
        }
    }
}

impl CoreConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let artifacts = DomainId::ALL
            .into_iter()
            .filter_map(|domain| {
                env::var(domain.path_env_var())
                    .ok()
                    .filter(|p| !p.trim().is_empty())
                    .map(|p| (domain, PathBuf::from(p)))
            })
            .collect();

        Self {
            model_dir: PathBuf::from(constants::get_model_dir()),
            artifacts,
            eager_load: constants::get_eager_load(),
            validation: ValidationPolicy {
                range: env_policy("VALIDATION_RANGE_POLICY"),
                report: env_policy("VALIDATION_REPORT_MODE"),
            },
        }
    }

    /// Where a domain's artifact may live: the explicit override alone, else
    /// `<model_dir>/<stem>.<ext>` for each supported extension in preference order.
    /// The registry picks the first that exists on every load attempt.
    pub fn artifact_candidates(&self, domain: DomainId) -> Vec<PathBuf> {
        match self.artifacts.get(&domain) {
            Some(path) => vec![path.clone()],
            None => candidates_in_dir(&self.model_dir, domain.artifact_stem()),
        }
    }
}

fn candidates_in_dir(dir: &Path, stem: &str) -> Vec<PathBuf> {
    ARTIFACT_EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("{stem}.{ext}")))
        .collect()
}

fn env_policy<T>(key: &str) -> T
where
    T: std::str::FromStr<Err = String> + Default,
{
    match env::var(key) {
        Ok(value) => value.parse().unwrap_or_else(|e| {
            log::warn!("{}: {} - using default", key, e);
            T::default()
        }),
        Err(_) => T::default(),
    }
}
