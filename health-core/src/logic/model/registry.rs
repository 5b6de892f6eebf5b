//! Model Registry
//!
//! One slot per domain. A slot knows where its artifact lives and caches
//! the classifier once it has loaded successfully. Failed loads are not
//! cached: the domain stays unavailable until a later attempt succeeds.
//!
//! Built once at start-up and shared (`Arc<ModelRegistry>`) with whoever
//! needs predictions; tests inject stub classifiers with `with_classifier`.

use once_cell::sync::OnceCell;
use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::logic::domain::DomainId;
use crate::logic::features::feature_count;
use super::checksum;
use super::inference::{Classifier, InferenceStats, ModelMetadata};
use super::linear::LinearClassifier;
use super::onnx::OnnxClassifier;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LoadError {
    #[error("Model file not found for {domain}: {}", .path.display())]
    NotFound { domain: DomainId, path: PathBuf },

    #[error("Error loading {domain} model from {} -> {cause}", .path.display())]
    Corrupt {
        domain: DomainId,
        path: PathBuf,
        cause: String,
    },

    #[error("No model artifact configured for {0}")]
    NotConfigured(DomainId),
}

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// A classifier together with where it came from
pub struct LoadedModel {
    pub classifier: Arc<dyn Classifier>,
    pub metadata: ModelMetadata,
}

/// Per-domain status for UI / health endpoints
#[derive(Debug, Clone, Serialize)]
pub struct ModelStatus {
    pub domain: DomainId,
    pub model_loaded: bool,
    pub source: Option<String>,
    pub model_type: Option<String>,
    pub checksum_verified: bool,
    pub loaded_at: Option<chrono::DateTime<chrono::Utc>>,
    pub inference_count: u64,
    pub avg_latency_ms: f32,
    pub last_error: Option<String>,
}

#[derive(Default)]
struct ModelSlot {
    /// Candidate artifact paths, first existing one wins
    sources: RwLock<Vec<PathBuf>>,
    model: OnceCell<Arc<LoadedModel>>,
    stats: InferenceStats,
    last_failure: Mutex<Option<LoadError>>,
}

impl ModelSlot {
    /// Resolved at load time so an artifact dropped in later is picked up
    fn source(&self) -> Option<PathBuf> {
        let sources = self.sources.read();
        sources
            .iter()
            .find(|path| path.exists())
            .or_else(|| sources.first())
            .cloned()
    }

    /// Remember a failure; true if it differs from the previous one
    fn note_failure(&self, err: &LoadError) -> bool {
        let mut last = self.last_failure.lock();
        let is_new = last.as_ref() != Some(err);
        *last = Some(err.clone());
        is_new
    }
}

// ============================================================================
// REGISTRY
// ============================================================================

#[derive(Default)]
pub struct ModelRegistry {
    slots: [ModelSlot; 3],
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, domain: DomainId) -> &ModelSlot {
        let index = match domain {
            DomainId::Diabetes => 0,
            DomainId::HeartDisease => 1,
            DomainId::Parkinsons => 2,
        };
        &self.slots[index]
    }

    /// Remember where a domain's artifact lives; nothing is read yet
    pub fn register(&self, domain: DomainId, path: impl Into<PathBuf>) {
        *self.slot(domain).sources.write() = vec![path.into()];
    }

    /// Like `register`, with several possible locations checked in order on each load attempt
    pub fn register_candidates<I, P>(&self, domain: DomainId, paths: I)
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        *self.slot(domain).sources.write() = paths.into_iter().map(Into::into).collect();
    }

    /// Builder form of `insert_classifier`
    pub fn with_classifier(self, domain: DomainId, classifier: Arc<dyn Classifier>) -> Self {
        self.insert_classifier(domain, classifier);
        self
    }

    /// Install an already-built classifier. Returns false if the domain already had one.
    pub fn insert_classifier(&self, domain: DomainId, classifier: Arc<dyn Classifier>) -> bool {
        let metadata = ModelMetadata::new(domain, Path::new("<injected>"), classifier.as_ref(), false);
        let installed = self.slot(domain)
            .model
            .set(Arc::new(LoadedModel { classifier, metadata }))
            .is_ok();
        if !installed {
            log::warn!("{} already has a classifier; keeping the existing one", domain);
        }
        installed
    }

    /// Load `path` for `domain`, or return the cached classifier if one is already loaded
    pub fn load(&self, domain: DomainId, path: impl AsRef<Path>) -> Result<Arc<dyn Classifier>, LoadError> {
        let slot = self.slot(domain);
        if let Some(model) = slot.model.get() {
            return Ok(model.classifier.clone());
        }

        let path = path.as_ref();
        self.register(domain, path);
        self.load_from(domain, path)
    }

    fn load_from(&self, domain: DomainId, path: &Path) -> Result<Arc<dyn Classifier>, LoadError> {
        let slot = self.slot(domain);

        // Concurrent first calls block here; only one of them reads the file
        let model = slot.model.get_or_try_init(|| read_artifact(domain, path).map(Arc::new));
        match model {
            Ok(model) => {
                *slot.last_failure.lock() = None;
                Ok(model.classifier.clone())
            }
            Err(e) => {
                if slot.note_failure(&e) {
                    log::warn!("{}", e);
                } else {
                    log::debug!("{} (unchanged)", e);
                }
                Err(e)
            }
        }
    }

    /// Cached classifier, loading lazily from the registered path
    pub fn classifier(&self, domain: DomainId) -> Result<Arc<dyn Classifier>, LoadError> {
        let slot = self.slot(domain);
        if let Some(model) = slot.model.get() {
            return Ok(model.classifier.clone());
        }

        match slot.source() {
            Some(path) => self.load_from(domain, &path),
            None => Err(LoadError::NotConfigured(domain)),
        }
    }

    /// Cached classifier only; never touches the disk
    pub fn get(&self, domain: DomainId) -> Option<Arc<dyn Classifier>> {
        self.slot(domain).model.get().map(|m| m.classifier.clone())
    }

    /// Load every domain that has a registered path
    pub fn load_all(&self) -> Vec<(DomainId, Result<(), LoadError>)> {
        DomainId::ALL
            .into_iter()
            .map(|domain| (domain, self.classifier(domain).map(|_| ())))
            .collect()
    }

    pub fn is_available(&self, domain: DomainId) -> bool {
        self.classifier(domain).is_ok()
    }

    pub fn metadata(&self, domain: DomainId) -> Option<ModelMetadata> {
        self.slot(domain).model.get().map(|m| m.metadata.clone())
    }

    pub fn record_inference(&self, domain: DomainId, micros: u64) {
        self.slot(domain).stats.record(micros);
    }

    pub fn status(&self) -> Vec<ModelStatus> {
        DomainId::ALL
            .into_iter()
            .map(|domain| {
                let slot = self.slot(domain);
                let metadata = slot.model.get().map(|m| &m.metadata);
                ModelStatus {
                    domain,
                    model_loaded: metadata.is_some(),
                    source: metadata
                        .map(|m| m.model_path.clone())
                        .or_else(|| slot.source().map(|p| p.display().to_string())),
                    model_type: metadata.map(|m| m.model_type.clone()),
                    checksum_verified: metadata.map_or(false, |m| m.checksum_verified),
                    loaded_at: metadata.map(|m| m.loaded_at),
                    inference_count: slot.stats.count(),
                    avg_latency_ms: slot.stats.avg_latency_ms(),
                    last_error: slot.last_failure.lock().as_ref().map(|e| e.to_string()),
                }
            })
            .collect()
    }
}

// ============================================================================
// ARTIFACT LOADING
// ============================================================================

fn read_artifact(domain: DomainId, path: &Path) -> Result<LoadedModel, LoadError> {
    log::info!("Loading {} model from: {}", domain, path.display());

    let corrupt = |cause: String| LoadError::Corrupt {
        domain,
        path: path.to_path_buf(),
        cause,
    };

    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(LoadError::NotFound { domain, path: path.to_path_buf() });
        }
        Err(e) => return Err(corrupt(e.to_string())),
    };

    let checksum_verified = checksum::verify_sidecar(path, &bytes).map_err(corrupt)?;

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    let classifier: Arc<dyn Classifier> = match extension.as_deref() {
        Some("onnx") => Arc::new(
            OnnxClassifier::from_bytes(&bytes, feature_count(domain)).map_err(|e| corrupt(e.0))?,
        ),
        Some("json") => Arc::new(LinearClassifier::from_json(&bytes, domain).map_err(|e| corrupt(e.0))?),
        other => {
            return Err(corrupt(format!(
                "Unsupported artifact format '{}'",
                other.unwrap_or("")
            )));
        }
    };

    let metadata = ModelMetadata::new(domain, path, classifier.as_ref(), checksum_verified);
    log::info!(
        "{} model loaded ({}, checksum {})",
        domain,
        metadata.model_type,
        if checksum_verified { "verified" } else { "not provided" }
    );

    Ok(LoadedModel { classifier, metadata })
}

// ============================================================================
// TESTS
// ============================================================================
