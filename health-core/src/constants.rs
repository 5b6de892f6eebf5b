//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.

/// Default directory holding the model artifacts
pub const DEFAULT_MODEL_DIR: &str = "saved_models";

/// Artifact extensions probed when no explicit path is configured, in order
pub const ARTIFACT_EXTENSIONS: &[&str] = &["onnx", "json"];

/// Extension of the optional checksum sidecar (`<artifact>.sha256`)
pub const CHECKSUM_EXTENSION: &str = "sha256";

/// Label every built-in model uses for the positive class
pub const POSITIVE_CLASS: i64 = 1;

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "Health Assistant";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get model directory from environment or use default
pub fn get_model_dir() -> String {
    std::env::var("MODEL_DIR")
        .unwrap_or_else(|_| DEFAULT_MODEL_DIR.to_string())
}

/// Whether models are loaded at start-up (true) or on first use (false)
pub fn get_eager_load() -> bool {
    std::env::var("MODEL_EAGER_LOAD")
        .ok()
        .and_then(|s| parse_bool(&s))
        .unwrap_or(true)
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
