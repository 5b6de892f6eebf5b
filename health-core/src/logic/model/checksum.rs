//! Artifact checksum
//!
//! An artifact may ship with a `<artifact>.sha256` sidecar holding the
//! hex digest (as written by `sha256sum`). When present it must match.

use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

use crate::constants::CHECKSUM_EXTENSION;

/// Hex SHA-256 of a byte slice
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// `model.onnx` → `model.onnx.sha256`
pub fn sidecar_path(artifact: &Path) -> PathBuf {
    let mut name = artifact.as_os_str().to_os_string();
    name.push(".");
    name.push(CHECKSUM_EXTENSION);
    PathBuf::from(name)
}

/// Ok(true) if a sidecar matched, Ok(false) if there is none
pub fn verify_sidecar(artifact: &Path, bytes: &[u8]) -> Result<bool, String> {
    let sidecar = sidecar_path(artifact);
    if !sidecar.exists() {
        return Ok(false);
    }

    let content = std::fs::read_to_string(&sidecar)
        .map_err(|e| format!("Cannot read checksum {}: {}", sidecar.display(), e))?;
    let expected = content
        .split_whitespace()
        .next()
        .map(str::to_ascii_lowercase)
        .ok_or_else(|| format!("Checksum file {} is empty", sidecar.display()))?;

    let actual = sha256_hex(bytes);
    if actual != expected {
        return Err(format!("Checksum mismatch: expected {}, got {}", expected, actual));
    }

    Ok(true)
}
