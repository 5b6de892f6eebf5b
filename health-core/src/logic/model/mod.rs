//! Model Module - Classifier artifacts and their registry
//!
//! Artifact format is picked by extension: `.onnx` runs through ONNX
//! Runtime, `.json` is a linear model export.

pub mod checksum;
pub mod inference;
pub mod linear;
pub mod onnx;
pub mod registry;

// Re-export common types
pub use inference::{ClassLabel, Classifier, InferenceError, ModelMetadata};
pub use linear::LinearClassifier;
pub use onnx::OnnxClassifier;
pub use registry::{LoadError, LoadedModel, ModelRegistry, ModelStatus};
