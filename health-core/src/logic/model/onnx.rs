//! ONNX classifier - ONNX Runtime integration
//!
//! Runs exported binary classifiers (e.g. scikit-learn via skl2onnx):
//! one `f32` input of shape `[1, n_features]`, a `label` output holding
//! the predicted class.

use ndarray::Array2;
use parking_lot::Mutex;
use ort::session::{Session, builder::GraphOptimizationLevel};
use ort::value::Value;

use crate::logic::features::FeatureVector;
use super::inference::{check_arity, ClassLabel, Classifier, InferenceError};

/// Output name skl2onnx gives the predicted class
const LABEL_OUTPUT: &str = "label";

pub struct OnnxClassifier {
    session: Mutex<Session>,
    label_output: String,
    n_features: usize,
}

impl OnnxClassifier {
    /// Build a session from artifact bytes already read (and checksummed) by the registry
    pub fn from_bytes(model_bytes: &[u8], n_features: usize) -> Result<Self, InferenceError> {
        log::info!("Loading ONNX model from memory ({} bytes)", model_bytes.len());

        let session = Session::builder()
            .map_err(|e| InferenceError(format!("Failed to create session builder: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| InferenceError(format!("Failed to set optimization: {}", e)))?
            .commit_from_memory(model_bytes)
            .map_err(|e| InferenceError(format!("Failed to load model: {}", e)))?;

        let label_output = session.outputs.iter()
            .find(|o| o.name == LABEL_OUTPUT)
            .or_else(|| session.outputs.first())
            .map(|o| o.name.clone())
            .ok_or_else(|| InferenceError("No output defined".to_string()))?;

        Ok(Self {
            session: Mutex::new(session),
            label_output,
            n_features,
        })
    }
}

impl Classifier for OnnxClassifier {
    fn predict(&self, features: &FeatureVector) -> Result<ClassLabel, InferenceError> {
        check_arity(features, self.n_features)?;

        let input_array = Array2::<f32>::from_shape_vec(
            (1, features.len()),
            features.to_f32(),
        ).map_err(|e| InferenceError(format!("Array error: {}", e)))?;

        let input_tensor = Value::from_array(input_array)
            .map_err(|e| InferenceError(format!("Tensor error: {}", e)))?;

        let mut session = self.session.lock();
        let outputs = session.run(ort::inputs![input_tensor])
            .map_err(|e| InferenceError(format!("Inference failed: {}", e)))?;

        let output = outputs.get(self.label_output.as_str())
            .ok_or_else(|| InferenceError(format!("No output '{}'", self.label_output)))?;

        // Integer labels are the norm; some exporters emit float labels instead
        let label = match output.try_extract_tensor::<i64>() {
            Ok((_, data)) => data.first().copied(),
            Err(_) => {
                let (_, data) = output.try_extract_tensor::<f32>()
                    .map_err(|e| InferenceError(format!("Extract error: {}", e)))?;
                data.first().map(|v| v.round() as ClassLabel)
            }
        };

        label.ok_or_else(|| InferenceError("Model returned no label".to_string()))
    }

    fn kind(&self) -> &'static str {
        "onnx"
    }
}
