//! Regression inference over the loaded ONNX model

use crate::error::PredictionError;
use crate::model::loader::LoadedModel;
use std::sync::RwLock;
use tracing::debug;

/// Round a predicted charge to 2 decimal places, half away from zero.
pub fn round_charge(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Trained regression model behind an inference interface.
///
/// The ONNX session needs `&mut` to run, so it sits behind an `RwLock`;
/// the write lock is scoped to a single inference call. The expected
/// feature count is recorded at startup from the training schema and
/// cross-checked on every request.
pub struct RegressionModel {
    model: RwLock<LoadedModel>,
    expected_features: usize,
}

impl RegressionModel {
    pub fn new(model: LoadedModel, expected_features: usize) -> Self {
        Self {
            model: RwLock::new(model),
            expected_features,
        }
    }

    /// Number of features the model expects per request.
    pub fn expected_features(&self) -> usize {
        self.expected_features
    }

    /// Predict the insurance charge for one aligned, scaled feature
    /// vector. Returns the scalar rounded to 2 decimal places.
    pub fn predict(&self, features: &[f64]) -> Result<f64, PredictionError> {
        if features.len() != self.expected_features {
            return Err(PredictionError::SchemaMismatch(format!(
                "feature vector has {} columns, model expects {}",
                features.len(),
                self.expected_features
            )));
        }

        let mut model = self
            .model
            .write()
            .map_err(|e| PredictionError::ModelInference(format!("lock error: {}", e)))?;

        let raw = Self::run_session(&mut model, features)?;
        let prediction = round_charge(raw);

        debug!(raw = raw, prediction = prediction, "Inference complete");

        Ok(prediction)
    }

    /// Run the ONNX session on a single feature vector.
    fn run_session(model: &mut LoadedModel, features: &[f64]) -> Result<f64, PredictionError> {
        use ort::value::Tensor;

        // Model input is float32; the pipeline works in f64 until this point
        let values: Vec<f32> = features.iter().map(|&v| v as f32).collect();

        // Prepare input tensor - shape [1, num_features]
        let shape = vec![1_i64, values.len() as i64];
        let input_tensor = Tensor::from_array((shape, values))
            .map_err(|e| PredictionError::ModelInference(format!("input tensor: {}", e)))?;

        let outputs = model
            .session
            .run(ort::inputs![&model.input_name => input_tensor])
            .map_err(|e| PredictionError::ModelInference(e.to_string()))?;

        Self::extract_scalar(&outputs, &model.output_name)
    }

    /// Extract the single predicted value from the session outputs.
    fn extract_scalar(
        outputs: &ort::session::SessionOutputs,
        output_name: &str,
    ) -> Result<f64, PredictionError> {
        // Preferred: the output recorded at load time
        if let Some(output) = outputs.get(output_name) {
            if let Ok((_, data)) = output.try_extract_tensor::<f32>() {
                if let Some(&value) = data.first() {
                    return Ok(value as f64);
                }
            }
        }

        // Fallback: first tensor output with data
        for (name, output) in outputs.iter() {
            if let Ok((_, data)) = output.try_extract_tensor::<f32>() {
                if let Some(&value) = data.first() {
                    debug!(output = %name, "Extracted prediction from fallback output");
                    return Ok(value as f64);
                }
            }
        }

        Err(PredictionError::ModelInference(
            "no scalar output produced by the model".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_charge() {
        assert_eq!(round_charge(16884.9235), 16884.92);
        assert_eq!(round_charge(16884.925), 16884.93);
        assert_eq!(round_charge(1725.0), 1725.0);
        assert_eq!(round_charge(-0.005), -0.01); // half away from zero
    }

    #[test]
    fn test_round_charge_within_reference_tolerance() {
        let reference = 16884.92;
        assert!((round_charge(16884.9241) - reference).abs() < 1e-2);
    }

    // Inference tests require an ONNX model artifact; the pipeline up to
    // the model boundary is covered in features.rs and scaler.rs.
}
