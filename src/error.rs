//! Error taxonomy for the prediction pipeline

use thiserror::Error;

/// Errors produced by the prediction pipeline.
///
/// `Validation` is client-caused and recovered at the HTTP boundary. The
/// remaining variants indicate process-level or deployment bugs and are
/// surfaced as internal server errors.
#[derive(Debug, Error)]
pub enum PredictionError {
    /// A record field is out of range or outside its enumerated set.
    #[error("invalid value for `{field}`: {constraint}")]
    Validation {
        field: &'static str,
        constraint: String,
    },

    /// The scaler was invoked before its parameters were fitted.
    #[error("feature scaler is not fitted")]
    ScalerNotFitted,

    /// The model artifact is missing or was never loaded.
    #[error("trained model is not loaded")]
    ModelNotLoaded,

    /// The pipeline's output shape disagrees with what the model expects.
    /// Indicates artifact drift between the model and the training dataset.
    #[error("feature schema mismatch: {0}")]
    SchemaMismatch(String),

    /// The ONNX session rejected the feature vector at inference time.
    #[error("model inference failed: {0}")]
    ModelInference(String),
}

impl PredictionError {
    /// Build a validation error for a named field.
    pub fn validation(field: &'static str, constraint: impl Into<String>) -> Self {
        Self::Validation {
            field,
            constraint: constraint.into(),
        }
    }

    /// Whether this error is caused by client input.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}
