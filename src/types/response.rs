//! Response payloads for the HTTP surface

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Successful prediction response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResponse {
    /// Predicted charge, rounded to 2 decimal places
    pub predicted_insurance_charge: f64,
}

/// Payload for `GET /` — service identification and endpoint map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiInfo {
    pub message: String,
    pub status: String,
    pub docs: String,
    pub endpoints: HashMap<String, String>,
}

impl ApiInfo {
    pub fn new() -> Self {
        let mut endpoints = HashMap::new();
        endpoints.insert("predict".to_string(), "/predict".to_string());
        endpoints.insert("health".to_string(), "/health".to_string());

        Self {
            message: "Insurance Charge Prediction API".to_string(),
            status: "running".to_string(),
            docs: "/docs".to_string(),
            endpoints,
        }
    }
}

impl Default for ApiInfo {
    fn default() -> Self {
        Self::new()
    }
}

/// Payload for `GET /health`. Always returned with status 200; the
/// `status` field carries the actual verdict.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_loaded: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub scaler_fitted: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HealthResponse {
    /// Report a fully loaded, ready-to-serve process.
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            model_loaded: Some(true),
            scaler_fitted: Some(true),
            error: None,
        }
    }

    /// Report a process that cannot serve predictions.
    pub fn unhealthy(error: impl Into<String>) -> Self {
        Self {
            status: "unhealthy".to_string(),
            model_loaded: None,
            scaler_fitted: None,
            error: Some(error.into()),
        }
    }
}
