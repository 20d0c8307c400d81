//! HTTP surface for the prediction service

use crate::error::PredictionError;
use crate::state::AppState;
use crate::types::record::InsuranceRecord;
use crate::types::response::{ApiInfo, HealthResponse, PredictionResponse};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, warn};

/// Build the router over the shared application state.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/predict", post(predict))
        .with_state(state)
}

impl IntoResponse for PredictionError {
    fn into_response(self) -> Response {
        let status = if self.is_client_error() {
            StatusCode::UNPROCESSABLE_ENTITY
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        let body = match &self {
            PredictionError::Validation { field, constraint } => serde_json::json!({
                "error": { "field": field, "message": constraint }
            }),
            other => serde_json::json!({ "error": other.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}

/// Root endpoint - returns API information.
async fn root() -> Json<ApiInfo> {
    Json(ApiInfo::new())
}

/// Health check endpoint for deployment platforms. Never fails; always
/// returns 200 with a status payload.
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    if !state.pipeline.scaler().is_fitted() {
        return Json(HealthResponse::unhealthy("Scaler not fitted"));
    }

    Json(HealthResponse::healthy())
}

/// Prediction endpoint: validate, vectorize, infer.
async fn predict(
    State(state): State<Arc<AppState>>,
    Json(record): Json<InsuranceRecord>,
) -> Result<Json<PredictionResponse>, PredictionError> {
    let start = Instant::now();

    if let Err(err) = record.validate() {
        state.metrics.record_validation_failure();
        warn!(error = %err, "Record rejected by validator");
        return Err(err);
    }

    let features = match state.pipeline.vectorize(&record) {
        Ok(features) => features,
        Err(err) => {
            state.metrics.record_internal_failure();
            error!(error = %err, "Feature pipeline failed");
            return Err(err);
        }
    };

    let predicted = match state.model.predict(&features) {
        Ok(predicted) => predicted,
        Err(err) => {
            state.metrics.record_internal_failure();
            error!(error = %err, "Model inference failed");
            return Err(err);
        }
    };

    state.metrics.record_prediction(start.elapsed(), predicted);
    debug!(
        predicted = predicted,
        processing_time_us = start.elapsed().as_micros(),
        "Prediction served"
    );

    Ok(Json(PredictionResponse {
        predicted_insurance_charge: predicted,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_maps_to_client_status() {
        let err = PredictionError::validation("age", "must be greater than 0");
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_internal_errors_map_to_server_status() {
        for err in [
            PredictionError::ScalerNotFitted,
            PredictionError::ModelNotLoaded,
            PredictionError::SchemaMismatch("11 vs 12".into()),
            PredictionError::ModelInference("bad shape".into()),
        ] {
            let response = err.into_response();
            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    // Full request-cycle tests require an ONNX model artifact; the
    // pipeline components are covered by their own unit tests.
}
