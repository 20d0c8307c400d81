//! Type definitions for the prediction service

pub mod record;
pub mod response;

pub use record::InsuranceRecord;
pub use response::{ApiInfo, HealthResponse, PredictionResponse};
