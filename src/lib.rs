//! Insurance Charge Prediction Service Library
//!
//! Exposes a trained regression model behind an HTTP interface. Incoming
//! records are validated, one-hot expanded, aligned against the training
//! column schema, scaled with frozen parameters, and fed to an ONNX model.

pub mod config;
pub mod dataset;
pub mod error;
pub mod features;
pub mod metrics;
pub mod model;
pub mod scaler;
pub mod server;
pub mod state;
pub mod types;

pub use config::AppConfig;
pub use error::PredictionError;
pub use features::FeaturePipeline;
pub use model::inference::RegressionModel;
pub use scaler::StandardScaler;
pub use state::AppState;
pub use types::{record::InsuranceRecord, response::PredictionResponse};
