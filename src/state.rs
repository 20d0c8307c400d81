//! Process-wide application state and the startup sequence that builds it.
//!
//! The state moves from Unloaded to Ready exactly once, before the server
//! accepts traffic. There is no partial-Ready state and no reload at
//! runtime: a fully constructed `AppState` is the only value ever handed
//! to the request handlers.

use crate::config::AppConfig;
use crate::dataset::{self, TrainingSchema};
use crate::features::FeaturePipeline;
use crate::metrics::PipelineMetrics;
use crate::model::inference::RegressionModel;
use crate::model::loader::ModelLoader;
use crate::scaler::StandardScaler;
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

/// Shared, read-only state consumed by every request handler.
pub struct AppState {
    pub model: RegressionModel,
    pub pipeline: FeaturePipeline,
    pub metrics: Arc<PipelineMetrics>,
}

impl AppState {
    /// Run the startup sequence: load the model, load the training
    /// dataset, derive the training schema, fit the scaler.
    ///
    /// Any failure aborts initialization entirely; the process must not
    /// serve traffic in a partially loaded state.
    pub fn initialize(config: &AppConfig) -> Result<Arc<Self>> {
        let loader = ModelLoader::with_threads(config.artifacts.onnx_threads)?;
        let loaded_model = loader
            .load_model(&config.artifacts.model_path)
            .context("Startup failed: could not load trained model")?;

        let rows = dataset::load_training_data(&config.artifacts.dataset_path)
            .context("Startup failed: could not load training dataset")?;
        info!(rows = rows.len(), "Training dataset loaded");

        let schema = TrainingSchema::derive(&rows)
            .context("Startup failed: could not derive training schema")?;
        info!(columns = schema.len(), "Training schema derived");

        let mut scaler = StandardScaler::new();
        scaler
            .fit(&dataset::numeric_column_values(&rows))
            .context("Startup failed: could not fit scaler parameters")?;
        info!("Scaler parameters fitted");

        let model = RegressionModel::new(loaded_model, schema.len());
        let pipeline = FeaturePipeline::new(schema, scaler);

        Ok(Arc::new(Self {
            model,
            pipeline,
            metrics: Arc::new(PipelineMetrics::new()),
        }))
    }
}
