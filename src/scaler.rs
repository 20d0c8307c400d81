//! Standard scaling of numerical features.
//!
//! The standard score of a value x is: z = (x - mean) / std. Parameters
//! are fitted once at startup from the training dataset and frozen for
//! the lifetime of the process, matching the training-time preprocessing.

use crate::dataset::TrainingSchema;
use crate::error::PredictionError;

/// Fitted statistics for one numerical column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnStats {
    pub column: String,
    pub mean: f64,
    pub std_dev: f64,
}

impl ColumnStats {
    pub fn new(column: impl Into<String>, mean: f64, std_dev: f64) -> Self {
        Self {
            column: column.into(),
            mean,
            std_dev,
        }
    }
}

/// Standardizes numerical features by removing the mean and scaling to
/// unit variance, using the population standard deviation convention of
/// the training-time fit.
///
/// Zero-variance columns are a degenerate input: scaling would divide by
/// zero, and no fallback is applied.
#[derive(Debug, Clone, Default)]
pub struct StandardScaler {
    stats: Option<Vec<ColumnStats>>,
}

impl StandardScaler {
    /// Create an unfitted scaler.
    pub fn new() -> Self {
        Self { stats: None }
    }

    /// Build a scaler from previously computed statistics.
    pub fn from_stats(stats: Vec<ColumnStats>) -> Self {
        Self { stats: Some(stats) }
    }

    /// Fit per-column mean and standard deviation.
    ///
    /// Each entry pairs a column name with that column's values across the
    /// training dataset.
    pub fn fit(&mut self, columns: &[(&str, Vec<f64>)]) -> Result<(), PredictionError> {
        let mut stats = Vec::with_capacity(columns.len());

        for (column, values) in columns {
            if values.is_empty() {
                return Err(PredictionError::SchemaMismatch(format!(
                    "cannot fit scaler on empty column `{}`",
                    column
                )));
            }

            let n = values.len() as f64;
            let mean = values.iter().sum::<f64>() / n;
            let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

            stats.push(ColumnStats::new(*column, mean, variance.sqrt()));
        }

        self.stats = Some(stats);
        Ok(())
    }

    /// Whether the scaler has been fitted.
    pub fn is_fitted(&self) -> bool {
        self.stats.is_some()
    }

    /// Fitted statistics, if any.
    pub fn stats(&self) -> Option<&[ColumnStats]> {
        self.stats.as_deref()
    }

    /// Scale the fitted columns of an aligned feature vector in place.
    ///
    /// Positions are resolved through the training schema; all other
    /// columns are left untouched.
    pub fn transform(
        &self,
        features: &mut [f64],
        schema: &TrainingSchema,
    ) -> Result<(), PredictionError> {
        let stats = self.stats.as_ref().ok_or(PredictionError::ScalerNotFitted)?;

        if features.len() != schema.len() {
            return Err(PredictionError::SchemaMismatch(format!(
                "feature vector has {} columns, schema has {}",
                features.len(),
                schema.len()
            )));
        }

        for stat in stats {
            let index = schema.index_of(&stat.column).ok_or_else(|| {
                PredictionError::SchemaMismatch(format!(
                    "scaled column `{}` is missing from the training schema",
                    stat.column
                ))
            })?;
            features[index] = (features[index] - stat.mean) / stat.std_dev;
        }

        Ok(())
    }

    /// Invert the scaling formula for a single column value.
    pub fn inverse_transform_value(
        &self,
        column: &str,
        value: f64,
    ) -> Result<f64, PredictionError> {
        let stats = self.stats.as_ref().ok_or(PredictionError::ScalerNotFitted)?;

        let stat = stats.iter().find(|s| s.column == column).ok_or_else(|| {
            PredictionError::SchemaMismatch(format!("column `{}` was not fitted", column))
        })?;

        Ok(value * stat.std_dev + stat.mean)
    }
}
