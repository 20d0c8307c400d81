//! Feature expansion and alignment for insurance charge prediction.
//!
//! This module converts a validated record into the exact numeric feature
//! vector the regression model was trained on. The preprocessing mirrors
//! the training pipeline: one-hot expansion of categorical fields, column
//! alignment against the training schema, then scaling of the numerical
//! features.

use crate::dataset::TrainingSchema;
use crate::error::PredictionError;
use crate::scaler::StandardScaler;
use crate::types::record::InsuranceRecord;
use std::collections::HashMap;

/// Categorical columns of the training dataset, in dataset order.
pub const CATEGORICAL_COLUMNS: [&str; 3] = ["sex", "smoker", "region"];

/// Numerical columns subject to scaling, in dataset order.
pub const NUMERICAL_COLUMNS: [&str; 3] = ["age", "bmi", "children"];

/// Expand a record into a column-name → value map.
///
/// Numerical fields keep their own column names. Each categorical field
/// contributes a single `<field>_<value>` indicator set to 1.0 for the
/// value actually present; absent categories are supplied later by
/// [`align_columns`]. Pure function of its input.
pub fn expand_record(record: &InsuranceRecord) -> HashMap<String, f64> {
    let mut columns = HashMap::new();

    for (name, value) in record.numeric_fields() {
        columns.insert(name.to_string(), value);
    }
    for (field, value) in record.categorical_fields() {
        columns.insert(format!("{}_{}", field, value), 1.0);
    }

    columns
}

/// Reindex an expanded record against the training schema.
///
/// The output covers exactly the schema's columns, in schema order. A
/// schema column missing from the record is filled with 0.0; a record
/// column unknown to the schema is dropped. Indicator values are already
/// f64 here, so the output is uniformly floating-point.
pub fn align_columns(expanded: &HashMap<String, f64>, schema: &TrainingSchema) -> Vec<f64> {
    schema
        .columns()
        .iter()
        .map(|column| expanded.get(column).copied().unwrap_or(0.0))
        .collect()
}

/// Full per-request feature pipeline: expand, align, scale.
///
/// Holds the immutable training schema and fitted scaler; shared read-only
/// across requests.
pub struct FeaturePipeline {
    schema: TrainingSchema,
    scaler: StandardScaler,
}

impl FeaturePipeline {
    pub fn new(schema: TrainingSchema, scaler: StandardScaler) -> Self {
        Self { schema, scaler }
    }

    /// Convert a validated record into the model's feature vector.
    pub fn vectorize(&self, record: &InsuranceRecord) -> Result<Vec<f64>, PredictionError> {
        let expanded = expand_record(record);
        let mut features = align_columns(&expanded, &self.schema);
        self.scaler.transform(&mut features, &self.schema)?;
        Ok(features)
    }

    pub fn schema(&self) -> &TrainingSchema {
        &self.schema
    }

    pub fn scaler(&self) -> &StandardScaler {
        &self.scaler
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scaler::ColumnStats;

    fn sample_record() -> InsuranceRecord {
        InsuranceRecord {
            age: 19,
            sex: "female".to_string(),
            bmi: 27.9,
            children: 0,
            smoker: "yes".to_string(),
            region: "southwest".to_string(),
        }
    }

    fn full_schema() -> TrainingSchema {
        TrainingSchema::from_columns(vec![
            "age".to_string(),
            "bmi".to_string(),
            "children".to_string(),
            "sex_female".to_string(),
            "sex_male".to_string(),
            "smoker_no".to_string(),
            "smoker_yes".to_string(),
            "region_northeast".to_string(),
            "region_northwest".to_string(),
            "region_southeast".to_string(),
            "region_southwest".to_string(),
        ])
    }

    #[test]
    fn test_expansion_emits_only_present_categories() {
        let expanded = expand_record(&sample_record());

        assert_eq!(expanded.get("age"), Some(&19.0));
        assert_eq!(expanded.get("bmi"), Some(&27.9));
        assert_eq!(expanded.get("children"), Some(&0.0));
        assert_eq!(expanded.get("sex_female"), Some(&1.0));
        assert_eq!(expanded.get("smoker_yes"), Some(&1.0));
        assert_eq!(expanded.get("region_southwest"), Some(&1.0));
        // absent categories are not emitted by the expander
        assert!(!expanded.contains_key("sex_male"));
        assert!(!expanded.contains_key("smoker_no"));
        assert_eq!(expanded.len(), 6);
    }

    #[test]
    fn test_alignment_fills_absent_categories_with_zero() {
        let schema = full_schema();
        let features = align_columns(&expand_record(&sample_record()), &schema);

        assert_eq!(features.len(), schema.len());
        // schema order: age, bmi, children, sex_female, sex_male,
        // smoker_no, smoker_yes, region_ne, region_nw, region_se, region_sw
        assert_eq!(features[0], 19.0);
        assert_eq!(features[1], 27.9);
        assert_eq!(features[2], 0.0);
        assert_eq!(features[3], 1.0); // sex_female
        assert_eq!(features[4], 0.0); // sex_male
        assert_eq!(features[5], 0.0); // smoker_no
        assert_eq!(features[6], 1.0); // smoker_yes
        assert_eq!(features[7], 0.0);
        assert_eq!(features[8], 0.0);
        assert_eq!(features[9], 0.0);
        assert_eq!(features[10], 1.0); // region_southwest
    }

    #[test]
    fn test_alignment_drops_unknown_columns() {
        let schema = full_schema();
        let mut expanded = expand_record(&sample_record());
        expanded.insert("region_midlands".to_string(), 1.0);

        let features = align_columns(&expanded, &schema);
        assert_eq!(features.len(), schema.len());
    }

    #[test]
    fn test_alignment_shape_is_independent_of_category_values() {
        let schema = full_schema();
        let mut record = sample_record();

        for region in ["northeast", "northwest", "southeast", "southwest"] {
            record.region = region.to_string();
            let features = align_columns(&expand_record(&record), &schema);
            assert_eq!(features.len(), schema.len());
            let indicators: f64 = features[7..11].iter().sum();
            assert_eq!(indicators, 1.0);
        }
    }

    #[test]
    fn test_pipeline_scales_numeric_and_preserves_indicators() {
        let schema = full_schema();
        let scaler = StandardScaler::from_stats(vec![
            ColumnStats::new("age", 39.0, 14.0),
            ColumnStats::new("bmi", 30.6, 6.1),
            ColumnStats::new("children", 1.1, 1.2),
        ]);
        let pipeline = FeaturePipeline::new(schema, scaler);

        let features = pipeline.vectorize(&sample_record()).unwrap();

        assert!((features[0] - (19.0 - 39.0) / 14.0).abs() < 1e-12);
        assert!((features[1] - (27.9 - 30.6) / 6.1).abs() < 1e-12);
        assert!((features[2] - (0.0 - 1.1) / 1.2).abs() < 1e-12);
        // indicator columns untouched
        assert_eq!(features[3], 1.0);
        assert_eq!(features[6], 1.0);
        assert_eq!(features[10], 1.0);
    }

    #[test]
    fn test_pipeline_is_deterministic() {
        let scaler = StandardScaler::from_stats(vec![
            ColumnStats::new("age", 39.0, 14.0),
            ColumnStats::new("bmi", 30.6, 6.1),
            ColumnStats::new("children", 1.1, 1.2),
        ]);
        let pipeline = FeaturePipeline::new(full_schema(), scaler);
        let record = sample_record();

        let first = pipeline.vectorize(&record).unwrap();
        let second = pipeline.vectorize(&record).unwrap();

        // bit-identical, not merely approximately equal
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.to_bits(), b.to_bits());
        }
    }

    #[test]
    fn test_unfitted_scaler_fails() {
        let pipeline = FeaturePipeline::new(full_schema(), StandardScaler::new());
        match pipeline.vectorize(&sample_record()) {
            Err(PredictionError::ScalerNotFitted) => {}
            other => panic!("expected ScalerNotFitted, got {:?}", other),
        }
    }
}
