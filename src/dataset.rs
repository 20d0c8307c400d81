//! Training dataset loading and schema derivation.
//!
//! The training dataset is read once at startup. It serves two purposes:
//! deriving the ordered training column schema (the same expansion applied
//! to requests, run over the whole dataset) and fitting the scaler
//! parameters. The model itself is never trained here.

use crate::error::PredictionError;
use crate::features::{CATEGORICAL_COLUMNS, NUMERICAL_COLUMNS};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;

/// Name of the target column, excluded from the feature schema.
pub const TARGET_COLUMN: &str = "charges";

/// One row of the original training dataset.
#[derive(Debug, Clone, Deserialize)]
pub struct TrainingRow {
    pub age: i64,
    pub sex: String,
    pub bmi: f64,
    pub children: i64,
    pub smoker: String,
    pub region: String,
    pub charges: f64,
}

impl TrainingRow {
    /// Value of a numerical column by name.
    fn numeric_value(&self, column: &str) -> f64 {
        match column {
            "age" => self.age as f64,
            "bmi" => self.bmi,
            "children" => self.children as f64,
            other => unreachable!("`{}` is not a numerical column", other),
        }
    }

    /// Value of a categorical column by name.
    fn categorical_value(&self, column: &str) -> &str {
        match column {
            "sex" => &self.sex,
            "smoker" => &self.smoker,
            "region" => &self.region,
            other => unreachable!("`{}` is not a categorical column", other),
        }
    }
}

/// Load the training dataset from a CSV file. Fatal at startup if the
/// file is missing or malformed.
pub fn load_training_data<P: AsRef<Path>>(path: P) -> Result<Vec<TrainingRow>> {
    let path = path.as_ref();
    let reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open training dataset at {:?}", path))?;

    let rows = collect_rows(reader)
        .with_context(|| format!("Failed to parse training dataset at {:?}", path))?;

    Ok(rows)
}

/// Parse training rows from any reader. Split out so tests can feed
/// in-memory CSV data.
pub fn read_training_data<R: Read>(reader: R) -> Result<Vec<TrainingRow>> {
    collect_rows(csv::Reader::from_reader(reader))
}

fn collect_rows<R: Read>(mut reader: csv::Reader<R>) -> Result<Vec<TrainingRow>> {
    let mut rows = Vec::new();
    for result in reader.deserialize() {
        let row: TrainingRow = result.context("Invalid training dataset row")?;
        rows.push(row);
    }
    if rows.is_empty() {
        anyhow::bail!("Training dataset contains no rows");
    }
    Ok(rows)
}

/// Column values for every numerical feature, in dataset order. Input to
/// the scaler fit.
pub fn numeric_column_values(rows: &[TrainingRow]) -> Vec<(&'static str, Vec<f64>)> {
    NUMERICAL_COLUMNS
        .iter()
        .map(|&column| {
            let values = rows.iter().map(|row| row.numeric_value(column)).collect();
            (column, values)
        })
        .collect()
}

/// The ordered feature column set seen during training.
///
/// Derived once at startup from the training dataset, never mutated.
/// Request-side alignment never trusts record-supplied column order; it
/// reindexes against this schema.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingSchema {
    columns: Vec<String>,
}

impl TrainingSchema {
    /// Build a schema from an explicit ordered column list.
    pub fn from_columns(columns: Vec<String>) -> Self {
        Self { columns }
    }

    /// Derive the schema by expanding the categorical columns of the
    /// training dataset.
    ///
    /// Order matches the training-time expansion: numerical columns in
    /// dataset order, then per categorical column one indicator per
    /// observed value, values in sorted order. The target column never
    /// enters the schema.
    pub fn derive(rows: &[TrainingRow]) -> Result<Self, PredictionError> {
        if rows.is_empty() {
            return Err(PredictionError::SchemaMismatch(
                "cannot derive a schema from an empty dataset".to_string(),
            ));
        }

        let mut columns: Vec<String> = NUMERICAL_COLUMNS.iter().map(|c| c.to_string()).collect();

        for &categorical in &CATEGORICAL_COLUMNS {
            let observed: BTreeSet<&str> = rows
                .iter()
                .map(|row| row.categorical_value(categorical))
                .collect();
            for value in observed {
                columns.push(format!("{}_{}", categorical, value));
            }
        }

        Ok(Self { columns })
    }

    /// Ordered column names.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of feature columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Position of a column in the schema, if present.
    pub fn index_of(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }
}
