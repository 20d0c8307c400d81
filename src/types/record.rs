//! Insurance record data structures

use crate::error::PredictionError;
use serde::{Deserialize, Serialize};

/// Accepted values for the `sex` field.
pub const SEX_VALUES: [&str; 2] = ["female", "male"];

/// Accepted values for the `smoker` field.
pub const SMOKER_VALUES: [&str; 2] = ["no", "yes"];

/// Accepted values for the `region` field.
pub const REGION_VALUES: [&str; 4] = ["northeast", "northwest", "southeast", "southwest"];

/// One subject's raw attributes, as received on the wire.
///
/// Field shape and JSON types are enforced by serde at the boundary;
/// domain constraints are enforced by [`InsuranceRecord::validate`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsuranceRecord {
    /// Age in years
    pub age: i64,

    /// Biological sex ("female" or "male")
    pub sex: String,

    /// Body-mass index
    pub bmi: f64,

    /// Number of dependents
    pub children: i64,

    /// Smoker status ("yes" or "no")
    pub smoker: String,

    /// Residential region
    pub region: String,
}

impl InsuranceRecord {
    /// Check every domain constraint, reporting the first violated field.
    ///
    /// Records that fail here never reach the feature pipeline.
    pub fn validate(&self) -> Result<(), PredictionError> {
        if self.age <= 0 {
            return Err(PredictionError::validation("age", "must be greater than 0"));
        }
        if self.bmi <= 0.0 {
            return Err(PredictionError::validation("bmi", "must be greater than 0"));
        }
        if self.children < 0 {
            return Err(PredictionError::validation(
                "children",
                "must be greater than or equal to 0",
            ));
        }
        Self::check_membership("sex", &self.sex, &SEX_VALUES)?;
        Self::check_membership("smoker", &self.smoker, &SMOKER_VALUES)?;
        Self::check_membership("region", &self.region, &REGION_VALUES)?;
        Ok(())
    }

    fn check_membership(
        field: &'static str,
        value: &str,
        allowed: &[&str],
    ) -> Result<(), PredictionError> {
        if allowed.contains(&value) {
            Ok(())
        } else {
            Err(PredictionError::validation(
                field,
                format!("must be one of: {}", allowed.join(", ")),
            ))
        }
    }

    /// Numerical fields under their dataset column names.
    pub fn numeric_fields(&self) -> [(&'static str, f64); 3] {
        [
            ("age", self.age as f64),
            ("bmi", self.bmi),
            ("children", self.children as f64),
        ]
    }

    /// Categorical fields under their dataset column names.
    pub fn categorical_fields(&self) -> [(&'static str, &str); 3] {
        [
            ("sex", self.sex.as_str()),
            ("smoker", self.smoker.as_str()),
            ("region", self.region.as_str()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_record() -> InsuranceRecord {
        InsuranceRecord {
            age: 19,
            sex: "female".to_string(),
            bmi: 27.9,
            children: 0,
            smoker: "yes".to_string(),
            region: "southwest".to_string(),
        }
    }

    #[test]
    fn test_valid_record_passes() {
        assert!(valid_record().validate().is_ok());
    }

    #[test]
    fn test_boundary_values_accepted() {
        let mut record = valid_record();
        record.age = 1;
        record.children = 0;
        assert!(record.validate().is_ok());
    }

    #[test]
    fn test_age_zero_rejected() {
        let mut record = valid_record();
        record.age = 0;
        match record.validate() {
            Err(PredictionError::Validation { field, .. }) => assert_eq!(field, "age"),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_children_rejected() {
        let mut record = valid_record();
        record.children = -1;
        match record.validate() {
            Err(PredictionError::Validation { field, .. }) => assert_eq!(field, "children"),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_non_positive_bmi_rejected() {
        let mut record = valid_record();
        record.bmi = 0.0;
        match record.validate() {
            Err(PredictionError::Validation { field, .. }) => assert_eq!(field, "bmi"),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_region_rejected() {
        let mut record = valid_record();
        record.region = "midwest".to_string();
        match record.validate() {
            Err(PredictionError::Validation { field, constraint }) => {
                assert_eq!(field, "region");
                assert!(constraint.contains("northeast"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_record_serialization() {
        let record = valid_record();

        let json = serde_json::to_string(&record).unwrap();
        let deserialized: InsuranceRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(record.age, deserialized.age);
        assert_eq!(record.sex, deserialized.sex);
        assert_eq!(record.region, deserialized.region);
    }

    #[test]
    fn test_missing_field_rejected_by_serde() {
        let json = r#"{"age": 19, "sex": "female", "bmi": 27.9}"#;
        assert!(serde_json::from_str::<InsuranceRecord>(json).is_err());
    }
}
