//! Raw attribute record to classifier-ready feature vector

use crate::encoder::EncoderRegistry;
use crate::scaler::StandardScaler;
use crate::schema::FeatureSchema;
use creditscore_core::{AttributeRecord, AttributeValue, Error, Result};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Encoding, alignment, and scaling bound to one trained schema
///
/// Immutable once built; share it behind an `Arc` between pipelines that
/// use different classifiers.
#[derive(Debug, Clone)]
pub struct FeaturePreprocessor {
    encoders: EncoderRegistry,
    schema: FeatureSchema,
    scaler: StandardScaler,
}

impl FeaturePreprocessor {
    /// Bind the stages together, checking they agree on the column count
    pub fn new(
        encoders: EncoderRegistry,
        schema: FeatureSchema,
        scaler: StandardScaler,
    ) -> Result<Self> {
        if scaler.len() != schema.len() {
            return Err(Error::schema_mismatch(format!(
                "scaler has {} columns but the feature schema has {}",
                scaler.len(),
                schema.len()
            )));
        }

        for attribute in encoders.attributes().filter(|a| !schema.contains(a)) {
            warn!(
                "Encoder for '{}' has no matching schema column; its values will be dropped",
                attribute
            );
        }

        Ok(Self {
            encoders,
            schema,
            scaler,
        })
    }

    /// Replace category strings with their codes and validate numbers
    ///
    /// Categorical attributes are encoded first, stopping at the first
    /// unknown category. Numeric attributes are then checked.
    pub fn encode(&self, record: &AttributeRecord) -> Result<BTreeMap<String, f64>> {
        let mut encoded = BTreeMap::new();

        for (name, value) in record.iter().filter(|(name, _)| self.encoders.is_categorical(name)) {
            let category = value.as_category().ok_or_else(|| {
                Error::invalid_input(format!(
                    "attribute '{}' expects a category, got {}",
                    name, value
                ))
            })?;
            let code = self.encoders.encode(name, category)?;
            debug!("Encoded {}={} as {}", name, category, code);
            encoded.insert(name.to_string(), code as f64);
        }

        for (name, value) in record.iter().filter(|(name, _)| !self.encoders.is_categorical(name)) {
            match value {
                AttributeValue::Number(n) if n.is_finite() => {
                    encoded.insert(name.to_string(), *n);
                }
                AttributeValue::Number(n) => {
                    return Err(Error::invalid_input(format!(
                        "attribute '{}' must be a finite number, got {}",
                        name, n
                    )));
                }
                AttributeValue::Category(_) => return Err(Error::unknown_attribute(name)),
            }
        }

        Ok(encoded)
    }

    /// Run encode → align → scale
    pub fn transform(&self, record: &AttributeRecord) -> Result<Vec<f64>> {
        let encoded = self.encode(record)?;
        let aligned = self.schema.align(&encoded);
        debug!("Aligned {} attributes to {} columns", encoded.len(), aligned.len());
        self.scaler.transform(&aligned)
    }

    /// Categorical encoders
    pub fn encoders(&self) -> &EncoderRegistry {
        &self.encoders
    }

    /// Training-time feature schema
    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    /// Fitted scaler
    pub fn scaler(&self) -> &StandardScaler {
        &self.scaler
    }

    /// Width of the produced feature vectors
    pub fn n_features(&self) -> usize {
        self.schema.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scaler::ScalingParameters;

    fn preprocessor() -> FeaturePreprocessor {
        let encoders = EncoderRegistry::from_vocabularies(BTreeMap::from([(
            "Credit_Mix".to_string(),
            vec!["Bad".to_string(), "Good".to_string(), "Standard".to_string()],
        )]))
        .unwrap();
        let schema = FeatureSchema::new(vec![
            "Age".to_string(),
            "Credit_Mix".to_string(),
            "Occupation_Lawyer".to_string(),
        ])
        .unwrap();
        let scaler = StandardScaler::new(ScalingParameters {
            mean: vec![30.0, 1.0, 0.0],
            scale: vec![10.0, 1.0, 1.0],
        })
        .unwrap();
        FeaturePreprocessor::new(encoders, schema, scaler).unwrap()
    }

    #[test]
    fn test_transform_encodes_aligns_and_scales() {
        let record = AttributeRecord::new()
            .with_number("Age", 50.0)
            .with_category("Credit_Mix", "Standard");

        assert_eq!(preprocessor().transform(&record).unwrap(), vec![2.0, 1.0, 0.0]);
    }

    #[test]
    fn test_number_for_categorical_attribute_is_invalid() {
        let record = AttributeRecord::new().with_number("Credit_Mix", 1.0);
        let err = preprocessor().encode(&record).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_category_for_numeric_attribute_is_unknown_attribute() {
        let record = AttributeRecord::new().with_category("Age", "thirty");
        let err = preprocessor().encode(&record).unwrap_err();
        assert!(matches!(err, Error::UnknownAttribute { .. }));
    }

    #[test]
    fn test_non_finite_numbers_are_rejected() {
        let record = AttributeRecord::new().with_number("Age", f64::NAN);
        assert!(matches!(preprocessor().encode(&record), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_categories_checked_before_numbers() {
        let record = AttributeRecord::new()
            .with_number("Age", f64::INFINITY)
            .with_category("Credit_Mix", "Excellent");
        assert!(matches!(
            preprocessor().encode(&record),
            Err(Error::UnknownCategory { .. })
        ));
    }

    #[test]
    fn test_scaler_width_must_match_schema() {
        let schema = FeatureSchema::new(vec!["Age".to_string()]).unwrap();
        let scaler = StandardScaler::new(ScalingParameters {
            mean: vec![0.0, 0.0],
            scale: vec![1.0, 1.0],
        })
        .unwrap();
        let err = FeaturePreprocessor::new(EncoderRegistry::new(), schema, scaler).unwrap_err();
        assert!(matches!(err, Error::SchemaMismatch(_)));
    }
}
