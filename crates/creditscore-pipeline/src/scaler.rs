//! Standard scaling of aligned feature vectors

use creditscore_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Fitted scaling parameters as exported from training
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalingParameters {
    #[serde(alias = "center", alias = "mean_")]
    pub mean: Vec<f64>,

    #[serde(alias = "std", alias = "scale_")]
    pub scale: Vec<f64>,
}

/// Applies `(x - mean) / scale` per column
#[derive(Debug, Clone, PartialEq)]
pub struct StandardScaler {
    mean: Vec<f64>,
    scale: Vec<f64>,
}

impl StandardScaler {
    /// Create a scaler from fitted parameters
    pub fn new(params: ScalingParameters) -> Result<Self> {
        let ScalingParameters { mean, scale } = params;

        if mean.len() != scale.len() {
            return Err(Error::schema_mismatch(format!(
                "scaler has {} centers but {} scales",
                mean.len(),
                scale.len()
            )));
        }
        if mean.is_empty() {
            return Err(Error::schema_mismatch("scaler has no columns"));
        }
        if let Some(i) = mean.iter().position(|m| !m.is_finite()) {
            return Err(Error::config(format!("scaler center {} is not finite", i)));
        }
        if let Some(i) = scale.iter().position(|s| !s.is_finite() || *s == 0.0) {
            return Err(Error::config(format!(
                "scaler scale {} must be finite and non-zero, got {}",
                i, scale[i]
            )));
        }

        Ok(Self { mean, scale })
    }

    /// Standardize a vector
    pub fn transform(&self, vector: &[f64]) -> Result<Vec<f64>> {
        if vector.len() != self.mean.len() {
            return Err(Error::schema_mismatch(format!(
                "scaler expects {} columns, got {}",
                self.mean.len(),
                vector.len()
            )));
        }

        Ok(vector
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(x, (mean, scale))| (x - mean) / scale)
            .collect())
    }

    /// Per-column centers
    pub fn mean(&self) -> &[f64] {
        &self.mean
    }

    /// Per-column scales
    pub fn scale(&self) -> &[f64] {
        &self.scale
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.mean.len()
    }

    /// Whether the scaler has no columns (never true for a constructed scaler)
    pub fn is_empty(&self) -> bool {
        self.mean.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scaler() -> StandardScaler {
        StandardScaler::new(ScalingParameters {
            mean: vec![35.0, 50_000.0, 1.0],
            scale: vec![10.0, 25_000.0, 0.5],
        })
        .unwrap()
    }

    #[test]
    fn test_centers_map_to_zero() {
        let scaler = scaler();
        let centered = scaler.transform(scaler.mean()).unwrap();
        assert_eq!(centered, vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_transform_values() {
        let scaled = scaler().transform(&[45.0, 0.0, 2.0]).unwrap();
        assert_eq!(scaled, vec![1.0, -2.0, 2.0]);
    }

    #[test]
    fn test_transform_is_affine_not_linear() {
        let scaler = scaler();
        let a = [40.0, 60_000.0, 1.5];
        let b = [20.0, 10_000.0, 0.0];
        let sum: Vec<f64> = a.iter().zip(&b).map(|(x, y)| x + y).collect();

        let lhs = scaler.transform(&sum).unwrap();
        let rhs: Vec<f64> = scaler
            .transform(&a)
            .unwrap()
            .iter()
            .zip(scaler.transform(&b).unwrap())
            .map(|(x, y)| x + y)
            .collect();
        assert_ne!(lhs, rhs);
    }

    #[test]
    fn test_length_mismatch_is_schema_error() {
        let err = scaler().transform(&[1.0, 2.0]).unwrap_err();
        assert!(matches!(err, Error::SchemaMismatch(_)));
    }

    #[test]
    fn test_rejects_invalid_parameters() {
        let zero = ScalingParameters {
            mean: vec![0.0, 0.0],
            scale: vec![1.0, 0.0],
        };
        assert!(StandardScaler::new(zero).is_err());

        let ragged = ScalingParameters {
            mean: vec![0.0],
            scale: vec![1.0, 1.0],
        };
        assert!(matches!(StandardScaler::new(ragged), Err(Error::SchemaMismatch(_))));
    }

    #[test]
    fn test_accepts_exported_field_names() {
        let params: ScalingParameters =
            serde_json::from_str(r#"{"mean_": [1.0], "scale_": [2.0]}"#).unwrap();
        assert_eq!(params.mean, vec![1.0]);
        assert_eq!(params.scale, vec![2.0]);
    }
}
