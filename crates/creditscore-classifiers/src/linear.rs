//! Logistic regression classifier

use crate::classifier::{argmax, check_width, ClassificationResult, Classifier, ModelFamily};
use crate::tree::first_duplicate;
use creditscore_core::Result;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Trained logistic regression parameters
///
/// Multinomial models carry one coefficient row and intercept per class.
/// Binary models may carry a single row scoring the second class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegressionParams {
    pub classes: Vec<i64>,
    pub coefficients: Vec<Vec<f64>>,
    pub intercepts: Vec<f64>,
}

/// Linear classifier with a softmax (or sigmoid) link
pub struct LogisticRegression {
    name: String,
    params: LogisticRegressionParams,
    n_features: usize,
}

impl LogisticRegression {
    /// Create a classifier from trained parameters
    pub fn new(name: impl Into<String>, params: LogisticRegressionParams) -> Result<Self> {
        let name = name.into();
        let n_classes = params.classes.len();

        if n_classes < 2 {
            return Err(creditscore_core::Error::config(format!(
                "logistic regression '{}' needs at least two classes, found {}",
                name, n_classes
            )));
        }

        if let Some(label) = first_duplicate(&params.classes) {
            return Err(creditscore_core::Error::config(format!(
                "logistic regression '{}' lists class {} more than once",
                name, label
            )));
        }

        let rows = params.coefficients.len();
        let binary_row = n_classes == 2 && rows == 1;
        if rows != n_classes && !binary_row {
            return Err(creditscore_core::Error::config(format!(
                "logistic regression '{}' has {} coefficient rows for {} classes",
                name, rows, n_classes
            )));
        }

        if params.intercepts.len() != rows {
            return Err(creditscore_core::Error::config(format!(
                "logistic regression '{}' has {} intercepts for {} coefficient rows",
                name,
                params.intercepts.len(),
                rows
            )));
        }

        let n_features = params.coefficients[0].len();
        if n_features == 0 || params.coefficients.iter().any(|row| row.len() != n_features) {
            return Err(creditscore_core::Error::config(format!(
                "logistic regression '{}' has ragged or empty coefficient rows",
                name
            )));
        }

        let all_finite = params
            .coefficients
            .iter()
            .flatten()
            .chain(params.intercepts.iter())
            .all(|v| v.is_finite());
        if !all_finite {
            return Err(creditscore_core::Error::config(format!(
                "logistic regression '{}' has non-finite parameters",
                name
            )));
        }

        Ok(Self {
            name,
            params,
            n_features,
        })
    }

    fn decision_function(&self, features: &[f64]) -> Vec<f64> {
        self.params
            .coefficients
            .iter()
            .zip(&self.params.intercepts)
            .map(|(row, intercept)| {
                intercept + row.iter().zip(features).map(|(w, x)| w * x).sum::<f64>()
            })
            .collect()
    }
}

impl Classifier for LogisticRegression {
    fn predict(&self, features: &[f64]) -> Result<ClassificationResult> {
        let start = Instant::now();
        check_width(&self.name, self.n_features, features)?;

        let decision = self.decision_function(features);

        let (index, scores) = if decision.len() == 1 {
            let p = sigmoid(decision[0]);
            (usize::from(decision[0] > 0.0), vec![1.0 - p, p])
        } else {
            let index = argmax(&decision).ok_or_else(|| {
                creditscore_core::Error::classifier(format!(
                    "model '{}' produced no scores",
                    self.name
                ))
            })?;
            (index, softmax(&decision))
        };

        Ok(ClassificationResult {
            label: self.params.classes[index],
            scores,
            latency_us: start.elapsed().as_micros() as u64,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn family(&self) -> ModelFamily {
        ModelFamily::LogisticRegression
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn classes(&self) -> &[i64] {
        &self.params.classes
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

fn softmax(values: &[f64]) -> Vec<f64> {
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = values.iter().map(|v| (v - max).exp()).collect();
    let total: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / total).collect()
}
