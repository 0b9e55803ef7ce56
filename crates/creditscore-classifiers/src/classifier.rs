//! Classifier trait and common types

use creditscore_core::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Trait for all trained classifiers
///
/// Implementations consume a fully aligned and scaled feature vector and
/// return one class label. They never see raw applicant attributes.
pub trait Classifier: Send + Sync {
    /// Predict the class for a single feature vector
    fn predict(&self, features: &[f64]) -> Result<ClassificationResult>;

    /// Get the classifier name
    fn name(&self) -> &str;

    /// Get the model family
    fn family(&self) -> ModelFamily;

    /// Number of features the model was trained on
    fn n_features(&self) -> usize;

    /// Class labels the model can emit, in model order
    fn classes(&self) -> &[i64];
}

/// Result of classification
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationResult {
    /// Predicted class label
    pub label: i64,

    /// Per-class scores in `classes()` order (probabilities where the family has them)
    pub scores: Vec<f64>,

    /// Latency in microseconds
    pub latency_us: u64,
}

impl ClassificationResult {
    /// Create a new classification result
    pub fn new(label: i64, scores: Vec<f64>) -> Self {
        Self {
            label,
            scores,
            latency_us: 0,
        }
    }

    /// Score of the winning class
    pub fn top_score(&self) -> Option<f64> {
        self.scores.iter().copied().fold(None, |best, s| match best {
            Some(b) if b >= s => Some(b),
            _ => Some(s),
        })
    }
}

/// Model family behind a classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModelFamily {
    LogisticRegression,
    DecisionTree,
    RandomForest,
}

impl ModelFamily {
    /// Human-readable family name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::LogisticRegression => "Logistic Regression",
            Self::DecisionTree => "Decision Tree",
            Self::RandomForest => "Random Forest",
        }
    }
}

impl fmt::Display for ModelFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Index of the largest value; ties resolve to the lowest index
pub(crate) fn argmax(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

/// Reject feature vectors whose length differs from the trained width
pub(crate) fn check_width(name: &str, expected: usize, features: &[f64]) -> Result<()> {
    if features.len() != expected {
        return Err(creditscore_core::Error::schema_mismatch(format!(
            "classifier '{}' expects {} features, got {}",
            name,
            expected,
            features.len()
        )));
    }
    Ok(())
}
