//! Inference pipeline
//!
//! Composes the preprocessing stages with one classifier and interprets its
//! output:
//! 1. Encode categorical attributes (fail fast on unknown categories)
//! 2. Merge with numeric attributes
//! 3. Align to the feature schema
//! 4. Scale
//! 5. Classify
//! 6. Map the raw label to a credit category and advisory message
//!
//! Swapping the classifier only changes step 5.

use crate::labels::LabelMap;
use crate::preprocess::FeaturePreprocessor;
use creditscore_classifiers::Classifier;
use creditscore_core::{AttributeRecord, Error, PredictionOutcome, Result};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// One classifier bound to a preprocessing configuration
#[derive(Clone)]
pub struct InferencePipeline {
    preprocessor: Arc<FeaturePreprocessor>,
    classifier: Arc<dyn Classifier>,
    labels: LabelMap,
}

impl InferencePipeline {
    /// Create a pipeline using the default label mapping
    pub fn new(
        preprocessor: Arc<FeaturePreprocessor>,
        classifier: Arc<dyn Classifier>,
    ) -> Result<Self> {
        Self::with_labels(preprocessor, classifier, LabelMap::default())
    }

    /// Create a pipeline with an explicit label mapping
    ///
    /// Fails if the classifier was trained on a different feature width.
    pub fn with_labels(
        preprocessor: Arc<FeaturePreprocessor>,
        classifier: Arc<dyn Classifier>,
        labels: LabelMap,
    ) -> Result<Self> {
        if classifier.n_features() != preprocessor.n_features() {
            return Err(Error::schema_mismatch(format!(
                "classifier '{}' expects {} features but the feature schema has {}",
                classifier.name(),
                classifier.n_features(),
                preprocessor.n_features()
            )));
        }

        Ok(Self {
            preprocessor,
            classifier,
            labels,
        })
    }

    /// Score one applicant
    pub fn predict(&self, record: &AttributeRecord) -> Result<PredictionOutcome> {
        let start = Instant::now();

        let features = match self.preprocessor.transform(record) {
            Ok(features) => features,
            Err(e) => {
                if e.is_request_error() {
                    warn!("Rejected applicant record: {}", e);
                }
                return Err(e);
            }
        };
        debug!("Scaled feature vector: {:?}", features);

        let result = self.classifier.predict(&features)?;
        debug!(
            "Classifier '{}' returned label {} (scores {:?})",
            self.classifier.name(),
            result.label,
            result.scores
        );

        let category = self.labels.resolve(result.label).map_err(|e| {
            warn!(
                "Classifier '{}' produced label {} outside the known mapping",
                self.classifier.name(),
                result.label
            );
            e
        })?;

        info!(
            model = self.classifier.name(),
            label = result.label,
            category = category.as_str(),
            latency_us = start.elapsed().as_micros() as u64,
            "Prediction complete"
        );

        Ok(PredictionOutcome::new(result.label, category, self.classifier.name()))
    }

    /// The classifier used for step 5
    pub fn classifier(&self) -> &Arc<dyn Classifier> {
        &self.classifier
    }

    /// Shared preprocessing stages
    pub fn preprocessor(&self) -> &Arc<FeaturePreprocessor> {
        &self.preprocessor
    }

    /// Label mapping
    pub fn labels(&self) -> &LabelMap {
        &self.labels
    }

    /// Same preprocessing and labels with a different classifier
    pub fn with_classifier(&self, classifier: Arc<dyn Classifier>) -> Result<Self> {
        Self::with_labels(Arc::clone(&self.preprocessor), classifier, self.labels.clone())
    }
}

impl std::fmt::Debug for InferencePipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InferencePipeline")
            .field("classifier", &self.classifier.name())
            .field("n_features", &self.preprocessor.n_features())
            .field("labels", &self.labels)
            .finish()
    }
}
