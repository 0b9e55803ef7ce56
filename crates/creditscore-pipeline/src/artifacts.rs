//! Artifact manifest and the immutable bundle loaded from it
//!
//! A manifest names every training-time artifact the pipeline needs:
//!
//! ```yaml
//! version: "2024.06"
//! encoders: encoders.json          # attribute -> ordered categories
//! feature_schema: model_columns.json
//! scaler: standard_scaler.json     # { mean: [...], scale: [...] }
//! label_map: { 0: Poor, 1: Good, 2: Standard }   # optional
//! models: models.yaml              # model registry
//! ```
//!
//! Each entry is either a path (JSON or YAML, relative to the manifest) or
//! the artifact itself inline. Everything is validated when the bundle is
//! loaded so a broken deployment never serves a request.

use crate::encoder::EncoderRegistry;
use crate::labels::LabelMap;
use crate::pipeline::InferencePipeline;
use crate::preprocess::FeaturePreprocessor;
use crate::scaler::{ScalingParameters, StandardScaler};
use crate::schema::FeatureSchema;
use creditscore_classifiers::{ModelRegistry, ModelRegistryConfig};
use creditscore_core::{CreditCategory, Error, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// An artifact given by path or inline
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Artifact<T> {
    Path(PathBuf),
    Inline(T),
}

impl<T: DeserializeOwned + Clone> Artifact<T> {
    /// Load the artifact, resolving relative paths against `base_dir`
    pub fn resolve(&self, base_dir: &Path) -> Result<T> {
        match self {
            Self::Path(path) => creditscore_core::read_document(resolve_path(base_dir, path)),
            Self::Inline(value) => Ok(value.clone()),
        }
    }
}

fn resolve_path(base_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

/// Manifest describing one deployment's artifacts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactManifest {
    #[serde(default = "default_version")]
    pub version: String,

    /// Attribute name to ordered category list
    pub encoders: Artifact<BTreeMap<String, Vec<String>>>,

    /// Ordered training columns
    pub feature_schema: Artifact<Vec<String>>,

    /// Fitted scaling parameters
    pub scaler: Artifact<ScalingParameters>,

    /// Raw label to category override
    #[serde(default)]
    pub label_map: Option<Artifact<BTreeMap<i64, CreditCategory>>>,

    /// Model registry
    pub models: Artifact<ModelRegistryConfig>,
}

fn default_version() -> String {
    "1.0".to_string()
}

impl ArtifactManifest {
    /// Load from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        creditscore_core::read_document(path)
    }
}

/// Validated, read-only configuration shared by every prediction
#[derive(Debug, Clone)]
pub struct ArtifactBundle {
    version: String,
    preprocessor: Arc<FeaturePreprocessor>,
    labels: LabelMap,
    models: ModelRegistry,
}

impl ArtifactBundle {
    /// Assemble a bundle from already loaded parts
    ///
    /// Every model must accept the schema's width and emit only mapped labels.
    pub fn new(
        version: impl Into<String>,
        preprocessor: FeaturePreprocessor,
        labels: LabelMap,
        models: ModelRegistry,
    ) -> Result<Self> {
        for model in models.models() {
            let classifier = &model.classifier;
            if classifier.n_features() != preprocessor.n_features() {
                return Err(Error::schema_mismatch(format!(
                    "model '{}' expects {} features but the feature schema has {}",
                    model.name,
                    classifier.n_features(),
                    preprocessor.n_features()
                )));
            }
            if let Some(label) = classifier.classes().iter().find(|l| !labels.contains(**l)) {
                return Err(Error::config(format!(
                    "model '{}' can emit label {} which has no credit category",
                    model.name, label
                )));
            }
        }

        Ok(Self {
            version: version.into(),
            preprocessor: Arc::new(preprocessor),
            labels,
            models,
        })
    }

    /// Load every artifact named by a manifest
    pub fn from_manifest(manifest: &ArtifactManifest, base_dir: &Path) -> Result<Self> {
        info!("Loading artifact bundle version {}", manifest.version);

        let encoders = EncoderRegistry::from_vocabularies(manifest.encoders.resolve(base_dir)?)?;
        info!("Loaded {} categorical encoders", encoders.len());

        let schema = FeatureSchema::new(manifest.feature_schema.resolve(base_dir)?)?;
        info!("Loaded feature schema with {} columns", schema.len());

        let scaler = StandardScaler::new(manifest.scaler.resolve(base_dir)?)?;

        let labels = match &manifest.label_map {
            Some(artifact) => LabelMap::new(artifact.resolve(base_dir)?)?,
            None => LabelMap::default(),
        };

        let models = match &manifest.models {
            Artifact::Path(path) => ModelRegistry::from_file(resolve_path(base_dir, path))?,
            Artifact::Inline(config) => ModelRegistry::from_config(config, base_dir)?,
        };

        let preprocessor = FeaturePreprocessor::new(encoders, schema, scaler)?;
        let bundle = Self::new(manifest.version.clone(), preprocessor, labels, models)?;

        info!(
            "Artifact bundle ready: {} models, default '{}'",
            bundle.models.count(),
            bundle.models.default_model()
        );
        Ok(bundle)
    }

    /// Load a manifest file and its artifacts
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let manifest = ArtifactManifest::from_file(path)?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        Self::from_manifest(&manifest, base_dir)
    }

    /// Build a pipeline for the named model, or the default model
    pub fn pipeline(&self, model: Option<&str>) -> Result<InferencePipeline> {
        let classifier = match model {
            Some(name) => self.models.get(name)?,
            None => self.models.default_classifier()?,
        };
        InferencePipeline::with_labels(
            Arc::clone(&self.preprocessor),
            classifier,
            self.labels.clone(),
        )
    }

    /// Manifest version
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Shared preprocessing stages
    pub fn preprocessor(&self) -> &Arc<FeaturePreprocessor> {
        &self.preprocessor
    }

    /// Label mapping
    pub fn labels(&self) -> &LabelMap {
        &self.labels
    }

    /// Loaded models
    pub fn models(&self) -> &ModelRegistry {
        &self.models
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"
version: "test"
encoders:
  Credit_Mix: [Bad, Good, Standard]
feature_schema: [Age, Credit_Mix]
scaler:
  mean: [30.0, 1.0]
  scale: [10.0, 1.0]
models:
  default_model: lr
  models:
    lr:
      source:
        type: inline
        parameters:
          family: logistic-regression
          classes: [0, 1, 2]
          coefficients: [[-1.0, 0.0], [0.0, 1.0], [1.0, 0.0]]
          intercepts: [0.0, 0.0, 0.0]
"#;

    #[test]
    fn test_inline_manifest_loads() {
        let manifest = ArtifactManifest::from_yaml(MANIFEST).unwrap();
        let bundle = ArtifactBundle::from_manifest(&manifest, Path::new(".")).unwrap();

        assert_eq!(bundle.version(), "test");
        assert_eq!(bundle.preprocessor().n_features(), 2);
        assert_eq!(bundle.models().default_model(), "lr");
        assert_eq!(bundle.labels(), &LabelMap::default());
        assert!(bundle.pipeline(None).is_ok());
        assert!(bundle.pipeline(Some("svm")).is_err());
    }

    #[test]
    fn test_model_width_must_match_schema() {
        let yaml = MANIFEST.replace("feature_schema: [Age, Credit_Mix]", "feature_schema: [Age]");
        let yaml = yaml.replace(
            "mean: [30.0, 1.0]\n  scale: [10.0, 1.0]",
            "mean: [30.0]\n  scale: [10.0]",
        );
        let manifest = ArtifactManifest::from_yaml(&yaml).unwrap();
        let err = ArtifactBundle::from_manifest(&manifest, Path::new(".")).unwrap_err();
        assert!(matches!(err, Error::SchemaMismatch(_)));
    }

    #[test]
    fn test_unmapped_model_labels_are_rejected_at_load() {
        let yaml = MANIFEST.replace("classes: [0, 1, 2]", "classes: [0, 1, 7]");
        let manifest = ArtifactManifest::from_yaml(&yaml).unwrap();
        let err = ArtifactBundle::from_manifest(&manifest, Path::new(".")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_label_map_override() {
        let yaml = format!("{}label_map:\n  0: Good\n  1: Poor\n  2: Standard\n", MANIFEST);
        let manifest = ArtifactManifest::from_yaml(&yaml).unwrap();
        let bundle = ArtifactBundle::from_manifest(&manifest, Path::new(".")).unwrap();
        assert_eq!(bundle.labels().resolve(0).unwrap(), CreditCategory::Good);
    }

    #[test]
    fn test_path_artifacts_resolve_relative_to_base_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("model_columns.json"), r#"["Age", "Credit_Mix"]"#).unwrap();

        let yaml = MANIFEST.replace(
            "feature_schema: [Age, Credit_Mix]",
            "feature_schema: model_columns.json",
        );
        let manifest = ArtifactManifest::from_yaml(&yaml).unwrap();
        assert!(matches!(manifest.feature_schema, Artifact::Path(_)));

        let bundle = ArtifactBundle::from_manifest(&manifest, dir.path()).unwrap();
        assert_eq!(bundle.preprocessor().schema().columns(), &["Age", "Credit_Mix"]);
    }
}
