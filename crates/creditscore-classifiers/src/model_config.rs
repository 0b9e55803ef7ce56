//! Model configuration and registry structures

use crate::classifier::{Classifier, ModelFamily};
use crate::forest::{RandomForest, RandomForestParams};
use crate::linear::{LogisticRegression, LogisticRegressionParams};
use crate::tree::{DecisionTree, DecisionTreeParams};
use creditscore_core::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Registry file listing every selectable model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelRegistryConfig {
    #[serde(default = "default_version")]
    pub version: String,

    /// Model used when the caller does not pick one
    #[serde(default)]
    pub default_model: Option<String>,

    pub models: BTreeMap<String, ModelConfig>,
}

fn default_version() -> String {
    "1.0".to_string()
}

/// Configuration for a single model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Name shown to users when choosing a model
    #[serde(default)]
    pub display_name: Option<String>,

    /// Model description
    #[serde(default)]
    pub description: String,

    /// Where the trained parameters come from
    pub source: ModelSource,
}

/// Model source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ModelSource {
    /// Parameters exported to a JSON or YAML file
    Local { path: PathBuf },

    /// Parameters embedded in the registry document
    Inline { parameters: ModelParameters },
}

/// Trained parameters for one of the supported families
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "kebab-case")]
pub enum ModelParameters {
    LogisticRegression(LogisticRegressionParams),
    DecisionTree(DecisionTreeParams),
    RandomForest(RandomForestParams),
}

impl ModelParameters {
    /// Family of these parameters
    pub fn family(&self) -> ModelFamily {
        match self {
            Self::LogisticRegression(_) => ModelFamily::LogisticRegression,
            Self::DecisionTree(_) => ModelFamily::DecisionTree,
            Self::RandomForest(_) => ModelFamily::RandomForest,
        }
    }

    /// Build a classifier from the parameters
    pub fn build(self, name: &str) -> Result<Arc<dyn Classifier>> {
        let classifier: Arc<dyn Classifier> = match self {
            Self::LogisticRegression(params) => Arc::new(LogisticRegression::new(name, params)?),
            Self::DecisionTree(params) => Arc::new(DecisionTree::new(name, params)?),
            Self::RandomForest(params) => Arc::new(RandomForest::new(name, params)?),
        };
        Ok(classifier)
    }
}

impl ModelSource {
    /// Resolve the source into trained parameters
    ///
    /// Relative paths are resolved against `base_dir`.
    pub fn load(&self, base_dir: &Path) -> Result<ModelParameters> {
        match self {
            Self::Local { path } => {
                let resolved = if path.is_absolute() {
                    path.clone()
                } else {
                    base_dir.join(path)
                };
                tracing::debug!("Reading model parameters from {}", resolved.display());
                creditscore_core::read_document(&resolved)
            }
            Self::Inline { parameters } => Ok(parameters.clone()),
        }
    }
}

impl ModelRegistryConfig {
    /// Load from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        creditscore_core::read_document(path)
    }

    /// Get a model configuration by name
    pub fn get_model(&self, name: &str) -> Option<&ModelConfig> {
        self.models.get(name)
    }

    /// Names of all configured models
    pub fn model_names(&self) -> Vec<String> {
        self.models.keys().cloned().collect()
    }
}
