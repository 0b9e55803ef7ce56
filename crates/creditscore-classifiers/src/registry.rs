//! Classifier registry initialization and management

use crate::classifier::{Classifier, ModelFamily};
use crate::model_config::ModelRegistryConfig;
use creditscore_core::Result;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// A loaded, selectable model
#[derive(Clone)]
pub struct RegisteredModel {
    /// Registry key
    pub name: String,

    /// Name shown to users
    pub display_name: String,

    /// Model description
    pub description: String,

    /// The classifier itself
    pub classifier: Arc<dyn Classifier>,
}

impl RegisteredModel {
    /// Family of the underlying classifier
    pub fn family(&self) -> ModelFamily {
        self.classifier.family()
    }
}

impl std::fmt::Debug for RegisteredModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisteredModel")
            .field("name", &self.name)
            .field("display_name", &self.display_name)
            .field("family", &self.family())
            .field("n_features", &self.classifier.n_features())
            .finish()
    }
}

/// Registry of trained classifiers, loaded once and read-only afterwards
#[derive(Debug, Clone)]
pub struct ModelRegistry {
    version: String,
    default_model: String,
    models: BTreeMap<String, RegisteredModel>,
}

impl ModelRegistry {
    /// Load every model named in the configuration
    ///
    /// Any model that fails to load fails the whole registry.
    pub fn from_config(config: &ModelRegistryConfig, base_dir: &Path) -> Result<Self> {
        info!("Initializing model registry with {} models", config.models.len());

        let mut builder = ModelRegistryBuilder::new().with_version(config.version.clone());

        for (name, model_config) in &config.models {
            let params = model_config.source.load(base_dir).map_err(|e| {
                creditscore_core::Error::config(format!("failed to load model '{}': {}", name, e))
            })?;
            let family = params.family();
            let classifier = params.build(name)?;

            info!(
                "Loaded model: {} ({}, {} features)",
                name,
                family,
                classifier.n_features()
            );

            let display_name = model_config
                .display_name
                .clone()
                .unwrap_or_else(|| family.display_name().to_string());

            builder = builder.with_model(RegisteredModel {
                name: name.clone(),
                display_name,
                description: model_config.description.clone(),
                classifier,
            });
        }

        if let Some(default) = &config.default_model {
            builder = builder.with_default(default.clone());
        }

        builder.build()
    }

    /// Load a registry file; relative model paths resolve against its directory
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config = ModelRegistryConfig::from_file(path)?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        Self::from_config(&config, base_dir)
    }

    /// Look up a classifier by name
    pub fn get(&self, name: &str) -> Result<Arc<dyn Classifier>> {
        self.models
            .get(name)
            .map(|m| Arc::clone(&m.classifier))
            .ok_or_else(|| {
                creditscore_core::Error::config(format!(
                    "model '{}' not found (available: {})",
                    name,
                    self.model_names().join(", ")
                ))
            })
    }

    /// The default classifier
    pub fn default_classifier(&self) -> Result<Arc<dyn Classifier>> {
        self.get(&self.default_model)
    }

    /// Name of the default model
    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    /// Registry version string
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Registered model entries in name order
    pub fn models(&self) -> impl Iterator<Item = &RegisteredModel> {
        self.models.values()
    }

    /// Names of all registered models
    pub fn model_names(&self) -> Vec<String> {
        self.models.keys().cloned().collect()
    }

    /// Get the number of loaded models
    pub fn count(&self) -> usize {
        self.models.len()
    }
}

/// Builder for assembling a registry from already-constructed classifiers
pub struct ModelRegistryBuilder {
    version: String,
    default_model: Option<String>,
    models: BTreeMap<String, RegisteredModel>,
}

impl ModelRegistryBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            version: "1.0".to_string(),
            default_model: None,
            models: BTreeMap::new(),
        }
    }

    /// Set the registry version
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Register a model entry
    pub fn with_model(mut self, model: RegisteredModel) -> Self {
        self.models.insert(model.name.clone(), model);
        self
    }

    /// Register a classifier under its own name
    pub fn with_classifier(self, classifier: Arc<dyn Classifier>) -> Self {
        let name = classifier.name().to_string();
        let display_name = classifier.family().display_name().to_string();
        self.with_model(RegisteredModel {
            name,
            display_name,
            description: String::new(),
            classifier,
        })
    }

    /// Set the default model
    pub fn with_default(mut self, name: impl Into<String>) -> Self {
        self.default_model = Some(name.into());
        self
    }

    /// Build the registry
    ///
    /// A registry with a single model defaults to it; otherwise a default
    /// must be named explicitly.
    pub fn build(self) -> Result<ModelRegistry> {
        if self.models.is_empty() {
            return Err(creditscore_core::Error::config("model registry contains no models"));
        }

        let default_model = match self.default_model {
            Some(name) => name,
            None if self.models.len() == 1 => {
                self.models.keys().next().cloned().unwrap_or_default()
            }
            None => {
                return Err(creditscore_core::Error::config(
                    "default_model must be set when more than one model is registered",
                ))
            }
        };

        if !self.models.contains_key(&default_model) {
            return Err(creditscore_core::Error::config(format!(
                "default model '{}' is not registered",
                default_model
            )));
        }

        Ok(ModelRegistry {
            version: self.version,
            default_model,
            models: self.models,
        })
    }
}

impl Default for ModelRegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}
