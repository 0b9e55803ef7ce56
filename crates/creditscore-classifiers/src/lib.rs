//! creditscore Classifiers
//!
//! Trained classifiers consumed by the credit scoring pipeline.
//!
//! Every model family sits behind the single [`Classifier`] trait and takes
//! an already aligned and scaled feature vector:
//! - Logistic regression (binary or multinomial)
//! - Decision tree (array-encoded CART)
//! - Random forest (probability-averaging ensemble of trees)
//!
//! Models are described in a registry document and loaded once at startup.

pub mod classifier;
pub mod forest;
pub mod linear;
pub mod model_config;
pub mod registry;
pub mod tree;

pub use classifier::{ClassificationResult, Classifier, ModelFamily};
pub use forest::{RandomForest, RandomForestParams};
pub use linear::{LogisticRegression, LogisticRegressionParams};
pub use model_config::{ModelConfig, ModelParameters, ModelRegistryConfig, ModelSource};
pub use registry::{ModelRegistry, ModelRegistryBuilder, RegisteredModel};
pub use tree::{DecisionTree, DecisionTreeParams, TreeStructure};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::classifier::{ClassificationResult, Classifier, ModelFamily};
    pub use crate::forest::RandomForest;
    pub use crate::linear::LogisticRegression;
    pub use crate::registry::ModelRegistry;
    pub use crate::tree::DecisionTree;
}
