//! creditscore Pipeline
//!
//! Turns one applicant's raw attributes into the exact feature vector a
//! trained classifier expects, runs the classifier, and interprets its label.
//!
//! Stages, in order:
//! - [`encoder`]: categorical strings to training-time integer codes
//! - [`schema`]: alignment to the fixed column layout, absent columns as 0
//! - [`scaler`]: standardization with fitted centers and scales
//! - [`pipeline`]: orchestration and label → category mapping
//!
//! All configuration is loaded once into an [`ArtifactBundle`] and never
//! mutated afterwards, so pipelines can be shared freely between threads.

pub mod artifacts;
pub mod encoder;
pub mod labels;
pub mod pipeline;
pub mod preprocess;
pub mod scaler;
pub mod schema;

pub use artifacts::{Artifact, ArtifactBundle, ArtifactManifest};
pub use encoder::{CategoricalEncoder, EncoderRegistry};
pub use labels::LabelMap;
pub use pipeline::InferencePipeline;
pub use preprocess::FeaturePreprocessor;
pub use scaler::{ScalingParameters, StandardScaler};
pub use schema::FeatureSchema;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::artifacts::ArtifactBundle;
    pub use crate::pipeline::InferencePipeline;
    pub use creditscore_core::{AttributeRecord, CreditCategory, PredictionOutcome};
}
