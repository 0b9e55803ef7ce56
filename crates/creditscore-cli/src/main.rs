//! creditscore
//!
//! Scores credit applicants against a trained artifact bundle: categorical
//! encoding, schema alignment, scaling, and one of the registered
//! classifiers, followed by the category and lending advice.

use anyhow::{Context, Result};
use clap::Parser;
use creditscore_core::{ApplicantProfile, PredictionOutcome};
use creditscore_pipeline::ArtifactBundle;
use std::path::Path;
use tracing::info;

mod cli;

use cli::{Cli, Commands, OutputFormat};

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    match cli.command {
        Commands::Predict {
            manifest,
            input,
            model,
            format,
        } => {
            let bundle = load_bundle(&manifest)?;
            let pipeline = bundle.pipeline(model.as_deref())?;

            let profile: ApplicantProfile = creditscore_core::read_document(&input)
                .with_context(|| format!("Failed to read applicant from {}", input.display()))?;
            let outcome = pipeline.predict(&profile.to_record())?;

            println!("{}", render_outcome(&outcome, format)?);
        }

        Commands::Models { manifest } => {
            let bundle = load_bundle(&manifest)?;
            let registry = bundle.models();

            println!("Models in {} (registry {}):", manifest.display(), registry.version());
            for model in registry.models() {
                let marker = if model.name == registry.default_model() { "*" } else { " " };
                println!(
                    "{} {:<24} {:<20} {} features",
                    marker,
                    model.name,
                    model.display_name,
                    model.classifier.n_features()
                );
                if !model.description.is_empty() {
                    println!("    {}", model.description);
                }
            }
        }

        Commands::Validate { manifest } => {
            let bundle = load_bundle(&manifest)?;
            let preprocessor = bundle.preprocessor();

            for name in bundle.models().model_names() {
                bundle
                    .pipeline(Some(&name))
                    .with_context(|| format!("Model '{}' cannot be used", name))?;
            }

            println!("Manifest {} is valid", manifest.display());
            println!("  Version:   {}", bundle.version());
            println!("  Encoders:  {}", preprocessor.encoders().len());
            println!("  Columns:   {}", preprocessor.n_features());
            println!(
                "  Models:    {} (default '{}')",
                bundle.models().count(),
                bundle.models().default_model()
            );
        }
    }

    Ok(())
}

fn load_bundle(manifest: &Path) -> Result<ArtifactBundle> {
    let bundle = ArtifactBundle::load(manifest)
        .with_context(|| format!("Failed to load artifacts from {}", manifest.display()))?;
    info!("Artifacts loaded from {}", manifest.display());
    Ok(bundle)
}

fn render_outcome(outcome: &PredictionOutcome, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(outcome)?),
        OutputFormat::Text => Ok(format!(
            "Credit category: {} (label {}, model {})\n{}",
            outcome.category, outcome.raw_label, outcome.model, outcome.advisory_message
        )),
    }
}

const VERBOSE_FILTER: &str = concat!(
    "creditscore=debug,creditscore_core=debug,",
    "creditscore_classifiers=debug,creditscore_pipeline=debug"
);

/// Initialize tracing/logging
///
/// Logs go to stderr so JSON output on stdout stays machine-readable.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
