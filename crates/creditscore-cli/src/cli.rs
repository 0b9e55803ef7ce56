use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "creditscore")]
#[command(author, version, about = "Score credit applicants with trained classifiers")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score one applicant
    Predict {
        /// Artifact manifest path
        #[arg(short, long, env = "CREDITSCORE_MANIFEST")]
        manifest: PathBuf,

        /// Applicant profile (JSON or YAML)
        #[arg(short, long)]
        input: PathBuf,

        /// Model to use instead of the registry default
        #[arg(long)]
        model: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// List the models in a manifest's registry
    Models {
        /// Artifact manifest path
        #[arg(short, long, env = "CREDITSCORE_MANIFEST")]
        manifest: PathBuf,
    },

    /// Load and check every artifact in a manifest
    Validate {
        /// Artifact manifest path
        #[arg(short, long, env = "CREDITSCORE_MANIFEST")]
        manifest: PathBuf,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_predict() {
        let cli = Cli::try_parse_from([
            "creditscore",
            "predict",
            "--manifest",
            "artifacts/manifest.yaml",
            "--input",
            "applicant.json",
            "--model",
            "random_forest",
            "--format",
            "json",
            "-v",
        ])
        .unwrap();

        assert!(cli.verbose);
        match cli.command {
            Commands::Predict { model, format, .. } => {
                assert_eq!(model.as_deref(), Some("random_forest"));
                assert_eq!(format, OutputFormat::Json);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_predict_requires_input() {
        let result = Cli::try_parse_from(["creditscore", "predict", "--manifest", "m.yaml"]);
        assert!(result.is_err());
    }
}
