//! Loading of JSON and YAML artifact documents

use crate::{Error, Result};
use serde::de::DeserializeOwned;
use std::path::Path;

/// Document formats accepted for artifacts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Detect the format from a file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Self::Json),
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Ok(Self::Yaml)
            }
            _ => Err(Error::config(format!(
                "unsupported document format for {} (expected .json, .yaml or .yml)",
                path.display()
            ))),
        }
    }

    /// Parse a document from a string
    pub fn parse<T: DeserializeOwned>(&self, content: &str) -> Result<T> {
        match self {
            Self::Json => Ok(serde_json::from_str(content)?),
            Self::Yaml => Ok(serde_yaml::from_str(content)?),
        }
    }
}

/// Read and parse a JSON or YAML document, choosing the format by extension
pub fn read_document<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let format = DocumentFormat::from_path(path)?;
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::config(format!("failed to read {}: {}", path.display(), e))
    })?;
    format
        .parse(&content)
        .map_err(|e| Error::config(format!("failed to parse {}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_format_detection() {
        assert_eq!(DocumentFormat::from_path(Path::new("a/b.json")).unwrap(), DocumentFormat::Json);
        assert_eq!(DocumentFormat::from_path(Path::new("m.YML")).unwrap(), DocumentFormat::Yaml);
        assert!(DocumentFormat::from_path(Path::new("model.pkl")).is_err());
        assert!(DocumentFormat::from_path(Path::new("noext")).is_err());
    }

    #[test]
    fn test_parse_both_formats() {
        let json: HashMap<String, Vec<String>> =
            DocumentFormat::Json.parse(r#"{"Credit_Mix": ["Bad", "Good"]}"#).unwrap();
        let yaml: HashMap<String, Vec<String>> =
            DocumentFormat::Yaml.parse("Credit_Mix: [Bad, Good]\n").unwrap();
        assert_eq!(json, yaml);
    }

    #[test]
    fn test_read_missing_file_is_config_error() {
        let err = read_document::<Vec<String>>("/nonexistent/model_columns.json").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
