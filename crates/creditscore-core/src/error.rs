//! Error types for creditscore

/// Result type alias using creditscore's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for creditscore operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A categorical value outside the trained vocabulary
    #[error("The {value} is not known in '{attribute}'")]
    UnknownCategory { attribute: String, value: String },

    /// A category string for an attribute that has no trained encoder
    #[error("no encoder registered for attribute '{attribute}'")]
    UnknownAttribute { attribute: String },

    /// Vector length or column layout inconsistent with the trained schema
    #[error("schema mismatch: {0}")]
    SchemaMismatch(String),

    /// Classifier produced a label outside the known enumeration
    #[error("classifier produced unrecognized label {label}")]
    UnrecognizedLabel { label: i64 },

    /// Malformed request values (type mismatch, non-finite numbers)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Classifier execution errors
    #[error("classifier error: {0}")]
    Classifier(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML serialization errors
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    /// Create a new unknown-category error
    pub fn unknown_category(attribute: impl Into<String>, value: impl Into<String>) -> Self {
        Self::UnknownCategory {
            attribute: attribute.into(),
            value: value.into(),
        }
    }

    /// Create a new unknown-attribute error
    pub fn unknown_attribute(attribute: impl Into<String>) -> Self {
        Self::UnknownAttribute {
            attribute: attribute.into(),
        }
    }

    /// Create a new schema mismatch error
    pub fn schema_mismatch(msg: impl Into<String>) -> Self {
        Self::SchemaMismatch(msg.into())
    }

    /// Create a new invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a new classifier error
    pub fn classifier(msg: impl Into<String>) -> Self {
        Self::Classifier(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether this error was caused by the request rather than the deployment.
    ///
    /// Request errors are local to one prediction; everything else points at
    /// broken artifacts and should stop the process from serving.
    pub fn is_request_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownCategory { .. } | Self::UnknownAttribute { .. } | Self::InvalidInput(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_category_message_names_attribute_and_value() {
        let err = Error::unknown_category("Credit_Mix", "Excellent");
        assert_eq!(err.to_string(), "The Excellent is not known in 'Credit_Mix'");
    }

    #[test]
    fn test_request_error_classification() {
        assert!(Error::unknown_category("Occupation", "Pilot").is_request_error());
        assert!(Error::invalid_input("NaN").is_request_error());
        assert!(!Error::schema_mismatch("3 != 4").is_request_error());
        assert!(!Error::UnrecognizedLabel { label: 7 }.is_request_error());
    }
}
