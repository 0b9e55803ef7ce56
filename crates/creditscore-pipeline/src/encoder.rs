//! Categorical encoders
//!
//! Each categorical attribute has an ordered vocabulary fixed at training
//! time. A category's code is its position in that vocabulary. Lookups are
//! exact and case-sensitive; nothing is trimmed or folded.

use creditscore_core::{Error, Result};
use std::collections::{BTreeMap, HashMap};

/// Encoder for one categorical attribute
#[derive(Debug, Clone, PartialEq)]
pub struct CategoricalEncoder {
    attribute: String,
    categories: Vec<String>,
    codes: HashMap<String, usize>,
}

impl CategoricalEncoder {
    /// Create an encoder from the training-time vocabulary
    pub fn new(attribute: impl Into<String>, categories: Vec<String>) -> Result<Self> {
        let attribute = attribute.into();

        if categories.is_empty() {
            return Err(Error::config(format!(
                "encoder for '{}' has no categories",
                attribute
            )));
        }

        let mut codes = HashMap::with_capacity(categories.len());
        for (code, category) in categories.iter().enumerate() {
            if codes.insert(category.clone(), code).is_some() {
                return Err(Error::config(format!(
                    "encoder for '{}' lists category '{}' more than once",
                    attribute, category
                )));
            }
        }

        Ok(Self {
            attribute,
            categories,
            codes,
        })
    }

    /// Integer code for a known category
    pub fn encode(&self, value: &str) -> Result<usize> {
        self.codes
            .get(value)
            .copied()
            .ok_or_else(|| Error::unknown_category(&self.attribute, value))
    }

    /// Category for a code
    pub fn decode(&self, code: usize) -> Option<&str> {
        self.categories.get(code).map(String::as_str)
    }

    /// Attribute this encoder belongs to
    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    /// Known categories in code order
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Number of known categories
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Whether the vocabulary is empty (never true for a constructed encoder)
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// One encoder per categorical attribute
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EncoderRegistry {
    encoders: BTreeMap<String, CategoricalEncoder>,
}

impl EncoderRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from attribute vocabularies
    pub fn from_vocabularies(vocabularies: BTreeMap<String, Vec<String>>) -> Result<Self> {
        vocabularies
            .into_iter()
            .try_fold(Self::new(), |registry, (attribute, categories)| {
                Ok(registry.with_encoder(CategoricalEncoder::new(attribute, categories)?))
            })
    }

    /// Add an encoder, replacing any existing one for the same attribute
    pub fn with_encoder(mut self, encoder: CategoricalEncoder) -> Self {
        self.encoders.insert(encoder.attribute.clone(), encoder);
        self
    }

    /// Encode a category for an attribute
    pub fn encode(&self, attribute: &str, value: &str) -> Result<usize> {
        self.encoder(attribute)?.encode(value)
    }

    /// Decode a code back to its category
    pub fn decode(&self, attribute: &str, code: usize) -> Result<&str> {
        self.encoder(attribute)?.decode(code).ok_or_else(|| {
            Error::invalid_input(format!("code {} is out of range for '{}'", code, attribute))
        })
    }

    /// Known categories for an attribute
    pub fn categories(&self, attribute: &str) -> Option<&[String]> {
        self.encoders.get(attribute).map(CategoricalEncoder::categories)
    }

    /// Whether the attribute is categorical
    pub fn is_categorical(&self, attribute: &str) -> bool {
        self.encoders.contains_key(attribute)
    }

    /// Categorical attribute names
    pub fn attributes(&self) -> impl Iterator<Item = &str> {
        self.encoders.keys().map(String::as_str)
    }

    /// Number of encoders
    pub fn len(&self) -> usize {
        self.encoders.len()
    }

    /// Whether there are no encoders
    pub fn is_empty(&self) -> bool {
        self.encoders.is_empty()
    }

    fn encoder(&self, attribute: &str) -> Result<&CategoricalEncoder> {
        self.encoders
            .get(attribute)
            .ok_or_else(|| Error::unknown_attribute(attribute))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn registry() -> EncoderRegistry {
        let mut vocabularies = BTreeMap::new();
        vocabularies.insert("Credit_Mix".to_string(), vocab(&["Bad", "Good", "Standard"]));
        vocabularies.insert("Payment_of_Min_Amount".to_string(), vocab(&["No", "Yes"]));
        EncoderRegistry::from_vocabularies(vocabularies).unwrap()
    }

    #[test]
    fn test_codes_follow_vocabulary_order() {
        let registry = registry();
        assert_eq!(registry.encode("Credit_Mix", "Bad").unwrap(), 0);
        assert_eq!(registry.encode("Credit_Mix", "Good").unwrap(), 1);
        assert_eq!(registry.encode("Credit_Mix", "Standard").unwrap(), 2);
        assert_eq!(registry.encode("Payment_of_Min_Amount", "Yes").unwrap(), 1);
    }

    #[test]
    fn test_unknown_category_names_attribute_and_value() {
        match registry().encode("Credit_Mix", "Excellent") {
            Err(Error::UnknownCategory { attribute, value }) => {
                assert_eq!(attribute, "Credit_Mix");
                assert_eq!(value, "Excellent");
            }
            other => panic!("expected UnknownCategory, got {:?}", other),
        }
    }

    #[test]
    fn test_matching_is_exact() {
        let registry = registry();
        assert!(registry.encode("Credit_Mix", "good").is_err());
        assert!(registry.encode("Credit_Mix", " Good").is_err());
        assert!(registry.encode("Credit_Mix", "Good ").is_err());
        assert!(registry.encode("credit_mix", "Good").is_err());
    }

    #[test]
    fn test_unknown_attribute() {
        let err = registry().encode("Occupation", "Engineer").unwrap_err();
        assert!(matches!(
            err,
            Error::UnknownAttribute { ref attribute } if attribute == "Occupation"
        ));
    }

    #[test]
    fn test_decode_inverts_encode() {
        let registry = registry();
        for category in registry.categories("Credit_Mix").unwrap() {
            let code = registry.encode("Credit_Mix", category).unwrap();
            assert_eq!(registry.decode("Credit_Mix", code).unwrap(), category);
        }
        assert!(registry.decode("Credit_Mix", 3).is_err());
    }

    #[test]
    fn test_rejects_bad_vocabularies() {
        assert!(CategoricalEncoder::new("Credit_Mix", vec![]).is_err());
        assert!(CategoricalEncoder::new("Credit_Mix", vocab(&["Good", "Bad", "Good"])).is_err());
    }
}
