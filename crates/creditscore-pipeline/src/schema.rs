//! Feature schema alignment

use creditscore_core::{Error, Result};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Ordered column layout the classifiers were trained on
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSchema {
    columns: Vec<String>,
    positions: HashMap<String, usize>,
}

impl FeatureSchema {
    /// Create a schema from the training-time column list
    ///
    /// An empty schema or a repeated column name is a broken deployment.
    pub fn new(columns: Vec<String>) -> Result<Self> {
        if columns.is_empty() {
            return Err(Error::schema_mismatch("feature schema has no columns"));
        }

        let mut positions = HashMap::with_capacity(columns.len());
        for (i, column) in columns.iter().enumerate() {
            if positions.insert(column.clone(), i).is_some() {
                return Err(Error::schema_mismatch(format!(
                    "column '{}' appears more than once in the feature schema",
                    column
                )));
            }
        }

        Ok(Self { columns, positions })
    }

    /// Arrange a record into schema order
    ///
    /// Columns missing from the record become 0. Record entries that are
    /// not schema columns are dropped.
    pub fn align(&self, record: &BTreeMap<String, f64>) -> Vec<f64> {
        for name in record.keys().filter(|name| !self.positions.contains_key(*name)) {
            debug!("Dropping attribute '{}' not present in feature schema", name);
        }

        self.columns
            .iter()
            .map(|column| match record.get(column) {
                Some(value) => *value,
                None => {
                    debug!("Column '{}' absent from record, defaulting to 0", column);
                    0.0
                }
            })
            .collect()
    }

    /// Column names in order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Position of a column
    pub fn position(&self, column: &str) -> Option<usize> {
        self.positions.get(column).copied()
    }

    /// Whether the schema contains a column
    pub fn contains(&self, column: &str) -> bool {
        self.positions.contains_key(column)
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether the schema is empty (never true for a constructed schema)
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
