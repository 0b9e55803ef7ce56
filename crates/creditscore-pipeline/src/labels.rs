//! Mapping from raw classifier labels to credit categories

use creditscore_core::{CreditCategory, Error, Result};
use std::collections::BTreeMap;

/// Closed mapping from raw labels onto the three credit categories
///
/// The default is `0 → Poor`, `1 → Good`, `2 → Standard`. Deployments whose
/// training used a different label encoding can supply their own mapping, as
/// long as it is a bijection onto all three categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelMap {
    labels: BTreeMap<i64, CreditCategory>,
}

impl LabelMap {
    /// Build a mapping, checking it covers each category exactly once
    pub fn new(labels: BTreeMap<i64, CreditCategory>) -> Result<Self> {
        for category in CreditCategory::ALL {
            let count = labels.values().filter(|c| **c == category).count();
            if count != 1 {
                return Err(Error::config(format!(
                    "label map must assign exactly one label to {}, found {}",
                    category, count
                )));
            }
        }
        if labels.len() != CreditCategory::ALL.len() {
            return Err(Error::config(format!(
                "label map must have exactly {} entries, found {}",
                CreditCategory::ALL.len(),
                labels.len()
            )));
        }
        Ok(Self { labels })
    }

    /// Category for a raw label
    pub fn resolve(&self, label: i64) -> Result<CreditCategory> {
        self.labels
            .get(&label)
            .copied()
            .ok_or(Error::UnrecognizedLabel { label })
    }

    /// Whether a raw label is mapped
    pub fn contains(&self, label: i64) -> bool {
        self.labels.contains_key(&label)
    }

    /// Mapped labels in ascending order
    pub fn iter(&self) -> impl Iterator<Item = (i64, CreditCategory)> + '_ {
        self.labels.iter().map(|(l, c)| (*l, *c))
    }
}

impl Default for LabelMap {
    fn default() -> Self {
        Self {
            labels: BTreeMap::from([
                (0, CreditCategory::Poor),
                (1, CreditCategory::Good),
                (2, CreditCategory::Standard),
            ]),
        }
    }
}
