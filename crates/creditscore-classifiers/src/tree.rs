//! Decision tree classifier
//!
//! Trees use the flat array layout common to exported CART models: node `i`
//! has `children_left[i]`, `children_right[i]`, a split `feature[i]` and
//! `threshold[i]`, and per-class `value[i]`. A node whose left child is `-1`
//! is a leaf. Samples with `x[feature] <= threshold` go left.

use crate::classifier::{argmax, check_width, ClassificationResult, Classifier, ModelFamily};
use creditscore_core::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Instant;

const LEAF: i64 = -1;

/// Array-encoded tree structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeStructure {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub value: Vec<Vec<f64>>,
}

/// Trained decision tree parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTreeParams {
    pub classes: Vec<i64>,
    pub n_features: usize,
    #[serde(flatten)]
    pub tree: TreeStructure,
}

#[derive(Debug, Clone)]
enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        proba: Vec<f64>,
    },
}

/// Validated tree ready for traversal
#[derive(Debug, Clone)]
pub(crate) struct CompiledTree {
    nodes: Vec<Node>,
}

impl CompiledTree {
    /// Validate and compile a tree structure
    ///
    /// Children must point forward in the node array, which guarantees every
    /// traversal terminates at a leaf.
    pub(crate) fn compile(
        name: &str,
        tree: &TreeStructure,
        n_classes: usize,
        n_features: usize,
    ) -> Result<Self> {
        let n_nodes = tree.children_left.len();
        let bad =
            |msg: String| creditscore_core::Error::config(format!("tree '{}': {}", name, msg));

        if n_nodes == 0 {
            return Err(bad("tree has no nodes".to_string()));
        }
        if tree.children_right.len() != n_nodes
            || tree.feature.len() != n_nodes
            || tree.threshold.len() != n_nodes
            || tree.value.len() != n_nodes
        {
            return Err(bad("node arrays have different lengths".to_string()));
        }

        let mut nodes = Vec::with_capacity(n_nodes);
        for i in 0..n_nodes {
            let left = tree.children_left[i];
            let right = tree.children_right[i];

            if left == LEAF {
                if right != LEAF {
                    return Err(bad(format!("node {} has only one child", i)));
                }
                let value = &tree.value[i];
                if value.len() != n_classes {
                    return Err(bad(format!(
                        "leaf {} has {} class values, expected {}",
                        i,
                        value.len(),
                        n_classes
                    )));
                }
                if value.iter().any(|v| !v.is_finite() || *v < 0.0) {
                    return Err(bad(format!("leaf {} has invalid class values", i)));
                }
                if value.iter().sum::<f64>() <= 0.0 {
                    return Err(bad(format!("leaf {} has no class weight", i)));
                }
                nodes.push(Node::Leaf {
                    proba: normalize(value),
                });
                continue;
            }

            let child_ok = |c: i64| c > i as i64 && (c as usize) < n_nodes;
            if !child_ok(left) || !child_ok(right) {
                return Err(bad(format!("node {} has out-of-order children {}/{}", i, left, right)));
            }

            let feature = tree.feature[i];
            if feature < 0 || feature as usize >= n_features {
                return Err(bad(format!(
                    "node {} splits on feature {} of {}",
                    i, feature, n_features
                )));
            }
            if !tree.threshold[i].is_finite() {
                return Err(bad(format!("node {} has a non-finite threshold", i)));
            }

            nodes.push(Node::Split {
                feature: feature as usize,
                threshold: tree.threshold[i],
                left: left as usize,
                right: right as usize,
            });
        }

        Ok(Self { nodes })
    }

    /// Class probabilities at the leaf reached by `features`
    pub(crate) fn predict_proba(&self, features: &[f64]) -> &[f64] {
        let mut index = 0;
        loop {
            match &self.nodes[index] {
                Node::Leaf { proba } => return proba,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    index = if features[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }

    /// Number of nodes
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }
}

/// Scale leaf values to probabilities; callers guarantee a positive total
fn normalize(value: &[f64]) -> Vec<f64> {
    let total: f64 = value.iter().sum();
    value.iter().map(|v| v / total).collect()
}

pub(crate) fn validate_classes(name: &str, classes: &[i64], n_features: usize) -> Result<()> {
    if classes.is_empty() {
        return Err(creditscore_core::Error::config(format!("model '{}' has no classes", name)));
    }
    if let Some(label) = first_duplicate(classes) {
        return Err(creditscore_core::Error::config(format!(
            "model '{}' lists class {} more than once",
            name, label
        )));
    }
    if n_features == 0 {
        return Err(creditscore_core::Error::config(format!(
            "model '{}' declares zero features",
            name
        )));
    }
    Ok(())
}

pub(crate) fn first_duplicate(classes: &[i64]) -> Option<i64> {
    let mut seen = HashSet::with_capacity(classes.len());
    classes.iter().copied().find(|c| !seen.insert(*c))
}

/// Single CART decision tree
pub struct DecisionTree {
    name: String,
    classes: Vec<i64>,
    n_features: usize,
    tree: CompiledTree,
}

impl DecisionTree {
    /// Create a classifier from trained parameters
    pub fn new(name: impl Into<String>, params: DecisionTreeParams) -> Result<Self> {
        let name = name.into();
        validate_classes(&name, &params.classes, params.n_features)?;
        let tree = CompiledTree::compile(
            &name,
            &params.tree,
            params.classes.len(),
            params.n_features,
        )?;

        Ok(Self {
            name,
            classes: params.classes,
            n_features: params.n_features,
            tree,
        })
    }

    /// Number of nodes in the tree
    pub fn node_count(&self) -> usize {
        self.tree.len()
    }
}

impl Classifier for DecisionTree {
    fn predict(&self, features: &[f64]) -> Result<ClassificationResult> {
        let start = Instant::now();
        check_width(&self.name, self.n_features, features)?;

        let proba = self.tree.predict_proba(features);
        let index = argmax(proba).ok_or_else(|| {
            creditscore_core::Error::classifier(format!(
                "tree '{}' reached an empty leaf",
                self.name
            ))
        })?;

        Ok(ClassificationResult {
            label: self.classes[index],
            scores: proba.to_vec(),
            latency_us: start.elapsed().as_micros() as u64,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn family(&self) -> ModelFamily {
        ModelFamily::DecisionTree
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn classes(&self) -> &[i64] {
        &self.classes
    }
}
