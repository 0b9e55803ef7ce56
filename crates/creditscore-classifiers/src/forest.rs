//! Random forest classifier

use crate::classifier::{argmax, check_width, ClassificationResult, Classifier, ModelFamily};
use crate::tree::{validate_classes, CompiledTree, TreeStructure};
use creditscore_core::Result;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Trained random forest parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForestParams {
    pub classes: Vec<i64>,
    pub n_features: usize,
    pub trees: Vec<TreeStructure>,
}

/// Ensemble of decision trees voting by averaged class probability
pub struct RandomForest {
    name: String,
    classes: Vec<i64>,
    n_features: usize,
    trees: Vec<CompiledTree>,
}

impl RandomForest {
    /// Create a classifier from trained parameters
    pub fn new(name: impl Into<String>, params: RandomForestParams) -> Result<Self> {
        let name = name.into();
        validate_classes(&name, &params.classes, params.n_features)?;

        if params.trees.is_empty() {
            return Err(creditscore_core::Error::config(format!(
                "random forest '{}' has no trees",
                name
            )));
        }

        let trees = params
            .trees
            .iter()
            .enumerate()
            .map(|(i, tree)| {
                CompiledTree::compile(
                    &format!("{}[{}]", name, i),
                    tree,
                    params.classes.len(),
                    params.n_features,
                )
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            name,
            classes: params.classes,
            n_features: params.n_features,
            trees,
        })
    }

    /// Number of trees in the ensemble
    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }
}

impl Classifier for RandomForest {
    fn predict(&self, features: &[f64]) -> Result<ClassificationResult> {
        let start = Instant::now();
        check_width(&self.name, self.n_features, features)?;

        let mut proba = vec![0.0; self.classes.len()];
        for tree in &self.trees {
            for (acc, p) in proba.iter_mut().zip(tree.predict_proba(features)) {
                *acc += p;
            }
        }
        let n_trees = self.trees.len() as f64;
        proba.iter_mut().for_each(|p| *p /= n_trees);

        let index = argmax(&proba).ok_or_else(|| {
            creditscore_core::Error::classifier(format!(
                "forest '{}' produced no scores",
                self.name
            ))
        })?;

        Ok(ClassificationResult {
            label: self.classes[index],
            scores: proba,
            latency_us: start.elapsed().as_micros() as u64,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn family(&self) -> ModelFamily {
        ModelFamily::RandomForest
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn classes(&self) -> &[i64] {
        &self.classes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::tests::stump_structure;

    fn leaf(value: Vec<f64>) -> TreeStructure {
        TreeStructure {
            children_left: vec![-1],
            children_right: vec![-1],
            feature: vec![-2],
            threshold: vec![-2.0],
            value: vec![value],
        }
    }

    #[test]
    fn test_probabilities_are_averaged() {
        let forest = RandomForest::new(
            "rf",
            RandomForestParams {
                classes: vec![0, 1, 2],
                n_features: 2,
                trees: vec![leaf(vec![1.0, 0.0, 0.0]), leaf(vec![0.0, 3.0, 1.0])],
            },
        )
        .unwrap();

        let result = forest.predict(&[0.0, 0.0]).unwrap();
        assert_eq!(result.scores, vec![0.5, 0.375, 0.125]);
        assert_eq!(result.label, 0);
        assert_eq!(forest.tree_count(), 2);
    }

    #[test]
    fn test_majority_of_trees_wins() {
        let forest = RandomForest::new(
            "rf",
            RandomForestParams {
                classes: vec![0, 1, 2],
                n_features: 2,
                trees: vec![stump_structure(), stump_structure(), leaf(vec![1.0, 0.0, 0.0])],
            },
        )
        .unwrap();

        assert_eq!(forest.predict(&[1.0, -1.0]).unwrap().label, 1);
    }

    #[test]
    fn test_rejects_empty_forest() {
        let err = RandomForest::new(
            "empty",
            RandomForestParams {
                classes: vec![0, 1, 2],
                n_features: 2,
                trees: vec![],
            },
        );
        assert!(err.is_err());
    }
}
