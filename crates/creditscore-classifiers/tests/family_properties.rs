//! Property tests shared by every classifier family
//!
//! Each family must be deterministic, emit only labels from its class list,
//! and reject feature vectors of the wrong width.

use creditscore_classifiers::{
    Classifier, DecisionTree, DecisionTreeParams, LogisticRegression, LogisticRegressionParams,
    RandomForest, RandomForestParams, TreeStructure,
};
use proptest::prelude::*;

fn tree_structure(threshold: f64) -> TreeStructure {
    TreeStructure {
        children_left: vec![1, -1, 3, -1, -1],
        children_right: vec![2, -1, 4, -1, -1],
        feature: vec![0, -2, 2, -2, -2],
        threshold: vec![threshold, -2.0, 0.0, -2.0, -2.0],
        value: vec![
            vec![4.0, 4.0, 4.0],
            vec![3.0, 1.0, 0.0],
            vec![1.0, 3.0, 4.0],
            vec![0.0, 3.0, 1.0],
            vec![1.0, 0.0, 3.0],
        ],
    }
}

fn families() -> Vec<Box<dyn Classifier>> {
    vec![
        Box::new(
            LogisticRegression::new(
                "lr",
                LogisticRegressionParams {
                    classes: vec![0, 1, 2],
                    coefficients: vec![
                        vec![0.8, -0.2, 0.1],
                        vec![-0.3, 0.5, 0.4],
                        vec![-0.5, -0.3, -0.5],
                    ],
                    intercepts: vec![0.1, -0.2, 0.1],
                },
            )
            .unwrap(),
        ),
        Box::new(
            DecisionTree::new(
                "dt",
                DecisionTreeParams {
                    classes: vec![0, 1, 2],
                    n_features: 3,
                    tree: tree_structure(0.0),
                },
            )
            .unwrap(),
        ),
        Box::new(
            RandomForest::new(
                "rf",
                RandomForestParams {
                    classes: vec![0, 1, 2],
                    n_features: 3,
                    trees: vec![tree_structure(-0.5), tree_structure(0.0), tree_structure(0.5)],
                },
            )
            .unwrap(),
        ),
    ]
}

proptest! {
    #[test]
    fn prediction_is_deterministic_and_in_class_set(
        features in proptest::collection::vec(-5.0f64..5.0, 3)
    ) {
        for model in families() {
            let first = model.predict(&features).unwrap();
            let second = model.predict(&features).unwrap();
            prop_assert_eq!(first.label, second.label);
            prop_assert_eq!(&first.scores, &second.scores);
            prop_assert!(model.classes().contains(&first.label));
            prop_assert_eq!(first.scores.len(), model.classes().len());
        }
    }

    #[test]
    fn wrong_width_is_rejected(width in 0usize..8) {
        prop_assume!(width != 3);
        let features = vec![0.0; width];
        for model in families() {
            prop_assert!(model.predict(&features).is_err());
        }
    }
}
