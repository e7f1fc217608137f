//! Random-forest classifier over a dense feature vector.

use serde::Deserialize;

use crate::error::{ModelError, ModelResult};
use crate::scorer::Label;

/// One node of a decision tree, stored in a flat array.
///
/// Children always sit at a higher index than their parent, so traversal always terminates.
#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
pub(crate) enum Node {
    /// Descend `left` when `features[feature] <= threshold`, else `right`.
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    /// Per-class weights (sample counts or fractions) at this leaf.
    Leaf { value: Vec<f64> },
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct DecisionTree {
    pub(crate) nodes: Vec<Node>,
}

impl DecisionTree {
    fn validate(&self, tree: usize, n_features: usize, n_classes: usize) -> ModelResult<()> {
        if self.nodes.is_empty() {
            return Err(ModelError::Invalid(format!("tree {tree} has no nodes")));
        }
        let len = self.nodes.len();
        for (idx, node) in self.nodes.iter().enumerate() {
            match node {
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if *feature >= n_features {
                        return Err(ModelError::Invalid(format!(
                            "tree {tree} node {idx} splits on feature {feature} but only {n_features} exist"
                        )));
                    }
                    if !threshold.is_finite() {
                        return Err(ModelError::Invalid(format!(
                            "tree {tree} node {idx} has a non-finite threshold"
                        )));
                    }
                    for child in [*left, *right] {
                        if child <= idx || child >= len {
                            return Err(ModelError::Invalid(format!(
                                "tree {tree} node {idx} has invalid child index {child}"
                            )));
                        }
                    }
                }
                Node::Leaf { value } => {
                    if value.len() != n_classes {
                        return Err(ModelError::Invalid(format!(
                            "tree {tree} leaf {idx} has {} weights for {n_classes} classes",
                            value.len()
                        )));
                    }
                    if value.iter().any(|w| !w.is_finite() || *w < 0.0) {
                        return Err(ModelError::Invalid(format!(
                            "tree {tree} leaf {idx} has a negative or non-finite weight"
                        )));
                    }
                    if value.iter().sum::<f64>() <= 0.0 {
                        return Err(ModelError::Invalid(format!(
                            "tree {tree} leaf {idx} has no weight"
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    /// Leaf weights reached by `features`.
    fn leaf(&self, features: &[f64]) -> &[f64] {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if features[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
                Node::Leaf { value } => return value,
            }
        }
    }
}

/// Scoring indexes leaves, classes and features without bounds checks of its own; only call
/// [`RandomForest::predict_proba`] and [`RandomForest::predict`] on a forest that passed
/// [`RandomForest::validate`].
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RandomForest {
    pub(crate) classes: Vec<i64>,
    pub(crate) trees: Vec<DecisionTree>,
}

impl RandomForest {
    pub(crate) fn validate(&self, n_features: usize) -> ModelResult<()> {
        if self.classes != [Label::NEGATIVE.0, Label::POSITIVE.0] {
            return Err(ModelError::Invalid(format!(
                "classifier classes must be [0, 1], found {:?}",
                self.classes
            )));
        }
        if self.trees.is_empty() {
            return Err(ModelError::Invalid("classifier has no trees".into()));
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate(i, n_features, self.classes.len())?;
        }
        Ok(())
    }

    /// Mean of each tree's normalised leaf distribution.
    pub(crate) fn predict_proba(&self, features: &[f64]) -> Vec<f64> {
        let mut proba = vec![0.0; self.classes.len()];
        for tree in &self.trees {
            let leaf = tree.leaf(features);
            let total: f64 = leaf.iter().sum();
            for (p, w) in proba.iter_mut().zip(leaf) {
                *p += w / total;
            }
        }
        let n = self.trees.len() as f64;
        proba.iter_mut().for_each(|p| *p /= n);
        proba
    }

    /// Class with the highest mean probability; the first class wins ties.
    pub(crate) fn predict(&self, features: &[f64]) -> Label {
        let proba = self.predict_proba(features);
        let mut best = 0;
        for (i, p) in proba.iter().enumerate().skip(1) {
            if *p > proba[best] {
                best = i;
            }
        }
        Label(self.classes[best])
    }
}
