// ============================================================
// Layer 5 — Random Forest
// ============================================================
// A forest exported from the training pipeline as plain JSON.
// Each tree is a flat node array, root at index 0:
//
//   split: { "feature": 3, "threshold": 27.5, "left": 1, "right": 2 }
//   leaf:  { "value": [neg, pos] }
//
// A sample goes left when x[feature] <= threshold. Leaf values
// are class counts (or fractions); the tree's vote is the
// positive share at the leaf, and the forest's probability is
// the mean vote across trees.
//
// Children always sit after their parent in the array, which
// is how the exporter writes them, and every node other than the
// root has exactly one parent. Both are checked on load, so a
// tree is a real tree: walks terminate and no subtree is shared.

use serde::{Deserialize, Serialize};

use crate::domain::traits::Classifier;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    Split {
        feature:   usize,
        threshold: f64,
        left:      usize,
        right:     usize,
    },
    Leaf {
        value: [f64; 2],
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<Node>,
}

impl DecisionTree {
    fn validate(&self, n_features: usize) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err("tree has no nodes".to_string());
        }
        let mut has_parent = vec![false; self.nodes.len()];
        for (i, node) in self.nodes.iter().enumerate() {
            match *node {
                Node::Split { feature, threshold, left, right } => {
                    if feature >= n_features {
                        return Err(format!(
                            "node {i}: feature {feature} out of range (n_features = {n_features})"
                        ));
                    }
                    if !threshold.is_finite() {
                        return Err(format!("node {i}: threshold is not finite"));
                    }
                    for child in [left, right] {
                        if child <= i || child >= self.nodes.len() {
                            return Err(format!("node {i}: child {child} is not after it in the tree"));
                        }
                        if std::mem::replace(&mut has_parent[child], true) {
                            return Err(format!("node {i}: child {child} already has a parent"));
                        }
                    }
                }
                Node::Leaf { value: [neg, pos] } => {
                    if !(neg >= 0.0 && pos >= 0.0 && neg + pos > 0.0) {
                        return Err(format!("node {i}: leaf value [{neg}, {pos}] is not a class distribution"));
                    }
                }
            }
        }
        Ok(())
    }

    /// Positive-class share at the leaf `x` lands in.
    pub fn vote(&self, x: &[f64]) -> f64 {
        let mut i = 0;
        loop {
            match self.nodes[i] {
                Node::Split { feature, threshold, left, right } => {
                    i = if x[feature] <= threshold { left } else { right };
                }
                Node::Leaf { value: [neg, pos] } => return pos / (neg + pos),
            }
        }
    }

    /// Longest root-to-leaf path, in splits. One pass from the back:
    /// children come after their parent, so both are known by the
    /// time the parent is reached.
    pub fn depth(&self) -> usize {
        let mut depth = vec![0usize; self.nodes.len()];
        for (i, node) in self.nodes.iter().enumerate().rev() {
            if let Node::Split { left, right, .. } = *node {
                depth[i] = 1 + depth[left].max(depth[right]);
            }
        }
        depth.first().copied().unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    pub n_features: usize,
    pub trees:      Vec<DecisionTree>,
}

impl RandomForest {
    /// At least one tree, and every tree well-formed for `n_features`.
    pub fn validate(&self) -> Result<(), String> {
        if self.trees.is_empty() {
            return Err("forest has no trees".to_string());
        }
        for (t, tree) in self.trees.iter().enumerate() {
            tree.validate(self.n_features)
                .map_err(|e| format!("tree {t}: {e}"))?;
        }
        Ok(())
    }
}

impl Classifier for RandomForest {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict_proba(&self, features: &[f64]) -> f64 {
        let total: f64 = self.trees.iter().map(|t| t.vote(features)).sum();
        total / self.trees.len() as f64
    }

    fn name(&self) -> String {
        let max_depth = self.trees.iter().map(DecisionTree::depth).max().unwrap_or(0);
        format!("random forest ({} trees, max depth {})", self.trees.len(), max_depth)
    }
}
