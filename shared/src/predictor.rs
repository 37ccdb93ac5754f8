//! Inference-only regression models
//!
//! The regressor is trained elsewhere. This module only reads the exported
//! artifact and evaluates it; there is no fitting code here.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Marker stored in `children_left` / `children_right` for leaf nodes
pub const TREE_LEAF: i64 = -1;

/// Errors raised while loading or evaluating a predictor
#[derive(Error, Debug)]
pub enum PredictorError {
    #[error("Failed to read model artifact: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse model artifact: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid model artifact: {0}")]
    InvalidArtifact(String),

    #[error("Feature schema mismatch: {0}")]
    SchemaMismatch(String),
}

/// A fitted regression model that can only be queried
pub trait Predictor: Send + Sync {
    /// Predict one target value for a single row
    fn predict(&self, row: &[f64]) -> Result<f64, PredictorError>;

    /// Per-feature importances aligned with the training column order
    fn feature_importances(&self) -> &[f64];

    /// Number of columns the model was trained on
    fn n_features(&self) -> usize;

    /// Column names recorded at training time, if the artifact kept them
    fn feature_names(&self) -> Option<&[String]> {
        None
    }

    /// Number of fitted estimators behind this predictor
    fn n_estimators(&self) -> usize {
        1
    }
}

/// One exported regression tree in flat parallel-array form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeArrays {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub value: Vec<f64>,
}

/// On-disk layout of an exported random forest regressor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestArtifact {
    pub n_features: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_names: Option<Vec<String>>,
    pub feature_importances: Vec<f64>,
    pub estimators: Vec<TreeArrays>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

/// A validated regression tree
#[derive(Debug, Clone)]
struct RegressionTree {
    nodes: Vec<TreeNode>,
}

impl RegressionTree {
    fn from_arrays(
        index: usize,
        arrays: TreeArrays,
        n_features: usize,
    ) -> Result<Self, PredictorError> {
        let invalid =
            |msg: String| PredictorError::InvalidArtifact(format!("tree {}: {}", index, msg));

        let n = arrays.children_left.len();
        if n == 0 {
            return Err(invalid("tree has no nodes".to_string()));
        }
        let lengths = [
            arrays.children_right.len(),
            arrays.feature.len(),
            arrays.threshold.len(),
            arrays.value.len(),
        ];
        if lengths.iter().any(|&len| len != n) {
            return Err(invalid(format!(
                "node arrays have different lengths ({} and {:?})",
                n, lengths
            )));
        }

        let mut nodes = Vec::with_capacity(n);
        for i in 0..n {
            let (left, right) = (arrays.children_left[i], arrays.children_right[i]);
            let node = if left == TREE_LEAF && right == TREE_LEAF {
                let value = arrays.value[i];
                if !value.is_finite() {
                    return Err(invalid(format!("leaf {} has non-finite value", i)));
                }
                TreeNode::Leaf { value }
            } else {
                // Children are stored after their parent, which also rules out cycles
                let child = |c: i64| -> Option<usize> {
                    usize::try_from(c).ok().filter(|&c| c > i && c < n)
                };
                let (Some(left), Some(right)) = (child(left), child(right)) else {
                    return Err(invalid(format!(
                        "node {} has invalid children ({}, {})",
                        i, left, right
                    )));
                };
                let feature = usize::try_from(arrays.feature[i])
                    .ok()
                    .filter(|&f| f < n_features)
                    .ok_or_else(|| {
                        invalid(format!(
                            "node {} splits on feature {} of {}",
                            i, arrays.feature[i], n_features
                        ))
                    })?;
                let threshold = arrays.threshold[i];
                if !threshold.is_finite() {
                    return Err(invalid(format!("node {} has non-finite threshold", i)));
                }
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }
            };
            nodes.push(node);
        }

        Ok(Self { nodes })
    }

    fn predict(&self, row: &[f64]) -> f64 {
        let mut idx = 0;
        loop {
            match self.nodes[idx] {
                TreeNode::Leaf { value } => return value,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if row[feature] <= threshold { left } else { right };
                }
            }
        }
    }

    fn depth(&self) -> usize {
        fn walk(nodes: &[TreeNode], idx: usize) -> usize {
            match nodes[idx] {
                TreeNode::Leaf { .. } => 0,
                TreeNode::Split { left, right, .. } => {
                    1 + walk(nodes, left).max(walk(nodes, right))
                }
            }
        }
        walk(&self.nodes, 0)
    }
}

/// Random forest regressor: the mean of its trees' predictions
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "ForestArtifact")]
pub struct ForestRegressor {
    n_features: usize,
    feature_names: Option<Vec<String>>,
    feature_importances: Vec<f64>,
    trees: Vec<RegressionTree>,
}

impl TryFrom<ForestArtifact> for ForestRegressor {
    type Error = PredictorError;

    fn try_from(artifact: ForestArtifact) -> Result<Self, Self::Error> {
        let n_features = artifact.n_features;
        if n_features == 0 {
            return Err(PredictorError::InvalidArtifact(
                "n_features must be positive".to_string(),
            ));
        }
        if artifact.estimators.is_empty() {
            return Err(PredictorError::InvalidArtifact(
                "forest has no estimators".to_string(),
            ));
        }
        if artifact.feature_importances.len() != n_features {
            return Err(PredictorError::InvalidArtifact(format!(
                "{} feature importances for {} features",
                artifact.feature_importances.len(),
                n_features
            )));
        }
        if let Some(names) = &artifact.feature_names {
            if names.len() != n_features {
                return Err(PredictorError::InvalidArtifact(format!(
                    "{} feature names for {} features",
                    names.len(),
                    n_features
                )));
            }
        }

        let trees = artifact
            .estimators
            .into_iter()
            .enumerate()
            .map(|(i, arrays)| RegressionTree::from_arrays(i, arrays, n_features))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            n_features,
            feature_names: artifact.feature_names,
            feature_importances: artifact.feature_importances,
            trees,
        })
    }
}

impl ForestRegressor {
    pub fn from_json(json: &str) -> Result<Self, PredictorError> {
        let artifact: ForestArtifact = serde_json::from_str(json)?;
        Self::try_from(artifact)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, PredictorError> {
        let artifact: ForestArtifact = serde_json::from_slice(bytes)?;
        Self::try_from(artifact)
    }

    /// Read and validate an artifact from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PredictorError> {
        let bytes = std::fs::read(path)?;
        Self::from_slice(&bytes)
    }

    /// Depth of the deepest tree
    pub fn max_depth(&self) -> usize {
        self.trees.iter().map(RegressionTree::depth).max().unwrap_or(0)
    }
}

impl Predictor for ForestRegressor {
    fn predict(&self, row: &[f64]) -> Result<f64, PredictorError> {
        if row.len() != self.n_features {
            return Err(PredictorError::SchemaMismatch(format!(
                "model expects {} features, got {}",
                self.n_features,
                row.len()
            )));
        }
        let total: f64 = self.trees.iter().map(|tree| tree.predict(row)).sum();
        Ok(total / self.trees.len() as f64)
    }

    fn feature_importances(&self) -> &[f64] {
        &self.feature_importances
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn feature_names(&self) -> Option<&[String]> {
        self.feature_names.as_deref()
    }

    fn n_estimators(&self) -> usize {
        self.trees.len()
    }
}
