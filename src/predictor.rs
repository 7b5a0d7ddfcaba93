//! Regression model boundary.
//!
//! The model is trained elsewhere and shipped as a JSON bundle. Two shapes
//! are understood: a linear model (intercept plus one weight per column) and
//! an averaged ensemble of regression trees.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::Deserialize;
use thiserror::Error;

use crate::models::FeatureVector;

// ---

/// Failures raised while scoring a feature vector.
#[derive(Debug, Error, PartialEq)]
pub enum PredictError {
    #[error("model expects {expected} features, got {actual}")]
    FeatureCountMismatch { expected: usize, actual: usize },

    #[error("tree {tree} node {node} references feature {feature}, vector has {width}")]
    FeatureOutOfRange {
        tree: usize,
        node: usize,
        feature: usize,
        width: usize,
    },

    #[error("tree {tree} is malformed: {reason}")]
    MalformedTree { tree: usize, reason: String },

    #[error("model has no trees")]
    EmptyEnsemble,

    #[error("model produced a non-finite value ({0})")]
    NonFinite(f64),
}

/// Anything that turns an aligned feature row into a single number.
pub trait Predictor: Send + Sync {
    fn predict(&self, vector: &FeatureVector) -> Result<f64, PredictError>;

    /// Short label for logs and the health endpoint.
    fn kind(&self) -> &'static str;

    /// Number of input columns the model was fitted on, when it records one.
    fn expected_width(&self) -> Option<usize> {
        None
    }
}

/// A node in a regression tree. Splits send `value <= threshold` left.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Leaf {
        leaf: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RegressionTree {
    pub nodes: Vec<TreeNode>,
}

impl RegressionTree {
    fn evaluate(&self, tree: usize, values: &[f64]) -> Result<f64, PredictError> {
        // ---
        let mut index = 0;
        // A well-formed tree reaches a leaf in fewer steps than it has nodes.
        for _ in 0..self.nodes.len() {
            let node = self.nodes.get(index).ok_or_else(|| PredictError::MalformedTree {
                tree,
                reason: format!("child index {} out of range", index),
            })?;

            match *node {
                TreeNode::Leaf { leaf } => return Ok(leaf),
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let value = values.get(feature).copied().ok_or(PredictError::FeatureOutOfRange {
                        tree,
                        node: index,
                        feature,
                        width: values.len(),
                    })?;
                    index = if value <= threshold { left } else { right };
                }
            }
        }

        Err(PredictError::MalformedTree {
            tree,
            reason: "no leaf reached".to_string(),
        })
    }
}

/// Deserialized model bundle.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ModelArtifact {
    Linear { intercept: f64, weights: Vec<f64> },
    Forest { trees: Vec<RegressionTree> },
}

impl Predictor for ModelArtifact {
    fn predict(&self, vector: &FeatureVector) -> Result<f64, PredictError> {
        // ---
        let values = vector.as_slice();
        let prediction = match self {
            ModelArtifact::Linear { intercept, weights } => {
                if weights.len() != values.len() {
                    return Err(PredictError::FeatureCountMismatch {
                        expected: weights.len(),
                        actual: values.len(),
                    });
                }
                intercept + weights.iter().zip(values).map(|(w, x)| w * x).sum::<f64>()
            }
            ModelArtifact::Forest { trees } => {
                if trees.is_empty() {
                    return Err(PredictError::EmptyEnsemble);
                }
                let mut total = 0.0;
                for (i, tree) in trees.iter().enumerate() {
                    total += tree.evaluate(i, values)?;
                }
                total / trees.len() as f64
            }
        };

        if !prediction.is_finite() {
            return Err(PredictError::NonFinite(prediction));
        }
        Ok(prediction)
    }

    fn kind(&self) -> &'static str {
        match self {
            ModelArtifact::Linear { .. } => "linear",
            ModelArtifact::Forest { .. } => "forest",
        }
    }

    fn expected_width(&self) -> Option<usize> {
        match self {
            ModelArtifact::Linear { weights, .. } => Some(weights.len()),
            ModelArtifact::Forest { .. } => None,
        }
    }
}

/// Read the model bundle from disk.
pub fn load_model(path: &Path) -> Result<ModelArtifact> {
    // ---
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read model from '{}'", path.display()))?;
    let model: ModelArtifact = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse model in '{}'", path.display()))?;

    tracing::info!("Loaded {} model from {}", model.kind(), path.display());
    Ok(model)
}

/// Render a prediction the way the form shows it: truncated to a whole
/// number of bikes, with thousands separators.
pub fn format_estimate(prediction: f64) -> (i64, String) {
    // ---
    let whole = prediction.trunc() as i64;
    let digits = whole.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if whole < 0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    (whole, grouped)
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    fn split(feature: usize, threshold: f64, left: usize, right: usize) -> TreeNode {
        TreeNode::Split {
            feature,
            threshold,
            left,
            right,
        }
    }

    #[test]
    fn test_linear_prediction() {
        // ---
        let model = ModelArtifact::Linear {
            intercept: 100.0,
            weights: vec![10.0, -2.0, 0.5],
        };
        let vector = FeatureVector::new(vec![3.0, 4.0, 8.0]);
        assert_eq!(model.predict(&vector), Ok(126.0));
        assert_eq!(model.expected_width(), Some(3));
    }

    #[test]
    fn test_linear_width_mismatch() {
        // ---
        let model = ModelArtifact::Linear {
            intercept: 0.0,
            weights: vec![1.0, 1.0],
        };
        let err = model.predict(&FeatureVector::new(vec![1.0])).unwrap_err();
        assert_eq!(
            err,
            PredictError::FeatureCountMismatch {
                expected: 2,
                actual: 1
            }
        );
        assert_eq!(err.to_string(), "model expects 2 features, got 1");
    }

    #[test]
    fn test_forest_averages_trees() {
        // ---
        let stump = RegressionTree {
            nodes: vec![split(0, 12.0, 1, 2), TreeNode::Leaf { leaf: 200.0 }, TreeNode::Leaf { leaf: 800.0 }],
        };
        let constant = RegressionTree {
            nodes: vec![TreeNode::Leaf { leaf: 400.0 }],
        };
        let model = ModelArtifact::Forest {
            trees: vec![stump, constant],
        };

        assert_eq!(model.predict(&FeatureVector::new(vec![9.0])), Ok(300.0));
        assert_eq!(model.predict(&FeatureVector::new(vec![18.0])), Ok(600.0));
        // Threshold is inclusive on the left
        assert_eq!(model.predict(&FeatureVector::new(vec![12.0])), Ok(300.0));
    }

    #[test]
    fn test_forest_errors() {
        // ---
        let empty = ModelArtifact::Forest { trees: vec![] };
        assert_eq!(empty.predict(&FeatureVector::new(vec![1.0])), Err(PredictError::EmptyEnsemble));

        let wide = ModelArtifact::Forest {
            trees: vec![RegressionTree {
                nodes: vec![split(5, 0.0, 1, 1), TreeNode::Leaf { leaf: 1.0 }],
            }],
        };
        assert!(matches!(
            wide.predict(&FeatureVector::new(vec![1.0])),
            Err(PredictError::FeatureOutOfRange { feature: 5, width: 1, .. })
        ));

        let cyclic = ModelArtifact::Forest {
            trees: vec![RegressionTree {
                nodes: vec![split(0, 0.0, 0, 0)],
            }],
        };
        assert!(matches!(
            cyclic.predict(&FeatureVector::new(vec![1.0])),
            Err(PredictError::MalformedTree { tree: 0, .. })
        ));

        let dangling = ModelArtifact::Forest {
            trees: vec![RegressionTree {
                nodes: vec![split(0, 0.0, 7, 7), TreeNode::Leaf { leaf: 1.0 }],
            }],
        };
        assert!(matches!(
            dangling.predict(&FeatureVector::new(vec![1.0])),
            Err(PredictError::MalformedTree { tree: 0, .. })
        ));
    }

    #[test]
    fn test_non_finite_prediction() {
        // ---
        let model = ModelArtifact::Linear {
            intercept: f64::INFINITY,
            weights: vec![1.0],
        };
        assert!(matches!(
            model.predict(&FeatureVector::new(vec![1.0])),
            Err(PredictError::NonFinite(_))
        ));
    }

    #[test]
    fn test_artifact_json_shapes() {
        // ---
        let linear: ModelArtifact =
            serde_json::from_str(r#"{"kind": "linear", "intercept": 1.5, "weights": [2.0]}"#).unwrap();
        assert_eq!(linear.kind(), "linear");

        let forest: ModelArtifact = serde_json::from_str(
            r#"{"kind": "forest", "trees": [{"nodes": [
                {"feature": 0, "threshold": 5.0, "left": 1, "right": 2},
                {"leaf": 10.0},
                {"leaf": 20.0}
            ]}]}"#,
        )
        .unwrap();
        assert_eq!(forest.predict(&FeatureVector::new(vec![6.0])), Ok(20.0));
    }

    #[test]
    fn test_format_estimate() {
        // ---
        assert_eq!(format_estimate(0.4), (0, "0".to_string()));
        assert_eq!(format_estimate(999.9), (999, "999".to_string()));
        assert_eq!(format_estimate(1234.7), (1234, "1,234".to_string()));
        assert_eq!(format_estimate(1_000_000.0), (1_000_000, "1,000,000".to_string()));
        assert_eq!(format_estimate(-2500.2), (-2500, "-2,500".to_string()));
    }
}
