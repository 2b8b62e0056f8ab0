//! Serialized classifier artifact (JSON)
//!
//! ```json
//! { "kind": "logistic_regression", "weights": [..21], "intercept": -6.1 }
//! { "kind": "decision_tree", "nodes": [{ "feature": 6, "threshold": 0.5, "left": 1, "right": 2 }, { "class": 0 }, { "class": 1 }] }
//! { "kind": "pipeline", "columns": [{ "name": "age" }, { "name": "gender", "encoding": { "one_hot": ["M", "F"] } }],
//!   "estimator": { "kind": "logistic_regression", ... } }
//! ```

use serde::{Deserialize, Serialize};

use super::classifier::LoadedModel;
use super::estimators::{
    ColumnTransform, DecisionTree, LogisticRegression, Pipeline, Positional, TreeNode,
};
use super::loader::LoadError;
use crate::features::layout::{layout_hash, validate_layout, FEATURE_COUNT, FEATURE_VERSION};

fn default_threshold() -> f64 {
    0.5
}

/// Top-level artifact document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    /// Feature layout the model was trained against, if pinned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_version: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_layout_hash: Option<u32>,
    #[serde(flatten)]
    pub model: ModelSpec,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelSpec {
    LogisticRegression(LogisticRegressionSpec),
    DecisionTree(DecisionTreeSpec),
    Pipeline(PipelineSpec),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticRegressionSpec {
    pub weights: Vec<f64>,
    pub intercept: f64,
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTreeSpec {
    pub nodes: Vec<NodeSpec>,
    /// Row width; defaults to the positional layout (or the pipeline width)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n_features: Option<usize>,
}

/// Either a split (`feature`, `threshold`, `left`, `right`) or a leaf (`class`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineSpec {
    pub columns: Vec<ColumnSpec>,
    pub estimator: Box<ModelSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub name: String,
    #[serde(default)]
    pub encoding: ColumnEncoding,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnEncoding {
    #[default]
    Numeric,
    OneHot(Vec<String>),
}

// ============================================================================
// BUILD
// ============================================================================

impl ModelArtifact {
    /// Short name of the model kind, for metadata and logs
    pub fn kind(&self) -> String {
        match &self.model {
            ModelSpec::Pipeline(pipeline) => format!("pipeline[{}]", pipeline.estimator.kind_name()),
            other => other.kind_name().to_string(),
        }
    }

    /// Validate the artifact and build the classifier it describes
    pub fn build(self) -> Result<LoadedModel, LoadError> {
        if self.feature_version.is_some() || self.feature_layout_hash.is_some() {
            validate_layout(
                self.feature_version.unwrap_or(FEATURE_VERSION),
                self.feature_layout_hash.unwrap_or_else(layout_hash),
            )?;
        }

        match self.model {
            ModelSpec::LogisticRegression(spec) => {
                let regression = spec.build(Some(FEATURE_COUNT))?;
                Ok(LoadedModel::WithConfidence(Box::new(Positional::new(regression))))
            }
            ModelSpec::DecisionTree(spec) => {
                let tree = spec.build(FEATURE_COUNT)?;
                Ok(LoadedModel::DecisionOnly(Box::new(Positional::new(tree))))
            }
            ModelSpec::Pipeline(spec) => spec.build(),
        }
    }
}

impl ModelSpec {
    fn kind_name(&self) -> &'static str {
        match self {
            ModelSpec::LogisticRegression(_) => "logistic_regression",
            ModelSpec::DecisionTree(_) => "decision_tree",
            ModelSpec::Pipeline(_) => "pipeline",
        }
    }
}

impl LogisticRegressionSpec {
    /// `expected_width` is only enforced for pipelines; a positional model with
    /// the wrong width still loads and is routed to the tabular fallback.
    fn build(self, expected_width: Option<usize>) -> Result<LogisticRegression, LoadError> {
        if self.weights.is_empty() {
            return Err(LoadError::Invalid("logistic regression has no weights".to_string()));
        }
        if self.weights.iter().any(|w| !w.is_finite()) || !self.intercept.is_finite() {
            return Err(LoadError::Invalid("logistic regression has non-finite coefficients".to_string()));
        }
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(LoadError::Invalid(format!(
                "decision threshold {} outside [0, 1]",
                self.threshold
            )));
        }
        if let Some(width) = expected_width {
            if self.weights.len() != width {
                tracing::warn!(
                    "Logistic regression has {} weights, positional layout has {}",
                    self.weights.len(),
                    width
                );
            }
        }

        Ok(LogisticRegression {
            weights: self.weights,
            intercept: self.intercept,
            threshold: self.threshold,
        })
    }
}

impl DecisionTreeSpec {
    fn build(self, default_width: usize) -> Result<DecisionTree, LoadError> {
        let n_features = self.n_features.unwrap_or(default_width);
        let len = self.nodes.len();
        if len == 0 {
            return Err(LoadError::Invalid("decision tree has no nodes".to_string()));
        }

        let mut nodes = Vec::with_capacity(len);
        for (idx, node) in self.nodes.into_iter().enumerate() {
            let invalid = |msg: &str| LoadError::Invalid(format!("tree node {}: {}", idx, msg));

            let built = match node {
                NodeSpec { class: Some(class), feature: None, threshold: None, left: None, right: None } => {
                    TreeNode::Leaf { class }
                }
                NodeSpec {
                    class: None,
                    feature: Some(feature),
                    threshold: Some(threshold),
                    left: Some(left),
                    right: Some(right),
                } => {
                    if feature >= n_features {
                        return Err(invalid("feature index out of range"));
                    }
                    if !threshold.is_finite() {
                        return Err(invalid("non-finite threshold"));
                    }
                    // Children must come later; this rules out cycles
                    if left <= idx || right <= idx || left >= len || right >= len {
                        return Err(invalid("child index out of order"));
                    }
                    TreeNode::Split { feature, threshold, left, right }
                }
                _ => return Err(invalid("must be either a split or a leaf")),
            };
            nodes.push(built);
        }

        Ok(DecisionTree { nodes, n_features })
    }
}

impl PipelineSpec {
    fn build(self) -> Result<LoadedModel, LoadError> {
        if self.columns.is_empty() {
            return Err(LoadError::Invalid("pipeline has no columns".to_string()));
        }

        let columns: Vec<(String, ColumnTransform)> = self
            .columns
            .into_iter()
            .map(|column| {
                let transform = match column.encoding {
                    ColumnEncoding::Numeric => ColumnTransform::Numeric,
                    ColumnEncoding::OneHot(categories) => ColumnTransform::OneHot(categories),
                };
                (column.name, transform)
            })
            .collect();
        let width: usize = columns.iter().map(|(_, t)| t.width()).sum();

        match *self.estimator {
            ModelSpec::LogisticRegression(spec) => {
                let regression = spec.build(None)?;
                if regression.weights.len() != width {
                    return Err(LoadError::Invalid(format!(
                        "pipeline encodes {} features but estimator has {} weights",
                        width,
                        regression.weights.len()
                    )));
                }
                Ok(LoadedModel::WithConfidence(Box::new(Pipeline::new(columns, regression))))
            }
            ModelSpec::DecisionTree(spec) => {
                let tree = spec.build(width)?;
                if tree.n_features != width {
                    return Err(LoadError::Invalid(format!(
                        "pipeline encodes {} features but tree expects {}",
                        width, tree.n_features
                    )));
                }
                Ok(LoadedModel::DecisionOnly(Box::new(Pipeline::new(columns, tree))))
            }
            ModelSpec::Pipeline(_) => Err(LoadError::Invalid("nested pipelines are not supported".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::InputShape;
    use serde_json::json;

    fn artifact(value: serde_json::Value) -> ModelArtifact {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_logistic_regression_builds_with_confidence() {
        let model = artifact(json!({
            "kind": "logistic_regression",
            "weights": vec![0.1; FEATURE_COUNT],
            "intercept": -1.0
        }));
        assert_eq!(model.kind(), "logistic_regression");

        let loaded = model.build().unwrap();
        assert!(loaded.has_confidence());
        assert_eq!(loaded.input_shape(), InputShape::Vector);
    }

    #[test]
    fn test_decision_tree_builds_decision_only() {
        let loaded = artifact(json!({
            "kind": "decision_tree",
            "nodes": [
                { "feature": 6, "threshold": 0.5, "left": 1, "right": 2 },
                { "class": 0 },
                { "class": 1 }
            ]
        }))
        .build()
        .unwrap();
        assert!(!loaded.has_confidence());
    }

    #[test]
    fn test_tree_rejects_cycles_and_bad_nodes() {
        let cyclic = artifact(json!({
            "kind": "decision_tree",
            "nodes": [
                { "feature": 0, "threshold": 1.0, "left": 0, "right": 1 },
                { "class": 1 }
            ]
        }));
        assert!(matches!(cyclic.build(), Err(LoadError::Invalid(_))));

        let half = artifact(json!({
            "kind": "decision_tree",
            "nodes": [{ "feature": 0, "class": 1 }]
        }));
        assert!(matches!(half.build(), Err(LoadError::Invalid(_))));

        let out_of_range = artifact(json!({
            "kind": "decision_tree",
            "nodes": [
                { "feature": 21, "threshold": 1.0, "left": 1, "right": 2 },
                { "class": 0 },
                { "class": 1 }
            ]
        }));
        assert!(matches!(out_of_range.build(), Err(LoadError::Invalid(_))));
    }

    #[test]
    fn test_pipeline_width_must_match_estimator() {
        let good = artifact(json!({
            "kind": "pipeline",
            "columns": [
                { "name": "age" },
                { "name": "gender", "encoding": { "one_hot": ["M", "F"] } }
            ],
            "estimator": { "kind": "logistic_regression", "weights": [0.0, 1.0, -1.0], "intercept": 0.0 }
        }));
        assert_eq!(good.kind(), "pipeline[logistic_regression]");
        let loaded = good.build().unwrap();
        assert_eq!(loaded.input_shape(), InputShape::Columns);

        let bad = artifact(json!({
            "kind": "pipeline",
            "columns": [{ "name": "age" }],
            "estimator": { "kind": "logistic_regression", "weights": [0.0, 1.0], "intercept": 0.0 }
        }));
        assert!(matches!(bad.build(), Err(LoadError::Invalid(_))));
    }

    #[test]
    fn test_layout_pin_is_checked() {
        let pinned = artifact(json!({
            "kind": "logistic_regression",
            "feature_version": FEATURE_VERSION,
            "feature_layout_hash": layout_hash(),
            "weights": vec![0.0; FEATURE_COUNT],
            "intercept": 0.0
        }));
        assert!(pinned.build().is_ok());

        let stale = artifact(json!({
            "kind": "logistic_regression",
            "feature_version": FEATURE_VERSION + 1,
            "weights": vec![0.0; FEATURE_COUNT],
            "intercept": 0.0
        }));
        assert!(matches!(stale.build(), Err(LoadError::Layout(_))));
    }

    #[test]
    fn test_invalid_threshold_rejected() {
        let model = artifact(json!({
            "kind": "logistic_regression",
            "weights": [1.0],
            "intercept": 0.0,
            "threshold": 1.5
        }));
        assert!(matches!(model.build(), Err(LoadError::Invalid(_))));
    }
}
