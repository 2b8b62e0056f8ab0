//! Bundled estimators and the input adapters that expose them as classifiers.
//!
//! Estimators work on plain `&[f64]` rows. [`Positional`] feeds them the
//! 21-slot feature vector; [`Pipeline`] builds the row from named columns.

use super::classifier::{
    Classifier, InputShape, InvocationError, ModelInput, ProbabilisticClassifier,
};
use crate::features::{ColumnValue, NamedRecord};

/// Positive class label
pub const POSITIVE_CLASS: i64 = 1;

// ============================================================================
// ROW MODELS
// ============================================================================

/// Estimator over a dense row of fixed width
pub trait RowModel: Send + Sync {
    fn n_features(&self) -> usize;

    /// Caller guarantees `row.len() == self.n_features()`
    fn decide(&self, row: &[f64]) -> i64;
}

/// Estimator that can also score the positive class
pub trait RowProbModel: RowModel {
    fn positive_proba(&self, row: &[f64]) -> f64;
}

fn check_width(expected: usize, row: &[f64]) -> Result<(), InvocationError> {
    if row.len() != expected {
        return Err(InvocationError::FeatureCount {
            expected,
            actual: row.len(),
        });
    }
    Ok(())
}

/// Binary logistic regression
#[derive(Debug, Clone)]
pub struct LogisticRegression {
    pub weights: Vec<f64>,
    pub intercept: f64,
    pub threshold: f64,
}

impl LogisticRegression {
    pub fn decision_function(&self, row: &[f64]) -> f64 {
        self.intercept
            + self.weights.iter().zip(row).map(|(w, x)| w * x).sum::<f64>()
    }
}

fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

impl RowModel for LogisticRegression {
    fn n_features(&self) -> usize {
        self.weights.len()
    }

    fn decide(&self, row: &[f64]) -> i64 {
        if self.positive_proba(row) >= self.threshold { POSITIVE_CLASS } else { 0 }
    }
}

impl RowProbModel for LogisticRegression {
    fn positive_proba(&self, row: &[f64]) -> f64 {
        sigmoid(self.decision_function(row))
    }
}

/// Decision tree node. Children always sit at higher indices than their parent.
#[derive(Debug, Clone, PartialEq)]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        class: i64,
    },
}

/// Single classification tree, class decision only
#[derive(Debug, Clone)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
    pub n_features: usize,
}

impl RowModel for DecisionTree {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn decide(&self, row: &[f64]) -> i64 {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                TreeNode::Leaf { class } => return *class,
                TreeNode::Split { feature, threshold, left, right } => {
                    idx = if row[*feature] <= *threshold { *left } else { *right };
                }
            }
        }
    }
}

// ============================================================================
// POSITIONAL ADAPTER
// ============================================================================

/// Classifier trained on the positional feature vector
pub struct Positional<M> {
    model: M,
}

impl<M: RowModel> Positional<M> {
    pub fn new(model: M) -> Self {
        Self { model }
    }

    fn row<'a>(&self, input: &'a ModelInput<'_>) -> Result<&'a [f64], InvocationError> {
        let ModelInput::Vector(vector) = input else {
            return Err(InvocationError::UnsupportedInput {
                expected: InputShape::Vector,
                actual: input.shape(),
            });
        };
        let row = vector.as_slice();
        check_width(self.model.n_features(), row)?;
        Ok(row)
    }
}

impl<M: RowModel> Classifier for Positional<M> {
    fn predict(&self, input: &ModelInput<'_>) -> Result<i64, InvocationError> {
        Ok(self.model.decide(self.row(input)?))
    }

    fn input_shape(&self) -> InputShape {
        InputShape::Vector
    }
}

impl<M: RowProbModel> ProbabilisticClassifier for Positional<M> {
    fn predict_proba(&self, input: &ModelInput<'_>) -> Result<f64, InvocationError> {
        Ok(self.model.positive_proba(self.row(input)?))
    }
}

// ============================================================================
// PIPELINE ADAPTER
// ============================================================================

/// How a named column turns into row entries
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnTransform {
    Numeric,
    /// Unknown categories encode as all zeros
    OneHot(Vec<String>),
}

impl ColumnTransform {
    pub fn width(&self) -> usize {
        match self {
            ColumnTransform::Numeric => 1,
            ColumnTransform::OneHot(categories) => categories.len(),
        }
    }
}

/// Classifier trained on named columns, with its own column encoding
pub struct Pipeline<M> {
    columns: Vec<(String, ColumnTransform)>,
    model: M,
}

impl<M: RowModel> Pipeline<M> {
    pub fn new(columns: Vec<(String, ColumnTransform)>, model: M) -> Self {
        Self { columns, model }
    }

    /// Total width of the encoded row
    pub fn width(&self) -> usize {
        self.columns.iter().map(|(_, t)| t.width()).sum()
    }

    fn row(&self, input: &ModelInput<'_>) -> Result<Vec<f64>, InvocationError> {
        let ModelInput::Columns(named) = input else {
            return Err(InvocationError::UnsupportedInput {
                expected: InputShape::Columns,
                actual: input.shape(),
            });
        };
        let row = self.transform(named)?;
        check_width(self.model.n_features(), &row)?;
        Ok(row)
    }

    fn transform(&self, named: &NamedRecord) -> Result<Vec<f64>, InvocationError> {
        let mut row = Vec::with_capacity(self.width());

        for (name, transform) in &self.columns {
            let value = named
                .get(name)
                .ok_or_else(|| InvocationError::MissingColumn(name.clone()))?;

            match transform {
                ColumnTransform::Numeric => {
                    let number = value.as_number().ok_or_else(|| InvocationError::ColumnType {
                        column: name.clone(),
                        expected: "numeric",
                    })?;
                    row.push(number);
                }
                ColumnTransform::OneHot(categories) => {
                    let text = match value {
                        ColumnValue::Text(text) => text.clone(),
                        ColumnValue::Number(n) => n.to_string(),
                    };
                    row.extend(categories.iter().map(|c| if *c == text { 1.0 } else { 0.0 }));
                }
            }
        }

        Ok(row)
    }
}

impl<M: RowModel> Classifier for Pipeline<M> {
    fn predict(&self, input: &ModelInput<'_>) -> Result<i64, InvocationError> {
        Ok(self.model.decide(&self.row(input)?))
    }

    fn input_shape(&self) -> InputShape {
        InputShape::Columns
    }
}

impl<M: RowProbModel> ProbabilisticClassifier for Pipeline<M> {
    fn predict_proba(&self, input: &ModelInput<'_>) -> Result<f64, InvocationError> {
        Ok(self.model.positive_proba(&self.row(input)?))
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::{encode, FeatureVector, FEATURE_COUNT};
    use crate::models::questionnaire::sample_record;

    fn aq_regression() -> LogisticRegression {
        // Only the AQ-10 answers carry weight
        let mut weights = vec![0.0; FEATURE_COUNT];
        for w in &mut weights[6..16] {
            *w = 1.0;
        }
        LogisticRegression { weights, intercept: -5.5, threshold: 0.5 }
    }

    #[test]
    fn test_sigmoid_is_stable() {
        assert_eq!(sigmoid(0.0), 0.5);
        assert!(sigmoid(-1000.0) >= 0.0);
        assert!(sigmoid(1000.0) <= 1.0);
        assert!((sigmoid(2.0) + sigmoid(-2.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_logistic_regression_on_vector() {
        let model = Positional::new(aq_regression());
        let mut record = sample_record();

        let vector = encode(&record);
        let input = ModelInput::Vector(&vector);
        assert_eq!(model.predict(&input).unwrap(), 0);
        assert!(model.predict_proba(&input).unwrap() < 0.5);

        record.a6 = 1;
        record.a7 = 1;
        let vector = encode(&record);
        let input = ModelInput::Vector(&vector);
        assert_eq!(model.predict(&input).unwrap(), POSITIVE_CLASS);
        assert!(model.predict_proba(&input).unwrap() > 0.5);
    }

    #[test]
    fn test_positional_rejects_wrong_width() {
        let mut regression = aq_regression();
        regression.weights.truncate(18);
        let model = Positional::new(regression);

        let vector = FeatureVector::new();
        let err = model.predict(&ModelInput::Vector(&vector)).unwrap_err();
        assert!(matches!(err, InvocationError::FeatureCount { expected: 18, actual: 21 }));
    }

    #[test]
    fn test_decision_tree_walks_to_leaf() {
        let tree = DecisionTree {
            n_features: FEATURE_COUNT,
            nodes: vec![
                TreeNode::Split { feature: 0, threshold: 17.5, left: 1, right: 2 },
                TreeNode::Leaf { class: 0 },
                TreeNode::Split { feature: 6, threshold: 0.5, left: 3, right: 4 },
                TreeNode::Leaf { class: 0 },
                TreeNode::Leaf { class: 1 },
            ],
        };
        let model = Positional::new(tree);

        let mut record = sample_record();
        let vector = encode(&record);
        assert_eq!(model.predict(&ModelInput::Vector(&vector)).unwrap(), 1);

        record.age = 10;
        let vector = encode(&record);
        assert_eq!(model.predict(&ModelInput::Vector(&vector)).unwrap(), 0);
    }

    #[test]
    fn test_pipeline_requires_columns() {
        let pipeline = Pipeline::new(
            vec![
                ("age".to_string(), ColumnTransform::Numeric),
                ("gender".to_string(), ColumnTransform::OneHot(vec!["M".into(), "F".into()])),
            ],
            LogisticRegression { weights: vec![0.0, 2.0, -2.0], intercept: 0.0, threshold: 0.5 },
        );
        assert_eq!(pipeline.width(), 3);

        let record = sample_record();
        let vector = encode(&record);
        let err = pipeline.predict(&ModelInput::Vector(&vector)).unwrap_err();
        assert!(matches!(err, InvocationError::UnsupportedInput { .. }));

        let named = NamedRecord::from_record(&record);
        let input = ModelInput::Columns(&named);
        assert_eq!(pipeline.predict(&input).unwrap(), 1);
        assert!((pipeline.predict_proba(&input).unwrap() - sigmoid(2.0)).abs() < 1e-12);
    }

    #[test]
    fn test_pipeline_column_errors() {
        let missing = Pipeline::new(
            vec![("screening_score".to_string(), ColumnTransform::Numeric)],
            LogisticRegression { weights: vec![1.0], intercept: 0.0, threshold: 0.5 },
        );
        let named = NamedRecord::from_record(&sample_record());
        let err = missing.predict(&ModelInput::Columns(&named)).unwrap_err();
        assert!(matches!(err, InvocationError::MissingColumn(ref c) if c == "screening_score"));

        let wrong_type = Pipeline::new(
            vec![("gender".to_string(), ColumnTransform::Numeric)],
            LogisticRegression { weights: vec![1.0], intercept: 0.0, threshold: 0.5 },
        );
        let err = wrong_type.predict(&ModelInput::Columns(&named)).unwrap_err();
        assert!(matches!(err, InvocationError::ColumnType { .. }));
    }

    #[test]
    fn test_unknown_category_encodes_as_zeros() {
        let pipeline = Pipeline::new(
            vec![("ethnicity".to_string(), ColumnTransform::OneHot(vec!["Asian".into(), "Latino".into()]))],
            LogisticRegression { weights: vec![3.0, 3.0], intercept: -1.0, threshold: 0.5 },
        );
        let named = NamedRecord::from_record(&sample_record());
        let proba = pipeline.predict_proba(&ModelInput::Columns(&named)).unwrap();
        assert!((proba - sigmoid(-1.0)).abs() < 1e-12);
    }
}
