//! Classifier capability - the seam between this service and a trained model
//!
//! A model always exposes a class decision. Some models also expose a
//! confidence for the positive class; which kind we hold is decided once at
//! load time and captured by [`LoadedModel`].

use thiserror::Error;

use crate::features::{FeatureVector, NamedRecord};

// ============================================================================
// INPUT
// ============================================================================

/// The two input shapes a classifier may accept
#[derive(Debug, Clone, Copy)]
pub enum ModelInput<'a> {
    /// Positional 21-slot vector
    Vector(&'a FeatureVector),
    /// One named column per submitted field
    Columns(&'a NamedRecord),
}

impl ModelInput<'_> {
    pub fn shape(&self) -> InputShape {
        match self {
            ModelInput::Vector(_) => InputShape::Vector,
            ModelInput::Columns(_) => InputShape::Columns,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputShape {
    Vector,
    Columns,
}

impl std::fmt::Display for InputShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputShape::Vector => write!(f, "positional vector"),
            InputShape::Columns => write!(f, "named columns"),
        }
    }
}

// ============================================================================
// ERROR HANDLING
// ============================================================================

/// Failure while invoking the classifier
#[derive(Debug, Clone, Error)]
pub enum InvocationError {
    #[error("classifier expects {expected} input, got {actual}")]
    UnsupportedInput { expected: InputShape, actual: InputShape },

    #[error("classifier expects {expected} features, got {actual}")]
    FeatureCount { expected: usize, actual: usize },

    #[error("missing column '{0}'")]
    MissingColumn(String),

    #[error("column '{column}' must be {expected}")]
    ColumnType { column: String, expected: &'static str },

    #[error("classifier returned an invalid confidence ({0})")]
    InvalidConfidence(f64),

    #[error("Prediction failed and the tabular fallback is not available: {0}")]
    FallbackUnavailable(Box<InvocationError>),

    #[error("Prediction failed: {fallback} (vector input: {primary})")]
    FallbackFailed {
        primary: Box<InvocationError>,
        fallback: Box<InvocationError>,
    },
}

// ============================================================================
// CAPABILITY TRAITS
// ============================================================================

/// Class decision over a model input
pub trait Classifier: Send + Sync {
    fn predict(&self, input: &ModelInput<'_>) -> Result<i64, InvocationError>;

    /// Input shape this classifier was trained on
    fn input_shape(&self) -> InputShape;
}

/// Classifier that also reports the positive-class probability
pub trait ProbabilisticClassifier: Classifier {
    fn predict_proba(&self, input: &ModelInput<'_>) -> Result<f64, InvocationError>;
}

/// Raw classifier output, before normalization
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawPrediction {
    pub class: i64,
    pub confidence: Option<f64>,
}

/// A loaded classifier, tagged with its capability
pub enum LoadedModel {
    DecisionOnly(Box<dyn Classifier>),
    WithConfidence(Box<dyn ProbabilisticClassifier>),
}

impl LoadedModel {
    pub fn has_confidence(&self) -> bool {
        matches!(self, LoadedModel::WithConfidence(_))
    }

    pub fn input_shape(&self) -> InputShape {
        match self {
            LoadedModel::DecisionOnly(model) => model.input_shape(),
            LoadedModel::WithConfidence(model) => model.input_shape(),
        }
    }

    /// Run the model once. NaN confidences are rejected here, never normalized.
    pub fn invoke(&self, input: &ModelInput<'_>) -> Result<RawPrediction, InvocationError> {
        match self {
            LoadedModel::DecisionOnly(model) => Ok(RawPrediction {
                class: model.predict(input)?,
                confidence: None,
            }),
            LoadedModel::WithConfidence(model) => {
                let confidence = model.predict_proba(input)?;
                if confidence.is_nan() {
                    return Err(InvocationError::InvalidConfidence(confidence));
                }
                Ok(RawPrediction {
                    class: model.predict(input)?,
                    confidence: Some(confidence),
                })
            }
        }
    }
}

impl std::fmt::Debug for LoadedModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let variant = match self {
            LoadedModel::DecisionOnly(_) => "DecisionOnly",
            LoadedModel::WithConfidence(_) => "WithConfidence",
        };
        f.debug_struct("LoadedModel")
            .field("capability", &variant)
            .field("input_shape", &self.input_shape())
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod stubs {
    //! Hand-built classifiers for exercising the capability seam
    use super::*;

    /// Returns a fixed class/probability for one input shape, errors otherwise
    pub struct Fixed {
        pub shape: InputShape,
        pub class: i64,
        pub proba: f64,
    }

    impl Classifier for Fixed {
        fn predict(&self, input: &ModelInput<'_>) -> Result<i64, InvocationError> {
            if input.shape() != self.shape {
                return Err(InvocationError::UnsupportedInput {
                    expected: self.shape,
                    actual: input.shape(),
                });
            }
            Ok(self.class)
        }

        fn input_shape(&self) -> InputShape {
            self.shape
        }
    }

    impl ProbabilisticClassifier for Fixed {
        fn predict_proba(&self, input: &ModelInput<'_>) -> Result<f64, InvocationError> {
            self.predict(input)?;
            Ok(self.proba)
        }
    }

    pub fn decision_only(shape: InputShape, class: i64) -> LoadedModel {
        LoadedModel::DecisionOnly(Box::new(Fixed { shape, class, proba: 0.0 }))
    }

    pub fn with_confidence(shape: InputShape, class: i64, proba: f64) -> LoadedModel {
        LoadedModel::WithConfidence(Box::new(Fixed { shape, class, proba }))
    }
}
