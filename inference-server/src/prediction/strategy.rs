//! Invocation strategies - which input shape to offer the classifier

use crate::features::{FeatureVector, NamedRecord};
use crate::model::{InputShape, InvocationError, LoadedModel, ModelInput, RawPrediction};
use crate::models::QuestionnaireRecord;

/// One encoded submission, shared by every strategy
pub struct Submission<'a> {
    pub record: &'a QuestionnaireRecord,
    pub vector: &'a FeatureVector,
}

/// Offers one input representation to the model
pub trait InvocationStrategy: Send + Sync {
    fn shape(&self) -> InputShape;

    fn invoke(&self, model: &LoadedModel, submission: &Submission<'_>) -> Result<RawPrediction, InvocationError>;
}

/// Positional 21-slot vector (preferred)
pub struct VectorStrategy;

impl InvocationStrategy for VectorStrategy {
    fn shape(&self) -> InputShape {
        InputShape::Vector
    }

    fn invoke(&self, model: &LoadedModel, submission: &Submission<'_>) -> Result<RawPrediction, InvocationError> {
        model.invoke(&ModelInput::Vector(submission.vector))
    }
}

/// Named-column row built from the raw record (fallback)
pub struct TabularStrategy;

impl InvocationStrategy for TabularStrategy {
    fn shape(&self) -> InputShape {
        InputShape::Columns
    }

    fn invoke(&self, model: &LoadedModel, submission: &Submission<'_>) -> Result<RawPrediction, InvocationError> {
        let named = NamedRecord::from_record(submission.record);
        model.invoke(&ModelInput::Columns(&named))
    }
}
