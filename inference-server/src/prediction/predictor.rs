//! Predictor - encode, invoke (with one fallback), normalize

use crate::features::encode;
use crate::model::{InvocationError, LoadedModel, ModelMetadata, RawPrediction};
use crate::models::{PredictionResult, QuestionnaireRecord};
use super::normalizer::normalize;
use super::strategy::{InvocationStrategy, Submission, TabularStrategy, VectorStrategy};

/// Loaded model plus the fixed strategy order. Built once at startup and
/// shared read-only across requests.
pub struct Predictor {
    model: LoadedModel,
    metadata: ModelMetadata,
    primary: Box<dyn InvocationStrategy>,
    fallback: Option<Box<dyn InvocationStrategy>>,
}

impl Predictor {
    /// `tabular_fallback` decides whether the named-column retry exists at all
    pub fn new(model: LoadedModel, metadata: ModelMetadata, tabular_fallback: bool) -> Self {
        let fallback: Option<Box<dyn InvocationStrategy>> = if tabular_fallback {
            Some(Box::new(TabularStrategy))
        } else {
            None
        };

        Self {
            model,
            metadata,
            primary: Box::new(VectorStrategy),
            fallback,
        }
    }

    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    pub fn has_fallback(&self) -> bool {
        self.fallback.is_some()
    }

    /// Run one validated record through the model
    pub fn predict(&self, record: &QuestionnaireRecord) -> Result<PredictionResult, InvocationError> {
        let vector = encode(record);
        tracing::debug!(features = %vector.to_log_entry(), "Encoded questionnaire");

        let submission = Submission { record, vector: &vector };

        let raw = match self.primary.invoke(&self.model, &submission) {
            Ok(raw) => raw,
            Err(primary) => {
                tracing::warn!("{} invocation failed: {}", self.primary.shape(), primary);
                self.retry(&submission, primary)?
            }
        };

        Ok(normalize(raw))
    }

    fn retry(
        &self,
        submission: &Submission<'_>,
        primary: InvocationError,
    ) -> Result<RawPrediction, InvocationError> {
        let Some(fallback) = &self.fallback else {
            return Err(InvocationError::FallbackUnavailable(Box::new(primary)));
        };

        tracing::info!("Retrying with {} input", fallback.shape());
        fallback.invoke(&self.model, submission).map_err(|err| {
            tracing::error!("{} invocation failed: {}", fallback.shape(), err);
            InvocationError::FallbackFailed {
                primary: Box::new(primary),
                fallback: Box::new(err),
            }
        })
    }
}
