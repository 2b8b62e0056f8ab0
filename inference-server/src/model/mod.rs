//! Model Module - classifier capability, bundled estimators, artifact loading
//!
//! The rest of the service only sees [`LoadedModel`]; swapping the artifact
//! format never touches encoding or normalization.

pub mod classifier;
pub mod estimators;
pub mod artifact;
pub mod loader;

// Re-export common types
pub use classifier::{
    Classifier, InputShape, InvocationError, LoadedModel, ModelInput,
    ProbabilisticClassifier, RawPrediction,
};
pub use estimators::POSITIVE_CLASS;
pub use loader::{load_from_bytes, load_model, LoadError, ModelMetadata};
