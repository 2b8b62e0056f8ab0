//! Prediction Module - from validated record to canonical result

pub mod normalizer;
pub mod strategy;
pub mod predictor;

pub use normalizer::{label_for, normalize};
pub use predictor::Predictor;
pub use strategy::{InvocationStrategy, TabularStrategy, VectorStrategy};
