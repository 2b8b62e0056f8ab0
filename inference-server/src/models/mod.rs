//! Data models

pub mod questionnaire;
pub mod prediction;

pub use questionnaire::*;
pub use prediction::*;
