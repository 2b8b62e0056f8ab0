//! Features Module - questionnaire encoding
//!
//! Turns a validated submission into the inputs a classifier accepts:
//! the positional vector (preferred) or the named-column row (fallback).

pub mod layout;
pub mod vector;
pub mod encoder;
pub mod columns;


// Re-export common types
pub use layout::{FEATURE_COUNT, FEATURE_LAYOUT, LayoutInfo, LayoutMismatchError};
pub use vector::FeatureVector;
pub use encoder::encode;
pub use columns::{ColumnValue, NamedRecord};
