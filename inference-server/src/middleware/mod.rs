//! Request extraction and validation

pub mod validation;
