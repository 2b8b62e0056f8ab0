//! Model loader - reads the classifier artifact once at startup

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};
use thiserror::Error;

use super::artifact::ModelArtifact;
use super::classifier::{InputShape, LoadedModel};
use crate::features::LayoutMismatchError;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Model file not found at {}. Set MODEL_PATH or place 'autism_model.json' next to the server.", .0.display())]
    NotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed model artifact: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid model artifact: {0}")]
    Invalid(String),

    #[error(transparent)]
    Layout(#[from] LayoutMismatchError),
}

/// What was loaded, reported by `GET /model`
#[derive(Debug, Clone, Serialize)]
pub struct ModelMetadata {
    pub model_path: String,
    pub kind: String,
    pub input_shape: InputShape,
    pub has_confidence: bool,
    pub sha256: String,
    pub size_bytes: usize,
    pub loaded_at: DateTime<Utc>,
}

/// Load and validate the artifact at `path`
pub fn load_model(path: &Path) -> Result<(LoadedModel, ModelMetadata), LoadError> {
    tracing::info!("Loading model from: {}", path.display());

    if !path.exists() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }

    let bytes = std::fs::read(path)?;
    load_from_bytes(&bytes, &path.display().to_string())
}

/// Load from an in-memory artifact; `source` is recorded in the metadata
pub fn load_from_bytes(bytes: &[u8], source: &str) -> Result<(LoadedModel, ModelMetadata), LoadError> {
    let sha256 = hex::encode(Sha256::digest(bytes));

    let artifact: ModelArtifact = serde_json::from_slice(bytes)?;
    let kind = artifact.kind();
    let model = artifact.build()?;

    let metadata = ModelMetadata {
        model_path: source.to_string(),
        kind,
        input_shape: model.input_shape(),
        has_confidence: model.has_confidence(),
        sha256,
        size_bytes: bytes.len(),
        loaded_at: Utc::now(),
    };

    tracing::info!(
        kind = %metadata.kind,
        confidence = metadata.has_confidence,
        sha256 = %metadata.sha256,
        "Model loaded successfully"
    );

    Ok((model, metadata))
}
