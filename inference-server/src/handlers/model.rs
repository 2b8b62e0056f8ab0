//! Model info handler

use axum::{extract::State, Json};
use serde::Serialize;

use crate::{AppState, AppResult};
use crate::features::LayoutInfo;
use crate::model::ModelMetadata;

#[derive(Serialize)]
pub struct ModelInfo {
    #[serde(flatten)]
    metadata: ModelMetadata,
    tabular_fallback: bool,
    feature_layout: LayoutInfo,
}

/// Describe the loaded classifier and the feature layout it is fed
pub async fn info(State(state): State<AppState>) -> AppResult<Json<ModelInfo>> {
    let predictor = state.predictor()?;

    Ok(Json(ModelInfo {
        metadata: predictor.metadata().clone(),
        tabular_fallback: predictor.has_fallback(),
        feature_layout: LayoutInfo::current(),
    }))
}
