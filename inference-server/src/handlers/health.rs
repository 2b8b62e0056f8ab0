//! Health and service info handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

pub const SERVICE_NAME: &str = "Autism Prediction System API";

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    model_loaded: bool,
    timestamp: i64,
}

#[derive(Serialize)]
pub struct ServiceInfo {
    name: &'static str,
    version: &'static str,
    model_path: String,
    status: &'static str,
}

pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        model_loaded: state.predictor.is_some(),
        timestamp: chrono::Utc::now().timestamp(),
    })
}

/// `GET /`
pub async fn root(State(state): State<AppState>) -> Json<ServiceInfo> {
    Json(ServiceInfo {
        name: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
        model_path: state.config.model_path.display().to_string(),
        status: if state.predictor.is_some() { "ok" } else { "model_unavailable" },
    })
}
