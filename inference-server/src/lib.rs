//! ASD Screening Inference Server
//!
//! Turns an AQ-10 questionnaire submission into a screening prediction.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                  POST /predict (Axum)                        │
//! ├──────────────────────────────────────────────────────────────┤
//! │  ValidatedJson ──▶ Encoder ──▶ Strategies ──▶ Normalizer     │
//! │  (validator)       (21-slot    vector, then   (label +       │
//! │                     vector)    named columns)  clamp)        │
//! │                                   │                          │
//! │                                   ▼                          │
//! │                           LoadedModel (read-only,            │
//! │                           loaded once at startup)            │
//! └──────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod features;
pub mod handlers;
pub mod middleware;
pub mod model;
pub mod models;
pub mod prediction;

use std::sync::Arc;

use axum::{
    Router,
    http::HeaderValue,
    routing::{get, post},
};
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
    compression::CompressionLayer,
};

pub use config::Config;
pub use error::{AppError, AppResult};
use prediction::Predictor;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// `None` when the model failed to load at startup
    pub predictor: Option<Arc<Predictor>>,
    pub config: Config,
}

impl AppState {
    pub fn new(predictor: Option<Predictor>, config: Config) -> Self {
        Self {
            predictor: predictor.map(Arc::new),
            config,
        }
    }

    /// The loaded predictor, or `ModelUnavailable`
    pub fn predictor(&self) -> AppResult<&Predictor> {
        self.predictor.as_deref().ok_or(AppError::ModelUnavailable)
    }
}

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    Router::new()
        .route("/", get(handlers::health::root))
        .route("/health", get(handlers::health::check))
        .route("/model", get(handlers::model::info))
        .route("/predict", post(handlers::predict::predict))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// CORS from the configured allow-list.
///
/// Credentials are only allowed with an explicit list; browsers reject
/// credentialed wildcard responses.
pub fn cors_layer(config: &Config) -> CorsLayer {
    if config.allows_any_origin() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {:?}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}
