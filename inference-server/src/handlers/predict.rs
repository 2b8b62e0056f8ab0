//! Prediction handler

use axum::{extract::State, Json};
use uuid::Uuid;

use crate::{AppState, AppResult};
use crate::middleware::validation::ValidatedJson;
use crate::models::{PredictionResult, QuestionnaireRecord};

/// Screen one questionnaire submission
pub async fn predict(
    State(state): State<AppState>,
    ValidatedJson(record): ValidatedJson<QuestionnaireRecord>,
) -> AppResult<Json<PredictionResult>> {
    let predictor = state.predictor()?;
    let request_id = Uuid::new_v4();

    let result = predictor.predict(&record)?;

    tracing::info!(
        %request_id,
        aq_score = record.aq_score(),
        prediction = result.prediction.as_str(),
        probability = result.probability,
        "Prediction served"
    );

    Ok(Json(result))
}
