//! Prediction result model

use serde::{Deserialize, Serialize};

/// Screening outcome label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PredictionLabel {
    #[serde(rename = "Likely ASD")]
    LikelyAsd,
    #[serde(rename = "Not ASD")]
    NotAsd,
}

impl PredictionLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            PredictionLabel::LikelyAsd => "Likely ASD",
            PredictionLabel::NotAsd => "Not ASD",
        }
    }
}

/// Response body of `POST /predict`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub prediction: PredictionLabel,
    /// Probability of the positive class, always within [0.0, 1.0]
    pub probability: f64,
}
