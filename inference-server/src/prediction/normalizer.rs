//! Prediction Normalizer - raw classifier output → canonical result

use crate::model::{RawPrediction, POSITIVE_CLASS};
use crate::models::{PredictionLabel, PredictionResult};

/// Label for a class decision. Only the positive class maps to "Likely ASD".
pub fn label_for(class: i64) -> PredictionLabel {
    if class == POSITIVE_CLASS {
        PredictionLabel::LikelyAsd
    } else {
        PredictionLabel::NotAsd
    }
}

/// Canonicalize raw output.
///
/// Without a confidence the probability degenerates to 1.0/0.0 from the class
/// decision. The result is always clamped into [0, 1]. NaN confidences are
/// rejected by [`crate::model::LoadedModel::invoke`] and never reach here.
pub fn normalize(raw: RawPrediction) -> PredictionResult {
    let probability = raw.confidence.unwrap_or(if raw.class == POSITIVE_CLASS { 1.0 } else { 0.0 });

    PredictionResult {
        prediction: label_for(raw.class),
        probability: probability.clamp(0.0, 1.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(class: i64, confidence: Option<f64>) -> RawPrediction {
        RawPrediction { class, confidence }
    }

    #[test]
    fn test_confidence_passes_through() {
        let result = normalize(raw(1, Some(0.87)));
        assert_eq!(result.prediction, PredictionLabel::LikelyAsd);
        assert_eq!(result.probability, 0.87);
    }

    #[test]
    fn test_degenerate_probability_without_confidence() {
        let negative = normalize(raw(0, None));
        assert_eq!(negative.prediction, PredictionLabel::NotAsd);
        assert_eq!(negative.probability, 0.0);

        let positive = normalize(raw(1, None));
        assert_eq!(positive.prediction, PredictionLabel::LikelyAsd);
        assert_eq!(positive.probability, 1.0);
    }

    #[test]
    fn test_out_of_range_confidence_is_clamped() {
        let result = normalize(raw(1, Some(1.4)));
        assert_eq!(result.prediction, PredictionLabel::LikelyAsd);
        assert_eq!(result.probability, 1.0);

        assert_eq!(normalize(raw(0, Some(-0.3))).probability, 0.0);
        assert_eq!(normalize(raw(0, Some(f64::INFINITY))).probability, 1.0);
        assert_eq!(normalize(raw(0, Some(f64::NEG_INFINITY))).probability, 0.0);
    }

    #[test]
    fn test_clamp_over_sweep() {
        let mut p = -3.0;
        while p <= 3.0 {
            for class in [0, 1] {
                let result = normalize(raw(class, Some(p)));
                assert!((0.0..=1.0).contains(&result.probability), "p={}", p);
            }
            p += 0.05;
        }
    }

    #[test]
    fn test_label_follows_class_not_probability() {
        assert_eq!(normalize(raw(1, Some(0.01))).prediction, PredictionLabel::LikelyAsd);
        assert_eq!(normalize(raw(0, Some(0.99))).prediction, PredictionLabel::NotAsd);
        for class in [-1, 2, 7, i64::MAX] {
            assert_eq!(label_for(class), PredictionLabel::NotAsd);
            assert_eq!(normalize(raw(class, None)).probability, 0.0);
        }
    }
}
