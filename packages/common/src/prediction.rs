use serde::{Deserialize, Serialize};

/// A single classifier prediction: a class label and a confidence fraction.
///
/// For scrap predictions the class is one of [`crate::ScrapClass`]; for plate
/// predictions it holds the recognized plate text. Confidence is always a
/// fraction in `[0, 1]`; user-facing percentages are `confidence * 100` and
/// are converted back on write.
///
/// Deserialization is strict: an empty class or an out-of-range confidence in
/// a backend payload is an error, never silently defaulted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(try_from = "RawPrediction")]
pub struct Prediction {
    /// Class label (scrap type, or plate text for plate predictions).
    #[schema(example = "K2")]
    pub class: String,
    /// Confidence fraction in `[0, 1]`.
    #[schema(example = 0.92)]
    pub confidence: f64,
}

/// Unvalidated wire shape backing [`Prediction`] deserialization.
#[derive(Deserialize)]
struct RawPrediction {
    class: String,
    confidence: f64,
}

/// Validation error for prediction fields.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PredictionError {
    #[error("prediction class must not be empty")]
    EmptyClass,
    #[error("confidence {0} is outside [0, 1]")]
    ConfidenceOutOfRange(f64),
    #[error("confidence percentage {0} is outside [0, 100]")]
    PercentOutOfRange(f64),
}

impl TryFrom<RawPrediction> for Prediction {
    type Error = PredictionError;

    fn try_from(raw: RawPrediction) -> Result<Self, Self::Error> {
        Prediction::new(raw.class, raw.confidence)
    }
}

impl Prediction {
    /// Build a validated prediction.
    pub fn new(class: impl Into<String>, confidence: f64) -> Result<Self, PredictionError> {
        let class = class.into();
        if class.trim().is_empty() {
            return Err(PredictionError::EmptyClass);
        }
        if !(0.0..=1.0).contains(&confidence) || !confidence.is_finite() {
            return Err(PredictionError::ConfidenceOutOfRange(confidence));
        }
        Ok(Self { class, confidence })
    }

    /// Confidence as a user-facing percentage. Rounding is left to display.
    pub fn confidence_percent(&self) -> f64 {
        self.confidence * 100.0
    }
}

/// Convert a user-facing percentage (0-100) to a confidence fraction.
pub fn percent_to_confidence(percent: f64) -> Result<f64, PredictionError> {
    if !(0.0..=100.0).contains(&percent) || !percent.is_finite() {
        return Err(PredictionError::PercentOutOfRange(percent));
    }
    Ok(percent / 100.0)
}

/// Sort predictions by confidence, highest first.
///
/// The backend does not enforce this order, so readers sort defensively.
/// The sort is stable: equal confidences keep their stored order. Plate
/// predictions are never sorted this way; their order is the reading order
/// of the plate text.
pub fn sort_by_confidence_desc(predictions: &mut [Prediction]) {
    predictions.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
}
