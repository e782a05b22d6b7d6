use crate::prediction::{Prediction, PredictionError, percent_to_confidence};
use crate::record::AnalysisRecord;
use crate::scrap_class::ScrapClass;

/// Error produced by draft edits, always before any network call.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EditError {
    #[error("no prediction at index {0}")]
    IndexOutOfRange(usize),
    #[error(transparent)]
    Invalid(#[from] PredictionError),
}

/// An uncommitted working copy of a record's predictions.
///
/// Built by value from the record, so edits never touch the displayed record
/// and discarding the draft is a true rollback. Scrap classes are constrained
/// to the closed [`ScrapClass`] set by the setter signature; plate "class"
/// fields hold free plate text. Confidence edits arrive as user-facing
/// percentages and are stored as fractions.
#[derive(Clone, Debug, PartialEq)]
pub struct PredictionDraft {
    scrap: Vec<Prediction>,
    plate: Vec<Prediction>,
}

impl PredictionDraft {
    /// Clone the record's prediction arrays into a fresh draft.
    pub fn begin(record: &AnalysisRecord) -> Self {
        Self {
            scrap: record.scrap_predictions.clone(),
            plate: record.plate_predictions.clone(),
        }
    }

    pub fn scrap(&self) -> &[Prediction] {
        &self.scrap
    }

    pub fn plate(&self) -> &[Prediction] {
        &self.plate
    }

    pub fn set_scrap_class(&mut self, index: usize, class: ScrapClass) -> Result<(), EditError> {
        let slot = self
            .scrap
            .get_mut(index)
            .ok_or(EditError::IndexOutOfRange(index))?;
        slot.class = class.as_str().to_string();
        Ok(())
    }

    pub fn set_scrap_confidence_percent(
        &mut self,
        index: usize,
        percent: f64,
    ) -> Result<(), EditError> {
        let confidence = percent_to_confidence(percent)?;
        let slot = self
            .scrap
            .get_mut(index)
            .ok_or(EditError::IndexOutOfRange(index))?;
        slot.confidence = confidence;
        Ok(())
    }

    pub fn set_plate_text(&mut self, index: usize, text: &str) -> Result<(), EditError> {
        if text.trim().is_empty() {
            return Err(PredictionError::EmptyClass.into());
        }
        let slot = self
            .plate
            .get_mut(index)
            .ok_or(EditError::IndexOutOfRange(index))?;
        slot.class = text.to_string();
        Ok(())
    }

    pub fn set_plate_confidence_percent(
        &mut self,
        index: usize,
        percent: f64,
    ) -> Result<(), EditError> {
        let confidence = percent_to_confidence(percent)?;
        let slot = self
            .plate
            .get_mut(index)
            .ok_or(EditError::IndexOutOfRange(index))?;
        slot.confidence = confidence;
        Ok(())
    }

    /// Yield the edited arrays for a verify call. Persists nothing.
    pub fn commit(self) -> (Vec<Prediction>, Vec<Prediction>) {
        (self.scrap, self.plate)
    }
}
