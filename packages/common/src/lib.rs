pub mod editor;
pub mod prediction;
pub mod record;
pub mod scrap_class;
pub mod verification;

pub use editor::{EditError, PredictionDraft};
pub use prediction::{Prediction, PredictionError};
pub use record::{AnalysisRecord, PendingVerificationView};
pub use scrap_class::ScrapClass;
pub use verification::VerificationStatus;
