//! The scoring capability and the service that wraps it for request handling.

use std::fmt;
use std::sync::Arc;

use crate::constants::{NEGATIVE_SENTENCE, POSITIVE_SENTENCE};
use crate::error::PredictionResult;
use crate::record::PatientRecord;

/// Class label returned by a classifier. `1` means predicted cirrhosis-positive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Label(pub i64);

impl Label {
    pub const POSITIVE: Label = Label(1);
    pub const NEGATIVE: Label = Label(0);

    pub fn is_positive(self) -> bool {
        self == Self::POSITIVE
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Anything that maps a single patient record to a class label.
///
/// Implementations must be safe to share across concurrent requests; they are built once at
/// startup and never mutated afterwards.
pub trait Scorer: Send + Sync {
    fn predict(&self, record: &PatientRecord) -> PredictionResult<Label>;
}

/// Map a label to the sentence shown to the user.
///
/// Only [`Label::POSITIVE`] yields the positive sentence; every other value, including labels a
/// misbehaving scorer might return, yields the negative one.
pub fn prediction_sentence(label: Label) -> &'static str {
    if label.is_positive() {
        POSITIVE_SENTENCE
    } else {
        NEGATIVE_SENTENCE
    }
}

/// Prediction operations injected into the form server.
///
/// Holds the process-wide scorer behind an `Arc`, so clones share the same loaded model.
#[derive(Clone)]
pub struct PredictionService {
    scorer: Arc<dyn Scorer>,
}

impl PredictionService {
    pub fn new(scorer: Arc<dyn Scorer>) -> Self {
        Self { scorer }
    }

    /// Score one record. Every call recomputes from scratch.
    pub fn predict(&self, record: &PatientRecord) -> PredictionResult<Label> {
        tracing::debug!(?record, "scoring patient record");
        let label = self.scorer.predict(record)?;
        tracing::debug!(%label, "prediction complete");
        Ok(label)
    }

    /// Score one record and map the label to its fixed sentence.
    pub fn predict_sentence(&self, record: &PatientRecord) -> PredictionResult<&'static str> {
        self.predict(record).map(prediction_sentence)
    }
}

impl fmt::Debug for PredictionService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PredictionService").finish_non_exhaustive()
    }
}
