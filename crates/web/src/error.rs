use cirrhosis_core::PredictionError;

/// Problems with the raw values of a submitted form.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum FormError {
    #[error("{0} is required")]
    MissingValue(&'static str),
    #[error("{label} has no option {value:?}")]
    UnknownOption { label: &'static str, value: String },
    #[error("{label} must be a number, got {value:?}")]
    InvalidNumber { label: &'static str, value: String },
}

/// Anything that stops a submission from producing a prediction sentence.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error(transparent)]
    Form(#[from] FormError),
    #[error(transparent)]
    Prediction(#[from] PredictionError),
}
