use std::path::PathBuf;

/// Failures while locating, reading or validating the serialized pipeline.
///
/// Every variant is fatal at startup: the process must not serve without a model.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("model artifact not found: {0}")]
    NotFound(PathBuf),
    #[error("failed to read model artifact {path}: {source}", path = path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to deserialize model artifact: {0}")]
    Deserialization(#[from] serde_json::Error),
    #[error("unsupported model format version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },
    #[error("invalid model artifact: {0}")]
    Invalid(String),
}

pub type ModelResult<T> = std::result::Result<T, ModelError>;

/// Per-call scoring failures. These are propagated to the caller, never recovered.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum PredictionError {
    #[error("required field {0} is missing")]
    MissingField(String),
    #[error("field {column} expects a {expected} value")]
    IncompatibleType {
        column: String,
        expected: &'static str,
    },
    #[error("value {value:?} is not a known category for {column}")]
    UnknownCategory { column: String, value: String },
    #[error("scorer failed: {0}")]
    Scorer(String),
}

pub type PredictionResult<T> = std::result::Result<T, PredictionError>;
