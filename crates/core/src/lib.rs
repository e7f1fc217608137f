//! # Cirrhosis Core
//!
//! Model Service for the cirrhosis prediction form.
//!
//! This crate contains the pure prediction logic:
//! - The patient record assembled from one form submission
//! - The [`Scorer`] capability and the [`PredictionService`] injected into request handling
//! - The serialized pipeline (column transformer + random forest) and its loader
//!
//! **No HTTP concerns**: rendering, form decoding and routing belong in `cirrhosis-web`.

pub mod config;
pub mod constants;
pub mod error;
pub mod pipeline;
pub mod record;
pub mod scorer;

pub use config::{resolve_model_path, CoreConfig};
pub use error::{ModelError, ModelResult, PredictionError, PredictionResult};
pub use pipeline::Pipeline;
pub use record::{Cell, Drug, Indicator, PatientRecord, Sex};
pub use scorer::{prediction_sentence, Label, PredictionService, Scorer};
