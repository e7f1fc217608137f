//! # Cirrhosis Web
//!
//! Form server for the cirrhosis prediction model.
//!
//! Handles:
//! - The fifteen clinical controls, the submit button and the output region
//! - Decoding a submission into one patient record
//! - Rendering the page with the prediction sentence
//!
//! Uses `cirrhosis-core` for the record types and the injected [`PredictionService`].

#![warn(rust_2018_idioms)]

pub mod error;
pub mod form;
pub mod page;
pub mod routes;

use axum::{routing::get, Router};
use cirrhosis_core::PredictionService;
use tower_http::trace::TraceLayer;

pub use error::{FormError, SubmitError};
pub use form::{FormSubmission, CONTROLS};
pub use page::{render_page, Output};

/// Application state shared across request handlers.
///
/// Holds the prediction service built once at startup. Cloning shares the same loaded model.
#[derive(Clone, Debug)]
pub struct AppState {
    pub prediction_service: PredictionService,
}

impl AppState {
    pub fn new(prediction_service: PredictionService) -> Self {
        Self { prediction_service }
    }
}

/// Build the router serving the prediction page.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::show_form).post(routes::submit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
