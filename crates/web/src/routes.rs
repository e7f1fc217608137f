//! The single page route: `GET /` shows the form, `POST /` is the submit activation.

use axum::{
    extract::{rejection::FormRejection, State},
    http::StatusCode,
    response::Html,
    Form,
};
use cirrhosis_core::PredictionService;

use crate::error::SubmitError;
use crate::form::FormSubmission;
use crate::page::{render_page, Output};
use crate::AppState;

/// Show the form before any submission.
///
/// The output region is always empty here.
#[axum::debug_handler]
pub async fn show_form() -> Html<String> {
    Html(render_page(&FormSubmission::initial(), &Output::Idle))
}

/// Handle one submit activation.
///
/// Builds a fresh record from the posted values, scores it and renders the sentence. Failures,
/// including a body that does not decode as the form, are rendered in the output region with
/// `422 Unprocessable Entity`.
#[axum::debug_handler]
pub async fn submit(
    State(state): State<AppState>,
    form: Result<Form<FormSubmission>, FormRejection>,
) -> (StatusCode, Html<String>) {
    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            tracing::error!("Form decoding error: {rejection}");
            let page = render_page(
                &FormSubmission::initial(),
                &Output::Failed(rejection.body_text()),
            );
            return (StatusCode::UNPROCESSABLE_ENTITY, Html(page));
        }
    };

    match evaluate(&state.prediction_service, &form) {
        Ok(sentence) => (
            StatusCode::OK,
            Html(render_page(&form, &Output::Evaluated(sentence))),
        ),
        Err(e) => {
            tracing::error!("Prediction error: {e}");
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Html(render_page(&form, &Output::Failed(e.to_string()))),
            )
        }
    }
}

fn evaluate(
    service: &PredictionService,
    form: &FormSubmission,
) -> Result<&'static str, SubmitError> {
    let record = form.to_record()?;
    Ok(service.predict_sentence(&record)?)
}
