//! JSON endpoints mirroring the HTML pages and forms.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use shared::{
    domain::ContentItem,
    error::{ApiError, FieldErrors, SiteError},
    protocol::{ContactSubmission, FormOutcome, NewsletterSubmission, ServiceSummary},
};
use ui_state::FormState;

use crate::app_state::{AppState, Submission, SubmitOutcome};

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

fn status_for(err: &SiteError) -> StatusCode {
    match err {
        SiteError::NotFound { .. } => StatusCode::NOT_FOUND,
        SiteError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        SiteError::DocumentUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        SiteError::Render(_) | SiteError::Content(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn api_error(err: SiteError) -> (StatusCode, Json<ApiError>) {
    (status_for(&err), Json(ApiError::from(err)))
}

pub(crate) async fn list_services(State(state): State<Arc<AppState>>) -> Json<Vec<ServiceSummary>> {
    Json(
        state
            .registry
            .services()
            .iter()
            .map(ServiceSummary::from)
            .collect(),
    )
}

pub(crate) async fn get_service(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> ApiResult<ContentItem> {
    state
        .registry
        .require_service(&slug)
        .map(|item| Json(item.clone()))
        .map_err(api_error)
}

fn outcome_response(outcome: SubmitOutcome) -> (StatusCode, Json<FormOutcome>) {
    match outcome {
        SubmitOutcome::Accepted => (StatusCode::OK, Json(FormOutcome::accepted())),
        SubmitOutcome::Invalid(errors) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(FormOutcome::rejected(errors)),
        ),
        SubmitOutcome::DeliveryFailed => {
            let mut errors = FieldErrors::new();
            errors.insert("form".into(), "could not be delivered".into());
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(FormOutcome::rejected(errors)),
            )
        }
    }
}

pub(crate) async fn submit_contact(
    State(state): State<Arc<AppState>>,
    Json(submission): Json<ContactSubmission>,
) -> (StatusCode, Json<FormOutcome>) {
    let mut form = FormState::contact();
    form.fill(submission.fields());
    outcome_response(state.submit(&mut form, Submission::Contact).await)
}

pub(crate) async fn submit_newsletter(
    State(state): State<Arc<AppState>>,
    Json(submission): Json<NewsletterSubmission>,
) -> (StatusCode, Json<FormOutcome>) {
    let mut form = FormState::newsletter();
    form.set("email", submission.email);
    outcome_response(state.submit(&mut form, Submission::Newsletter).await)
}

#[cfg(test)]
#[path = "tests/mod_tests.rs"]
mod tests;
