//! Public contact form endpoints.

use axum::{Json, Router, extract::State, routing::get};
use quill_common::AppResult;
use quill_core::SubmitQuestionInput;
use serde::Serialize;

use crate::{extractors::ClientIp, middleware::AppState, response::ApiResponse};

/// Contact form metadata.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactFormResponse {
    pub fields: Vec<&'static str>,
}

/// Contact submission acknowledgement.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub ok: bool,
}

/// Describe the contact form.
async fn show_form() -> ApiResponse<ContactFormResponse> {
    ApiResponse::ok(ContactFormResponse {
        fields: vec!["email", "questionText"],
    })
}

/// Submit a question.
///
/// Throttled submissions are acknowledged exactly like persisted ones, so
/// the response carries no signal a spammer could calibrate against.
async fn submit(
    State(state): State<AppState>,
    ClientIp(ip): ClientIp,
    Json(input): Json<SubmitQuestionInput>,
) -> AppResult<ApiResponse<SubmitResponse>> {
    state.question_service.submit(input, &ip).await?;

    Ok(ApiResponse::ok(SubmitResponse { ok: true }))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(show_form).post(submit))
}
