//! Admin question review endpoints.
//!
//! Questions are created only through the public contact form; this surface
//! is review-only: list, verify, delete.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{get, patch},
};
use quill_common::{AppError, AppResult};
use quill_db::entities::question;
use serde::{Deserialize, Serialize};

use crate::{
    endpoints::Pagination,
    extractors::AuthUser,
    middleware::AppState,
    response::{ApiResponse, no_content},
};

/// Admin question response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResponse {
    pub id: String,
    pub email: String,
    pub question_text: String,
    pub ip: String,
    pub verified: bool,
    pub created_at: String,
}

impl From<question::Model> for QuestionResponse {
    fn from(question: question::Model) -> Self {
        Self {
            id: question.id,
            email: question.email,
            question_text: question.question_text,
            ip: question.ip,
            verified: question.verified,
            created_at: question.created_at.to_rfc3339(),
        }
    }
}

/// Update question request. `verified` is the only mutable field.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuestionRequest {
    pub verified: Option<bool>,
}

/// List questions, newest first.
async fn index(
    AuthUser(_): AuthUser,
    State(state): State<AppState>,
    Query(page): Query<Pagination>,
) -> AppResult<ApiResponse<Vec<QuestionResponse>>> {
    let questions = state
        .question_service
        .list(page.limit(), page.offset())
        .await?;

    Ok(ApiResponse::ok(
        questions.into_iter().map(Into::into).collect(),
    ))
}

/// Mark a question as verified.
async fn update(
    AuthUser(_): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateQuestionRequest>,
) -> AppResult<ApiResponse<QuestionResponse>> {
    let verified = req
        .verified
        .ok_or_else(|| AppError::validation("verified", "is required"))?;

    let question = state.question_service.set_verified(&id, verified).await?;

    Ok(ApiResponse::ok(question.into()))
}

/// Delete a question.
async fn destroy(
    AuthUser(_): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    state.question_service.destroy(&id).await?;

    Ok(no_content())
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/{id}", patch(update).delete(destroy))
}
