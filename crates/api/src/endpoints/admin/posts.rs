//! Admin post endpoints.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::get,
};
use quill_common::AppResult;
use quill_core::{CreatePostInput, UpdatePostInput};
use quill_db::entities::post;
use serde::{Deserialize, Serialize};

use crate::{
    endpoints::Pagination,
    extractors::AuthUser,
    middleware::AppState,
    response::{ApiResponse, no_content},
};

/// Admin post response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub text: String,
    pub active: bool,
    pub user_id: Option<String>,
    pub created_at: String,
    pub updated_at: Option<String>,
}

impl From<post::Model> for PostResponse {
    fn from(post: post::Model) -> Self {
        Self {
            id: post.id,
            title: post.title,
            slug: post.slug,
            text: post.text,
            active: post.active,
            user_id: post.user_id,
            created_at: post.created_at.to_rfc3339(),
            updated_at: post.updated_at.map(|t| t.to_rfc3339()),
        }
    }
}

/// Update post request.
///
/// Accepts `userId` for wire compatibility but drops it: authorship is fixed
/// at creation and can never be reassigned.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub text: Option<String>,
    pub active: Option<bool>,
    pub user_id: Option<String>,
}

impl From<UpdatePostRequest> for UpdatePostInput {
    fn from(req: UpdatePostRequest) -> Self {
        Self {
            title: req.title,
            slug: req.slug,
            text: req.text,
            active: req.active,
        }
    }
}

/// List all posts, active or not.
async fn index(
    AuthUser(_): AuthUser,
    State(state): State<AppState>,
    Query(page): Query<Pagination>,
) -> AppResult<ApiResponse<Vec<PostResponse>>> {
    let posts = state.post_service.list(page.limit(), page.offset()).await?;

    Ok(ApiResponse::ok(posts.into_iter().map(Into::into).collect()))
}

/// Create a post owned by the authenticated user.
async fn store(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreatePostInput>,
) -> AppResult<ApiResponse<PostResponse>> {
    let post = state.post_service.create(input, &user.id).await?;

    Ok(ApiResponse::ok(post.into()))
}

/// Fetch one post for the edit screen.
async fn show(
    AuthUser(_): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<PostResponse>> {
    let post = state.post_service.get(&id).await?;

    Ok(ApiResponse::ok(post.into()))
}

/// Update a post.
async fn update(
    AuthUser(_): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdatePostRequest>,
) -> AppResult<ApiResponse<PostResponse>> {
    let post = state.post_service.update(&id, req.into()).await?;

    Ok(ApiResponse::ok(post.into()))
}

/// Delete a post.
async fn destroy(
    AuthUser(_): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    state.post_service.destroy(&id).await?;

    Ok(no_content())
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index).post(store))
        .route("/{id}", get(show).patch(update).delete(destroy))
}
