//! Public blog endpoints.

use axum::{
    Router,
    extract::{Path, Query, State},
    routing::get,
};
use quill_common::AppResult;
use quill_db::entities::post;
use serde::Serialize;

use crate::{endpoints::Pagination, middleware::AppState, response::ApiResponse};

/// Public post response.
///
/// Only fields meant for readers; the active flag and ownership stay on the
/// admin surface.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicPostResponse {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub text: String,
    pub created_at: String,
}

impl From<post::Model> for PublicPostResponse {
    fn from(post: post::Model) -> Self {
        Self {
            id: post.id,
            title: post.title,
            slug: post.slug,
            text: post.text,
            created_at: post.created_at.to_rfc3339(),
        }
    }
}

/// List active posts, newest first.
async fn index(
    State(state): State<AppState>,
    Query(page): Query<Pagination>,
) -> AppResult<ApiResponse<Vec<PublicPostResponse>>> {
    let posts = state
        .post_service
        .list_active(page.limit(), page.offset())
        .await?;

    Ok(ApiResponse::ok(posts.into_iter().map(Into::into).collect()))
}

/// Show one active post by slug. Inactive posts 404 like missing ones.
async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<ApiResponse<PublicPostResponse>> {
    let post = state.post_service.get_active_by_slug(&slug).await?;

    Ok(ApiResponse::ok(post.into()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/posts/{slug}", get(show))
}
