//! Admin user endpoints.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::get,
};
use quill_common::AppResult;
use quill_core::{CreateUserInput, UpdateUserInput};
use quill_db::entities::user;
use serde::Serialize;

use crate::{
    endpoints::Pagination,
    endpoints::admin::posts::PostResponse,
    extractors::AuthUser,
    middleware::AppState,
    response::{ApiResponse, no_content},
};

/// Admin user response. Never carries the hash or session token.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: String,
    pub updated_at: Option<String>,
}

impl From<user::Model> for UserResponse {
    fn from(user: user::Model) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            created_at: user.created_at.to_rfc3339(),
            updated_at: user.updated_at.map(|t| t.to_rfc3339()),
        }
    }
}

/// User detail response for the edit screen, including owned posts.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDetailResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub posts: Vec<PostResponse>,
}

/// List users.
async fn index(
    AuthUser(_): AuthUser,
    State(state): State<AppState>,
    Query(page): Query<Pagination>,
) -> AppResult<ApiResponse<Vec<UserResponse>>> {
    let users = state.user_service.list(page.limit(), page.offset()).await?;

    Ok(ApiResponse::ok(users.into_iter().map(Into::into).collect()))
}

/// Create a user.
async fn store(
    AuthUser(_): AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateUserInput>,
) -> AppResult<ApiResponse<UserResponse>> {
    let user = state.user_service.create(input).await?;

    Ok(ApiResponse::ok(user.into()))
}

/// Fetch one user with their posts.
async fn show(
    AuthUser(_): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<UserDetailResponse>> {
    let user = state.user_service.get(&id).await?;
    let posts = state.post_service.list_by_user(&user.id).await?;

    Ok(ApiResponse::ok(UserDetailResponse {
        user: user.into(),
        posts: posts.into_iter().map(Into::into).collect(),
    }))
}

/// Update a user.
async fn update(
    AuthUser(_): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateUserInput>,
) -> AppResult<ApiResponse<UserResponse>> {
    let user = state.user_service.update(&id, input).await?;

    Ok(ApiResponse::ok(user.into()))
}

/// Delete a user. Self-deletion is rejected with 403.
async fn destroy(
    AuthUser(actor): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    state.user_service.destroy(&actor.id, &id).await?;

    Ok(no_content())
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index).post(store))
        .route("/{id}", get(show).patch(update).delete(destroy))
}
