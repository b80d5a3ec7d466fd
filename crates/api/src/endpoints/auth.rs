//! Admin session endpoints.

use axum::{Json, Router, extract::State, response::IntoResponse, routing::post};
use axum_extra::extract::{CookieJar, cookie::Cookie};
use quill_common::AppResult;
use serde::{Deserialize, Serialize};

use crate::{
    extractors::AuthUser,
    middleware::{AppState, SESSION_COOKIE},
    response::ApiResponse,
};

/// Login request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub token: String,
}

/// Sign in with email and password.
///
/// Sets the session cookie and returns the token for bearer-style clients.
/// Any previous session for the user is invalidated.
async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let user = state
        .user_service
        .authenticate(&req.email, &req.password)
        .await?;

    let token = state.user_service.start_session(&user.id).await?;

    let cookie = Cookie::build((SESSION_COOKIE, token.clone()))
        .path("/")
        .http_only(true)
        .build();

    Ok((
        jar.add(cookie),
        ApiResponse::ok(LoginResponse {
            id: user.id,
            name: user.name,
            email: user.email,
            token,
        }),
    ))
}

/// Logout response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoutResponse {
    pub ok: bool,
}

/// Sign out, clearing the session token and cookie.
async fn logout(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    jar: CookieJar,
) -> AppResult<impl IntoResponse> {
    state.user_service.end_session(&user.id).await?;

    let cookie = Cookie::build((SESSION_COOKIE, "")).path("/").build();

    Ok((
        jar.remove(cookie),
        ApiResponse::ok(LogoutResponse { ok: true }),
    ))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
}
