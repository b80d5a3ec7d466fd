//! API middleware.

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;
use quill_core::{PostService, QuestionService, UserService};

/// Name of the session cookie set at login.
pub const SESSION_COOKIE: &str = "quill_session";

/// Application state.
#[derive(Clone)]
pub struct AppState {
    /// User account management and authentication.
    pub user_service: UserService,
    /// Blog post management.
    pub post_service: PostService,
    /// Contact form intake and moderation.
    pub question_service: QuestionService,
}

/// Authentication middleware.
///
/// Resolves the session from a `Bearer` token or the session cookie and
/// stashes the user in request extensions. Requests without a valid session
/// pass through unauthenticated; handlers requiring auth reject them via
/// [`crate::extractors::AuthUser`].
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(token) = bearer_token(req.headers()).or_else(|| session_cookie(req.headers()))
        && let Ok(user) = state.user_service.authenticate_by_token(&token).await
    {
        req.extensions_mut().insert(user);
    }

    next.run(req).await
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::to_string)
}

fn session_cookie(headers: &HeaderMap) -> Option<String> {
    CookieJar::from_headers(headers)
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
}
