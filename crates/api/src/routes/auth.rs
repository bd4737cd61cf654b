//! Authentication route handlers.

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header::SET_COOKIE},
    response::{AppendHeaders, IntoResponse},
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::error::{AppError, Result};
use crate::middleware::{
    CSRF_COOKIE_NAME, RequireAuth, clear_current_user, generate_csrf_token, set_current_user,
};
use crate::models::CurrentUser;
use crate::services::auth::AuthService;
use crate::state::AppState;

/// CSRF cookie lifetime in seconds (24 hours, same as the session).
const CSRF_COOKIE_MAX_AGE: u32 = 24 * 60 * 60;

/// Registration and login request body.
#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Response body for the token issuance endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CsrfTokenBody {
    pub csrf_token: String,
}

/// Issue a CSRF token as both a readable cookie and a response body.
///
/// Clients echo the value back in the `x-csrf-token` header on every
/// mutating request.
pub async fn csrf_token() -> impl IntoResponse {
    let token = generate_csrf_token();
    let cookie = format!(
        "{CSRF_COOKIE_NAME}={token}; Path=/; SameSite=Strict; Max-Age={CSRF_COOKIE_MAX_AGE}"
    );
    (
        AppendHeaders([(SET_COOKIE, cookie)]),
        Json(CsrfTokenBody { csrf_token: token }),
    )
}

pub async fn register(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> Result<(StatusCode, Json<CurrentUser>)> {
    let service = AuthService::new(state.pool());
    let user = service
        .register(&credentials.email, &credentials.password, false)
        .await?;

    tracing::info!(user_id = user.id.as_i32(), "user registered");

    Ok((StatusCode::CREATED, Json(CurrentUser::from(&user))))
}

pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(credentials): Json<Credentials>,
) -> Result<Json<CurrentUser>> {
    let service = AuthService::new(state.pool());
    let user = service
        .login(&credentials.email, &credentials.password)
        .await?;

    let current = CurrentUser::from(&user);
    set_current_user(&session, &current)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    tracing::info!(user_id = user.id.as_i32(), "user logged in");

    Ok(Json(current))
}

pub async fn logout(session: Session) -> Result<StatusCode> {
    clear_current_user(&session)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;
    session
        .flush()
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn me(RequireAuth(user): RequireAuth) -> Json<CurrentUser> {
    Json(user)
}
