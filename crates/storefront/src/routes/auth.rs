//! Authentication route handlers.
//!
//! The provider does the actual credential verification; these handlers
//! move the resulting user in and out of the session.

use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result, clear_sentry_user, set_sentry_user};
use crate::middleware::OptionalAuth;
use crate::services::auth::{AuthUser, USER_SESSION_KEY};
use crate::state::AppState;

/// Request body for sign-in.
#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    /// Account email address.
    pub email: String,
    /// Account password.
    pub password: String,
}

/// Request body for sign-up.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    /// Account email address.
    pub email: String,
    /// Account password.
    pub password: String,
    /// Optional display name, set on the profile after account creation.
    pub display_name: Option<String>,
}

/// `POST /auth/signin` - email/password sign-in.
#[instrument(skip_all, fields(email = %request.email))]
pub async fn sign_in(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<SignInRequest>,
) -> Result<Json<AuthUser>> {
    let user = state
        .auth()
        .sign_in(&request.email, &request.password)
        .await?;

    session.insert(USER_SESSION_KEY, &user).await?;
    set_sentry_user(&user.id, Some(&user.email));
    Ok(Json(user))
}

/// `POST /auth/signup` - create an account and sign it in.
#[instrument(skip_all, fields(email = %request.email))]
pub async fn sign_up(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<SignUpRequest>,
) -> Result<Json<AuthUser>> {
    let user = state
        .auth()
        .sign_up(
            &request.email,
            &request.password,
            request.display_name.as_deref(),
        )
        .await?;

    session.insert(USER_SESSION_KEY, &user).await?;
    set_sentry_user(&user.id, Some(&user.email));
    Ok(Json(user))
}

/// `POST /auth/signout` - clear the session user.
#[instrument(skip_all)]
pub async fn sign_out(session: Session) -> Result<StatusCode> {
    session.remove::<AuthUser>(USER_SESSION_KEY).await?;
    clear_sentry_user();
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /auth/me` - the signed-in user, or 401.
#[instrument(skip_all)]
pub async fn me(OptionalAuth(user): OptionalAuth) -> Result<Json<AuthUser>> {
    user.map(Json)
        .ok_or_else(|| AppError::Unauthorized("Not signed in".to_string()))
}
