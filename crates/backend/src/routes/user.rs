//! Account route handlers.
//!
//! Signup, login, profile read, and password update. Request bodies are
//! validated here; everything behind that goes through the auth service.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use paperleaf_core::Role;

use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::UserProfile;
use crate::services::{AuthService, Signup};
use crate::state::AppState;

/// Request body for `POST /user/signup`.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    /// Optional role claim; absent means a regular account.
    #[serde(default)]
    pub role: Role,
}

/// Request body for `POST /user/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for `PATCH /user/profile/password`.
#[derive(Debug, Deserialize)]
pub struct PasswordRequest {
    pub password: String,
}

/// Response body carrying a fresh bearer token.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Plain confirmation message.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// `POST /user/signup` - create an account and return its first token.
#[instrument(skip(state, body), fields(email = %body.email))]
pub async fn signup(
    State(state): State<AppState>,
    Json(body): Json<SignupRequest>,
) -> Result<Json<TokenResponse>> {
    if body.name.trim().is_empty() {
        return Err(AppError::BadRequest("name is required".to_owned()));
    }
    if body.password.is_empty() {
        return Err(AppError::BadRequest("password is required".to_owned()));
    }

    let auth = AuthService::new(state.store(), state.tokens());
    let (_user, token) = auth
        .signup(Signup {
            name: body.name,
            email: body.email,
            password: body.password,
            role: body.role,
        })
        .await?;

    Ok(Json(TokenResponse { token }))
}

/// `POST /user/login` - exchange credentials for a fresh token.
#[instrument(skip(state, body), fields(email = %body.email))]
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<TokenResponse>> {
    if body.password.is_empty() {
        return Err(AppError::BadRequest("password is required".to_owned()));
    }

    let auth = AuthService::new(state.store(), state.tokens());
    let (_user, token) = auth.login(&body.email, &body.password).await?;

    Ok(Json(TokenResponse { token }))
}

/// `GET /user/profile` - the caller's account, password hash excluded.
#[instrument(skip_all)]
pub async fn profile(RequireAuth(user): RequireAuth) -> Json<UserProfile> {
    Json(UserProfile::from(user))
}

/// `PATCH /user/profile/password` - replace the caller's password.
///
/// Authorized by the bearer token alone; the current password is not
/// re-checked.
#[instrument(skip_all)]
pub async fn update_password(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(body): Json<PasswordRequest>,
) -> Result<Json<MessageResponse>> {
    if body.password.is_empty() {
        return Err(AppError::BadRequest("password is required".to_owned()));
    }

    let auth = AuthService::new(state.store(), state.tokens());
    auth.update_password(&user, &body.password).await?;

    Ok(Json(MessageResponse {
        message: "password updated".to_owned(),
    }))
}
