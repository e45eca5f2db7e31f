//! Authentication extractors.
//!
//! Provides extractors for requiring bearer-token authentication in route
//! handlers. Each extraction verifies the token's signature and expiry and
//! then reads the subject's account fresh from the store, so the extracted
//! user (including its cart) reflects the current persisted state.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::error::AppError;
use crate::models::User;
use crate::services::{AuthError, AuthService};
use crate::state::AppState;

/// Extractor that requires a valid bearer token.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(user): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", user.name)
/// }
/// ```
pub struct RequireAuth(pub User);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or(AppError::Auth(AuthError::MissingCredential))?;

        let claims = state
            .tokens()
            .verify(token)
            .map_err(|e| AppError::Auth(e.into()))?;

        let auth = AuthService::new(state.store(), state.tokens());
        let user = auth.resolve_claims(&claims).await?;

        Ok(Self(user))
    }
}

/// Extractor that requires a valid bearer token for an admin account.
///
/// The role is read from the persisted account, not from the token, so a
/// demotion takes effect on the next request.
pub struct RequireAdmin(pub User);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let RequireAuth(user) = RequireAuth::from_request_parts(parts, state).await?;

        if !user.role.is_admin() {
            return Err(AppError::Auth(AuthError::Forbidden));
        }

        Ok(Self(user))
    }
}

/// Pull the token out of an `Authorization: Bearer <token>` header.
///
/// Returns `None` for a missing header, a non-UTF-8 value, or a scheme
/// other than `Bearer`.
fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}
