//! Unified error handling.
//!
//! Provides a unified `AppError` type mapped to an HTTP status and a short
//! JSON body at the boundary. All route handlers return `Result<T, AppError>`.
//! Every error is terminal for its request; nothing here retries.
//!
//! The status mapping preserves the public API's historical surface:
//! auth-layer failures and conflicts answer 500, not 401/403/409. The
//! internal taxonomy still distinguishes the cases for logging.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::{AuthError, CartError, CatalogError};

/// Application-level error type for the backend.
#[derive(Debug, Error)]
pub enum AppError {
    /// Authentication or authorization failed.
    #[error("auth error: {0}")]
    Auth(#[from] AuthError),

    /// Cart operation failed.
    #[error("cart error: {0}")]
    Cart(#[from] CartError),

    /// Catalog operation failed.
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Store operation failed.
    #[error("database error: {0}")]
    Database(#[from] RepositoryError),

    /// Bad request from client.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Auth(err) => match err {
                // Malformed email in a request body is a validation failure.
                AuthError::InvalidEmail(_) => StatusCode::BAD_REQUEST,
                // Everything else in the auth layer answers 500 on the
                // public surface, including conflicts and role mismatches.
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Cart(err) => match err {
                CartError::ItemNotFound => StatusCode::NOT_FOUND,
                CartError::BookNotFound | CartError::Repository(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::Catalog(err) => match err {
                CatalogError::NotFound => StatusCode::NOT_FOUND,
                CatalogError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    /// The short message exposed to clients. Store and internal failures
    /// are not echoed verbatim.
    fn message(&self) -> String {
        match self {
            Self::Database(_) | Self::Internal(_) => "internal server error".to_owned(),
            Self::Auth(AuthError::Repository(_)) => "internal server error".to_owned(),
            Self::Cart(CartError::Repository(_)) | Self::Catalog(CatalogError::Repository(_)) => {
                "internal server error".to_owned()
            }
            Self::Auth(err) => err.to_string(),
            Self::Cart(err) => err.to_string(),
            Self::Catalog(err) => err.to_string(),
            Self::BadRequest(msg) => msg.clone(),
            Self::NotFound(msg) => format!("not found: {msg}"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(error = %self, "request error");
        }

        (status, Json(json!({ "error": self.message() }))).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::services::TokenError;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_cart_item_not_found_is_404() {
        assert_eq!(
            get_status(AppError::Cart(CartError::ItemNotFound)),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_book_not_found_on_add_is_500() {
        // The add-to-cart surface reports a missing book as a server error.
        assert_eq!(
            get_status(AppError::Cart(CartError::BookNotFound)),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_auth_failures_are_500() {
        assert_eq!(
            get_status(AppError::Auth(AuthError::MissingCredential)),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            get_status(AppError::Auth(AuthError::Token(TokenError::Expired))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            get_status(AppError::Auth(AuthError::Forbidden)),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            get_status(AppError::Auth(AuthError::AdminExists)),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            get_status(AppError::Auth(AuthError::EmailTaken)),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_invalid_email_is_400() {
        let err = paperleaf_core::Email::parse("").unwrap_err();
        assert_eq!(
            get_status(AppError::Auth(AuthError::InvalidEmail(err))),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_catalog_not_found_is_404() {
        assert_eq!(
            get_status(AppError::Catalog(CatalogError::NotFound)),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_bad_request_and_not_found() {
        assert_eq!(
            get_status(AppError::BadRequest("cart id is required".to_owned())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::NotFound("book".to_owned())),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_store_errors_do_not_leak_details() {
        let err = AppError::Database(RepositoryError::Timeout);
        assert_eq!(err.message(), "internal server error");
    }
}
