//! Authentication and authorization error types.

use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::token::TokenError;

/// Errors that can occur during authentication and authorization.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] paperleaf_core::EmailError),

    /// No `Authorization: Bearer` credential on the request.
    #[error("missing bearer credential")]
    MissingCredential,

    /// Token failed verification.
    #[error(transparent)]
    Token(#[from] TokenError),

    /// Token subject does not resolve to a live account.
    #[error("user not found")]
    UserNotFound,

    /// Wrong password at login.
    #[error("password is invalid")]
    InvalidPassword,

    /// An account with this email already exists.
    #[error("user already exists")]
    EmailTaken,

    /// An admin account already exists; only one is allowed.
    #[error("only one admin user is allowed")]
    AdminExists,

    /// Caller's role does not meet the required role.
    #[error("admin role required")]
    Forbidden,

    /// Store operation failed.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}
