//! Authentication service.
//!
//! Signup, login, password update, and resolution of token claims to live
//! accounts. Password hashing and verification live here as free functions
//! so they can be exercised without a store.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use paperleaf_core::{Email, Role};

use crate::db::{RepositoryError, Store, UserRepository};
use crate::models::User;
use crate::services::token::{Claims, TokenService};

/// Parameters for creating an account.
#[derive(Debug)]
pub struct Signup {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Authentication service.
///
/// Handles account creation, login, and password changes. Both
/// collaborators are injected; the service holds no state of its own.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
    tokens: &'a TokenService,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(store: &'a Store, tokens: &'a TokenService) -> Self {
        Self {
            users: UserRepository::new(store),
            tokens,
        }
    }

    /// Create an account and issue its first token.
    ///
    /// Enforces the single-admin invariant: once any admin account exists,
    /// no further `role=admin` signups are accepted. The check runs at
    /// signup only; it is not re-validated retroactively.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` for a malformed email,
    /// `AuthError::AdminExists` for a second admin signup,
    /// `AuthError::EmailTaken` when the email is already registered, and
    /// `AuthError::Token` if issuance fails.
    pub async fn signup(&self, signup: Signup) -> Result<(User, String), AuthError> {
        let email = Email::parse(&signup.email)?;

        if signup.role.is_admin() {
            let existing_admins = self.users.count_admins().await?;
            if !admin_slot_available(existing_admins, signup.role) {
                return Err(AuthError::AdminExists);
            }
        }

        if self.users.get_by_email(&email).await?.is_some() {
            return Err(AuthError::EmailTaken);
        }

        let password_hash = hash_password(&signup.password);
        let user = User::new(signup.name, email, password_hash, signup.role);
        let token = self.tokens.issue(&user.email)?;

        // The unique index backstops the read-then-insert race above.
        self.users.insert(&user).await.map_err(|e| match e {
            RepositoryError::Conflict(_) => AuthError::EmailTaken,
            other => AuthError::Repository(other),
        })?;

        Ok((user, token))
    }

    /// Log in with email and password, issuing a fresh token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UserNotFound` for an unknown email and
    /// `AuthError::InvalidPassword` for a wrong password.
    pub async fn login(&self, email: &str, password: &str) -> Result<(User, String), AuthError> {
        let email = Email::parse(email)?;

        let user = self
            .users
            .get_by_email(&email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !verify_password(password, &user.password_hash) {
            return Err(AuthError::InvalidPassword);
        }

        let token = self.tokens.issue(&user.email)?;

        Ok((user, token))
    }

    /// Replace the caller's password.
    ///
    /// The caller's current password is not re-verified before the change;
    /// the bearer token alone authorizes it. Preserved from the existing
    /// API surface.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` if the store write fails.
    pub async fn update_password(&self, user: &User, new_password: &str) -> Result<(), AuthError> {
        let password_hash = hash_password(new_password);
        self.users.update_password(&user.email, &password_hash).await?;
        Ok(())
    }

    /// Resolve verified token claims to the persisted account.
    ///
    /// A structurally valid token whose subject no longer exists (deleted
    /// account) fails with `AuthError::UserNotFound`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UserNotFound` if the subject has no account.
    pub async fn resolve_claims(&self, claims: &Claims) -> Result<User, AuthError> {
        let email = Email::parse(&claims.sub).map_err(|_| AuthError::UserNotFound)?;

        self.users
            .get_by_email(&email)
            .await?
            .ok_or(AuthError::UserNotFound)
    }
}

/// Hash a password with Argon2id. The salt is generated fresh and embedded
/// in the PHC-string output.
///
/// # Panics
///
/// Panics if the hashing engine fails. That only happens when the host's
/// entropy source or the hash parameters are broken, which is not
/// remediable at request scope.
#[must_use]
pub fn hash_password(password: &str) -> String {
    let salt = SaltString::generate(&mut OsRng);

    match Argon2::default().hash_password(password.as_bytes(), &salt) {
        Ok(hash) => hash.to_string(),
        Err(e) => panic!("password hashing failed: {e}"),
    }
}

/// Verify a candidate password against a stored hash.
///
/// A wrong password is data, not a fault: any mismatch or malformed stored
/// hash yields `false`, never an error.
#[must_use]
pub fn verify_password(candidate: &str, stored_hash: &str) -> bool {
    PasswordHash::new(stored_hash).is_ok_and(|parsed| {
        Argon2::default()
            .verify_password(candidate.as_bytes(), &parsed)
            .is_ok()
    })
}

/// Whether a signup may claim the requested role given the current number
/// of admin accounts.
///
/// Factored out of [`AuthService::signup`] so the invariant is testable
/// without a store.
#[must_use]
pub const fn admin_slot_available(existing_admins: u64, requested: Role) -> bool {
    !(requested.is_admin() && existing_admins > 0)
}
