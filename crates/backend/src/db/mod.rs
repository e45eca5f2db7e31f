//! Document store access.
//!
//! # Database: `paperleaf`
//!
//! ## Collections
//!
//! - `users` - Accounts with embedded carts (the cart is a field of the
//!   user document, not a collection of its own)
//! - `books` - The catalog
//!
//! Every store operation runs under a fixed per-operation deadline. The
//! deadline is a budget, not a queue: an operation that exceeds it fails
//! with [`RepositoryError::Timeout`] instead of blocking the request.

pub mod books;
pub mod users;

pub use books::BookRepository;
pub use users::UserRepository;

use std::time::Duration;

use mongodb::{Client, Database};
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

/// Errors surfaced by the repositories.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The matched document does not exist.
    #[error("not found")]
    NotFound,

    /// A uniqueness constraint was violated.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The operation exceeded the per-operation deadline.
    #[error("store operation timed out")]
    Timeout,

    /// The store rejected or failed the operation.
    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),

    /// A stored document failed to decode into its domain type.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

/// Handle to the document store, shared across all repositories.
///
/// Constructed once at startup and injected into each service; nothing in
/// the crate reaches for an ambient global connection.
#[derive(Debug, Clone)]
pub struct Store {
    database: Database,
    op_deadline: Duration,
}

impl Store {
    /// Connect to the document store.
    ///
    /// # Arguments
    ///
    /// * `database_url` - MongoDB connection string (wrapped in `SecretString`)
    /// * `database_name` - Database to open
    /// * `op_deadline` - Budget applied to every store operation
    ///
    /// # Errors
    ///
    /// Returns `mongodb::error::Error` if the connection string is invalid.
    pub async fn connect(
        database_url: &SecretString,
        database_name: &str,
        op_deadline: Duration,
    ) -> Result<Self, mongodb::error::Error> {
        let client = Client::with_uri_str(database_url.expose_secret()).await?;
        Ok(Self {
            database: client.database(database_name),
            op_deadline,
        })
    }

    /// Get the underlying database handle.
    #[must_use]
    pub const fn database(&self) -> &Database {
        &self.database
    }

    /// Run a store operation under the per-operation deadline.
    ///
    /// Takes anything convertible into a future, so the driver's action
    /// builders can be passed directly without an `async` wrapper.
    pub(crate) async fn bounded<T, F>(&self, op: F) -> Result<T, RepositoryError>
    where
        F: IntoFuture<Output = Result<T, mongodb::error::Error>>,
        F::IntoFuture: Send,
    {
        match tokio::time::timeout(self.op_deadline, op).await {
            Ok(result) => result.map_err(RepositoryError::from),
            Err(_) => Err(RepositoryError::Timeout),
        }
    }

    /// Verify connectivity with a server ping. Used by the readiness probe.
    ///
    /// # Errors
    ///
    /// Returns `mongodb::error::Error` if the server is unreachable.
    pub async fn ping(&self) -> Result<(), mongodb::error::Error> {
        self.database.run_command(bson::doc! { "ping": 1 }).await?;
        Ok(())
    }
}

/// Whether a store error is a duplicate-key (unique index) violation.
pub(crate) fn is_duplicate_key(error: &mongodb::error::Error) -> bool {
    use mongodb::error::{ErrorKind, WriteFailure};

    const DUPLICATE_KEY: i32 = 11000;

    match error.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => {
            write_error.code == DUPLICATE_KEY
        }
        _ => false,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    // Client construction is lazy for plain mongodb:// URIs; no server is
    // contacted until an operation runs.
    async fn store(deadline: Duration) -> Store {
        Store::connect(
            &secrecy::SecretString::from("mongodb://localhost:27017"),
            "paperleaf_test",
            deadline,
        )
        .await
        .unwrap()
    }

    /// Stands in for the driver's operation builders, which only convert
    /// into futures rather than implementing `Future` themselves.
    struct DeferredOp;

    impl IntoFuture for DeferredOp {
        type Output = Result<u64, mongodb::error::Error>;
        type IntoFuture = std::future::Ready<Self::Output>;

        fn into_future(self) -> Self::IntoFuture {
            std::future::ready(Ok(7))
        }
    }

    #[tokio::test]
    async fn test_bounded_accepts_operation_builders() {
        let store = store(Duration::from_secs(1)).await;
        let value = store.bounded(DeferredOp).await.unwrap();
        assert_eq!(value, 7);
    }

    #[tokio::test]
    async fn test_bounded_elapses_to_timeout() {
        let store = store(Duration::from_millis(5)).await;
        let result = store
            .bounded(std::future::pending::<Result<(), mongodb::error::Error>>())
            .await;
        assert!(matches!(result, Err(RepositoryError::Timeout)));
    }
}
