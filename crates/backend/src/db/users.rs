//! User repository for store operations.
//!
//! The cart lives inside the user document and is only ever written as a
//! whole list. Two concurrent cart writes for the same user are
//! last-write-wins at the document level; `cart_revision` is bumped on
//! every write so a conditional update can be added later without a schema
//! change.

use mongodb::Collection;

use paperleaf_core::{Email, UserId};

use super::{RepositoryError, Store, is_duplicate_key};
use crate::models::{CartLine, User};

const COLLECTION: &str = "users";

/// Repository for user store operations.
pub struct UserRepository<'a> {
    store: &'a Store,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self { store }
    }

    fn collection(&self) -> Collection<User> {
        self.store.database().collection(COLLECTION)
    }

    /// Get a user by their login email.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `RepositoryError::Timeout` if it exceeds the operation deadline.
    pub async fn get_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        self.store
            .bounded(self.collection().find_one(bson::doc! { "email": email.as_str() }))
            .await
    }

    /// Insert a new user document.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists
    /// (unique index), `RepositoryError::Database` for other failures.
    pub async fn insert(&self, user: &User) -> Result<(), RepositoryError> {
        self.store
            .bounded(async {
                self.collection().insert_one(user).await.map(|_| ())
            })
            .await
            .map_err(|e| match e {
                RepositoryError::Database(db_err) if is_duplicate_key(&db_err) => {
                    RepositoryError::Conflict("email already exists".to_owned())
                }
                other => other,
            })
    }

    /// Count accounts holding the admin role.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_admins(&self) -> Result<u64, RepositoryError> {
        self.store
            .bounded(self.collection().count_documents(bson::doc! { "role": "admin" }))
            .await
    }

    /// Replace a user's stored password hash.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no user matched the email.
    pub async fn update_password(
        &self,
        email: &Email,
        password_hash: &str,
    ) -> Result<(), RepositoryError> {
        let result = self
            .store
            .bounded(self.collection().update_one(
                bson::doc! { "email": email.as_str() },
                bson::doc! { "$set": { "password": password_hash } },
            ))
            .await?;

        if result.matched_count == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Persist a user's cart as a whole list.
    ///
    /// Replace-the-list semantics: the stored cart becomes exactly `cart`,
    /// and `cart_revision` is incremented. There is no conditional check
    /// against the previous revision, so concurrent writers race
    /// last-write-wins.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user document is gone,
    /// `RepositoryError::DataCorruption` if the cart fails to serialize.
    pub async fn replace_cart(
        &self,
        user_id: UserId,
        cart: &[CartLine],
    ) -> Result<(), RepositoryError> {
        let cart = bson::to_bson(cart).map_err(|e| {
            RepositoryError::DataCorruption(format!("failed to serialize cart: {e}"))
        })?;

        let result = self
            .store
            .bounded(self.collection().update_one(
                bson::doc! { "_id": user_id.as_object_id() },
                bson::doc! { "$set": { "cart": cart }, "$inc": { "cart_revision": 1 } },
            ))
            .await?;

        if result.matched_count == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
