//! Book repository for store operations.

use futures_util::TryStreamExt;
use mongodb::Collection;

use paperleaf_core::BookId;

use super::{RepositoryError, Store};
use crate::models::{Book, BookPatch};

const COLLECTION: &str = "books";

/// Repository for catalog store operations.
pub struct BookRepository<'a> {
    store: &'a Store,
}

impl<'a> BookRepository<'a> {
    /// Create a new book repository.
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self { store }
    }

    fn collection(&self) -> Collection<Book> {
        self.store.database().collection(COLLECTION)
    }

    /// Get a book by its exact title. Cart adds resolve books this way.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_name(&self, name: &str) -> Result<Option<Book>, RepositoryError> {
        self.store
            .bounded(self.collection().find_one(bson::doc! { "name": name }))
            .await
    }

    /// Get a book by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: BookId) -> Result<Option<Book>, RepositoryError> {
        self.store
            .bounded(
                self.collection()
                    .find_one(bson::doc! { "_id": id.as_object_id() }),
            )
            .await
    }

    /// List the titles of every book in the catalog.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_titles(&self) -> Result<Vec<String>, RepositoryError> {
        self.store
            .bounded(async {
                let mut cursor = self.collection().find(bson::doc! {}).await?;
                let mut titles = Vec::new();
                while let Some(book) = cursor.try_next().await? {
                    titles.push(book.name);
                }
                Ok(titles)
            })
            .await
    }

    /// Find books whose name, author, genre, description, publication, or
    /// category exactly matches `parameter`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn search(&self, parameter: &str) -> Result<Vec<Book>, RepositoryError> {
        let filter = bson::doc! {
            "$or": [
                { "name": parameter },
                { "author_name": parameter },
                { "genre": parameter },
                { "description": parameter },
                { "publication": parameter },
                { "category": parameter },
            ]
        };

        self.store
            .bounded(async {
                let cursor = self.collection().find(filter).await?;
                cursor.try_collect().await
            })
            .await
    }

    /// Insert a new catalog entry.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn insert(&self, book: &Book) -> Result<(), RepositoryError> {
        self.store
            .bounded(async { self.collection().insert_one(book).await.map(|_| ()) })
            .await
    }

    /// Apply a partial update to a book.
    ///
    /// The patch-to-document mapping lives in
    /// [`BookPatch::into_update_document`]; this method only dispatches it.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no book matched the ID.
    pub async fn update(&self, id: BookId, patch: BookPatch) -> Result<(), RepositoryError> {
        let result = self
            .store
            .bounded(self.collection().update_one(
                bson::doc! { "_id": id.as_object_id() },
                patch.into_update_document(),
            ))
            .await?;

        if result.matched_count == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Delete a book from the catalog.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if nothing was deleted.
    pub async fn delete(&self, id: BookId) -> Result<(), RepositoryError> {
        let result = self
            .store
            .bounded(
                self.collection()
                    .delete_one(bson::doc! { "_id": id.as_object_id() }),
            )
            .await?;

        if result.deleted_count == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
