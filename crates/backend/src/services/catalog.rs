//! Catalog service.
//!
//! Plain CRUD over the book collection. Reads are public; mutations are
//! reached only through the admin-gated routes.

use thiserror::Error;

use paperleaf_core::BookId;

use crate::db::{BookRepository, RepositoryError, Store};
use crate::models::{Book, BookInput, BookPatch};

/// Errors from catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No book with the requested ID.
    #[error("book not found")]
    NotFound,

    /// Store operation failed.
    #[error("database error: {0}")]
    Repository(RepositoryError),
}

impl From<RepositoryError> for CatalogError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::NotFound => Self::NotFound,
            other => Self::Repository(other),
        }
    }
}

/// Catalog CRUD service.
pub struct CatalogService<'a> {
    books: BookRepository<'a>,
}

impl<'a> CatalogService<'a> {
    /// Create a new catalog service.
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self {
            books: BookRepository::new(store),
        }
    }

    /// List every book title in the catalog.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Repository` if the store read fails.
    pub async fn list_titles(&self) -> Result<Vec<String>, CatalogError> {
        Ok(self.books.list_titles().await?)
    }

    /// Find books matching a free-text parameter against any of the
    /// searchable fields (title, author, genre, description, publication,
    /// category).
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Repository` if the store read fails.
    pub async fn search(&self, parameter: &str) -> Result<Vec<Book>, CatalogError> {
        Ok(self.books.search(parameter).await?)
    }

    /// Add a book to the catalog.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Repository` if the insert fails.
    pub async fn add_book(&self, input: BookInput) -> Result<Book, CatalogError> {
        let book = Book::new(input);
        self.books.insert(&book).await?;
        Ok(book)
    }

    /// Apply a partial update to a book.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if no book has that ID.
    pub async fn update_book(&self, id: BookId, patch: BookPatch) -> Result<(), CatalogError> {
        Ok(self.books.update(id, patch).await?)
    }

    /// Delete a book from the catalog.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if no book has that ID.
    pub async fn delete_book(&self, id: BookId) -> Result<(), CatalogError> {
        Ok(self.books.delete(id).await?)
    }
}
