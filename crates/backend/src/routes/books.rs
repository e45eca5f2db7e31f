//! Catalog route handlers.
//!
//! Reads are public; mutations live under `/admin/book` and require an
//! admin bearer token via [`RequireAdmin`].

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use tracing::instrument;

use paperleaf_core::BookId;

use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::models::{Book, BookInput, BookPatch};
use crate::services::CatalogService;
use crate::state::AppState;

/// Plain confirmation message.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Response for an admin book creation.
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub message: String,
    pub book: Book,
}

/// Parse a book ID path segment, mapping failure to a 400.
fn parse_book_id(raw: &str) -> Result<BookId> {
    if raw.trim().is_empty() {
        return Err(AppError::BadRequest("book id is required".to_owned()));
    }
    raw.parse()
        .map_err(|_| AppError::BadRequest("invalid book id".to_owned()))
}

/// `GET /books` - every title in the catalog.
#[instrument(skip_all)]
pub async fn list_titles(State(state): State<AppState>) -> Result<Json<Vec<String>>> {
    let catalog = CatalogService::new(state.store());
    Ok(Json(catalog.list_titles().await?))
}

/// `GET /books/{parameter}` - books whose title, author, genre,
/// description, publication, or category equals the parameter.
#[instrument(skip(state))]
pub async fn search(
    State(state): State<AppState>,
    Path(parameter): Path<String>,
) -> Result<Json<Vec<Book>>> {
    let catalog = CatalogService::new(state.store());
    Ok(Json(catalog.search(&parameter).await?))
}

/// `POST /admin/book` - add a catalog entry.
#[instrument(skip(state, _admin, body), fields(book = %body.name))]
pub async fn add_book(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Json(body): Json<BookInput>,
) -> Result<Json<CreatedResponse>> {
    if body.name.trim().is_empty() {
        return Err(AppError::BadRequest("book name is required".to_owned()));
    }
    if body.author_name.trim().is_empty() {
        return Err(AppError::BadRequest("author name is required".to_owned()));
    }

    let catalog = CatalogService::new(state.store());
    let book = catalog.add_book(body).await?;

    Ok(Json(CreatedResponse {
        message: "book added".to_owned(),
        book,
    }))
}

/// `PATCH /admin/book/{book_id}` - partial update of a catalog entry.
///
/// Empty-string fields in the body count as absent.
#[instrument(skip(state, _admin, body))]
pub async fn update_book(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(book_id): Path<String>,
    Json(body): Json<BookPatch>,
) -> Result<Json<MessageResponse>> {
    let id = parse_book_id(&book_id)?;

    let catalog = CatalogService::new(state.store());
    catalog.update_book(id, body).await?;

    Ok(Json(MessageResponse {
        message: "book updated".to_owned(),
    }))
}

/// `DELETE /admin/book/{book_id}` - remove a catalog entry.
#[instrument(skip(state, _admin))]
pub async fn delete_book(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(book_id): Path<String>,
) -> Result<Json<MessageResponse>> {
    let id = parse_book_id(&book_id)?;

    let catalog = CatalogService::new(state.store());
    catalog.delete_book(id).await?;

    Ok(Json(MessageResponse {
        message: "book deleted".to_owned(),
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_book_id_valid_hex() {
        let id = BookId::generate();
        assert_eq!(parse_book_id(&id.to_hex()).unwrap(), id);
    }

    #[test]
    fn test_parse_book_id_rejects_garbage() {
        assert!(matches!(
            parse_book_id("zzz"),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn test_parse_book_id_rejects_blank() {
        assert!(matches!(parse_book_id(""), Err(AppError::BadRequest(_))));
    }
}
