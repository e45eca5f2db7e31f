//! Cart route handlers.
//!
//! Every cart route runs behind [`RequireAuth`], so the handler receives
//! the caller's account with the cart as currently persisted. Mutations go
//! through the cart service, which rewrites and persists the whole list.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use paperleaf_core::CartLineId;

use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::CartLine;
use crate::services::{CartError, CartService};
use crate::state::AppState;

/// Request body for `PATCH /cart/add`.
#[derive(Debug, Deserialize)]
pub struct AddRequest {
    /// Book title to add.
    pub name: String,
}

/// Response for a cart add.
#[derive(Debug, Serialize)]
pub struct AddResponse {
    pub message: String,
    pub item: CartLine,
}

/// Response for a quantity update.
#[derive(Debug, Serialize)]
pub struct UpdateResponse {
    pub message: String,
    pub updated_item: CartLine,
}

/// Plain confirmation message.
#[derive(Debug, Serialize)]
pub struct RemoveResponse {
    pub message: String,
}

/// Parse a cart line ID path segment.
///
/// A blank segment is a 400; a malformed non-blank one maps to "cart item
/// not found" (404), because an id that cannot be a line id can never
/// match a line.
fn parse_line_id(raw: &str) -> Result<CartLineId> {
    if raw.trim().is_empty() {
        return Err(AppError::BadRequest("cart id is required".to_owned()));
    }
    raw.parse()
        .map_err(|_| AppError::Cart(CartError::ItemNotFound))
}

/// `PATCH /cart/add` - append a book to the caller's cart by title.
///
/// A repeated add appends a second line for the same book.
#[instrument(skip(state, user), fields(book = %body.name))]
pub async fn add(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(body): Json<AddRequest>,
) -> Result<Json<AddResponse>> {
    if body.name.trim().is_empty() {
        return Err(AppError::BadRequest("book name is required".to_owned()));
    }

    let cart = CartService::new(state.store());
    let item = cart.add_item(&user, &body.name).await?;

    Ok(Json(AddResponse {
        message: "item added to cart".to_owned(),
        item,
    }))
}

/// `PATCH /cart/update/{id}` - increment one line's quantity by 1.
#[instrument(skip(state, user))]
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<Json<UpdateResponse>> {
    let line_id = parse_line_id(&id)?;

    let cart = CartService::new(state.store());
    let updated_item = cart.increment_quantity(&user, line_id).await?;

    Ok(Json(UpdateResponse {
        message: "item quantity updated".to_owned(),
        updated_item,
    }))
}

/// `PATCH /cart/remove/{id}` - drop one line from the cart.
#[instrument(skip(state, user))]
pub async fn remove(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<Json<RemoveResponse>> {
    let line_id = parse_line_id(&id)?;

    let cart = CartService::new(state.store());
    cart.remove_item(&user, line_id).await?;

    Ok(Json(RemoveResponse {
        message: "item removed from cart".to_owned(),
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line_id_valid_hex() {
        let id = CartLineId::generate();
        assert_eq!(parse_line_id(&id.to_hex()).unwrap(), id);
    }

    #[test]
    fn test_parse_line_id_garbage_is_item_not_found() {
        // A malformed id answers like an id that matches no line.
        assert!(matches!(
            parse_line_id("not-an-object-id"),
            Err(AppError::Cart(CartError::ItemNotFound))
        ));
    }

    #[test]
    fn test_parse_line_id_rejects_blank() {
        assert!(matches!(parse_line_id("  "), Err(AppError::BadRequest(_))));
    }
}
