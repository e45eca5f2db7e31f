//! Cart engine.
//!
//! All three operations work the same way: take the cart list from the
//! authenticated user record (read fresh by the session guard at the start
//! of the request), apply a pure list transform, and persist the whole
//! resulting list back to the user document. There is no per-user lock and
//! no conditional update, so two concurrent mutations on the same cart race
//! last-write-wins at the document level - an accepted limitation while
//! concurrent edits per user stay rare (single browser session assumed).

use thiserror::Error;

use paperleaf_core::CartLineId;

use crate::db::{BookRepository, RepositoryError, Store, UserRepository};
use crate::models::{Book, CartLine, User};

/// Errors from cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// No catalog entry with the requested title.
    #[error("book not found")]
    BookNotFound,

    /// No cart line with the requested ID.
    #[error("cart item not found")]
    ItemNotFound,

    /// Store operation failed.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Cart mutation service.
pub struct CartService<'a> {
    users: UserRepository<'a>,
    books: BookRepository<'a>,
}

impl<'a> CartService<'a> {
    /// Create a new cart service.
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self {
            users: UserRepository::new(store),
            books: BookRepository::new(store),
        }
    }

    /// Add a book to the user's cart by title.
    ///
    /// Appends a fresh line with quantity 1. A repeated add of the same
    /// book appends a second line rather than merging quantities; that is
    /// the documented behavior of the public API, preserved as-is.
    ///
    /// # Errors
    ///
    /// Returns `CartError::BookNotFound` if no book has that title,
    /// `CartError::Repository` if persisting the cart fails.
    pub async fn add_item(&self, user: &User, book_name: &str) -> Result<CartLine, CartError> {
        let book = self
            .books
            .get_by_name(book_name)
            .await?
            .ok_or(CartError::BookNotFound)?;

        let line = line_for_book(&book);
        let mut cart = user.cart.clone();
        cart.push(line.clone());

        self.users.replace_cart(user.id, &cart).await?;

        Ok(line)
    }

    /// Increment the quantity of one cart line by 1.
    ///
    /// The line's amount is recomputed from its price and new quantity;
    /// every other line is carried over untouched, order preserved.
    ///
    /// # Errors
    ///
    /// Returns `CartError::ItemNotFound` if no line matches the ID. The
    /// stored cart is left untouched in that case.
    pub async fn increment_quantity(
        &self,
        user: &User,
        line_id: CartLineId,
    ) -> Result<CartLine, CartError> {
        let (cart, updated) =
            increment_line(&user.cart, line_id).ok_or(CartError::ItemNotFound)?;

        self.users.replace_cart(user.id, &cart).await?;

        Ok(updated)
    }

    /// Remove one cart line.
    ///
    /// The first line matching the ID is removed; the relative order of the
    /// remaining lines is preserved.
    ///
    /// # Errors
    ///
    /// Returns `CartError::ItemNotFound` if no line matches the ID. The
    /// stored cart is left untouched in that case.
    pub async fn remove_item(&self, user: &User, line_id: CartLineId) -> Result<(), CartError> {
        let cart = remove_line(&user.cart, line_id).ok_or(CartError::ItemNotFound)?;

        self.users.replace_cart(user.id, &cart).await?;

        Ok(())
    }
}

/// Build a fresh cart line for a catalog book.
///
/// Quantity starts at 1 and the amount is derived from the book's price;
/// the book's title, author, and price are copied by value.
#[must_use]
pub fn line_for_book(book: &Book) -> CartLine {
    CartLine {
        id: CartLineId::generate(),
        name: book.name.clone(),
        price: book.price,
        quantity: 1,
        author: book.author_name.clone(),
        amount: book.price.amount_for(1),
    }
}

/// Rewrite a cart with one line's quantity incremented.
///
/// Returns the new list (order preserved) and the updated line, or `None`
/// if no line matches.
#[must_use]
pub fn increment_line(
    cart: &[CartLine],
    line_id: CartLineId,
) -> Option<(Vec<CartLine>, CartLine)> {
    let mut updated = None;

    let next: Vec<CartLine> = cart
        .iter()
        .map(|line| {
            if line.id == line_id {
                let mut line = line.clone();
                line.quantity += 1;
                line.amount = line.price.amount_for(line.quantity);
                updated = Some(line.clone());
                line
            } else {
                line.clone()
            }
        })
        .collect();

    updated.map(|line| (next, line))
}

/// Rewrite a cart with the first matching line removed.
///
/// Returns the shortened list (relative order preserved), or `None` if no
/// line matches.
#[must_use]
pub fn remove_line(cart: &[CartLine], line_id: CartLineId) -> Option<Vec<CartLine>> {
    let index = cart.iter().position(|line| line.id == line_id)?;

    Some(
        cart.iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, line)| line.clone())
            .collect(),
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use paperleaf_core::{BookId, Price};

    fn book(name: &str, price: i64) -> Book {
        let now = bson::DateTime::now();
        Book {
            id: BookId::generate(),
            name: name.to_owned(),
            author_name: "Frank Herbert".to_owned(),
            price: Price::new(price),
            description: String::new(),
            author_info: String::new(),
            publication: "Chilton Books".to_owned(),
            genre: "Science Fiction".to_owned(),
            category: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    fn cart_of(names: &[(&str, i64)]) -> Vec<CartLine> {
        names
            .iter()
            .map(|(name, price)| line_for_book(&book(name, *price)))
            .collect()
    }

    #[test]
    fn test_line_for_book_starts_at_quantity_one() {
        let line = line_for_book(&book("Dune", 10));
        assert_eq!(line.quantity, 1);
        assert_eq!(line.amount, 10);
        assert_eq!(line.name, "Dune");
        assert_eq!(line.author, "Frank Herbert");
    }

    #[test]
    fn test_repeated_add_duplicates_lines() {
        let dune = book("Dune", 10);
        let first = line_for_book(&dune);
        let second = line_for_book(&dune);

        // Two separate lines with distinct IDs, not a merged quantity=2 line.
        assert_ne!(first.id, second.id);
        assert_eq!(first.quantity, 1);
        assert_eq!(second.quantity, 1);
    }

    #[test]
    fn test_increment_recomputes_amount() {
        let cart = cart_of(&[("Dune", 10)]);
        let id = cart.first().unwrap().id;

        let (next, updated) = increment_line(&cart, id).unwrap();
        assert_eq!(updated.quantity, 2);
        assert_eq!(updated.amount, 20);
        assert_eq!(next.first().unwrap(), &updated);
    }

    #[test]
    fn test_increment_leaves_other_lines_untouched() {
        let cart = cart_of(&[("Dune", 10), ("Hyperion", 15), ("Foundation", 8)]);
        let id = cart.get(1).unwrap().id;

        let (next, _) = increment_line(&cart, id).unwrap();

        assert_eq!(next.len(), 3);
        assert_eq!(next.first(), cart.first());
        assert_eq!(next.get(2), cart.get(2));
        assert_eq!(next.get(1).unwrap().quantity, 2);
        assert_eq!(next.get(1).unwrap().amount, 30);
    }

    #[test]
    fn test_increment_unknown_id_is_none() {
        let cart = cart_of(&[("Dune", 10)]);
        assert!(increment_line(&cart, CartLineId::generate()).is_none());
    }

    #[test]
    fn test_remove_preserves_relative_order() {
        let cart = cart_of(&[("Dune", 10), ("Hyperion", 15), ("Foundation", 8)]);
        let id = cart.get(1).unwrap().id;

        let next = remove_line(&cart, id).unwrap();

        assert_eq!(next.len(), 2);
        assert_eq!(next.first().unwrap().name, "Dune");
        assert_eq!(next.get(1).unwrap().name, "Foundation");
    }

    #[test]
    fn test_remove_unknown_id_is_none() {
        let cart = cart_of(&[("Dune", 10), ("Hyperion", 15)]);
        assert!(remove_line(&cart, CartLineId::generate()).is_none());
    }

    #[test]
    fn test_remove_from_empty_cart_is_none() {
        assert!(remove_line(&[], CartLineId::generate()).is_none());
    }

    #[test]
    fn test_remove_first_match_only() {
        // Duplicate lines can exist (duplicate-add behavior); removal takes
        // exactly one.
        let dune = book("Dune", 10);
        let first = line_for_book(&dune);
        let second = line_for_book(&dune);
        let cart = vec![first.clone(), second.clone()];

        let next = remove_line(&cart, first.id).unwrap();
        assert_eq!(next.len(), 1);
        assert_eq!(next.first().unwrap().id, second.id);
    }
}
