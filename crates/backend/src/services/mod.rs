//! Business logic services.
//!
//! Each service is constructed per request from the shared [`crate::db::Store`]
//! handle and (for auth) the token service; none of them hold state.

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod token;

pub use auth::{AuthError, AuthService, Signup};
pub use cart::{CartError, CartService};
pub use catalog::{CatalogError, CatalogService};
pub use token::{Claims, TokenError, TokenService};
