//! Domain models for the bookstore.

pub mod book;
pub mod user;

pub use book::{Book, BookInput, BookPatch};
pub use user::{CartLine, User, UserProfile};
