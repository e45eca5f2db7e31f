//! User domain types.
//!
//! A user document owns its cart: cart lines are embedded in the user record
//! and always persisted as a whole list, never positionally.

use serde::{Deserialize, Serialize};

use paperleaf_core::{CartLineId, Email, Price, Role, UserId};

/// A bookstore account.
///
/// The email is unique and acts as the login key. Exactly one account
/// system-wide may hold [`Role::Admin`]; the rule is enforced at signup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user ID.
    #[serde(rename = "_id")]
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Login email (unique).
    pub email: Email,
    /// Argon2 PHC-string hash of the password. Never the plaintext.
    #[serde(rename = "password")]
    pub password_hash: String,
    /// Authorization tier.
    pub role: Role,
    /// Embedded shopping cart, ordered by insertion.
    #[serde(default)]
    pub cart: Vec<CartLine>,
    /// Bumped on every whole-cart write. Not yet used for conditional
    /// updates; the hook for optimistic-concurrency hardening.
    #[serde(default)]
    pub cart_revision: i64,
}

impl User {
    /// Create a new account with an empty cart.
    #[must_use]
    pub fn new(name: String, email: Email, password_hash: String, role: Role) -> Self {
        Self {
            id: UserId::generate(),
            name,
            email,
            password_hash,
            role,
            cart: Vec::new(),
            cart_revision: 0,
        }
    }
}

/// One entry in a user's cart: a book selection with quantity and amount.
///
/// Book fields are copied by value at add time; a later catalog edit does
/// not retroactively change lines already in a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Unique line ID, generated when the book is added.
    pub id: CartLineId,
    /// Book title (denormalized copy).
    pub name: String,
    /// Unit price at add time.
    pub price: Price,
    /// Number of copies, always >= 1.
    pub quantity: u32,
    /// Author name (denormalized copy).
    pub author: String,
    /// Line total. Always recomputed server-side as `price * quantity`
    /// immediately before persistence; never trusted from client input.
    pub amount: i64,
}

/// The profile view returned by `GET /user/profile`.
///
/// Excludes the password hash and internal bookkeeping fields.
#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    pub name: String,
    pub email: Email,
    pub role: Role,
    pub cart: Vec<CartLine>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            name: user.name,
            email: user.email,
            role: user.role,
            cart: user.cart,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User::new(
            "Ada".to_owned(),
            Email::parse("ada@example.com").unwrap(),
            "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_owned(),
            Role::User,
        )
    }

    #[test]
    fn test_new_user_has_empty_cart() {
        let user = sample_user();
        assert!(user.cart.is_empty());
        assert_eq!(user.cart_revision, 0);
    }

    #[test]
    fn test_bson_roundtrip_defaults_cart() {
        // Documents written before the cart existed have no cart field.
        let doc = bson::doc! {
            "_id": bson::oid::ObjectId::new(),
            "name": "Ada",
            "email": "ada@example.com",
            "password": "hash",
            "role": "user",
        };
        let user: User = bson::from_document(doc).unwrap();
        assert!(user.cart.is_empty());
        assert_eq!(user.cart_revision, 0);
    }

    #[test]
    fn test_profile_omits_password_hash() {
        let profile = UserProfile::from(sample_user());
        let json = serde_json::to_value(&profile).unwrap();
        assert!(json.get("password").is_none());
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["name"], "Ada");
    }

    #[test]
    fn test_password_hash_stored_under_password_key() {
        let user = sample_user();
        let doc = bson::to_document(&user).unwrap();
        assert!(doc.contains_key("password"));
        assert!(!doc.contains_key("password_hash"));
    }
}
