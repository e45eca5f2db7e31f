//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types. Paperleaf documents
//! live in a document store, so IDs wrap BSON `ObjectId`s and travel as
//! 24-character hex strings in URLs.

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around [`bson::oid::ObjectId`] with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`
/// - `generate()` for fresh IDs, `parse()` for hex strings
/// - `as_object_id()` and `to_hex()` accessors
/// - `From<ObjectId>` and `Into<ObjectId>` implementations
///
/// # Example
///
/// ```rust
/// # use paperleaf_core::define_id;
/// define_id!(UserId);
/// define_id!(BookId);
///
/// let user_id = UserId::generate();
/// let book_id = BookId::generate();
///
/// // These are different types, so this won't compile:
/// // let _: UserId = book_id;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(::bson::oid::ObjectId);

        impl $name {
            /// Generate a fresh, unique ID.
            #[must_use]
            pub fn generate() -> Self {
                Self(::bson::oid::ObjectId::new())
            }

            /// Parse an ID from its 24-character hex representation.
            ///
            /// # Errors
            ///
            /// Returns `bson::oid::Error` if the input is not valid hex of
            /// the expected length.
            pub fn parse(hex: &str) -> ::core::result::Result<Self, ::bson::oid::Error> {
                ::bson::oid::ObjectId::parse_str(hex).map(Self)
            }

            /// Get the underlying `ObjectId`.
            #[must_use]
            pub const fn as_object_id(&self) -> ::bson::oid::ObjectId {
                self.0
            }

            /// Render the ID as a 24-character hex string.
            #[must_use]
            pub fn to_hex(&self) -> ::std::string::String {
                self.0.to_hex()
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0.to_hex())
            }
        }

        impl From<::bson::oid::ObjectId> for $name {
            fn from(id: ::bson::oid::ObjectId) -> Self {
                Self(id)
            }
        }

        impl From<$name> for ::bson::oid::ObjectId {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = ::bson::oid::Error;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                Self::parse(s)
            }
        }
    };
}

// Define standard entity IDs
define_id!(UserId);
define_id!(BookId);
define_id!(CartLineId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_unique() {
        let a = CartLineId::generate();
        let b = CartLineId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn test_parse_roundtrip() {
        let id = UserId::generate();
        let parsed = UserId::parse(&id.to_hex()).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(CartLineId::parse("not-a-hex-id").is_err());
        assert!(CartLineId::parse("").is_err());
        // Wrong length
        assert!(CartLineId::parse("abcdef").is_err());
    }

    #[test]
    fn test_display_is_hex() {
        let id = BookId::generate();
        let shown = format!("{id}");
        assert_eq!(shown.len(), 24);
        assert!(shown.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_bson_roundtrip() {
        let id = UserId::generate();
        let bson = bson::to_bson(&id).unwrap();
        let back: UserId = bson::from_bson(bson).unwrap();
        assert_eq!(back, id);
    }
}
