//! Book catalog domain types.

use bson::Document;
use serde::{Deserialize, Deserializer, Serialize};

use paperleaf_core::{BookId, Price};

/// A catalog entry.
///
/// Cart lines copy `name`, `author_name`, and `price` by value; the catalog
/// owns the rest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    /// Unique book ID.
    #[serde(rename = "_id")]
    pub id: BookId,
    /// Title. Cart adds look books up by this field.
    pub name: String,
    pub author_name: String,
    /// Unit price in whole currency units.
    pub price: Price,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub author_info: String,
    pub publication: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub category: String,
    pub created_at: bson::DateTime,
    pub updated_at: bson::DateTime,
}

/// Request body for `POST /admin/book`.
#[derive(Debug, Clone, Deserialize)]
pub struct BookInput {
    pub name: String,
    pub author_name: String,
    pub price: Price,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub author_info: String,
    pub publication: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub category: String,
}

impl Book {
    /// Build a new catalog entry from an admin submission.
    #[must_use]
    pub fn new(input: BookInput) -> Self {
        let now = bson::DateTime::now();
        Self {
            id: BookId::generate(),
            name: input.name,
            author_name: input.author_name,
            price: input.price,
            description: input.description,
            author_info: input.author_info,
            publication: input.publication,
            genre: input.genre,
            category: input.category,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update for `PATCH /admin/book/{book_id}`.
///
/// Each field carries explicit presence: a missing key and an empty string
/// both mean "leave unchanged" (the empty-string-means-absent convention of
/// the public API, made explicit here rather than checked field by field at
/// the persistence layer). Price is deliberately not patchable through this
/// endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookPatch {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub author_name: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub author_info: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub publication: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub genre: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub category: Option<String>,
}

impl BookPatch {
    /// Whether the patch carries no field changes at all.
    ///
    /// An empty patch still touches `updated_at` when applied, matching the
    /// public API's historical behavior.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.author_name.is_none()
            && self.description.is_none()
            && self.author_info.is_none()
            && self.publication.is_none()
            && self.genre.is_none()
            && self.category.is_none()
    }

    /// Convert the patch into a store `$set` document.
    ///
    /// This is the single place where patch fields map to document fields;
    /// `updated_at` is always set.
    #[must_use]
    pub fn into_update_document(self) -> Document {
        let mut set = Document::new();

        if let Some(name) = self.name {
            set.insert("name", name);
        }
        if let Some(author_name) = self.author_name {
            set.insert("author_name", author_name);
        }
        if let Some(description) = self.description {
            set.insert("description", description);
        }
        if let Some(author_info) = self.author_info {
            set.insert("author_info", author_info);
        }
        if let Some(publication) = self.publication {
            set.insert("publication", publication);
        }
        if let Some(genre) = self.genre {
            set.insert("genre", genre);
        }
        if let Some(category) = self.category {
            set.insert("category", category);
        }
        set.insert("updated_at", bson::DateTime::now());

        bson::doc! { "$set": set }
    }
}

/// Deserialize an optional string where the empty string means absent.
fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample_input() -> BookInput {
        BookInput {
            name: "Dune".to_owned(),
            author_name: "Frank Herbert".to_owned(),
            price: Price::new(10),
            description: String::new(),
            author_info: String::new(),
            publication: "Chilton Books".to_owned(),
            genre: "Science Fiction".to_owned(),
            category: String::new(),
        }
    }

    #[test]
    fn test_new_book_timestamps_match() {
        let book = Book::new(sample_input());
        assert_eq!(book.created_at, book.updated_at);
        assert_eq!(book.price, Price::new(10));
    }

    #[test]
    fn test_patch_empty_string_means_absent() {
        let patch: BookPatch =
            serde_json::from_str(r#"{"name": "", "genre": "Fantasy"}"#).unwrap();
        assert!(patch.name.is_none());
        assert_eq!(patch.genre.as_deref(), Some("Fantasy"));
    }

    #[test]
    fn test_patch_missing_fields_are_absent() {
        let patch: BookPatch = serde_json::from_str("{}").unwrap();
        assert!(patch.is_empty());
    }

    #[test]
    fn test_update_document_includes_only_present_fields() {
        let patch: BookPatch =
            serde_json::from_str(r#"{"name": "Dune Messiah", "description": ""}"#).unwrap();
        let update = patch.into_update_document();
        let set = update.get_document("$set").unwrap();

        assert_eq!(set.get_str("name").unwrap(), "Dune Messiah");
        assert!(!set.contains_key("description"));
        assert!(!set.contains_key("genre"));
        assert!(set.contains_key("updated_at"));
    }

    #[test]
    fn test_update_document_always_touches_updated_at() {
        let update = BookPatch::default().into_update_document();
        let set = update.get_document("$set").unwrap();
        assert_eq!(set.len(), 1);
        assert!(set.contains_key("updated_at"));
    }

    #[test]
    fn test_price_not_patchable() {
        // Price changes go through a different path; the patch ignores them.
        let patch: BookPatch = serde_json::from_str(r#"{"price": 99}"#).unwrap();
        assert!(patch.is_empty());
    }
}
