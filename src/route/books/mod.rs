use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::store::BookDocument;

pub mod app;
pub mod create_book;
pub mod delete_book;
pub mod delete_books;
pub mod get_book;
pub mod list_books;
pub mod update_book;

/// A book as the API serves it. The id is the ObjectId hex.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct Book {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
}

impl From<BookDocument> for Book {
    fn from(document: BookDocument) -> Self {
        Book {
            id: document.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: document.name,
            author: document.author,
            isbn: document.isbn,
            genre: document.genre,
        }
    }
}

/// Create and update payload. Any subset of the four fields.
///
/// There is deliberately no id field: ids are assigned by the store, so an id
/// in the payload is ignored.
#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct BookFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
}

impl BookFields {
    pub fn into_document(self) -> BookDocument {
        BookDocument {
            id: None,
            name: self.name,
            author: self.author,
            isbn: self.isbn,
            genre: self.genre,
        }
    }
}
