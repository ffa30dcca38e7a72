use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use super::id::BookId;

/// Lending state of a book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookStatus {
    Available,
    Borrowed,
}

impl BookStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookStatus::Available => "available",
            BookStatus::Borrowed => "borrowed",
        }
    }
}

fn default_rating() -> i64 {
    1
}

/// Request model for creating a new book. Any `id` in the payload is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub genre: Vec<String>,
    /// 1 to 5, defaults to 1
    #[serde(default = "default_rating")]
    pub rating: i64,
    pub pages: i64,
    pub status: BookStatus,
}

/// Request model for `PUT /books/{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: BookStatus,
}

/// Book as stored in the `books` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    pub author: String,
    pub genre: Vec<String>,
    pub rating: i64,
    pub pages: i64,
    pub status: BookStatus,
}

impl BookDocument {
    pub fn new(id: BookId, book: NewBook) -> Self {
        Self {
            id: id.as_object_id(),
            title: book.title,
            author: book.author,
            genre: book.genre,
            rating: book.rating,
            pages: book.pages,
            status: book.status,
        }
    }
}

/// Book as returned over HTTP, with the identifier in string form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: String,
    pub title: String,
    pub author: String,
    pub genre: Vec<String>,
    pub rating: i64,
    pub pages: i64,
    pub status: BookStatus,
}

impl From<BookDocument> for Book {
    fn from(doc: BookDocument) -> Self {
        Self {
            id: BookId::from(doc.id).to_string(),
            title: doc.title,
            author: doc.author,
            genre: doc.genre,
            rating: doc.rating,
            pages: doc.pages,
            status: doc.status,
        }
    }
}
