pub use memory::MemoryBookStore;
pub use mongo::MongoBookStore;

use async_trait::async_trait;
use thiserror::Error;

use super::id::BookId;
use super::models::{BookDocument, BookStatus, NewBook};

mod memory;
mod mongo;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("document store request failed: {0}")]
    Driver(#[from] mongodb::error::Error),

    #[error("document store assigned a non-ObjectId identifier: {0}")]
    UnexpectedId(String),
}

/// Single-document operations the book service needs from its store.
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Persists a new book and returns the identifier the store assigned
    async fn insert(&self, book: NewBook) -> Result<BookId, StoreError>;

    /// Every book, in the store's natural order
    async fn find_all(&self) -> Result<Vec<BookDocument>, StoreError>;

    async fn find_by_id(&self, id: BookId) -> Result<Option<BookDocument>, StoreError>;

    /// Sets `status` on one book. Returns false when no book has that id.
    async fn set_status(&self, id: BookId, status: BookStatus) -> Result<bool, StoreError>;

    /// Returns true if a book was removed
    async fn delete_by_id(&self, id: BookId) -> Result<bool, StoreError>;
}
