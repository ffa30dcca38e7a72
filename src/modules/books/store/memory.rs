use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{BookStore, StoreError};
use crate::modules::books::id::BookId;
use crate::modules::books::models::{BookDocument, BookStatus, NewBook};

/// In-process [`BookStore`] for tests and local runs without MongoDB.
/// Keeps insertion order, like a collection without an index hint.
#[derive(Debug, Default)]
pub struct MemoryBookStore {
    books: RwLock<Vec<BookDocument>>,
}

impl MemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.books.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.books.read().await.is_empty()
    }
}

#[async_trait]
impl BookStore for MemoryBookStore {
    async fn insert(&self, book: NewBook) -> Result<BookId, StoreError> {
        let id = BookId::generate();
        self.books.write().await.push(BookDocument::new(id, book));
        Ok(id)
    }

    async fn find_all(&self) -> Result<Vec<BookDocument>, StoreError> {
        Ok(self.books.read().await.clone())
    }

    async fn find_by_id(&self, id: BookId) -> Result<Option<BookDocument>, StoreError> {
        let books = self.books.read().await;
        Ok(books
            .iter()
            .find(|b| b.id == id.as_object_id())
            .cloned())
    }

    async fn set_status(&self, id: BookId, status: BookStatus) -> Result<bool, StoreError> {
        let mut books = self.books.write().await;
        match books.iter_mut().find(|b| b.id == id.as_object_id()) {
            Some(book) => {
                book.status = status;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_by_id(&self, id: BookId) -> Result<bool, StoreError> {
        let mut books = self.books.write().await;
        let before = books.len();
        books.retain(|b| b.id != id.as_object_id());
        Ok(books.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(title: &str) -> NewBook {
        NewBook {
            title: title.to_string(),
            author: "Herbert".to_string(),
            genre: vec!["sci-fi".to_string()],
            rating: 4,
            pages: 300,
            status: BookStatus::Available,
        }
    }

    #[tokio::test]
    async fn insert_assigns_distinct_ids_for_identical_books() {
        let store = MemoryBookStore::new();
        let first = store.insert(book("Dune")).await.unwrap();
        let second = store.insert(book("Dune")).await.unwrap();
        assert_ne!(first, second);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn find_all_preserves_insertion_order() {
        let store = MemoryBookStore::new();
        assert!(store.find_all().await.unwrap().is_empty());

        for title in ["Dune", "Emma", "Ulysses"] {
            store.insert(book(title)).await.unwrap();
        }
        let titles: Vec<String> = store
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.title)
            .collect();
        assert_eq!(titles, ["Dune", "Emma", "Ulysses"]);
    }

    #[tokio::test]
    async fn set_status_touches_only_status() {
        let store = MemoryBookStore::new();
        let id = store.insert(book("Dune")).await.unwrap();
        let before = store.find_by_id(id).await.unwrap().unwrap();

        assert!(store.set_status(id, BookStatus::Borrowed).await.unwrap());

        let after = store.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(after.status, BookStatus::Borrowed);
        assert_eq!(
            after,
            BookDocument {
                status: BookStatus::Borrowed,
                ..before
            }
        );
    }

    #[tokio::test]
    async fn missing_ids_report_no_match() {
        let store = MemoryBookStore::new();
        let id = BookId::generate();
        assert!(store.find_by_id(id).await.unwrap().is_none());
        assert!(!store.set_status(id, BookStatus::Borrowed).await.unwrap());
        assert!(!store.delete_by_id(id).await.unwrap());
    }

    #[tokio::test]
    async fn delete_removes_exactly_one() {
        let store = MemoryBookStore::new();
        let keep = store.insert(book("Emma")).await.unwrap();
        let gone = store.insert(book("Dune")).await.unwrap();

        assert!(store.delete_by_id(gone).await.unwrap());
        assert!(store.find_by_id(gone).await.unwrap().is_none());
        assert!(store.find_by_id(keep).await.unwrap().is_some());
        assert!(!store.delete_by_id(gone).await.unwrap());
    }
}
