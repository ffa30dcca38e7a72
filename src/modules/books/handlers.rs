//! Request handlers for `/books`.

use std::sync::Arc;

use anyhow::anyhow;
use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use shelf_http::{
    error::AppError,
    extract::{JsonBody, PathParam},
};

use super::id::{BookId, InvalidBookId};
use super::models::{Book, NewBook, StatusUpdate};
use super::store::{BookStore, StoreError};
use super::validation::{Validate, ValidationError};

pub type SharedStore = Arc<dyn BookStore>;

impl From<InvalidBookId> for AppError {
    fn from(err: InvalidBookId) -> Self {
        AppError::bad_request(err.to_string())
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::validation(
            vec![json!({ "field": err.field, "error": err.reason })],
            err.to_string(),
        )
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::Internal(err.into())
    }
}

fn book_not_found(id: BookId) -> AppError {
    AppError::not_found(format!("Book {} not found", id))
}

/// `GET /books/`
pub async fn list_books(State(store): State<SharedStore>) -> Result<Json<Vec<Book>>, AppError> {
    let books = store.find_all().await?;
    Ok(Json(books.into_iter().map(Book::from).collect()))
}

/// `POST /books/`
pub async fn create_book(
    State(store): State<SharedStore>,
    JsonBody(payload): JsonBody<NewBook>,
) -> Result<(StatusCode, Json<Book>), AppError> {
    payload.validate()?;

    let id = store.insert(payload).await?;
    let created = store
        .find_by_id(id)
        .await?
        .ok_or_else(|| anyhow!("book {} vanished right after insert", id))?;

    tracing::debug!(book_id = %id, "book created");
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// `GET /books/{id}`
pub async fn get_book(
    State(store): State<SharedStore>,
    PathParam(raw_id): PathParam<String>,
) -> Result<Json<Book>, AppError> {
    let id: BookId = raw_id.parse()?;
    let book = store.find_by_id(id).await?.ok_or_else(|| book_not_found(id))?;
    Ok(Json(book.into()))
}

/// `PUT /books/{id}`; only `status` can change.
pub async fn update_book_status(
    State(store): State<SharedStore>,
    PathParam(raw_id): PathParam<String>,
    JsonBody(update): JsonBody<StatusUpdate>,
) -> Result<Json<Book>, AppError> {
    let id: BookId = raw_id.parse()?;

    if !store.set_status(id, update.status).await? {
        return Err(book_not_found(id));
    }

    // A concurrent delete can land between the write and the re-read.
    let book = store.find_by_id(id).await?.ok_or_else(|| book_not_found(id))?;

    tracing::debug!(book_id = %id, status = update.status.as_str(), "book status updated");
    Ok(Json(book.into()))
}

/// `DELETE /books/{id}`
pub async fn delete_book(
    State(store): State<SharedStore>,
    PathParam(raw_id): PathParam<String>,
) -> Result<Json<Value>, AppError> {
    let id: BookId = raw_id.parse()?;

    if !store.delete_by_id(id).await? {
        return Err(book_not_found(id));
    }

    tracing::debug!(book_id = %id, "book deleted");
    Ok(Json(json!({ "message": "Book successfully deleted" })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::response::IntoResponse;

    use crate::modules::books::models::{BookDocument, BookStatus};
    use crate::modules::books::store::MemoryBookStore;

    /// Store whose every call fails the way an unreachable server would.
    struct UnreachableStore;

    fn unreachable() -> StoreError {
        StoreError::Driver(mongodb::error::Error::custom("server selection timeout"))
    }

    #[async_trait]
    impl BookStore for UnreachableStore {
        async fn insert(&self, _book: NewBook) -> Result<BookId, StoreError> {
            Err(unreachable())
        }
        async fn find_all(&self) -> Result<Vec<BookDocument>, StoreError> {
            Err(unreachable())
        }
        async fn find_by_id(&self, _id: BookId) -> Result<Option<BookDocument>, StoreError> {
            Err(unreachable())
        }
        async fn set_status(&self, _id: BookId, _status: BookStatus) -> Result<bool, StoreError> {
            Err(unreachable())
        }
        async fn delete_by_id(&self, _id: BookId) -> Result<bool, StoreError> {
            Err(unreachable())
        }
    }

    #[tokio::test]
    async fn store_failure_is_a_server_error() {
        let store: SharedStore = Arc::new(UnreachableStore);
        let err = list_books(State(store)).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn malformed_id_never_reaches_the_store() {
        let store: SharedStore = Arc::new(UnreachableStore);
        let err = get_book(State(store.clone()), PathParam("not-an-id".to_string()))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let err = delete_book(State(store), PathParam("123".to_string()))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn invalid_payload_is_not_persisted() {
        let memory = Arc::new(MemoryBookStore::new());
        let store: SharedStore = memory.clone();
        let payload = NewBook {
            title: "Dune".to_string(),
            author: "Herbert".to_string(),
            genre: vec![],
            rating: 6,
            pages: 412,
            status: BookStatus::Available,
        };

        let err = create_book(State(store), JsonBody(payload)).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(memory.is_empty().await);
    }
}
