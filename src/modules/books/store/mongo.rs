use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, Document},
    Collection,
};

use shelf_db::Db;

use super::{BookStore, StoreError};
use crate::modules::books::id::BookId;
use crate::modules::books::models::{BookDocument, BookStatus, NewBook};

/// [`BookStore`] backed by a MongoDB collection.
#[derive(Clone, Debug)]
pub struct MongoBookStore {
    books: Collection<BookDocument>,
}

impl MongoBookStore {
    pub fn new(db: &Db, collection: &str) -> Self {
        Self {
            books: db.collection(collection),
        }
    }
}

fn by_id(id: BookId) -> Document {
    doc! { "_id": id.as_object_id() }
}

/// Touches `status` only; every other field keeps its stored value.
fn status_update(status: BookStatus) -> Document {
    doc! { "$set": { "status": status.as_str() } }
}

#[async_trait]
impl BookStore for MongoBookStore {
    async fn insert(&self, book: NewBook) -> Result<BookId, StoreError> {
        let result = self
            .books
            .clone_with_type::<NewBook>()
            .insert_one(book)
            .await?;

        result
            .inserted_id
            .as_object_id()
            .map(BookId::from)
            .ok_or_else(|| StoreError::UnexpectedId(result.inserted_id.to_string()))
    }

    async fn find_all(&self) -> Result<Vec<BookDocument>, StoreError> {
        let cursor = self.books.find(doc! {}).await?;
        let books: Vec<BookDocument> = cursor.try_collect().await?;
        Ok(books)
    }

    async fn find_by_id(&self, id: BookId) -> Result<Option<BookDocument>, StoreError> {
        Ok(self.books.find_one(by_id(id)).await?)
    }

    async fn set_status(&self, id: BookId, status: BookStatus) -> Result<bool, StoreError> {
        let result = self
            .books
            .update_one(by_id(id), status_update(status))
            .await?;
        // A no-op `$set` still matches, so re-setting the current status succeeds.
        Ok(result.matched_count > 0)
    }

    async fn delete_by_id(&self, id: BookId) -> Result<bool, StoreError> {
        let result = self.books.delete_one(by_id(id)).await?;
        Ok(result.deleted_count == 1)
    }
}
