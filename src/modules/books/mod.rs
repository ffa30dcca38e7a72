pub mod handlers;
pub mod id;
pub mod models;
pub mod store;
pub mod validation;

use std::sync::Arc;

use async_trait::async_trait;
use axum::{routing::get, Router};
use serde_json::json;

use shelf_kernel::{InitCtx, Module};

use handlers::SharedStore;

/// Book resource service: CRUD over the `books` collection
pub struct BooksModule {
    store: SharedStore,
}

impl BooksModule {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            collection = %ctx.settings.database.collection,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route(
                "/books",
                get(handlers::list_books).post(handlers::create_book),
            )
            .route(
                "/books/",
                get(handlers::list_books).post(handlers::create_book),
            )
            .route(
                "/books/{book_id}",
                get(handlers::get_book)
                    .put(handlers::update_book_status)
                    .delete(handlers::delete_book),
            )
            .with_state(self.store.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let error = |description: &str| {
            json!({
                "description": description,
                "content": {
                    "application/json": {
                        "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                    }
                }
            })
        };
        let book = |description: &str| {
            json!({
                "description": description,
                "content": {
                    "application/json": {
                        "schema": { "$ref": "#/components/schemas/Book" }
                    }
                }
            })
        };
        let id_param = json!({
            "name": "book_id",
            "in": "path",
            "required": true,
            "description": "24-character hex identifier",
            "schema": { "type": "string" }
        });

        Some(json!({
            "paths": {
                "/books/": {
                    "get": {
                        "summary": "List books",
                        "tags": ["Books"],
                        "responses": {
                            "200": {
                                "description": "Every book, possibly none",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "array",
                                            "items": { "$ref": "#/components/schemas/Book" }
                                        }
                                    }
                                }
                            },
                            "500": error("Store unavailable")
                        }
                    },
                    "post": {
                        "summary": "Add a new book",
                        "tags": ["Books"],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/CreateBook" }
                                }
                            }
                        },
                        "responses": {
                            "201": book("Created book"),
                            "400": error("Malformed JSON"),
                            "422": error("Validation error"),
                            "500": error("Store unavailable")
                        }
                    }
                },
                "/books/{book_id}": {
                    "get": {
                        "summary": "Get a book by id",
                        "tags": ["Books"],
                        "parameters": [id_param.clone()],
                        "responses": {
                            "200": book("The book"),
                            "400": error("Invalid book ID format"),
                            "404": error("Book not found")
                        }
                    },
                    "put": {
                        "summary": "Update the status of a book",
                        "tags": ["Books"],
                        "parameters": [id_param.clone()],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/UpdateBookStatus" }
                                }
                            }
                        },
                        "responses": {
                            "200": book("Updated book"),
                            "400": error("Invalid book ID format"),
                            "404": error("Book not found"),
                            "422": error("Validation error")
                        }
                    },
                    "delete": {
                        "summary": "Delete a book by id",
                        "tags": ["Books"],
                        "parameters": [id_param],
                        "responses": {
                            "200": {
                                "description": "Confirmation message",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "object",
                                            "properties": { "message": { "type": "string" } }
                                        }
                                    }
                                }
                            },
                            "400": error("Invalid book ID format"),
                            "404": error("Book not found")
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "BookStatus": {
                        "type": "string",
                        "enum": ["available", "borrowed"]
                    },
                    "Book": {
                        "type": "object",
                        "properties": {
                            "id": {
                                "type": "string",
                                "description": "Unique identifier for the book"
                            },
                            "title": { "type": "string" },
                            "author": { "type": "string" },
                            "genre": { "type": "array", "items": { "type": "string" } },
                            "rating": { "type": "integer", "minimum": 1, "maximum": 5 },
                            "pages": { "type": "integer", "minimum": 0 },
                            "status": { "$ref": "#/components/schemas/BookStatus" }
                        },
                        "required": ["id", "title", "author", "genre", "rating", "pages", "status"]
                    },
                    "CreateBook": {
                        "type": "object",
                        "properties": {
                            "title": { "type": "string", "minLength": 1 },
                            "author": { "type": "string", "minLength": 1 },
                            "genre": { "type": "array", "items": { "type": "string" } },
                            "rating": {
                                "type": "integer",
                                "minimum": 1,
                                "maximum": 5,
                                "default": 1
                            },
                            "pages": { "type": "integer", "minimum": 0 },
                            "status": { "$ref": "#/components/schemas/BookStatus" }
                        },
                        "required": ["title", "author", "genre", "pages", "status"]
                    },
                    "UpdateBookStatus": {
                        "type": "object",
                        "properties": {
                            "status": { "$ref": "#/components/schemas/BookStatus" }
                        },
                        "required": ["status"]
                    }
                }
            }
        }))
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module stopped");
        Ok(())
    }
}

/// Create a new instance of the books module
pub fn create_module(store: SharedStore) -> Arc<dyn Module> {
    Arc::new(BooksModule::new(store))
}
