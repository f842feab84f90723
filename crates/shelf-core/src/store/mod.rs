//! Record store client abstraction
//!
//! The remote store owns every book. [`BookStore`] is the four-operation
//! contract the rest of the crate talks to; [`HttpBookStore`] speaks the
//! `/books` REST API and [`MemoryBookStore`] keeps everything in process.

pub mod http;
pub mod memory;

pub use http::HttpBookStore;
pub use memory::MemoryBookStore;

use async_trait::async_trait;
use shelf_domain::{Book, BookDraft, BookId};
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Request failed: {message}")]
    RequestFailed { message: String },
    #[error("Invalid URL: {url}")]
    InvalidUrl { url: String },
    #[error("Timeout")]
    Timeout,
    #[error("Unexpected status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Parse error: {message}")]
    ParseError { message: String },
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::Status { status: 404, .. })
    }
}

/// The remote operations every store supports.
///
/// Each call is a single round-trip. Failures are returned as-is, there is no
/// retry at this layer.
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Fetch the full book list.
    async fn list(&self) -> Result<Vec<Book>, StoreError>;

    /// Create a book. The returned book carries the store-assigned id.
    async fn create(&self, draft: BookDraft) -> Result<Book, StoreError>;

    /// Replace every mutable field of an existing book.
    async fn update(&self, book: Book) -> Result<Book, StoreError>;

    /// Delete a book by id.
    async fn delete(&self, id: BookId) -> Result<(), StoreError>;
}

#[async_trait]
impl<S: BookStore + ?Sized> BookStore for Arc<S> {
    async fn list(&self) -> Result<Vec<Book>, StoreError> {
        (**self).list().await
    }

    async fn create(&self, draft: BookDraft) -> Result<Book, StoreError> {
        (**self).create(draft).await
    }

    async fn update(&self, book: Book) -> Result<Book, StoreError> {
        (**self).update(book).await
    }

    async fn delete(&self, id: BookId) -> Result<(), StoreError> {
        (**self).delete(id).await
    }
}
