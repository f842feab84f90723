//! Book repository: a store behind the mutation cache
//!
//! Reads go through [`QueryCache`] under [`QueryKey::BOOKS`]. Every successful
//! write invalidates that key; failed writes leave the cache untouched.

use shelf_domain::{Book, BookDraft, BookId};
use std::sync::Arc;

use crate::cache::{QueryCache, QueryKey};
use crate::store::{BookStore, StoreError};

pub struct BookRepository<S> {
    store: S,
    cache: Arc<QueryCache<Vec<Book>>>,
}

impl<S: BookStore> BookRepository<S> {
    /// Repository with its own private cache
    pub fn new(store: S) -> Self {
        Self::with_cache(store, Arc::new(QueryCache::new()))
    }

    /// Repository sharing an injected cache
    pub fn with_cache(store: S, cache: Arc<QueryCache<Vec<Book>>>) -> Self {
        Self { store, cache }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn cache(&self) -> &Arc<QueryCache<Vec<Book>>> {
        &self.cache
    }

    /// The full book list, from cache when fresh
    pub async fn books(&self) -> Result<Vec<Book>, StoreError> {
        self.cache
            .fetch(&QueryKey::BOOKS, || self.store.list())
            .await
            .inspect_err(|e| tracing::error!(error = %e, "failed to load books"))
    }

    /// Look a book up in the current list
    pub async fn find(&self, id: BookId) -> Result<Option<Book>, StoreError> {
        Ok(self.books().await?.into_iter().find(|b| b.id == id))
    }

    /// Look a book up in whatever is cached, fresh or stale, without fetching
    pub fn cached(&self, id: BookId) -> Option<Book> {
        self.cache
            .get(&QueryKey::BOOKS)
            .and_then(|entry| entry.data.into_iter().find(|b| b.id == id))
    }

    pub async fn create(&self, draft: BookDraft) -> Result<Book, StoreError> {
        match self.store.create(draft).await {
            Ok(book) => {
                tracing::info!(id = %book.id, title = %book.title, "book created");
                self.invalidate();
                Ok(book)
            }
            Err(e) => {
                tracing::error!(error = %e, "book creation failed");
                Err(e)
            }
        }
    }

    pub async fn update(&self, book: Book) -> Result<Book, StoreError> {
        let id = book.id;
        match self.store.update(book).await {
            Ok(book) => {
                tracing::info!(id = %book.id, "book updated");
                self.invalidate();
                Ok(book)
            }
            Err(e) => {
                tracing::error!(%id, error = %e, "book update failed");
                Err(e)
            }
        }
    }

    pub async fn delete(&self, id: BookId) -> Result<(), StoreError> {
        match self.store.delete(id).await {
            Ok(()) => {
                tracing::info!(%id, "book deleted");
                self.invalidate();
                Ok(())
            }
            Err(e) => {
                tracing::error!(%id, error = %e, "book deletion failed");
                Err(e)
            }
        }
    }

    /// Force the next read to go to the store
    pub fn invalidate(&self) {
        self.cache.invalidate(&QueryKey::BOOKS);
    }
}
