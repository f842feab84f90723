//! In-process book store

use async_trait::async_trait;
use shelf_domain::{Book, BookDraft, BookId};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::{BookStore, StoreError};

struct Inner {
    books: Vec<Book>,
    next_id: u64,
}

/// A store that keeps books in memory and assigns sequential ids.
///
/// Behaves like the remote store: unknown ids are 404s, and it can be switched
/// offline to simulate transport failures. It also counts list calls so cache
/// behaviour can be observed.
pub struct MemoryBookStore {
    inner: Mutex<Inner>,
    offline: AtomicBool,
    list_calls: AtomicUsize,
}

impl MemoryBookStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                books: Vec::new(),
                next_id: 1,
            }),
            offline: AtomicBool::new(false),
            list_calls: AtomicUsize::new(0),
        }
    }

    /// Seed the store with existing books. New ids continue after the largest seeded id.
    pub fn with_books(books: Vec<Book>) -> Self {
        let next_id = books.iter().map(|b| b.id.value()).max().unwrap_or(0) + 1;
        Self {
            inner: Mutex::new(Inner { books, next_id }),
            offline: AtomicBool::new(false),
            list_calls: AtomicUsize::new(0),
        }
    }

    /// Make every subsequent operation fail with a transport error (or recover).
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of `list` calls that reached the store
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// Current contents, bypassing the offline switch
    pub fn snapshot(&self) -> Vec<Book> {
        self.lock().books.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn ensure_online(&self) -> Result<(), StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::RequestFailed {
                message: "store unreachable".to_string(),
            });
        }
        Ok(())
    }

    fn not_found(id: BookId) -> StoreError {
        StoreError::Status {
            status: 404,
            body: format!("book {} not found", id),
        }
    }
}

impl Default for MemoryBookStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BookStore for MemoryBookStore {
    async fn list(&self) -> Result<Vec<Book>, StoreError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.ensure_online()?;
        Ok(self.lock().books.clone())
    }

    async fn create(&self, draft: BookDraft) -> Result<Book, StoreError> {
        self.ensure_online()?;
        let mut inner = self.lock();
        let book = Book::from_draft(BookId(inner.next_id), draft);
        inner.next_id += 1;
        inner.books.push(book.clone());
        Ok(book)
    }

    async fn update(&self, book: Book) -> Result<Book, StoreError> {
        self.ensure_online()?;
        let mut inner = self.lock();
        let slot = inner
            .books
            .iter_mut()
            .find(|b| b.id == book.id)
            .ok_or_else(|| Self::not_found(book.id))?;
        *slot = book.clone();
        Ok(book)
    }

    async fn delete(&self, id: BookId) -> Result<(), StoreError> {
        self.ensure_online()?;
        let mut inner = self.lock();
        let before = inner.books.len();
        inner.books.retain(|b| b.id != id);
        if inner.books.len() == before {
            return Err(Self::not_found(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelf_domain::BookStatus;

    fn draft(title: &str) -> BookDraft {
        BookDraft::new(title, "Author", "Fiction", 2000, BookStatus::Available)
    }

    #[tokio::test]
    async fn test_ids_are_sequential() {
        let store = MemoryBookStore::new();
        let a = store.create(draft("A")).await.unwrap();
        let b = store.create(draft("B")).await.unwrap();
        assert_eq!(a.id, BookId(1));
        assert_eq!(b.id, BookId(2));
    }

    #[tokio::test]
    async fn test_seeded_ids_continue() {
        let store = MemoryBookStore::with_books(vec![Book::from_draft(BookId(41), draft("Seed"))]);
        let created = store.create(draft("Next")).await.unwrap();
        assert_eq!(created.id, BookId(42));
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found() {
        let store = MemoryBookStore::new();
        let err = store.delete(BookId(5)).await.unwrap_err();
        assert!(err.is_not_found());

        let ghost = Book::from_draft(BookId(5), draft("Ghost"));
        assert!(store.update(ghost).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_offline_fails_everything() {
        let store = MemoryBookStore::new();
        store.set_offline(true);
        assert!(matches!(
            store.create(draft("A")).await,
            Err(StoreError::RequestFailed { .. })
        ));
        assert!(store.list().await.is_err());
        assert!(store.snapshot().is_empty());

        store.set_offline(false);
        assert!(store.list().await.unwrap().is_empty());
        assert_eq!(store.list_calls(), 2);
    }
}
