//! Query cache with explicit invalidation
//!
//! Holds the last fetched value per [`QueryKey`]. Writes never patch cached
//! data; they mark the key stale and the next read goes back to the store.
//! Marking an already-stale key is a no-op, so any number of invalidations
//! between two reads costs exactly one re-fetch.

use chrono::{DateTime, Utc};
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Identifies one cached query
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct QueryKey(Cow<'static, str>);

impl QueryKey {
    /// The full book list
    pub const BOOKS: QueryKey = QueryKey(Cow::Borrowed("books"));

    pub fn new(key: impl Into<String>) -> Self {
        Self(Cow::Owned(key.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A cached value and its freshness
#[derive(Clone, Debug)]
pub struct CacheEntry<T> {
    pub data: T,
    pub fetched_at: DateTime<Utc>,
    pub stale: bool,
}

/// Cache of query results keyed by [`QueryKey`].
///
/// Each instance is independent; construct one per client (or per test) and
/// share it by reference or `Arc`.
pub struct QueryCache<T> {
    state: RwLock<CacheState<T>>,
}

struct CacheState<T> {
    entries: HashMap<QueryKey, CacheEntry<T>>,
    /// Bumped by every invalidation, whether or not an entry exists
    generations: HashMap<QueryKey, u64>,
}

impl<T> CacheState<T> {
    fn generation(&self, key: &QueryKey) -> u64 {
        self.generations.get(key).copied().unwrap_or(0)
    }

    fn bump(&mut self, key: &QueryKey) {
        *self.generations.entry(key.clone()).or_insert(0) += 1;
    }
}

impl<T: Clone> QueryCache<T> {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(CacheState {
                entries: HashMap::new(),
                generations: HashMap::new(),
            }),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, CacheState<T>> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, CacheState<T>> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// The entry for `key`, fresh or stale
    pub fn get(&self, key: &QueryKey) -> Option<CacheEntry<T>> {
        self.read().entries.get(key).cloned()
    }

    /// The cached value, only if it has not been invalidated
    pub fn fresh(&self, key: &QueryKey) -> Option<T> {
        self.read()
            .entries
            .get(key)
            .filter(|entry| !entry.stale)
            .map(|entry| entry.data.clone())
    }

    /// Whether the next read of `key` will go to the store.
    ///
    /// A key that was never fetched counts as stale.
    pub fn is_stale(&self, key: &QueryKey) -> bool {
        self.read().entries.get(key).map_or(true, |entry| entry.stale)
    }

    /// Store a freshly fetched value
    pub fn put(&self, key: QueryKey, data: T) {
        self.write().entries.insert(
            key,
            CacheEntry {
                data,
                fetched_at: Utc::now(),
                stale: false,
            },
        );
    }

    /// Mark `key` stale. Returns true if a fresh entry was marked.
    ///
    /// Always advances the key's generation, so a fetch already in flight
    /// cannot store its result as fresh.
    pub fn invalidate(&self, key: &QueryKey) -> bool {
        let mut state = self.write();
        state.bump(key);
        match state.entries.get_mut(key) {
            Some(entry) if !entry.stale => {
                entry.stale = true;
                tracing::debug!(key = %key, "cache entry invalidated");
                true
            }
            _ => false,
        }
    }

    /// Mark every entry stale
    pub fn invalidate_all(&self) {
        let mut state = self.write();
        let keys: Vec<QueryKey> = state
            .entries
            .keys()
            .chain(state.generations.keys())
            .cloned()
            .collect();
        for key in &keys {
            state.bump(key);
        }
        for entry in state.entries.values_mut() {
            entry.stale = true;
        }
    }

    /// Return the fresh value for `key`, or run `fetcher` and cache its result.
    ///
    /// A failed fetch leaves the previous entry untouched (still stale) and
    /// returns the error. The lock is not held while `fetcher` runs. If `key`
    /// was invalidated while the fetch was in flight, the result is returned
    /// but cached as stale, so the next read fetches again.
    pub async fn fetch<F, Fut, E>(&self, key: &QueryKey, fetcher: F) -> Result<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let generation = {
            let state = self.read();
            if let Some(entry) = state.entries.get(key).filter(|entry| !entry.stale) {
                tracing::debug!(key = %key, "cache hit");
                return Ok(entry.data.clone());
            }
            state.generation(key)
        };

        tracing::debug!(key = %key, "cache miss, fetching");
        let data = fetcher().await?;

        let mut state = self.write();
        let stale = state.generation(key) != generation;
        if stale {
            tracing::debug!(key = %key, "invalidated during fetch, caching as stale");
        }
        state.entries.insert(
            key.clone(),
            CacheEntry {
                data: data.clone(),
                fetched_at: Utc::now(),
                stale,
            },
        );
        Ok(data)
    }
}

impl<T: Clone> Default for QueryCache<T> {
    fn default() -> Self {
        Self::new()
    }
}
