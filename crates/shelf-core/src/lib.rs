//! shelf-core: client library for the shelf book library
//!
//! This library provides:
//! - A record store client for the remote `/books` REST API
//! - A mutation cache that is invalidated after every successful write
//! - The collection view engine (search, filters, pagination, statistics)
//! - Command functions for creating, editing, and deleting books
//! - The dashboard state machine that drives confirmation and edit flows
//!
//! Front ends (the `shelf` CLI, tests) adapt these to their own event model.

pub mod cache;
pub mod commands;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod repository;
pub mod store;
pub mod view;

pub use cache::{CacheEntry, QueryCache, QueryKey};
pub use commands::{create_book, delete_book, update_book, BookCommand, Notification};
pub use config::{ApiConfig, ShelfConfig, ViewConfig};
pub use dashboard::{Dashboard, DashboardSnapshot, Modal};
pub use error::{CommandError, ConfigError, DashboardError};
pub use repository::BookRepository;
pub use store::{BookStore, HttpBookStore, MemoryBookStore, StoreError};
pub use view::{
    derive_view, genre_options, ActiveFilter, CollectionQuery, CollectionStats, DerivedView,
    PageSize,
};

// Re-export domain types for convenience
pub use shelf_domain::{
    validate_book_form, Book, BookDraft, BookForm, BookId, BookStatus, ValidationError,
    ValidationErrors, GENRES,
};

/// Returns the version of shelf-core
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
