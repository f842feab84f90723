//! Error types for shelf-core

use shelf_domain::{BookId, ValidationErrors};
use thiserror::Error;

use crate::store::StoreError;

/// Result type alias for shelf operations
pub type Result<T, E = CommandError> = std::result::Result<T, E>;

/// Errors from the create / update / delete commands
#[derive(Error, Debug)]
pub enum CommandError {
    /// Form input failed validation; nothing was sent to the store
    #[error("Invalid book: {0}")]
    Validation(#[from] ValidationErrors),

    /// The store rejected or never received the write
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl CommandError {
    pub fn is_validation(&self) -> bool {
        matches!(self, CommandError::Validation(_))
    }

    /// Field errors, when the command was stopped by validation
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            CommandError::Validation(errors) => Some(errors),
            CommandError::Store(_) => None,
        }
    }
}

/// Dashboard state machine errors
#[derive(Error, Debug)]
pub enum DashboardError {
    /// The requested transition does not apply to the current modal state
    #[error("Cannot {action} while {state}")]
    InvalidTransition {
        action: &'static str,
        state: &'static str,
    },

    /// The book is not in the current list
    #[error("Book not found: {0}")]
    NotFound(BookId),

    /// Edit form input failed validation; the edit modal stays open
    #[error("Invalid book: {0}")]
    Validation(#[from] ValidationErrors),

    /// Reading the book list failed
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Configuration loading and validation errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Value is out of its valid range
    #[error("Value out of range: {0}")]
    OutOfRange(String),

    /// Base URL is not an absolute http(s) URL
    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to serialize TOML config: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Failed to parse JSON config: {0}")]
    Json(#[from] serde_json::Error),
}
