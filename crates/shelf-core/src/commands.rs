//! Command handlers for book writes
//!
//! Each command validates its input first; invalid input is returned as
//! [`CommandError::Validation`] and never reaches the store. Store failures
//! are logged by the repository and returned as [`CommandError::Store`].

use serde::{Deserialize, Serialize};
use shelf_domain::{validate_book_form, Book, BookForm, BookId};
use std::fmt;

use crate::error::{CommandError, Result};
use crate::repository::BookRepository;
use crate::store::BookStore;

/// A user-visible outcome message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Notification {
    Success(String),
    Error(String),
}

impl Notification {
    pub fn message(&self) -> &str {
        match self {
            Notification::Success(message) | Notification::Error(message) => message,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Notification::Success(_))
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// The write commands a front end can issue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookCommand {
    Create,
    Update,
    Delete,
}

impl BookCommand {
    pub fn success_message(self) -> &'static str {
        match self {
            BookCommand::Create => "Book added successfully!",
            BookCommand::Update => "Book updated successfully.",
            BookCommand::Delete => "Book deleted successfully.",
        }
    }

    pub fn failure_message(self) -> &'static str {
        match self {
            BookCommand::Create => "Failed to add book",
            BookCommand::Update => "Book update failed.",
            BookCommand::Delete => "Book deletion failed.",
        }
    }

    /// Notification for a finished command.
    ///
    /// Validation failures are shown next to their fields instead, so they
    /// produce no notification.
    pub fn notification<T>(self, result: &Result<T>) -> Option<Notification> {
        match result {
            Ok(_) => Some(Notification::Success(self.success_message().to_string())),
            Err(CommandError::Store(_)) => {
                Some(Notification::Error(self.failure_message().to_string()))
            }
            Err(CommandError::Validation(_)) => None,
        }
    }
}

/// Validate a new-book form and create it.
pub async fn create_book<S: BookStore>(repo: &BookRepository<S>, form: &BookForm) -> Result<Book> {
    let draft = validate_book_form(form)?;
    Ok(repo.create(draft).await?)
}

/// Validate an edit form and replace the fields of book `id`.
pub async fn update_book<S: BookStore>(
    repo: &BookRepository<S>,
    id: BookId,
    form: &BookForm,
) -> Result<Book> {
    let draft = validate_book_form(form)?;
    Ok(repo.update(Book::from_draft(id, draft)).await?)
}

pub async fn delete_book<S: BookStore>(repo: &BookRepository<S>, id: BookId) -> Result<()> {
    Ok(repo.delete(id).await?)
}
