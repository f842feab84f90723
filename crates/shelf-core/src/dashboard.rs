//! Dashboard state machine
//!
//! The dashboard owns the collection query and exactly one modal state:
//!
//! ```text
//! Idle --request_delete(id)--> Confirming(id) --cancel / confirm_delete--> Idle
//! Idle --begin_edit(book)----> Editing(book) --cancel / successful submit-> Idle
//! ```
//!
//! A confirmed deletion always returns to `Idle`, whatever the store says. A
//! failed edit keeps the modal open so the user can retry.

use serde::Serialize;
use shelf_domain::{validate_book_form, Book, BookForm, BookId};

use crate::commands::{BookCommand, Notification};
use crate::error::{DashboardError, Result as CommandResult};
use crate::repository::BookRepository;
use crate::store::{BookStore, StoreError};
use crate::view::{
    derive_view, genre_options, ActiveFilter, CollectionQuery, CollectionStats, DerivedView,
};

/// Which modal, if any, is open
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Modal {
    #[default]
    Idle,
    /// Deletion of this id is staged and awaiting confirmation
    Confirming(BookId),
    /// The edit form is open for this book
    Editing(Book),
}

impl Modal {
    fn name(&self) -> &'static str {
        match self {
            Modal::Idle => "idle",
            Modal::Confirming(_) => "confirming a deletion",
            Modal::Editing(_) => "editing",
        }
    }
}

/// Everything the dashboard renders, from a single read of the book list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardSnapshot {
    pub stats: CollectionStats,
    pub genres: Vec<String>,
    pub active_filters: Vec<ActiveFilter>,
    pub view: DerivedView,
}

pub struct Dashboard<S> {
    repo: BookRepository<S>,
    query: CollectionQuery,
    modal: Modal,
}

impl<S: BookStore> Dashboard<S> {
    pub fn new(repo: BookRepository<S>) -> Self {
        Self::with_query(repo, CollectionQuery::new())
    }

    pub fn with_query(repo: BookRepository<S>, query: CollectionQuery) -> Self {
        Self {
            repo,
            query,
            modal: Modal::Idle,
        }
    }

    pub fn repository(&self) -> &BookRepository<S> {
        &self.repo
    }

    pub fn query(&self) -> &CollectionQuery {
        &self.query
    }

    pub fn query_mut(&mut self) -> &mut CollectionQuery {
        &mut self.query
    }

    pub fn modal(&self) -> &Modal {
        &self.modal
    }

    /// Current page of the filtered collection
    pub async fn view(&self) -> Result<DerivedView, StoreError> {
        let books = self.repo.books().await?;
        Ok(derive_view(&books, &self.query))
    }

    /// Statistics over the whole collection, ignoring filters
    pub async fn stats(&self) -> Result<CollectionStats, StoreError> {
        let books = self.repo.books().await?;
        Ok(CollectionStats::compute(&books))
    }

    pub async fn genre_options(&self) -> Result<Vec<String>, StoreError> {
        let books = self.repo.books().await?;
        Ok(genre_options(&books))
    }

    pub async fn snapshot(&self) -> Result<DashboardSnapshot, StoreError> {
        let books = self.repo.books().await?;
        Ok(DashboardSnapshot {
            stats: CollectionStats::compute(&books),
            genres: genre_options(&books),
            active_filters: self.query.active_filters(),
            view: derive_view(&books, &self.query),
        })
    }

    /// Stage a deletion and ask for confirmation
    pub fn request_delete(&mut self, id: BookId) -> Result<(), DashboardError> {
        self.require_idle("request a deletion")?;
        self.modal = Modal::Confirming(id);
        Ok(())
    }

    /// The book staged for deletion, if it is still in the list.
    ///
    /// `None` when nothing is staged or the book has already gone; the prompt
    /// then simply omits the title and author.
    pub async fn pending_deletion(&self) -> Result<Option<Book>, StoreError> {
        match self.modal {
            Modal::Confirming(id) => self.repo.find(id).await,
            _ => Ok(None),
        }
    }

    /// Issue the staged deletion. Returns to `Idle` on success and on failure.
    pub async fn confirm_delete(&mut self) -> Result<Notification, DashboardError> {
        let Modal::Confirming(id) = self.modal else {
            return Err(DashboardError::InvalidTransition {
                action: "confirm a deletion",
                state: self.modal.name(),
            });
        };

        let result: CommandResult<()> = self.repo.delete(id).await.map_err(Into::into);
        self.modal = Modal::Idle;
        Ok(notification(BookCommand::Delete, &result))
    }

    /// Open the edit form for a book
    pub fn begin_edit(&mut self, book: Book) -> Result<(), DashboardError> {
        self.require_idle("start editing")?;
        self.modal = Modal::Editing(book);
        Ok(())
    }

    /// Open the edit form for a book in the current list
    pub async fn begin_edit_by_id(&mut self, id: BookId) -> Result<(), DashboardError> {
        self.require_idle("start editing")?;
        let book = self
            .repo
            .find(id)
            .await?
            .ok_or(DashboardError::NotFound(id))?;
        self.begin_edit(book)
    }

    /// The edit form pre-filled with the book being edited
    pub fn edit_form(&self) -> Option<BookForm> {
        match &self.modal {
            Modal::Editing(book) => Some(BookForm::from_book(book)),
            _ => None,
        }
    }

    /// Submit the edit form.
    ///
    /// Validation errors are returned as `Err` and leave the form open. A
    /// store failure is reported as an error notification and also leaves the
    /// form open. Success closes it.
    pub async fn submit_edit(&mut self, form: &BookForm) -> Result<Notification, DashboardError> {
        let Modal::Editing(book) = &self.modal else {
            return Err(DashboardError::InvalidTransition {
                action: "submit an edit",
                state: self.modal.name(),
            });
        };

        let draft = validate_book_form(form)?;
        let result: CommandResult<Book> = self
            .repo
            .update(book.with_draft(draft))
            .await
            .map_err(Into::into);
        if result.is_ok() {
            self.modal = Modal::Idle;
        }
        Ok(notification(BookCommand::Update, &result))
    }

    /// Close whichever modal is open without side effects
    pub fn cancel(&mut self) {
        self.modal = Modal::Idle;
    }

    fn require_idle(&self, action: &'static str) -> Result<(), DashboardError> {
        if self.modal == Modal::Idle {
            Ok(())
        } else {
            Err(DashboardError::InvalidTransition {
                action,
                state: self.modal.name(),
            })
        }
    }
}

fn notification<T>(command: BookCommand, result: &CommandResult<T>) -> Notification {
    command.notification(result).unwrap_or_else(|| {
        Notification::Error(command.failure_message().to_string())
    })
}
