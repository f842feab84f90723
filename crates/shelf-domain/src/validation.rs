//! Validation for book forms
//!
//! The create and edit flows both pass raw input through [`validate_book_form`]
//! before anything is sent to the store. Every failing field is reported at
//! once, keyed by its wire name.

use super::{Book, BookDraft, BookStatus};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const FIELD_TITLE: &str = "title";
pub const FIELD_AUTHOR: &str = "author";
pub const FIELD_GENRE: &str = "genre";
pub const FIELD_PUBLISHED_YEAR: &str = "publishedYear";
pub const FIELD_STATUS: &str = "status";

/// Free-form input for a book, as typed into a form.
///
/// `None` means the field was never supplied, `Some("")` means it was cleared.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookForm {
    pub title: Option<String>,
    pub author: Option<String>,
    pub genre: Option<String>,
    pub published_year: Option<String>,
    pub status: Option<String>,
}

impl BookForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-fill a form with a book's current values (the edit modal)
    pub fn from_book(book: &Book) -> Self {
        Self {
            title: Some(book.title.clone()),
            author: Some(book.author.clone()),
            genre: Some(book.genre.clone()),
            published_year: Some(book.published_year.to_string()),
            status: Some(book.status.as_str().to_string()),
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    pub fn published_year(mut self, year: impl Into<String>) -> Self {
        self.published_year = Some(year.into());
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Overlay the fields that `edits` supplies onto this form.
    pub fn apply(&mut self, edits: BookForm) {
        if edits.title.is_some() {
            self.title = edits.title;
        }
        if edits.author.is_some() {
            self.author = edits.author;
        }
        if edits.genre.is_some() {
            self.genre = edits.genre;
        }
        if edits.published_year.is_some() {
            self.published_year = edits.published_year;
        }
        if edits.status.is_some() {
            self.status = edits.status;
        }
    }

    /// Whether no field was supplied at all
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.genre.is_none()
            && self.published_year.is_none()
            && self.status.is_none()
    }
}

/// A single field-level validation failure
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

/// All field errors produced by one validation pass, in form order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    fn push(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(ValidationError {
            field: field.to_string(),
            message: message.into(),
        });
    }

    /// Message for a field, if it failed
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.errors.iter().map(|e| e.field.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.errors.iter()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for error in &self.errors {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", error.field, error.message)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Validate raw form input, producing a typed draft or every field error.
pub fn validate_book_form(form: &BookForm) -> Result<BookDraft, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let title = required_text(&mut errors, FIELD_TITLE, "Title", form.title.as_deref());
    let author = required_text(&mut errors, FIELD_AUTHOR, "Author", form.author.as_deref());
    let genre = required_text(&mut errors, FIELD_GENRE, "Genre", form.genre.as_deref());
    let published_year = parse_published_year(&mut errors, form.published_year.as_deref());
    let status = parse_status(&mut errors, form.status.as_deref());

    match (title, author, genre, published_year, status) {
        (Some(title), Some(author), Some(genre), Some(published_year), Some(status)) => {
            Ok(BookDraft {
                title,
                author,
                genre,
                published_year,
                status,
            })
        }
        _ => Err(errors),
    }
}

/// Check if a form would be accepted
pub fn is_valid(form: &BookForm) -> bool {
    validate_book_form(form).is_ok()
}

fn required_text(
    errors: &mut ValidationErrors,
    field: &str,
    label: &str,
    value: Option<&str>,
) -> Option<String> {
    match value {
        None => {
            errors.push(field, format!("{label} is required"));
            None
        }
        Some("") => {
            errors.push(field, format!("{label} cannot be empty"));
            None
        }
        Some(value) => Some(value.to_string()),
    }
}

fn parse_published_year(errors: &mut ValidationErrors, value: Option<&str>) -> Option<u32> {
    let Some(raw) = value else {
        errors.push(FIELD_PUBLISHED_YEAR, "Published year is required");
        return None;
    };

    // Blank input counts as missing; accepted years must fit in a u32
    let raw = raw.trim();
    if raw.is_empty() {
        errors.push(FIELD_PUBLISHED_YEAR, "Published year is required");
        return None;
    }

    match raw.parse::<i64>() {
        Ok(year) if year < 0 => {
            errors.push(FIELD_PUBLISHED_YEAR, "Published year must be a valid year");
            None
        }
        Ok(year) => match u32::try_from(year) {
            Ok(year) => Some(year),
            Err(_) => {
                errors.push(FIELD_PUBLISHED_YEAR, "Published year must be a valid year");
                None
            }
        },
        Err(_) => {
            errors.push(FIELD_PUBLISHED_YEAR, "Published year must be an integer");
            None
        }
    }
}

fn parse_status(errors: &mut ValidationErrors, value: Option<&str>) -> Option<BookStatus> {
    match value {
        None => {
            errors.push(FIELD_STATUS, "Status is required");
            None
        }
        Some(raw) => match raw.parse::<BookStatus>() {
            Ok(status) => Some(status),
            Err(_) => {
                errors.push(FIELD_STATUS, "Status must be either \"Available\" or \"Issued\"");
                None
            }
        },
    }
}
