//! Library domain types for shelf
//!
//! This crate provides the canonical domain models for the book library client:
//! - Book: A catalogued book with its availability status
//! - BookDraft: The field values of a book before the store assigns an id
//! - Genre: The fixed list of genres offered by the create and edit forms
//! - Validation: The form gate that turns free-form input into a BookDraft

pub mod book;
pub mod genre;
pub mod validation;

pub use book::*;
pub use genre::*;
pub use validation::*;
