//! CLI command implementations.
//!
//! Each command exposes `execute`, which talks to the configured API, and a
//! `run` function generic over the store that writes its output to any
//! [`Write`] sink.

pub mod add;
pub mod delete;
pub mod edit;
pub mod genres;
pub mod list;

use std::io::Write;

use anyhow::Result;
use clap::builder::PossibleValuesParser;
use shelf_core::{Book, BookStatus, Notification, PageSize, ValidationErrors, GENRES};

/// Book status as typed on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum StatusArg {
    /// On the shelf.
    Available,
    /// Lent out.
    Issued,
}

impl From<StatusArg> for BookStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Available => BookStatus::Available,
            StatusArg::Issued => BookStatus::Issued,
        }
    }
}

impl StatusArg {
    /// Form value for this status.
    #[must_use]
    pub fn as_form_value(self) -> &'static str {
        BookStatus::from(self).as_str()
    }
}

/// Only the genres the forms offer.
pub(crate) fn genre_parser() -> PossibleValuesParser {
    PossibleValuesParser::new(GENRES.iter().copied())
}

pub(crate) fn parse_page_size(value: &str) -> Result<PageSize, String> {
    let size: usize = value
        .parse()
        .map_err(|_| format!("'{value}' is not a number"))?;
    PageSize::try_from(size).map_err(|_| {
        let allowed: Vec<String> = PageSize::ALL.iter().map(ToString::to_string).collect();
        format!("page size must be one of {}", allowed.join(", "))
    })
}

/// One-line summary used by text output.
pub(crate) fn book_line(book: &Book) -> String {
    format!(
        "#{:<4} {} by {} ({}, {}) [{}]",
        book.id, book.title, book.author, book.genre, book.published_year, book.status
    )
}

/// Field errors, one per line, next to the field they belong to.
pub(crate) fn write_field_errors(out: &mut impl Write, errors: &ValidationErrors) -> Result<()> {
    for error in errors.iter() {
        writeln!(out, "  {}: {}", error.field, error.message)?;
    }
    Ok(())
}

/// Print a notification; error notifications fail the command.
pub(crate) fn finish(out: &mut impl Write, note: &Notification) -> Result<()> {
    if note.is_success() {
        writeln!(out, "{note}")?;
        Ok(())
    } else {
        anyhow::bail!("{note}")
    }
}
