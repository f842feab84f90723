//! Edit command - change fields of an existing book.

use std::io::Write;

use anyhow::{Context, Result};
use clap::Args;
use shelf_core::{BookForm, BookId, BookRepository, BookStore, Dashboard, DashboardError};

use super::{book_line, finish, genre_parser, write_field_errors, StatusArg};
use crate::Config;

/// Arguments for the edit command. Omitted fields keep their current value.
#[derive(Debug, Args)]
pub struct EditArgs {
    /// Id of the book to edit.
    pub id: BookId,

    /// New title.
    #[arg(long, short = 't')]
    pub title: Option<String>,

    /// New author.
    #[arg(long, short = 'a')]
    pub author: Option<String>,

    /// New genre.
    #[arg(long, short = 'g', value_parser = genre_parser())]
    pub genre: Option<String>,

    /// New year of publication.
    #[arg(long, short = 'y', allow_hyphen_values = true)]
    pub year: Option<String>,

    /// New status.
    #[arg(long)]
    pub status: Option<StatusArg>,
}

impl EditArgs {
    /// Only the fields given on the command line.
    #[must_use]
    pub fn edits(&self) -> BookForm {
        BookForm {
            title: self.title.clone(),
            author: self.author.clone(),
            genre: self.genre.clone(),
            published_year: self.year.clone(),
            status: self.status.map(|s| s.as_form_value().to_string()),
        }
    }
}

/// Execute the edit command.
///
/// # Errors
///
/// Returns an error if the book does not exist, the new values are invalid,
/// or the store rejects the update.
pub async fn execute(args: EditArgs, config: &Config) -> Result<()> {
    let repo = config.repository()?;
    run(&args, repo, &mut std::io::stdout().lock()).await
}

/// Open the edit form for the book, apply the edits and submit.
///
/// # Errors
///
/// See [`execute`].
pub async fn run<S: BookStore>(
    args: &EditArgs,
    repo: BookRepository<S>,
    out: &mut impl Write,
) -> Result<()> {
    let edits = args.edits();
    if edits.is_empty() {
        anyhow::bail!("Nothing to change. Pass at least one of --title, --author, --genre, --year, --status");
    }

    let mut dashboard = Dashboard::new(repo);
    match dashboard.begin_edit_by_id(args.id).await {
        Err(DashboardError::NotFound(id)) => anyhow::bail!("No book with id {id}"),
        other => other.context("Failed to fetch books")?,
    }

    let mut form = dashboard.edit_form().context("Edit form did not open")?;
    form.apply(edits);

    match dashboard.submit_edit(&form).await {
        Ok(note) => {
            finish(out, &note)?;
            if let Some(book) = dashboard.repository().find(args.id).await? {
                writeln!(out, "  {}", book_line(&book))?;
            }
            Ok(())
        }
        Err(DashboardError::Validation(errors)) => {
            writeln!(out, "Book {} not updated:", args.id)?;
            write_field_errors(out, &errors)?;
            anyhow::bail!("invalid book details")
        }
        Err(err) => Err(err.into()),
    }
}
