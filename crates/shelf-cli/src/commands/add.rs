//! Add command - create a book.

use std::io::Write;

use anyhow::{Context, Result};
use clap::Args;
use shelf_core::{create_book, BookCommand, BookForm, BookRepository, BookStore, CommandError};

use super::{book_line, genre_parser, write_field_errors, StatusArg};
use crate::{Config, OutputFormat};

/// Arguments for the add command.
#[derive(Debug, Args)]
pub struct AddArgs {
    /// Book title.
    #[arg(long, short = 't')]
    pub title: String,

    /// Author name.
    #[arg(long, short = 'a')]
    pub author: String,

    /// Genre.
    #[arg(long, short = 'g', value_parser = genre_parser())]
    pub genre: String,

    /// Year of publication.
    #[arg(long, short = 'y', allow_hyphen_values = true)]
    pub year: String,

    /// Initial status.
    #[arg(long, default_value = "available")]
    pub status: StatusArg,
}

impl AddArgs {
    /// The create form as if typed into the dashboard.
    #[must_use]
    pub fn form(&self) -> BookForm {
        BookForm::new()
            .title(self.title.clone())
            .author(self.author.clone())
            .genre(self.genre.clone())
            .published_year(self.year.clone())
            .status(self.status.as_form_value())
    }
}

/// Execute the add command.
///
/// # Errors
///
/// Returns an error if the input is invalid or the store rejects the book.
pub async fn execute(args: AddArgs, config: &Config) -> Result<()> {
    let repo = config.repository()?;
    run(&args, &repo, config, &mut std::io::stdout().lock()).await
}

/// Validate and create the book, reporting the outcome.
///
/// # Errors
///
/// Returns an error if the input is invalid or the store rejects the book.
pub async fn run<S: BookStore>(
    args: &AddArgs,
    repo: &BookRepository<S>,
    config: &Config,
    out: &mut impl Write,
) -> Result<()> {
    match create_book(repo, &args.form()).await {
        Ok(book) => match config.format {
            OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&book)?)?,
            OutputFormat::Text | OutputFormat::Table => {
                writeln!(out, "{}", BookCommand::Create.success_message())?;
                writeln!(out, "  {}", book_line(&book))?;
            }
        },
        Err(CommandError::Validation(errors)) => {
            writeln!(out, "Book not added:")?;
            write_field_errors(out, &errors)?;
            anyhow::bail!("invalid book details");
        }
        Err(err) => return Err(err).context(BookCommand::Create.failure_message()),
    }
    Ok(())
}
