//! Delete command - remove a book after confirmation.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use clap::Args;
use shelf_core::{BookId, BookRepository, BookStore, Dashboard};

use super::finish;
use crate::Config;

/// Arguments for the delete command.
#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Id of the book to delete.
    pub id: BookId,

    /// Skip the confirmation prompt.
    #[arg(long, short = 'y')]
    pub yes: bool,
}

/// Execute the delete command.
///
/// # Errors
///
/// Returns an error if the prompt cannot be read or the deletion fails.
pub async fn execute(args: DeleteArgs, config: &Config) -> Result<()> {
    let repo = config.repository()?;
    run(&args, repo, prompt_stdin, &mut std::io::stdout().lock()).await
}

/// Ask on stderr, read the answer from stdin. Anything but `y`/`yes` declines.
fn prompt_stdin(question: &str) -> Result<bool> {
    eprint!("{question} [y/N] ");
    std::io::stderr().flush()?;
    let mut answer = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("Failed to read confirmation")?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

/// Stage the deletion, confirm it, and issue it.
///
/// # Errors
///
/// Returns an error if `confirm` fails or the store rejects the deletion.
pub async fn run<S, F>(
    args: &DeleteArgs,
    repo: BookRepository<S>,
    confirm: F,
    out: &mut impl Write,
) -> Result<()>
where
    S: BookStore,
    F: FnOnce(&str) -> Result<bool>,
{
    let mut dashboard = Dashboard::new(repo);
    dashboard.request_delete(args.id)?;

    if !args.yes {
        // The confirmation still works when the book details cannot be fetched
        let question = match dashboard.pending_deletion().await {
            Ok(Some(book)) => format!("Delete \"{}\" by {}?", book.title, book.author),
            Ok(None) => format!("Delete book {}?", args.id),
            Err(err) => {
                tracing::warn!(error = %err, "could not load book details");
                format!("Delete book {}?", args.id)
            }
        };
        if !confirm(&question)? {
            dashboard.cancel();
            writeln!(out, "Cancelled")?;
            return Ok(());
        }
    }

    let note = dashboard.confirm_delete().await?;
    finish(out, &note)
}
