//! Genres command - list genre choices.

use std::io::Write;

use anyhow::{Context, Result};
use clap::Args;
use shelf_core::{BookRepository, BookStore, Dashboard, GENRES};

use crate::{Config, OutputFormat};

/// Arguments for the genres command.
#[derive(Debug, Args)]
pub struct GenresArgs {
    /// Show genres present in the collection instead of the form choices.
    #[arg(long)]
    pub in_use: bool,
}

/// Execute the genres command.
///
/// # Errors
///
/// Returns an error if `--in-use` is given and the book list cannot be fetched.
pub async fn execute(args: GenresArgs, config: &Config) -> Result<()> {
    let mut out = std::io::stdout().lock();
    if args.in_use {
        let repo = config.repository()?;
        run_in_use(repo, &config.format, &mut out).await
    } else {
        let genres: Vec<String> = GENRES.iter().map(ToString::to_string).collect();
        write_genres(&genres, &config.format, &mut out)
    }
}

/// Distinct genres across the whole collection.
///
/// # Errors
///
/// Returns an error if the book list cannot be fetched.
pub async fn run_in_use<S: BookStore>(
    repo: BookRepository<S>,
    format: &OutputFormat,
    out: &mut impl Write,
) -> Result<()> {
    let genres = Dashboard::new(repo)
        .genre_options()
        .await
        .context("Failed to fetch books")?;
    write_genres(&genres, format, out)
}

fn write_genres(genres: &[String], format: &OutputFormat, out: &mut impl Write) -> Result<()> {
    match format {
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(genres)?)?,
        OutputFormat::Text | OutputFormat::Table => {
            for genre in genres {
                writeln!(out, "{genre}")?;
            }
        }
    }
    Ok(())
}
