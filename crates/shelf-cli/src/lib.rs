//! # shelf-cli
//!
//! Command-line client for a shelf book library server.
//!
//! ## Commands
//!
//! - `shelf list` - Search, filter and page through the collection
//! - `shelf add` - Add a book
//! - `shelf edit` - Change fields of an existing book
//! - `shelf delete` - Delete a book after confirmation
//! - `shelf genres` - Show the genre choices
//!
//! ## Configuration
//!
//! Settings come from a TOML file (`--config`, `SHELF_CONFIG`, or the
//! platform config dir), overridden by flags:
//!
//! - `SHELF_API_URL` / `--api-url` - Base URL of the REST API
//! - `--timeout-secs` - Per-request timeout

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
// CLI uses print! macros intentionally
#![allow(clippy::print_stdout)]
#![allow(clippy::print_stderr)]

pub mod commands;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use shelf_core::{ApiConfig, BookRepository, HttpBookStore, PageSize, ShelfConfig};

/// Shelf - manage a library's book collection.
#[derive(Debug, Parser)]
#[command(name = "shelf")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Base URL of the book API, e.g. `http://localhost:3000/api`.
    #[arg(long, env = "SHELF_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Config file to read instead of the default location.
    #[arg(long, env = "SHELF_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Per-request timeout in seconds.
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    /// Output format.
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Merge the config file with command-line overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or the merged
    /// settings are invalid.
    pub fn config(&self) -> Result<Config> {
        let mut file = match &self.config {
            Some(path) => ShelfConfig::load(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => ShelfConfig::load_or_default().context("Failed to load config")?,
        };

        if let Some(url) = &self.api_url {
            file.api.base_url.clone_from(url);
        }
        if let Some(timeout) = self.timeout_secs {
            file.api.timeout_secs = timeout;
        }
        file.validate().context("Invalid configuration")?;

        tracing::debug!(api_url = %file.api.base_url, "using configuration");
        Ok(Config {
            page_size: file.view.page_size()?,
            api: file.api,
            format: self.format.clone(),
        })
    }
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List books with optional search, filters and paging.
    List(commands::list::ListArgs),
    /// Add a new book.
    Add(commands::add::AddArgs),
    /// Edit an existing book.
    Edit(commands::edit::EditArgs),
    /// Delete a book.
    Delete(commands::delete::DeleteArgs),
    /// Show genre choices.
    Genres(commands::genres::GenresArgs),
}

/// Output format.
#[derive(Debug, Clone, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// Table output.
    Table,
}

/// Effective CLI configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Remote store settings.
    pub api: ApiConfig,
    /// Page size used when `--page-size` is not given.
    pub page_size: PageSize,
    /// Output format.
    pub format: OutputFormat,
}

impl Config {
    /// Repository backed by the configured REST API.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn repository(&self) -> Result<BookRepository<HttpBookStore>> {
        let store = HttpBookStore::from_config(&self.api)
            .with_context(|| format!("Cannot use API at {}", self.api.base_url))?;
        Ok(BookRepository::new(store))
    }
}
