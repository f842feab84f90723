//! List command - the dashboard view of the collection.

use std::io::Write;

use anyhow::{Context, Result};
use clap::Args;
use comfy_table::{presets::UTF8_FULL, Table};
use shelf_core::{
    BookRepository, BookStore, CollectionQuery, Dashboard, DashboardSnapshot, PageSize,
};

use super::{book_line, parse_page_size, StatusArg};
use crate::{Config, OutputFormat};

/// Arguments for the list command.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Case-insensitive text matched against title or author.
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Only books with exactly this genre.
    #[arg(long, short = 'g')]
    pub genre: Option<String>,

    /// Only books with this status.
    #[arg(long)]
    pub status: Option<StatusArg>,

    /// Page to show, starting at 1.
    #[arg(long, short = 'p', default_value_t = 1)]
    pub page: usize,

    /// Rows per page (5, 10, 20, 50 or 100).
    #[arg(long, value_parser = parse_page_size)]
    pub page_size: Option<PageSize>,
}

impl ListArgs {
    /// Query for these arguments; the page is applied after the filters.
    #[must_use]
    pub fn query(&self, default_page_size: PageSize) -> CollectionQuery {
        let mut query = CollectionQuery::with_page_size(self.page_size.unwrap_or(default_page_size));
        if let Some(search) = &self.search {
            query.set_search(search.clone());
        }
        query.set_genre(self.genre.clone());
        query.set_status(self.status.map(Into::into));
        query.set_page(self.page);
        query
    }
}

/// Execute the list command.
///
/// # Errors
///
/// Returns an error if the book list cannot be fetched.
pub async fn execute(args: ListArgs, config: &Config) -> Result<()> {
    let repo = config.repository()?;
    run(&args, repo, config, &mut std::io::stdout().lock()).await
}

/// Render one page of the collection.
///
/// # Errors
///
/// Returns an error if the store fails or output cannot be written.
pub async fn run<S: BookStore>(
    args: &ListArgs,
    repo: BookRepository<S>,
    config: &Config,
    out: &mut impl Write,
) -> Result<()> {
    let dashboard = Dashboard::with_query(repo, args.query(config.page_size));
    let snapshot = dashboard
        .snapshot()
        .await
        .context("Failed to fetch books")?;

    match config.format {
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&snapshot)?)?,
        OutputFormat::Text => render_text(&snapshot, out)?,
        OutputFormat::Table => render_table(&snapshot, out)?,
    }
    Ok(())
}

fn render_header(snapshot: &DashboardSnapshot, out: &mut impl Write) -> Result<()> {
    let stats = &snapshot.stats;
    writeln!(
        out,
        "Total: {}  Available: {}  Issued: {}  Authors: {}",
        stats.total, stats.available, stats.issued, stats.unique_authors
    )?;
    if !snapshot.active_filters.is_empty() {
        let badges: Vec<String> = snapshot.active_filters.iter().map(ToString::to_string).collect();
        writeln!(out, "Filters: {}", badges.join(" | "))?;
    }
    writeln!(out)?;
    Ok(())
}

fn render_footer(snapshot: &DashboardSnapshot, out: &mut impl Write) -> Result<()> {
    let view = &snapshot.view;
    writeln!(out)?;
    writeln!(out, "{}", view.range_label())?;
    if view.page_count > 1 {
        let pages: Vec<String> = view
            .page_window()
            .into_iter()
            .map(|p| if p == view.page { format!("[{p}]") } else { p.to_string() })
            .collect();
        let prev = if view.has_previous() { "<" } else { " " };
        let next = if view.has_next() { ">" } else { " " };
        writeln!(out, "Page {} of {}  {prev} {} {next}", view.page, view.page_count, pages.join(" "))?;
    }
    Ok(())
}

fn render_text(snapshot: &DashboardSnapshot, out: &mut impl Write) -> Result<()> {
    render_header(snapshot, out)?;
    for book in &snapshot.view.page_items {
        writeln!(out, "  {}", book_line(book))?;
    }
    render_footer(snapshot, out)
}

fn render_table(snapshot: &DashboardSnapshot, out: &mut impl Write) -> Result<()> {
    render_header(snapshot, out)?;
    if !snapshot.view.page_items.is_empty() {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_header(vec!["ID", "Title", "Author", "Genre", "Year", "Status"]);
        for book in &snapshot.view.page_items {
            table.add_row(vec![
                book.id.to_string(),
                book.title.clone(),
                book.author.clone(),
                book.genre.clone(),
                book.published_year.to_string(),
                book.status.to_string(),
            ]);
        }
        writeln!(out, "{table}")?;
    }
    render_footer(snapshot, out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelf_core::{ApiConfig, Book, BookDraft, BookId, BookStatus, MemoryBookStore};
    use std::sync::Arc;

    fn config(format: OutputFormat) -> Config {
        Config {
            api: ApiConfig::default(),
            page_size: PageSize::Ten,
            format,
        }
    }

    fn args() -> ListArgs {
        ListArgs {
            search: None,
            genre: None,
            status: None,
            page: 1,
            page_size: None,
        }
    }

    fn repo(n: u64) -> BookRepository<Arc<MemoryBookStore>> {
        let books = (1..=n)
            .map(|i| {
                let status = if i % 4 == 0 { BookStatus::Issued } else { BookStatus::Available };
                Book::from_draft(
                    BookId(i),
                    BookDraft::new(format!("Book {i}"), format!("Writer {}", i % 3), "Fiction", 2000, status),
                )
            })
            .collect();
        BookRepository::new(Arc::new(MemoryBookStore::with_books(books)))
    }

    async fn render(args: &ListArgs, n: u64, format: OutputFormat) -> String {
        let mut out = Vec::new();
        run(args, repo(n), &config(format), &mut out).await.unwrap();
        String::from_utf8(out).unwrap()
    }

    #[tokio::test]
    async fn test_text_output_last_page() {
        let args = ListArgs { page: 3, ..args() };
        let text = render(&args, 23, OutputFormat::Text).await;
        assert!(text.starts_with("Total: 23  Available: 18  Issued: 5  Authors: 3\n"));
        assert!(text.contains("#21   Book 21 by Writer 0 (Fiction, 2000) [Available]"));
        assert!(!text.contains("Book 20 "));
        assert!(text.contains("Showing 21 to 23 of 23 books"));
        assert!(text.contains("Page 3 of 3  < 1 2 [3]  "));
    }

    #[tokio::test]
    async fn test_filters_shown_and_applied() {
        let args = ListArgs {
            search: Some("BOOK 1".to_string()),
            status: Some(StatusArg::Available),
            ..args()
        };
        let text = render(&args, 12, OutputFormat::Text).await;
        assert!(text.contains("Filters: Search: BOOK 1 | Status: Available"));
        // Book 1, 10, 11 (Book 12 is issued)
        assert!(text.contains("Showing 1 to 3 of 3 books"));
        assert!(!text.contains("Page 1 of"));
    }

    #[tokio::test]
    async fn test_empty_collection() {
        let text = render(&args(), 0, OutputFormat::Table).await;
        assert!(text.contains("Total: 0"));
        assert!(text.contains("No books to display"));
        assert!(!text.contains("Title"));
    }

    #[tokio::test]
    async fn test_table_output() {
        let args = ListArgs { page_size: Some(PageSize::Five), ..args() };
        let text = render(&args, 7, OutputFormat::Table).await;
        assert!(text.contains("Title"));
        assert!(text.contains("Book 5"));
        assert!(!text.contains("Book 6"));
        assert!(text.contains("Page 1 of 2    [1] 2 >"));
    }

    #[tokio::test]
    async fn test_json_output() {
        let json = render(&args(), 3, OutputFormat::Json).await;
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["stats"]["total"], 3);
        assert_eq!(value["view"]["page_items"][0]["publishedYear"], 2000);
        assert_eq!(value["genres"][0], "Fiction");
    }
}
