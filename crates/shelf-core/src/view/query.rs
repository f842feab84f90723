//! Collection query: search text, filters, and page position.
//!
//! Changing the search text, either filter, or the page size moves the query
//! back to page 1. Setting the page directly is never clamped against the
//! result count; callers decide what an out-of-range page means.

use serde::{Deserialize, Serialize};
use shelf_domain::{Book, BookStatus};
use std::fmt;

/// Allowed page sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum PageSize {
    Five,
    #[default]
    Ten,
    Twenty,
    Fifty,
    Hundred,
}

impl PageSize {
    pub const ALL: [PageSize; 5] = [
        PageSize::Five,
        PageSize::Ten,
        PageSize::Twenty,
        PageSize::Fifty,
        PageSize::Hundred,
    ];

    pub fn get(self) -> usize {
        match self {
            PageSize::Five => 5,
            PageSize::Ten => 10,
            PageSize::Twenty => 20,
            PageSize::Fifty => 50,
            PageSize::Hundred => 100,
        }
    }
}

impl TryFrom<usize> for PageSize {
    type Error = usize;

    fn try_from(size: usize) -> Result<Self, Self::Error> {
        PageSize::ALL
            .into_iter()
            .find(|p| p.get() == size)
            .ok_or(size)
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// A filter currently narrowing the collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActiveFilter {
    Search(String),
    Genre(String),
    Status(BookStatus),
}

impl fmt::Display for ActiveFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActiveFilter::Search(term) => write!(f, "Search: {}", term),
            ActiveFilter::Genre(genre) => write!(f, "Genre: {}", genre),
            ActiveFilter::Status(status) => write!(f, "Status: {}", status),
        }
    }
}

/// What the collection view should show
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionQuery {
    search: String,
    genre: Option<String>,
    status: Option<BookStatus>,
    page: usize,
    page_size: PageSize,
}

impl Default for CollectionQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            genre: None,
            status: None,
            page: 1,
            page_size: PageSize::default(),
        }
    }
}

impl CollectionQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page_size(page_size: PageSize) -> Self {
        Self {
            page_size,
            ..Self::default()
        }
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn genre(&self) -> Option<&str> {
        self.genre.as_deref()
    }

    pub fn status(&self) -> Option<BookStatus> {
        self.status
    }

    /// 1-based page index
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
        self.page = 1;
    }

    /// `None` shows every genre
    pub fn set_genre(&mut self, genre: Option<String>) {
        self.genre = genre;
        self.page = 1;
    }

    /// `None` shows both statuses
    pub fn set_status(&mut self, status: Option<BookStatus>) {
        self.status = status;
        self.page = 1;
    }

    pub fn set_page_size(&mut self, page_size: PageSize) {
        self.page_size = page_size;
        self.page = 1;
    }

    /// Jump to a page. Page 0 is treated as page 1; there is no upper clamp.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    pub fn clear_search(&mut self) {
        self.set_search(String::new());
    }

    pub fn clear_genre(&mut self) {
        self.set_genre(None);
    }

    pub fn clear_status(&mut self) {
        self.set_status(None);
    }

    /// Remove the filter behind one badge
    pub fn clear(&mut self, filter: &ActiveFilter) {
        match filter {
            ActiveFilter::Search(_) => self.clear_search(),
            ActiveFilter::Genre(_) => self.clear_genre(),
            ActiveFilter::Status(_) => self.clear_status(),
        }
    }

    pub fn clear_all(&mut self) {
        self.search.clear();
        self.genre = None;
        self.status = None;
        self.page = 1;
    }

    /// Filters that currently narrow the view, in badge order
    pub fn active_filters(&self) -> Vec<ActiveFilter> {
        let mut filters = Vec::new();
        if !self.search.is_empty() {
            filters.push(ActiveFilter::Search(self.search.clone()));
        }
        if let Some(genre) = &self.genre {
            filters.push(ActiveFilter::Genre(genre.clone()));
        }
        if let Some(status) = self.status {
            filters.push(ActiveFilter::Status(status));
        }
        filters
    }

    /// Whether this query matches everything
    pub fn is_unfiltered(&self) -> bool {
        self.search.is_empty() && self.genre.is_none() && self.status.is_none()
    }

    /// Search term against title or author (case-insensitive substring), AND
    /// exact genre, AND exact status.
    pub fn matches(&self, book: &Book) -> bool {
        self.matches_search(book)
            && self.genre.as_ref().map_or(true, |g| &book.genre == g)
            && self.status.map_or(true, |s| book.status == s)
    }

    fn matches_search(&self, book: &Book) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let term = self.search.to_lowercase();
        book.title.to_lowercase().contains(&term) || book.author.to_lowercase().contains(&term)
    }
}
