//! Collection statistics

use serde::{Deserialize, Serialize};
use shelf_domain::{Book, BookStatus};
use std::collections::HashSet;

/// Counts shown on the dashboard cards.
///
/// Always computed over the whole collection, not the filtered view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionStats {
    pub total: usize,
    pub available: usize,
    pub issued: usize,
    pub unique_authors: usize,
}

impl CollectionStats {
    pub fn compute(books: &[Book]) -> Self {
        let available = books
            .iter()
            .filter(|b| b.status == BookStatus::Available)
            .count();
        let issued = books
            .iter()
            .filter(|b| b.status == BookStatus::Issued)
            .count();
        let unique_authors = books
            .iter()
            .map(|b| b.author.as_str())
            .collect::<HashSet<_>>()
            .len();

        Self {
            total: books.len(),
            available,
            issued,
            unique_authors,
        }
    }
}
