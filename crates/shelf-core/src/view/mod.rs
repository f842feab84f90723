//! Collection view engine
//!
//! Derives what the dashboard shows from the full book list and a
//! [`CollectionQuery`]. Everything here is a pure function of its inputs.

pub mod pagination;
pub mod query;
pub mod stats;

pub use pagination::{has_next, has_previous, page_bounds, page_count, page_window, range_label};
pub use query::{ActiveFilter, CollectionQuery, PageSize};
pub use stats::CollectionStats;

use serde::{Deserialize, Serialize};
use shelf_domain::Book;
use std::collections::BTreeSet;

/// One page of the filtered collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedView {
    pub page_items: Vec<Book>,
    pub total_matching: usize,
    pub page_count: usize,
    pub page: usize,
    pub page_size: usize,
}

impl DerivedView {
    pub fn is_empty(&self) -> bool {
        self.total_matching == 0
    }

    pub fn range_label(&self) -> String {
        range_label(self.page, self.page_size, self.total_matching)
    }

    pub fn page_window(&self) -> Vec<usize> {
        page_window(self.page, self.page_count)
    }

    pub fn has_previous(&self) -> bool {
        has_previous(self.page, self.total_matching)
    }

    pub fn has_next(&self) -> bool {
        has_next(self.page, self.page_count, self.total_matching)
    }
}

/// Filter, then slice out the requested page.
///
/// A page past the end yields an empty `page_items`; the page index is not
/// corrected.
pub fn derive_view(books: &[Book], query: &CollectionQuery) -> DerivedView {
    let matching: Vec<&Book> = books.iter().filter(|b| query.matches(b)).collect();
    let page_size = query.page_size().get();
    let total_matching = matching.len();
    let (start, end) = page_bounds(query.page(), page_size, total_matching);

    DerivedView {
        page_items: matching[start..end].iter().map(|b| (*b).clone()).collect(),
        total_matching,
        page_count: page_count(total_matching, page_size),
        page: query.page(),
        page_size,
    }
}

/// Distinct genres across the whole (unfiltered) collection, sorted.
pub fn genre_options(books: &[Book]) -> Vec<String> {
    books
        .iter()
        .map(|b| b.genre.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use shelf_domain::{BookDraft, BookId, BookStatus};

    fn books(n: usize) -> Vec<Book> {
        (0..n)
            .map(|i| {
                let status = if i % 3 == 0 {
                    BookStatus::Issued
                } else {
                    BookStatus::Available
                };
                Book::from_draft(
                    BookId(i as u64 + 1),
                    BookDraft::new(format!("Book {i}"), format!("Author {}", i % 4), "Fiction", 1900 + i as u32, status),
                )
            })
            .collect()
    }

    #[test]
    fn test_empty_collection() {
        let view = derive_view(&[], &CollectionQuery::new());
        assert_eq!(view.total_matching, 0);
        assert_eq!(view.page_count, 0);
        assert!(view.page_items.is_empty());
        assert!(genre_options(&[]).is_empty());
        assert_eq!(view.range_label(), "No books to display");
    }

    #[test]
    fn test_twenty_three_records() {
        let all = books(23);
        let mut query = CollectionQuery::new();
        assert_eq!(derive_view(&all, &query).page_count, 3);

        query.set_page(3);
        let view = derive_view(&all, &query);
        assert_eq!(view.page_items.len(), 3);
        assert_eq!(view.page_items[0].id, BookId(21));
        assert!(!view.has_next());
        assert!(view.has_previous());
    }

    #[test]
    fn test_page_past_end_is_empty_not_clamped() {
        let all = books(23);
        let mut query = CollectionQuery::new();
        query.set_page(3);
        query.set_status(Some(BookStatus::Issued));
        // Filter change reset to page 1
        assert_eq!(query.page(), 1);

        query.set_page(5);
        let view = derive_view(&all, &query);
        assert_eq!(view.page, 5);
        assert_eq!(view.page_count, 1);
        assert!(view.page_items.is_empty());
        assert_eq!(view.total_matching, 8);
    }

    #[test]
    fn test_conjunctive_filters() {
        let all = vec![
            Book::from_draft(BookId(1), BookDraft::new("A", "X", "Sci-Fi", 2000, BookStatus::Available)),
            Book::from_draft(BookId(2), BookDraft::new("B", "Y", "Sci-Fi", 2001, BookStatus::Issued)),
        ];
        let mut query = CollectionQuery::new();
        query.set_genre(Some("Sci-Fi".to_string()));
        query.set_status(Some(BookStatus::Available));
        let view = derive_view(&all, &query);
        assert_eq!(view.page_items, vec![all[0].clone()]);
    }

    #[test]
    fn test_case_insensitive_search() {
        let all = vec![Book::from_draft(
            BookId(1),
            BookDraft::new("Dune", "Frank Herbert", "Science Fiction", 1965, BookStatus::Available),
        )];
        let mut query = CollectionQuery::new();
        query.set_search("dune");
        assert_eq!(derive_view(&all, &query).total_matching, 1);
    }

    #[test]
    fn test_genre_options_sorted_distinct() {
        let mut all = books(2);
        all[0].genre = "Poetry".to_string();
        all[1].genre = "History".to_string();
        all.push(all[0].clone());
        assert_eq!(genre_options(&all), vec!["History", "Poetry"]);
    }

    fn arb_book() -> impl Strategy<Value = Book> {
        (
            1u64..1000,
            "[a-zA-Z ]{1,12}",
            "[a-zA-Z ]{1,12}",
            prop::sample::select(vec!["Fiction", "Poetry", "History"]),
            any::<bool>(),
        )
            .prop_map(|(id, title, author, genre, issued)| {
                let status = if issued { BookStatus::Issued } else { BookStatus::Available };
                Book::from_draft(BookId(id), BookDraft::new(title, author, genre, 2000, status))
            })
    }

    fn arb_query() -> impl Strategy<Value = CollectionQuery> {
        (
            "[a-z]{0,2}",
            prop::option::of(prop::sample::select(vec!["Fiction", "Poetry", "History"])),
            prop::option::of(prop::sample::select(BookStatus::ALL.to_vec())),
            prop::sample::select(PageSize::ALL.to_vec()),
            1usize..8,
        )
            .prop_map(|(search, genre, status, size, page)| {
                let mut query = CollectionQuery::with_page_size(size);
                query.set_search(search);
                query.set_genre(genre.map(str::to_string));
                query.set_status(status);
                query.set_page(page);
                query
            })
    }

    proptest! {
        #[test]
        fn prop_page_never_exceeds_size(all in prop::collection::vec(arb_book(), 0..60), query in arb_query()) {
            let view = derive_view(&all, &query);
            prop_assert!(view.page_items.len() <= query.page_size().get());
        }

        #[test]
        fn prop_pages_reconstruct_filtered_set(all in prop::collection::vec(arb_book(), 0..60), query in arb_query()) {
            let expected: Vec<Book> = all.iter().filter(|b| query.matches(b)).cloned().collect();
            let mut paged = query.clone();
            paged.set_page(1);
            let page_count = derive_view(&all, &paged).page_count;

            let mut rebuilt = Vec::new();
            for page in 1..=page_count {
                paged.set_page(page);
                rebuilt.extend(derive_view(&all, &paged).page_items);
            }
            prop_assert_eq!(rebuilt, expected);
        }

        #[test]
        fn prop_derive_view_is_pure(all in prop::collection::vec(arb_book(), 0..30), query in arb_query()) {
            prop_assert_eq!(derive_view(&all, &query), derive_view(&all, &query));
        }
    }
}
