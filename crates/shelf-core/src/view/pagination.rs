//! Pagination arithmetic shared by the view engine and front ends

/// Maximum number of page buttons shown at once
pub const PAGE_WINDOW: usize = 5;

/// Number of pages needed for `total` items; zero items means zero pages.
pub fn page_count(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}

/// Half-open index range of a 1-based page, clamped to `total`.
pub fn page_bounds(page: usize, page_size: usize, total: usize) -> (usize, usize) {
    let start = page.saturating_sub(1).saturating_mul(page_size).min(total);
    let end = page.saturating_mul(page_size).min(total);
    (start, end)
}

/// Page numbers to offer, at most [`PAGE_WINDOW`] of them.
///
/// Shows the first pages while near the start, the last pages while near the
/// end, and otherwise keeps the current page in the middle.
pub fn page_window(current: usize, page_count: usize) -> Vec<usize> {
    if page_count == 0 {
        return Vec::new();
    }
    if page_count <= PAGE_WINDOW {
        return (1..=page_count).collect();
    }

    let half = PAGE_WINDOW / 2;
    let first = if current <= half + 1 {
        1
    } else if current + half >= page_count {
        page_count + 1 - PAGE_WINDOW
    } else {
        current - half
    };
    (first..first + PAGE_WINDOW).collect()
}

/// Summary line under the table
pub fn range_label(page: usize, page_size: usize, total: usize) -> String {
    if total == 0 {
        return "No books to display".to_string();
    }
    let (start, end) = page_bounds(page, page_size, total);
    let start = (start + 1).min(total);
    format!("Showing {} to {} of {} books", start, end, total)
}

pub fn has_previous(page: usize, total: usize) -> bool {
    page > 1 && total > 0
}

/// Only the last page itself disables Next; a page past the end does not.
pub fn has_next(page: usize, page_count: usize, total: usize) -> bool {
    total > 0 && page_count > 1 && page != page_count
}
