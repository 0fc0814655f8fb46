//! Offset pagination shared by the lot listings.

use serde::{Deserialize, Serialize};

/// Pagination query parameters (`?offset=0&page_size=10`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Pagination {
    pub offset: Option<i64>,
    pub page_size: Option<i64>,
}

impl Pagination {
    /// Maximum rows per page.
    const MAX_PAGE_SIZE: i64 = 100;

    /// Default rows per page.
    const DEFAULT_PAGE_SIZE: i64 = 10;

    pub fn limit(&self) -> i64 {
        self.page_size
            .unwrap_or(Self::DEFAULT_PAGE_SIZE)
            .clamp(1, Self::MAX_PAGE_SIZE)
    }

    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }
}

/// Number of rows actually shown on a page, never more than what remains
/// past `offset`.
pub fn result_count(offset: i64, page_len: usize, total: i64) -> i64 {
    let remaining = (total - offset).max(0);
    (page_len as i64).min(remaining)
}

/// Human-readable summary line: `Showing 10 of 25 results`.
pub fn results_message(shown: i64, total: i64) -> String {
    format!("Showing {shown} of {total} results")
}

/// One page of rows plus the summary line rendered above the table.
#[derive(Debug, Clone, Serialize)]
pub struct PagedResult<T: Serialize> {
    pub results: String,
    pub items: Vec<T>,
    pub total: i64,
    pub offset: i64,
    pub page_size: i64,
}

impl<T: Serialize> PagedResult<T> {
    pub fn new(items: Vec<T>, total: i64, pagination: &Pagination) -> Self {
        let offset = pagination.offset();
        let shown = result_count(offset, items.len(), total);
        Self {
            results: results_message(shown, total),
            items,
            total,
            offset,
            page_size: pagination.limit(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_defaults() {
        let p = Pagination::default();
        assert_eq!(p.limit(), 10);
        assert_eq!(p.offset(), 0);
    }

    #[test]
    fn pagination_clamps_page_size_and_offset() {
        let p = Pagination {
            offset: Some(-5),
            page_size: Some(500),
        };
        assert_eq!(p.limit(), 100);
        assert_eq!(p.offset(), 0);

        let p = Pagination {
            offset: None,
            page_size: Some(0),
        };
        assert_eq!(p.limit(), 1);
    }

    #[test]
    fn first_page_of_twenty_five() {
        let p = Pagination {
            offset: Some(0),
            page_size: Some(10),
        };
        let result = PagedResult::new((1..=10).collect::<Vec<i32>>(), 25, &p);
        assert_eq!(result.results, "Showing 10 of 25 results");
        assert_eq!(result.items.len(), 10);
        assert_eq!(result.total, 25);
    }

    #[test]
    fn last_partial_page_counts_returned_rows() {
        let p = Pagination {
            offset: Some(20),
            page_size: Some(10),
        };
        let result = PagedResult::new(vec![21, 22, 23, 24, 25], 25, &p);
        assert_eq!(result.results, "Showing 5 of 25 results");
        assert_eq!(result.offset, 20);
    }

    #[test]
    fn empty_listing() {
        let result = PagedResult::<i32>::new(vec![], 0, &Pagination::default());
        assert_eq!(result.results, "Showing 0 of 0 results");
    }

    #[test]
    fn result_count_never_exceeds_remaining_rows() {
        assert_eq!(result_count(0, 10, 25), 10);
        assert_eq!(result_count(30, 0, 25), 0);
        assert_eq!(result_count(20, 10, 25), 5);
    }
}
