//! Fixed-size paging for the trivia lists

use serde::Deserialize;

/// Upper bound on page size
const MAX_PER_PAGE: u32 = 100;

/// Which slice of a list to fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// 1-indexed
    pub page: u32,
    pub per_page: u32,
}

impl Pagination {
    /// Page is at least 1, page size within 1..=100.
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.clamp(1, MAX_PER_PAGE),
        }
    }

    /// SQL `OFFSET`
    pub fn offset(&self) -> i64 {
        i64::from(self.page - 1) * i64::from(self.per_page)
    }

    /// SQL `LIMIT`
    pub fn limit(&self) -> i64 {
        i64::from(self.per_page)
    }
}

/// Rows of one page plus the count across all pages
#[derive(Debug, Clone)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: u32,
}

impl<T> Paginated<T> {
    /// Whether nothing was found at this page
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// `?page=N` query string
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaginationParams {
    pub page: Option<u32>,
}

impl PaginationParams {
    /// Honor `page` with a page size chosen by the route.
    pub fn with_fixed_size(&self, per_page: u32) -> Pagination {
        Pagination::new(self.page.unwrap_or(1), per_page)
    }
}
