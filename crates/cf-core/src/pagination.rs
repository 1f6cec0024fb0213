//! Pagination types for list operations
//!
//! Every listing surface accepts a `PageRequest` and returns a
//! `PagedResult` carrying the page plus the total match count.

use serde::{Deserialize, Serialize};

/// Page selection for a list query (1-indexed)
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct PageRequest {
    /// Page number (1-indexed)
    #[serde(default = "default_page")]
    pub page: i64,

    /// Items per page
    #[serde(default = "default_per_page")]
    pub per_page: i64,
}

fn default_page() -> i64 {
    1
}

fn default_per_page() -> i64 {
    10
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: default_page(),
            per_page: default_per_page(),
        }
    }
}

impl PageRequest {
    pub fn new(page: i64, per_page: i64) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.clamp(1, 1000),
        }
    }

    /// Calculate the SQL offset
    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.per_page
    }

    /// Calculate the SQL limit
    pub fn limit(&self) -> i64 {
        self.per_page
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// SQL keyword for this direction
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// One page of items plus the total match count
#[derive(Debug, Clone, Serialize)]
pub struct PagedResult<T> {
    pub items: Vec<T>,
    pub total_count: i64,
    pub page: i64,
    pub per_page: i64,
}

impl<T> PagedResult<T> {
    pub fn new(items: Vec<T>, total_count: i64, request: &PageRequest) -> Self {
        Self {
            items,
            total_count,
            page: request.page,
            per_page: request.per_page,
        }
    }

    /// Total number of pages
    pub fn total_pages(&self) -> i64 {
        if self.per_page <= 0 {
            return 0;
        }
        (self.total_count + self.per_page - 1) / self.per_page
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_clamps() {
        let request = PageRequest::new(0, 0);
        assert_eq!(request.page, 1);
        assert_eq!(request.per_page, 1);

        let request = PageRequest::new(-5, 5000);
        assert_eq!(request.page, 1);
        assert_eq!(request.per_page, 1000);
    }

    #[test]
    fn test_page_request_offset() {
        let request = PageRequest::new(1, 10);
        assert_eq!(request.offset(), 0);
        assert_eq!(request.limit(), 10);

        let request = PageRequest::new(3, 10);
        assert_eq!(request.offset(), 20);
    }

    #[test]
    fn test_page_request_default() {
        let request = PageRequest::default();
        assert_eq!(request.page, 1);
        assert_eq!(request.per_page, 10);
    }

    #[test]
    fn test_paged_result_total_pages() {
        let result = PagedResult::new(vec![1, 2, 3], 25, &PageRequest::new(1, 10));
        assert_eq!(result.total_pages(), 3);
        assert!(result.has_next());
        assert!(!result.has_prev());

        let result = PagedResult::new(vec![1], 25, &PageRequest::new(3, 10));
        assert!(!result.has_next());
        assert!(result.has_prev());
    }

    #[test]
    fn test_paged_result_empty() {
        let result: PagedResult<i32> = PagedResult::new(vec![], 0, &PageRequest::default());
        assert_eq!(result.total_pages(), 0);
        assert!(!result.has_next());
        assert!(!result.has_prev());
    }

    #[test]
    fn test_sort_direction_sql() {
        assert_eq!(SortDirection::Asc.as_sql(), "ASC");
        assert_eq!(SortDirection::Desc.as_sql(), "DESC");
        assert_eq!(SortDirection::default(), SortDirection::Asc);
    }
}
