//! Pagination primitives shared by list endpoints.

use serde::{Deserialize, Serialize};

/// Pagination query parameters, 1-based.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Pagination {
    #[serde(default)]
    pub page: Option<i64>,
    #[serde(default)]
    pub per_page: Option<i64>,
}

impl Pagination {
    /// Maximum items per page.
    const MAX_PER_PAGE: i64 = 200;

    /// Default items per page.
    const DEFAULT_PER_PAGE: i64 = 50;

    /// Requested page size, clamped to `1..=MAX_PER_PAGE`.
    pub fn limit(&self) -> i64 {
        self.per_page
            .unwrap_or(Self::DEFAULT_PER_PAGE)
            .clamp(1, Self::MAX_PER_PAGE)
    }

    /// Row offset of the requested page.
    pub fn offset(&self) -> i64 {
        (self.current_page() - 1) * self.limit()
    }

    pub fn current_page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }
}

/// Paged result envelope returned by list endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct PagedResult<T: Serialize> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub has_more: bool,
}

impl<T: Serialize> PagedResult<T> {
    pub fn new(items: Vec<T>, total: i64, pagination: &Pagination) -> Self {
        let has_more = pagination.offset() + (items.len() as i64) < total;
        Self {
            items,
            total,
            page: pagination.current_page(),
            per_page: pagination.limit(),
            has_more,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_defaults() {
        let p = Pagination::default();
        assert_eq!(p.limit(), 50);
        assert_eq!(p.offset(), 0);
        assert_eq!(p.current_page(), 1);
    }

    #[test]
    fn pagination_clamps_per_page() {
        let p = Pagination {
            page: Some(1),
            per_page: Some(5000),
        };
        assert_eq!(p.limit(), 200);
    }

    #[test]
    fn pagination_offset_calculation() {
        let p = Pagination {
            page: Some(4),
            per_page: Some(25),
        };
        assert_eq!(p.offset(), 75);
    }

    #[test]
    fn negative_page_is_treated_as_first() {
        let p = Pagination {
            page: Some(-3),
            per_page: None,
        };
        assert_eq!(p.current_page(), 1);
        assert_eq!(p.offset(), 0);
    }

    #[test]
    fn paged_result_reports_remaining_pages() {
        let p = Pagination {
            page: Some(1),
            per_page: Some(50),
        };
        let result = PagedResult::new(vec![0u8; 50], 101, &p);
        assert!(result.has_more);

        let last = Pagination {
            page: Some(3),
            per_page: Some(50),
        };
        let result = PagedResult::new(vec![0u8; 1], 101, &last);
        assert!(!result.has_more);
    }
}
