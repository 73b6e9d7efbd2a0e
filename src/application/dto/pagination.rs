use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Filters that produced a page, echoed back so clients can request the next
/// page with the same parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PageFilters {
    pub limit: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(bound(
    serialize = "T: Serialize",
    deserialize = "T: serde::de::DeserializeOwned"
))]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
    pub filters: PageFilters,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: u64, page: u32, filters: PageFilters) -> Self {
        let page_size = filters.limit;
        let total_pages = if total == 0 || page_size == 0 {
            0
        } else {
            u32::try_from((total - 1) / u64::from(page_size) + 1).unwrap_or(u32::MAX)
        };
        Self {
            items,
            total,
            page,
            page_size,
            total_pages,
            filters,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filters(limit: u32) -> PageFilters {
        PageFilters {
            limit,
            category: None,
        }
    }

    #[test]
    fn total_pages_rounds_up() {
        let page: Page<u8> = Page::new(vec![], 21, 1, filters(10));
        assert_eq!(page.total_pages, 3);
        let exact: Page<u8> = Page::new(vec![], 20, 2, filters(10));
        assert_eq!(exact.total_pages, 2);
    }

    #[test]
    fn empty_result_has_no_pages() {
        let page: Page<u8> = Page::new(vec![], 0, 1, filters(10));
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.page_size, 10);
    }

    #[test]
    fn category_filter_is_omitted_when_absent() {
        let json = serde_json::to_value(filters(5)).unwrap();
        assert_eq!(json, serde_json::json!({ "limit": 5 }));
    }
}
