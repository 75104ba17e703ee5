use reqwest::header::HeaderMap;
use serde::{Deserialize, Serialize};

const PAGE_HEADER: &str = "x-pagination-page";
const LIMIT_HEADER: &str = "x-pagination-limit";
const PAGE_COUNT_HEADER: &str = "x-pagination-page-count";
const ITEM_COUNT_HEADER: &str = "x-pagination-item-count";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub page_count: u32,
    pub item_count: u64,
}

impl Pagination {
    /// Reads Trakt's `X-Pagination-*` headers. Returns `None` when the endpoint
    /// is not paginated (no page header) or the headers are not numeric.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        fn read<T: std::str::FromStr>(headers: &HeaderMap, name: &str) -> Option<T> {
            headers.get(name)?.to_str().ok()?.trim().parse().ok()
        }

        let page = read(headers, PAGE_HEADER)?;
        Some(Self {
            page,
            limit: read(headers, LIMIT_HEADER)?,
            page_count: read(headers, PAGE_COUNT_HEADER).unwrap_or(page),
            item_count: read(headers, ITEM_COUNT_HEADER).unwrap_or(0),
        })
    }

    fn single_page(items: usize) -> Self {
        Self {
            page: 1,
            limit: items as u32,
            page_count: 1,
            item_count: items as u64,
        }
    }

    pub fn has_next_page(&self) -> bool {
        self.page < self.page_count
    }

    pub fn has_previous_page(&self) -> bool {
        self.page > 1
    }

    pub fn next_page(&self) -> Option<u32> {
        self.has_next_page().then(|| self.page + 1)
    }

    pub fn previous_page(&self) -> Option<u32> {
        self.has_previous_page().then(|| self.page - 1)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

impl<T> Page<T> {
    /// Non-paginated responses become a single page holding every item.
    pub fn new(items: Vec<T>, pagination: Option<Pagination>) -> Self {
        let pagination = pagination.unwrap_or_else(|| Pagination::single_page(items.len()));
        Self { items, pagination }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_static(value));
        }
        map
    }

    #[test]
    fn reads_all_pagination_headers() {
        let map = headers(&[
            ("x-pagination-page", "2"),
            ("x-pagination-limit", "10"),
            ("x-pagination-page-count", "5"),
            ("x-pagination-item-count", "47"),
        ]);

        let pagination = Pagination::from_headers(&map).unwrap();
        assert_eq!(pagination.page, 2);
        assert_eq!(pagination.limit, 10);
        assert_eq!(pagination.page_count, 5);
        assert_eq!(pagination.item_count, 47);
        assert_eq!(pagination.next_page(), Some(3));
        assert_eq!(pagination.previous_page(), Some(1));
    }

    #[test]
    fn missing_page_header_means_not_paginated() {
        let map = headers(&[("x-pagination-limit", "10")]);
        assert_eq!(Pagination::from_headers(&map), None);
    }

    #[test]
    fn non_numeric_headers_are_ignored() {
        let map = headers(&[("x-pagination-page", "abc"), ("x-pagination-limit", "10")]);
        assert_eq!(Pagination::from_headers(&map), None);
    }

    #[test]
    fn unpaginated_page_holds_everything() {
        let page = Page::new(vec!["a", "b", "c"], None);
        assert_eq!(page.pagination.page, 1);
        assert_eq!(page.pagination.page_count, 1);
        assert_eq!(page.pagination.item_count, 3);
        assert!(!page.pagination.has_next_page());
        assert!(!page.pagination.has_previous_page());
    }
}
