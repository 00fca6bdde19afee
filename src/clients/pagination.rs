//! Offset/limit pagination shared by catalog search and order history.

use serde::Serialize;

pub const DEFAULT_PAGE_LIMIT: u32 = 20;
pub const MAX_PAGE_LIMIT: u32 = 100;

/// A normalized page request: `page >= 1`, `1 <= limit <= 100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

impl PageRequest {
    /// Applies defaults and clamps out-of-range values instead of rejecting them.
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        let page = page.unwrap_or(1).clamp(1, i64::from(u32::MAX));
        let limit = limit
            .unwrap_or(i64::from(DEFAULT_PAGE_LIMIT))
            .clamp(1, i64::from(MAX_PAGE_LIMIT));
        Self {
            page: u32::try_from(page).unwrap_or(1),
            limit: u32::try_from(limit).unwrap_or(DEFAULT_PAGE_LIMIT),
        }
    }

    pub fn offset(&self) -> usize {
        (self.page as usize - 1).saturating_mul(self.limit as usize)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: usize,
    pub pages: usize,
}

/// One page of results plus the pre-pagination total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub pagination: Pagination,
}

impl<T> Page<T> {
    /// Cuts one page out of an already ordered result set.
    pub fn from_sorted(items: Vec<T>, request: PageRequest) -> Self {
        let total = items.len();
        let data = items
            .into_iter()
            .skip(request.offset())
            .take(request.limit as usize)
            .collect();
        Self {
            data,
            pagination: Pagination {
                page: request.page,
                limit: request.limit,
                total,
                pages: total.div_ceil(request.limit as usize),
            },
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            data: self.data.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_and_clamping() {
        assert_eq!(PageRequest::new(None, None), PageRequest { page: 1, limit: 20 });
        assert_eq!(PageRequest::new(Some(0), Some(500)), PageRequest { page: 1, limit: 100 });
        assert_eq!(PageRequest::new(Some(-3), Some(0)), PageRequest { page: 1, limit: 1 });
        assert_eq!(PageRequest::new(Some(3), Some(10)).offset(), 20);
    }

    #[test]
    fn slices_and_counts_pages() {
        let page = Page::from_sorted((1..=45).collect::<Vec<u32>>(), PageRequest::new(Some(3), Some(20)));
        assert_eq!(page.data, (41..=45).collect::<Vec<u32>>());
        assert_eq!(
            page.pagination,
            Pagination { page: 3, limit: 20, total: 45, pages: 3 }
        );
    }

    #[test]
    fn page_past_the_end_is_empty_but_keeps_total() {
        let page = Page::from_sorted(vec![1, 2, 3], PageRequest::new(Some(9), Some(2)));
        assert!(page.data.is_empty());
        assert_eq!(page.pagination.total, 3);
        assert_eq!(page.pagination.pages, 2);

        let empty = Page::<u32>::from_sorted(vec![], PageRequest::default());
        assert_eq!(empty.pagination.pages, 0);
    }
}
