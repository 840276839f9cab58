//! Pagination helpers

use serde::Deserialize;

use crate::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Normalised page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub page: u32,
    pub per_page: u32,
}

impl Page {
    /// Build from raw query values; page zero reads as the first page and
    /// the size is capped at `MAX_PAGE_SIZE`
    pub fn new(page: Option<u32>, per_page: Option<u32>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            per_page: per_page.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE),
        }
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.page - 1) * i64::from(self.per_page)
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.per_page)
    }
}

/// Common `?page=&per_page=` query parameters
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl PageQuery {
    pub fn page(&self) -> Page {
        Page::new(self.page, self.per_page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_defaults_and_caps() {
        let p = Page::new(None, None);
        assert_eq!((p.page, p.per_page, p.offset(), p.limit()), (1, 20, 0, 20));

        let p = Page::new(Some(3), Some(10));
        assert_eq!(p.offset(), 20);

        let p = Page::new(Some(0), Some(500));
        assert_eq!((p.page, p.per_page), (1, MAX_PAGE_SIZE));
    }
}
