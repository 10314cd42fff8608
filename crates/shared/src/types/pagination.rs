//! Page windows over in-memory lists such as dashboard tables.

use serde::{Deserialize, Serialize};

/// Largest page a client may ask for.
pub const MAX_PER_PAGE: u32 = 100;

/// Rows per page when the client names none.
pub const DEFAULT_PER_PAGE: u32 = 20;

/// A requested page. Always holds `page >= 1` and `1 <= per_page <= MAX_PER_PAGE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageRequest {
    page: u32,
    per_page: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, DEFAULT_PER_PAGE)
    }
}

impl PageRequest {
    /// Clamps both values into range.
    #[must_use]
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.clamp(1, MAX_PER_PAGE),
        }
    }

    /// Builds a request from optional query values, or `None` if neither was given.
    #[must_use]
    pub fn from_query(page: Option<u32>, per_page: Option<u32>) -> Option<Self> {
        if page.is_none() && per_page.is_none() {
            return None;
        }
        Some(Self::new(
            page.unwrap_or(1),
            per_page.unwrap_or(DEFAULT_PER_PAGE),
        ))
    }

    /// 1-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Page size.
    #[must_use]
    pub const fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Keeps the items on this page and reports where it sits in the whole list.
    #[must_use]
    pub fn slice<T>(&self, items: Vec<T>) -> (Vec<T>, PageMeta) {
        let total = items.len();
        let skip = (self.page as usize - 1).saturating_mul(self.per_page as usize);
        let kept = items
            .into_iter()
            .skip(skip)
            .take(self.per_page as usize)
            .collect();
        (kept, PageMeta::new(self, total))
    }
}

/// Position of one page within a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    /// Current page number.
    pub page: u32,
    /// Page size.
    pub per_page: u32,
    /// Items across all pages.
    pub total: u64,
    /// Page count; an empty list still has one page.
    pub total_pages: u32,
    /// A later page exists.
    pub has_next: bool,
}

impl PageMeta {
    /// Describes `request` over a list of `total` items.
    #[must_use]
    pub fn new(request: &PageRequest, total: usize) -> Self {
        let total = total as u64;
        let total_pages = u32::try_from(total.div_ceil(u64::from(request.per_page)))
            .unwrap_or(u32::MAX)
            .max(1);
        Self {
            page: request.page,
            per_page: request.per_page,
            total,
            total_pages,
            has_next: request.page < total_pages,
        }
    }
}
