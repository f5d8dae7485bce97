//! Pagination types for page-oriented reads.

use serde::{Deserialize, Serialize};

/// Default page size.
const DEFAULT_PAGE_SIZE: u64 = 25;
/// Maximum page size.
const MAX_PAGE_SIZE: u64 = 100;

/// Request parameters for paginated queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number (1-based).
    #[serde(default = "default_page")]
    pub page: u64,
    /// Number of items per page.
    #[serde(default = "default_page_size")]
    pub page_size: u64,
}

impl PageRequest {
    /// Create a new page request, clamping out-of-range values.
    pub fn new(page: u64, page_size: u64) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Rows to skip before this page.
    ///
    /// Saturates at `u64::MAX` for absurd page numbers; the store rejects
    /// offsets it cannot bind.
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.page_size)
    }

    /// Rows on this page.
    pub fn limit(&self) -> u64 {
        self.page_size
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Paginated response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T: Serialize> {
    /// The items on this page.
    pub items: Vec<T>,
    /// Current page number (1-based).
    pub page: u64,
    /// Number of items per page.
    pub page_size: u64,
    /// Total number of items across all pages.
    pub total_items: u64,
    /// Total number of pages.
    pub total_pages: u64,
    /// Whether there is a next page.
    pub has_next: bool,
    /// Whether there is a previous page.
    pub has_previous: bool,
}

impl<T: Serialize> PageResponse<T> {
    /// Build a page from one slice of items and the unpaginated total.
    pub fn new(items: Vec<T>, request: &PageRequest, total_items: u64) -> Self {
        let total_pages = total_items.div_ceil(request.page_size.max(1)).max(1);
        Self {
            items,
            page: request.page,
            page_size: request.page_size,
            total_items,
            total_pages,
            has_next: request.page < total_pages,
            has_previous: request.page > 1,
        }
    }

    /// Create an empty response.
    pub fn empty(request: &PageRequest) -> Self {
        Self::new(Vec::new(), request, 0)
    }
}

fn default_page() -> u64 {
    1
}

fn default_page_size() -> u64 {
    DEFAULT_PAGE_SIZE
}
