//! Pagination query parameter extractor.

use serde::{Deserialize, Serialize};

use repokit_core::types::{PageRequest, SortDirection, SortField};

/// Query parameters for paginated endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationParams {
    /// Page number (1-based, default: 1).
    #[serde(default = "default_page")]
    pub page: u64,
    /// Items per page (default: 25, max: 100).
    #[serde(default = "default_per_page")]
    pub per_page: u64,
    /// Sort field (optional).
    pub sort_by: Option<String>,
    /// Sort direction: "asc" or "desc".
    pub sort_dir: Option<String>,
}

fn default_page() -> u64 {
    1
}

fn default_per_page() -> u64 {
    25
}

impl PaginationParams {
    /// Converts to a clamped `PageRequest`.
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.per_page)
    }

    /// The requested ordering, if any. Unknown columns are rejected by the store.
    pub fn sort_field(&self) -> Option<SortField> {
        let column = self.sort_by.as_deref()?;
        let direction = match self.sort_dir.as_deref() {
            Some(dir) if dir.eq_ignore_ascii_case("desc") => SortDirection::Desc,
            _ => SortDirection::Asc,
        };
        Some(SortField::new(column, direction))
    }
}
