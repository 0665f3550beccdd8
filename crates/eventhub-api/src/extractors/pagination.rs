//! Pagination query parameter extractor.

use serde::Deserialize;

use eventhub_core::types::PageRequest;

/// Query parameters for paginated endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaginationParams {
    /// Items per page (default 50, max 200).
    pub limit: Option<u32>,
    /// Items to skip.
    pub offset: Option<u32>,
}

impl PaginationParams {
    /// Converts to a clamped `PageRequest`.
    pub fn into_page_request(self) -> PageRequest {
        PageRequest::from_query(self.limit, self.offset)
    }
}
