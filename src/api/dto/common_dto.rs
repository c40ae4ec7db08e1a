//! Shared DTO types used across multiple endpoints.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Pagination query parameters for list endpoints.
#[derive(Debug, Clone, Copy, Deserialize, IntoParams)]
pub struct PageParams {
    /// Page number (1-indexed). Defaults to 1.
    #[serde(default = "default_page")]
    pub page: i64,
    /// Items per page (max 100). Defaults to 10.
    #[serde(default = "default_limit")]
    pub limit: i64,
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
        }
    }
}

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    10
}

impl PageParams {
    /// Clamps `page` to at least 1 and `limit` to `1..=100`.
    #[must_use]
    pub fn clamped(&self) -> Self {
        Self {
            page: self.page.max(1),
            limit: self.limit.clamp(1, 100),
        }
    }

    /// Row offset for SQL queries, computed from the clamped values.
    #[must_use]
    pub fn offset(&self) -> i64 {
        let clamped = self.clamped();
        (clamped.page - 1) * clamped.limit
    }
}

/// Paginated list envelope shared by every collection endpoint.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PageResponse<T> {
    /// Always `true` for successful responses.
    pub success: bool,
    /// The page of items.
    pub items: Vec<T>,
    /// Total matching rows across all pages.
    pub total: i64,
    /// Current page number.
    pub page: i64,
    /// Items per page.
    #[serde(rename = "pageSize")]
    pub page_size: i64,
    /// Total number of pages.
    pub pages: i64,
}

impl<T> PageResponse<T> {
    /// Assembles the envelope from a page of rows and the total count.
    #[must_use]
    pub fn new(items: Vec<T>, total: i64, params: PageParams) -> Self {
        let params = params.clamped();
        Self {
            success: true,
            items,
            total,
            page: params.page,
            page_size: params.limit,
            // limit is clamped to >= 1 above, so the division is safe
            pages: (total + params.limit - 1) / params.limit,
        }
    }
}

/// Bare acknowledgement body for deletes and similar operations.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AckResponse {
    /// Always `true`.
    pub success: bool,
    /// Human-readable confirmation.
    pub message: String,
}

impl AckResponse {
    /// Builds a success acknowledgement.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_params_clamp_to_allowed_window() {
        let params = PageParams { page: 0, limit: 500 };
        let clamped = params.clamped();
        assert_eq!(clamped.page, 1);
        assert_eq!(clamped.limit, 100);

        let params = PageParams { page: -3, limit: 0 };
        let clamped = params.clamped();
        assert_eq!(clamped.page, 1);
        assert_eq!(clamped.limit, 1);
    }

    #[test]
    fn offset_follows_clamped_page() {
        let params = PageParams { page: 3, limit: 10 };
        assert_eq!(params.offset(), 20);
        let params = PageParams { page: 0, limit: 10 };
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn page_response_computes_page_count() {
        let params = PageParams { page: 1, limit: 10 };
        let response = PageResponse::new(vec![1, 2, 3], 25, params);
        assert_eq!(response.pages, 3);
        assert_eq!(response.page_size, 10);
        assert!(response.success);

        let empty: PageResponse<i32> = PageResponse::new(vec![], 0, params);
        assert_eq!(empty.pages, 0);

        let exact: PageResponse<i32> = PageResponse::new(vec![], 30, params);
        assert_eq!(exact.pages, 3);
    }
}
