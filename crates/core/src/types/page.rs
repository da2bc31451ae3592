//! Normalized pagination types.
//!
//! The backend returns several ad-hoc list envelopes (`{data: {items, ...}}`,
//! bare `{orders, total, ...}` objects, bare arrays). Client code normalizes
//! all of them into [`Page`] so callers only ever see one shape.

use serde::{Deserialize, Serialize};

/// One page of a listed resource, with pagination metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items on this page, in server order.
    pub items: Vec<T>,
    /// Total number of matching items across all pages.
    pub total: u64,
    /// 1-based page number.
    pub page: u32,
    /// Requested page size.
    pub limit: u32,
    /// Total number of pages for this query.
    pub total_pages: u32,
    /// Whether a later page exists.
    pub has_next_page: bool,
    /// Whether an earlier page exists.
    pub has_prev_page: bool,
}

impl<T> Page<T> {
    /// Build a page, deriving the next/prev flags from page position.
    ///
    /// Endpoints that do send explicit flags override them after
    /// construction; most omit them.
    #[must_use]
    pub fn new(items: Vec<T>, total: u64, page: u32, limit: u32, total_pages: u32) -> Self {
        Self {
            items,
            total,
            page,
            limit,
            total_pages,
            has_next_page: page < total_pages,
            has_prev_page: page > 1,
        }
    }

    /// Number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether this page holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Sort direction accepted by list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Ascending order.
    Asc,
    /// Descending order.
    Desc,
}

impl core::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Asc => write!(f, "asc"),
            Self::Desc => write!(f, "desc"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn page_flags_derived_from_position() {
        let first: Page<u32> = Page::new(vec![1, 2], 25, 1, 10, 3);
        assert!(first.has_next_page);
        assert!(!first.has_prev_page);

        let middle: Page<u32> = Page::new(vec![1], 25, 2, 10, 3);
        assert!(middle.has_next_page);
        assert!(middle.has_prev_page);

        let last: Page<u32> = Page::new(vec![1], 25, 3, 10, 3);
        assert!(!last.has_next_page);
        assert!(last.has_prev_page);
    }

    #[test]
    fn single_page_has_no_neighbors() {
        let only: Page<u32> = Page::new(vec![1, 2, 3], 3, 1, 10, 1);
        assert!(!only.has_next_page);
        assert!(!only.has_prev_page);
        assert_eq!(only.len(), 3);
        assert!(!only.is_empty());
    }

    #[test]
    fn sort_order_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&SortOrder::Asc).unwrap(), "\"asc\"");
        assert_eq!(serde_json::to_string(&SortOrder::Desc).unwrap(), "\"desc\"");
        assert_eq!(SortOrder::Desc.to_string(), "desc");
    }
}
