//! Offset pagination for list endpoints.

use serde::{Deserialize, Serialize};

/// Maximum number of items a single page may hold.
pub const MAX_PAGE_SIZE: u64 = 100;

/// Request parameters for offset-paginated queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Number of items to skip.
    pub skip: u64,
    /// Number of items to return.
    pub limit: u64,
}

impl PageRequest {
    /// Create a new page request, clamping `limit` to `1..=MAX_PAGE_SIZE`.
    pub fn new(skip: u64, limit: u64) -> Self {
        Self {
            skip,
            limit: limit.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Build a request from optional query values.
    pub fn from_query(skip: Option<u64>, limit: Option<u64>, default_limit: u64) -> Self {
        Self::new(skip.unwrap_or(0), limit.unwrap_or(default_limit))
    }

    /// SQL `OFFSET` value.
    pub fn offset(&self) -> i64 {
        i64::try_from(self.skip).unwrap_or(i64::MAX)
    }

    /// SQL `LIMIT` value.
    pub fn sql_limit(&self) -> i64 {
        // limit is clamped to MAX_PAGE_SIZE
        self.limit as i64
    }

    /// Apply this page to an in-memory, already ordered sequence.
    pub fn slice<T>(&self, items: impl IntoIterator<Item = T>) -> Vec<T> {
        items
            .into_iter()
            .skip(usize::try_from(self.skip).unwrap_or(usize::MAX))
            .take(self.limit as usize)
            .collect()
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: MAX_PAGE_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_is_clamped() {
        assert_eq!(PageRequest::new(0, 0).limit, 1);
        assert_eq!(PageRequest::new(0, 500).limit, MAX_PAGE_SIZE);
        assert_eq!(PageRequest::new(3, 20).limit, 20);
    }

    #[test]
    fn test_from_query_defaults() {
        let page = PageRequest::from_query(None, None, 20);
        assert_eq!(page.skip, 0);
        assert_eq!(page.limit, 20);

        let page = PageRequest::from_query(Some(5), Some(2), 20);
        assert_eq!((page.offset(), page.sql_limit()), (5, 2));
    }

    #[test]
    fn test_slice() {
        let page = PageRequest::new(2, 3);
        assert_eq!(page.slice(0..10), vec![2, 3, 4]);
        assert!(PageRequest::new(20, 3).slice(0..10).is_empty());
    }
}
