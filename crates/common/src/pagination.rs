//! Pagination utilities shared by the service and server layers
//!
//! Provides a simple `Pagination` struct, helpers to normalize inputs and
//! the `Page<T>` envelope returned by list endpoints.

use serde::Serialize;

/// Pagination parameters
#[derive(Clone, Copy, Debug)]
pub struct Pagination {
    /// 1-based page index
    pub page: u32,
    /// items per page
    pub per_page: u32,
}

impl Pagination {
    pub fn new(page: Option<u32>, per_page: Option<u32>) -> Self {
        let d = Self::default();
        Self { page: page.unwrap_or(d.page), per_page: per_page.unwrap_or(d.per_page) }
    }

    /// Clamp to sane defaults and convert to `u64`
    pub fn normalize(self) -> (u64, u64) {
        let page = if self.page == 0 { 1 } else { self.page };
        let per_page = self.per_page.clamp(1, 100);
        ((page - 1) as u64, per_page as u64)
    }
}

impl Default for Pagination {
    fn default() -> Self { Self { page: 1, per_page: 20 } }
}

/// One page of results plus the total number of matching rows.
#[derive(Clone, Debug, Serialize)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, total_elements: u64) -> Self {
        Self { content, total_elements }
    }

    /// Slice an already filtered, ordered list (used by in-memory stores).
    pub fn from_slice(all: &[T], opts: Pagination) -> Self
    where
        T: Clone,
    {
        let (page_idx, per_page) = opts.normalize();
        let start = (page_idx * per_page) as usize;
        let content = all.iter().skip(start).take(per_page as usize).cloned().collect();
        Self { content, total_elements: all.len() as u64 }
    }
}
