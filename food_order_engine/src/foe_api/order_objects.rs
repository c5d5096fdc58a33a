use serde::{Deserialize, Serialize};

/// The default page size for order listings.
pub const DEFAULT_PAGE_SIZE: i64 = 25;
/// The hard upper bound on page size. Requests asking for more are clamped, not rejected.
pub const MAX_PAGE_SIZE: i64 = 100;

/// A single page of results, shared by every listing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    /// 1-based page number.
    pub page: i64,
    pub limit: i64,
    pub total: i64,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, page: i64, limit: i64, total: i64) -> Self {
        Self { items, page, limit, total }
    }

    pub fn total_pages(&self) -> i64 {
        if self.limit == 0 {
            0
        } else {
            (self.total + self.limit - 1) / self.limit
        }
    }

    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Paginated<U> {
        Paginated { items: self.items.into_iter().map(f).collect(), page: self.page, limit: self.limit, total: self.total }
    }
}
