//! Query helpers shared by the store's read-side operations.

/// Sort direction for [`FileStore::find_sorted`](crate::FileStore::find_sorted).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

/// One page of results plus the total match count before paging.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Records matching the filter across *all* pages.
    pub total_count: usize,
    /// 1-based page number this page was cut from.
    pub page_number: usize,
    pub page_size: usize,
}

impl<T> Page<T> {
    pub fn total_pages(&self) -> usize {
        if self.page_size == 0 {
            0
        } else {
            self.total_count.div_ceil(self.page_size)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
