//! Fixed-size page slicing.

use std::num::NonZeroUsize;

/// One page of a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page<'a, T> {
    /// Items on this page, at most `page_size` of them.
    pub items: &'a [T],
    /// The page actually returned (1-based, after clamping).
    pub page: usize,
    /// Total number of pages, never less than 1.
    pub total_pages: usize,
}

/// Number of pages needed for `len` items: `max(1, ceil(len / page_size))`.
#[must_use]
pub fn total_pages(len: usize, page_size: NonZeroUsize) -> usize {
    len.div_ceil(page_size.get()).max(1)
}

/// Returns page `page` (1-based) of `records`.
///
/// Out-of-range pages are clamped into `[1, total_pages]`, so page 0 yields the
/// first page and page 99 of a 3-page collection yields page 3.
#[must_use]
pub fn paginate<T>(records: &[T], page: usize, page_size: NonZeroUsize) -> Page<'_, T> {
    let total = total_pages(records.len(), page_size);
    let page = page.clamp(1, total);

    let start = ((page - 1) * page_size.get()).min(records.len());
    let end = (page * page_size.get()).min(records.len());

    Page {
        items: &records[start..end],
        page,
        total_pages: total,
    }
}

/// Page cursor of one mounted table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    /// Current page, 1-based.
    pub current_page: usize,
    /// Rows per page.
    pub page_size: NonZeroUsize,
}

impl PageState {
    /// Starts on page 1.
    #[must_use]
    pub const fn new(page_size: NonZeroUsize) -> Self {
        Self {
            current_page: 1,
            page_size,
        }
    }

    /// Moves to the next page if there is one. Returns whether the page changed.
    pub fn next(&mut self, len: usize) -> bool {
        if self.current_page < total_pages(len, self.page_size) {
            self.current_page += 1;
            true
        } else {
            false
        }
    }

    /// Moves to the previous page if there is one. Returns whether the page changed.
    pub fn previous(&mut self) -> bool {
        if self.current_page > 1 {
            self.current_page -= 1;
            true
        } else {
            false
        }
    }

    /// Clamps the current page after the collection changed to `len` items.
    pub fn clamp(&mut self, len: usize) {
        self.current_page = self.current_page.clamp(1, total_pages(len, self.page_size));
    }

    /// Returns to page 1.
    pub fn reset(&mut self) {
        self.current_page = 1;
    }
}
