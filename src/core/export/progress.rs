//! Per-realm pagination state
//!
//! [`ExportProgress`] is a plain value threaded through the page loop: each
//! iteration asks it for the next [`PageRange`] and replaces it with the
//! advanced state once the page has been written.

use serde::{Deserialize, Serialize};

/// Half-open range `[start, end)` of users making up one page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRange {
    /// Page number used in the artifact name (`start / count_per_page`)
    pub index: usize,
    pub start: usize,
    pub end: usize,
}

impl PageRange {
    /// Number of users the page is expected to hold
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Pagination state of one realm export
///
/// Invariant: `page_start <= page_end <= total_count`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportProgress {
    pub total_count: usize,
    pub page_start: usize,
    pub page_end: usize,
}

impl ExportProgress {
    /// Progress at the start of a realm with `total_count` users
    pub fn new(total_count: usize) -> Self {
        Self {
            total_count,
            page_start: 0,
            page_end: 0,
        }
    }

    /// The next page to export, or `None` once every user has been covered
    ///
    /// # Examples
    ///
    /// ```
    /// use keyport::core::export::ExportProgress;
    ///
    /// let progress = ExportProgress::new(250);
    /// let page = progress.next_page(100).unwrap();
    /// assert_eq!((page.index, page.start, page.end), (0, 0, 100));
    ///
    /// let progress = progress.advance(page);
    /// let progress = progress.advance(progress.next_page(100).unwrap());
    /// let last = progress.next_page(100).unwrap();
    /// assert_eq!((last.index, last.start, last.end), (2, 200, 250));
    /// assert!(progress.advance(last).next_page(100).is_none());
    /// ```
    pub fn next_page(&self, count_per_page: usize) -> Option<PageRange> {
        if self.page_start >= self.total_count || count_per_page == 0 {
            return None;
        }

        let end = self
            .page_start
            .saturating_add(count_per_page)
            .min(self.total_count);

        Some(PageRange {
            index: self.page_start / count_per_page,
            start: self.page_start,
            end,
        })
    }

    /// Progress after `page` has been written
    pub fn advance(self, page: PageRange) -> Self {
        debug_assert_eq!(page.start, self.page_start, "pages must be contiguous");
        Self {
            total_count: self.total_count,
            page_start: page.end,
            page_end: page.end,
        }
    }

    /// Whether every user has been covered
    pub fn is_complete(&self) -> bool {
        self.page_start == self.total_count
    }
}
