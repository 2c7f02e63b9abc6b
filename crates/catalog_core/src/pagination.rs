use std::fmt;
use std::num::NonZeroU32;

use crate::CatalogError;

/// Number of characters the listing API returns per page.
pub const PAGE_SIZE: u64 = 20;

/// A page number, always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageNumber(NonZeroU32);

impl PageNumber {
    pub const FIRST: PageNumber = PageNumber(NonZeroU32::MIN);

    pub fn new(page: u32) -> Option<Self> {
        NonZeroU32::new(page).map(Self)
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl Default for PageNumber {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for PageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// `ceil(total_count / page_size)`; an unknown total yields 0.
pub fn total_pages(total_count: Option<u64>, page_size: u64) -> u32 {
    known_total_pages(total_count, page_size).unwrap_or(0)
}

fn known_total_pages(total_count: Option<u64>, page_size: u64) -> Option<u32> {
    let total_count = total_count?;
    let pages = total_count.div_ceil(page_size.max(1));
    Some(u32::try_from(pages).unwrap_or(u32::MAX))
}

/// Owns the current page and is its only writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    page: PageNumber,
    page_size: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(PAGE_SIZE)
    }
}

impl Pagination {
    pub fn new(page_size: u64) -> Self {
        Self {
            page: PageNumber::FIRST,
            page_size,
        }
    }

    pub fn page(&self) -> PageNumber {
        self.page
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    pub fn total_pages(&self, total_count: Option<u64>) -> u32 {
        total_pages(total_count, self.page_size)
    }

    /// Moves to page `requested`. Returns whether the page actually changed.
    ///
    /// Rejected with [`CatalogError::OutOfRange`] when `requested` is 0, or
    /// when the total is known and `requested` is past the last page.
    pub fn go_to_page(
        &mut self,
        requested: u32,
        total_count: Option<u64>,
    ) -> Result<bool, CatalogError> {
        let known = known_total_pages(total_count, self.page_size);
        let out_of_range = || CatalogError::OutOfRange {
            requested,
            total_pages: known,
        };
        let page = PageNumber::new(requested).ok_or_else(out_of_range)?;
        if known.is_some_and(|total| requested > total) {
            return Err(out_of_range());
        }
        let changed = page != self.page;
        self.page = page;
        Ok(changed)
    }

    pub fn next_page(&mut self, total_count: Option<u64>) -> Result<bool, CatalogError> {
        self.go_to_page(self.page.get().saturating_add(1), total_count)
    }

    pub fn previous_page(&mut self, total_count: Option<u64>) -> Result<bool, CatalogError> {
        self.go_to_page(self.page.get() - 1, total_count)
    }

    /// Back to page 1. Returns whether the page changed.
    pub fn reset(&mut self) -> bool {
        let changed = self.page != PageNumber::FIRST;
        self.page = PageNumber::FIRST;
        changed
    }
}

/// Page buttons to show: both edges plus a window around `current`, with
/// `None` marking a gap.
pub fn page_links(total_pages: u32, current: PageNumber) -> Vec<Option<u32>> {
    const EDGE: u32 = 2;
    const AROUND: u32 = 2;

    if total_pages == 0 {
        return Vec::new();
    }
    let current = current.get().min(total_pages);

    let mut links = Vec::new();
    let left_last = EDGE.min(total_pages);
    links.extend((1..=left_last).map(Some));

    // Bounds are inclusive and saturating: a remote total can reach u32::MAX.
    let mid_first = (left_last + 1).max(current.saturating_sub(AROUND));
    let mid_last = current.saturating_add(AROUND).min(total_pages);
    let mut shown_last = left_last;
    if mid_first <= mid_last {
        if mid_first > left_last + 1 {
            links.push(None);
        }
        links.extend((mid_first..=mid_last).map(Some));
        shown_last = mid_last;
    }

    let right_first = shown_last
        .saturating_add(1)
        .max(total_pages.saturating_sub(EDGE) + 1);
    if right_first <= total_pages {
        if right_first > shown_last + 1 {
            links.push(None);
        }
        links.extend((right_first..=total_pages).map(Some));
    }

    links
}
