//! Page-number pagination envelope primitives.
//!
//! Browse views slice an already-filtered, already-sorted item list into
//! fixed-size pages. Pages are 1-based; requesting a page past the end of the
//! list yields an empty page whose counts still describe the full list, so
//! callers can render accurate "page N of M" chrome without re-querying.
//!
//! # Examples
//!
//! ```
//! use pagination::{paginate, PageNumber, PageSize};
//!
//! let items: Vec<u32> = (1..=10).collect();
//! let size = PageSize::new(4).expect("non-zero size");
//! let page = paginate(&items, size, PageNumber::FIRST);
//!
//! assert_eq!(page.items, vec![1, 2, 3, 4]);
//! assert_eq!(page.page_count, 3);
//! assert_eq!(page.total_items, 10);
//! ```

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Errors raised when constructing pagination primitives.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaginationError {
    /// Page numbers are 1-based; zero is not addressable.
    #[error("page numbers start at 1")]
    ZeroPageNumber,
    /// A page must hold at least one item.
    #[error("page size must be at least 1")]
    ZeroPageSize,
}

/// A validated, 1-based page number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct PageNumber(u32);

impl PageNumber {
    /// The first page.
    pub const FIRST: Self = Self(1);

    /// Construct a page number, rejecting zero.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError::ZeroPageNumber`] when `value` is zero.
    pub const fn new(value: u32) -> Result<Self, PaginationError> {
        if value == 0 {
            return Err(PaginationError::ZeroPageNumber);
        }
        Ok(Self(value))
    }

    /// Return the underlying 1-based value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
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

/// A validated, non-zero page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PageSize(usize);

impl PageSize {
    /// Construct a page size, rejecting zero.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError::ZeroPageSize`] when `value` is zero.
    pub const fn new(value: usize) -> Result<Self, PaginationError> {
        if value == 0 {
            return Err(PaginationError::ZeroPageSize);
        }
        Ok(Self(value))
    }

    /// Return the underlying size.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }
}

/// One page of a larger list, with enough metadata to render page chrome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items on this page, in list order.
    pub items: Vec<T>,
    /// The 1-based page that was requested.
    pub page: PageNumber,
    /// Total number of addressable pages (zero for an empty list).
    pub page_count: u32,
    /// Total items across all pages.
    pub total_items: usize,
    /// The page size the list was sliced with.
    pub page_size: PageSize,
}

impl<T> Page<T> {
    /// True when this page carries no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Number of pages needed to hold `total_items` at `page_size` items each.
#[must_use]
pub fn page_count(total_items: usize, page_size: PageSize) -> u32 {
    let pages = total_items.div_ceil(page_size.get());
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Slice `items` into the requested page.
///
/// Requesting a page past the end returns an empty page; `page_count` and
/// `total_items` always describe the whole input list.
#[must_use]
pub fn paginate<T: Clone>(items: &[T], page_size: PageSize, page: PageNumber) -> Page<T> {
    let total_items = items.len();
    let count = page_count(total_items, page_size);
    let offset = usize::try_from(page.get())
        .unwrap_or(usize::MAX)
        .saturating_sub(1)
        .saturating_mul(page_size.get());
    let selected: Vec<T> = items
        .iter()
        .skip(offset)
        .take(page_size.get())
        .cloned()
        .collect();

    Page {
        items: selected,
        page,
        page_count: count,
        total_items,
        page_size,
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use rstest::rstest;

    use super::*;

    fn size(value: usize) -> PageSize {
        PageSize::new(value).expect("non-zero size")
    }

    fn number(value: u32) -> PageNumber {
        PageNumber::new(value).expect("non-zero page")
    }

    #[rstest]
    fn rejects_zero_page_number() {
        assert_eq!(PageNumber::new(0), Err(PaginationError::ZeroPageNumber));
    }

    #[rstest]
    fn rejects_zero_page_size() {
        assert_eq!(PageSize::new(0), Err(PaginationError::ZeroPageSize));
    }

    #[rstest]
    fn default_page_number_is_first() {
        assert_eq!(PageNumber::default(), PageNumber::FIRST);
        assert_eq!(PageNumber::FIRST.get(), 1);
    }

    #[rstest]
    #[case::exact_multiple(8, 4, 2)]
    #[case::remainder(10, 4, 3)]
    #[case::single_partial_page(3, 8, 1)]
    #[case::empty(0, 8, 0)]
    fn page_count_rounds_up(
        #[case] total: usize,
        #[case] page_size: usize,
        #[case] expected: u32,
    ) {
        assert_eq!(page_count(total, size(page_size)), expected);
    }

    #[rstest]
    fn first_page_holds_leading_items() {
        let items: Vec<u32> = (1..=10).collect();
        let page = paginate(&items, size(4), PageNumber::FIRST);

        assert_eq!(page.items, vec![1, 2, 3, 4]);
        assert_eq!(page.page_count, 3);
        assert_eq!(page.total_items, 10);
    }

    #[rstest]
    fn final_page_may_be_partial() {
        let items: Vec<u32> = (1..=10).collect();
        let page = paginate(&items, size(4), number(3));

        assert_eq!(page.items, vec![9, 10]);
        assert!(!page.is_empty());
    }

    #[rstest]
    fn page_past_the_end_is_empty_with_accurate_counts() {
        let items: Vec<u32> = (1..=10).collect();
        let page = paginate(&items, size(4), number(7));

        assert!(page.is_empty());
        assert_eq!(page.page_count, 3);
        assert_eq!(page.total_items, 10);
    }

    #[rstest]
    fn empty_list_paginates_to_empty_first_page() {
        let items: Vec<u32> = Vec::new();
        let page = paginate(&items, size(8), PageNumber::FIRST);

        assert!(page.is_empty());
        assert_eq!(page.page_count, 0);
        assert_eq!(page.total_items, 0);
    }

    #[rstest]
    fn envelope_serialises_to_camel_case() {
        let items: Vec<u32> = vec![1, 2];
        let page = paginate(&items, size(8), PageNumber::FIRST);
        let json = serde_json::to_string(&page).expect("serialise");

        assert!(json.contains("pageCount"));
        assert!(json.contains("totalItems"));
        assert!(json.contains("pageSize"));
    }
}
