//! Ordered accumulation of fetched pages for one query.

use super::repository::{Page, PageNumber, Repository};
use crate::state::accumulator;

/// Pages fetched so far for the current query, in fetch order.
///
/// Each successful fetch produces a new version via [`PagedResultSet::with_page`];
/// existing versions are never mutated, so holders of an `Arc` to an older
/// version keep seeing exactly what they rendered.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PagedResultSet {
    pages: Vec<Page>,
    page_params: Vec<PageNumber>,
}

impl PagedResultSet {
    /// Empty result set.
    pub fn new() -> Self {
        Self::default()
    }

    /// New version with `page` appended.
    pub fn with_page(&self, page_number: PageNumber, page: Page) -> Self {
        let mut pages = self.pages.clone();
        let mut page_params = self.page_params.clone();
        pages.push(page);
        page_params.push(page_number);
        Self { pages, page_params }
    }

    /// Fetched pages in fetch order.
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Page number used to fetch each page, parallel to [`pages`](Self::pages).
    pub fn page_params(&self) -> &[PageNumber] {
        &self.page_params
    }

    /// Number of pages fetched.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// True before the first page arrives.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// All items across pages, in delivery order.
    pub fn items(&self) -> impl Iterator<Item = &Repository> + '_ {
        accumulator::items(&self.pages)
    }

    /// Sum of item counts across all fetched pages.
    pub fn item_count(&self) -> usize {
        accumulator::item_count(&self.pages)
    }

    /// `total_count` reported by the most recent page.
    pub fn total_count(&self) -> Option<u64> {
        self.pages.last().map(|page| page.total_count)
    }

    /// `total_count` reported by the first page.
    ///
    /// Drives the NoResults / Results decision.
    pub fn first_total_count(&self) -> Option<u64> {
        self.pages.first().map(|page| page.total_count)
    }

    /// More hits exist than have been fetched, per the latest page.
    ///
    /// An empty page also ends pagination: the search API stops serving items
    /// past its result cap even when `total_count` is larger.
    pub fn has_next_page(&self) -> bool {
        match self.pages.last() {
            Some(last) if last.items.is_empty() => false,
            Some(last) => (self.item_count() as u64) < last.total_count,
            None => false,
        }
    }

    /// Page number the next fetch should request.
    pub fn next_page_number(&self) -> PageNumber {
        let fetched = u32::try_from(self.pages.len()).unwrap_or(u32::MAX);
        PageNumber::new(fetched.saturating_add(1)).unwrap_or(PageNumber::FIRST)
    }
}
