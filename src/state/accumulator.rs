//! Incremental list accumulation.
//!
//! Flattens fetched pages into the single ordered sequence the list renders.
//! Order is exactly the server's delivery order: pages in fetch order, items in
//! page order. Nothing is sorted, filtered or de-duplicated; an id repeated
//! across pages renders twice.
//!
//! [`PagedResultSet`](crate::model::PagedResultSet) reads its items through
//! these functions, so the list widget and the pager see the same sequence.

use crate::model::{Page, Repository};

/// Items of `pages` concatenated in order.
pub fn items(pages: &[Page]) -> impl Iterator<Item = &Repository> + '_ {
    pages.iter().flat_map(|page| page.items.iter())
}

/// Sum of item counts across `pages`.
pub fn item_count(pages: &[Page]) -> usize {
    pages.iter().map(|page| page.items.len()).sum()
}
