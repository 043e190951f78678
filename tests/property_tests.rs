//! Property-based tests for pagination and timing invariants.
//!
//! Tests validate:
//! 1. Accumulated items preserve server order and count
//! 2. Pagination stops at the reported total or on an empty page
//! 3. The debouncer emits only the last value, after a quiet period
//! 4. Sentinel visibility is all-or-nothing for a one-row sentinel

use ghsearch::model::{Owner, Page, PageNumber, PagedResultSet, Repository};
use ghsearch::state::accumulator::items;
use ghsearch::state::{Debouncer, RowSpan, SentinelGeometry};
use proptest::prelude::*;
use std::time::{Duration, Instant};

fn repo(id: u64) -> Repository {
    Repository {
        id,
        name: format!("repo-{id}"),
        display_name: format!("owner/repo-{id}"),
        url: format!("https://github.com/owner/repo-{id}"),
        description: None,
        star_count: id,
        language: None,
        owner: Owner {
            name: "owner".to_string(),
            avatar_url: String::new(),
        },
    }
}

/// Pages with consecutive ids, so order is checkable.
fn pages_from_sizes(sizes: &[usize], total: u64) -> Vec<Page> {
    let mut next_id = 0u64;
    sizes
        .iter()
        .map(|&size| {
            let items = (0..size)
                .map(|_| {
                    next_id += 1;
                    repo(next_id)
                })
                .collect();
            Page::new(total, items)
        })
        .collect()
}

fn accumulate(pages: &[Page]) -> PagedResultSet {
    pages.iter().fold(PagedResultSet::new(), |set, page| {
        set.with_page(set.next_page_number(), page.clone())
    })
}

// ===== Property 1: Accumulation =====

proptest! {
    #[test]
    fn accumulated_items_keep_delivery_order(
        sizes in prop::collection::vec(0usize..30, 0..8),
        total in 0u64..500,
    ) {
        let pages = pages_from_sizes(&sizes, total);
        let set = accumulate(&pages);

        let ids: Vec<u64> = set.items().map(|r| r.id).collect();
        let expected: Vec<u64> = (1..=sizes.iter().sum::<usize>() as u64).collect();
        prop_assert_eq!(&ids, &expected);
        prop_assert_eq!(set.item_count(), sizes.iter().sum::<usize>());
        prop_assert_eq!(items(set.pages()).count(), set.item_count());
    }

    #[test]
    fn page_numbers_are_sequential(sizes in prop::collection::vec(1usize..30, 0..8)) {
        let set = accumulate(&pages_from_sizes(&sizes, 1000));

        let numbers: Vec<u32> = set.page_params().iter().map(|p| p.get()).collect();
        let expected: Vec<u32> = (1..=sizes.len() as u32).collect();
        prop_assert_eq!(numbers, expected);
        prop_assert_eq!(set.next_page_number().get(), sizes.len() as u32 + 1);
    }
}

// ===== Property 2: Pagination end =====

proptest! {
    #[test]
    fn has_next_page_matches_total(
        sizes in prop::collection::vec(1usize..30, 1..8),
        total in 0u64..300,
    ) {
        let set = accumulate(&pages_from_sizes(&sizes, total));
        let fetched = sizes.iter().sum::<usize>() as u64;
        prop_assert_eq!(set.has_next_page(), fetched < total);
    }

    #[test]
    fn empty_last_page_ends_pagination(
        sizes in prop::collection::vec(1usize..30, 0..6),
        total in 0u64..10_000,
    ) {
        let mut pages = pages_from_sizes(&sizes, total);
        pages.push(Page::new(total, vec![]));
        prop_assert!(!accumulate(&pages).has_next_page());
    }

    #[test]
    fn first_page_number_is_one(raw in 0u32..3) {
        let page = PageNumber::new(raw);
        prop_assert_eq!(page.is_some(), raw > 0);
    }
}

// ===== Property 3: Debounce =====

proptest! {
    #[test]
    fn debouncer_emits_only_last_value(
        edits in prop::collection::vec(("[a-z]{1,8}", 0u64..499), 1..10),
    ) {
        let delay = Duration::from_millis(500);
        let start = Instant::now();
        let mut debouncer = Debouncer::new("", delay, start);
        let mut now = start;

        for (text, gap_ms) in &edits {
            now += Duration::from_millis(*gap_ms);
            prop_assert_eq!(debouncer.poll(now), None);
            debouncer.on_input(text.as_str(), now);
        }

        let last = edits.last().map(|(text, _)| text.clone());
        prop_assert_eq!(debouncer.poll(now + delay - Duration::from_millis(1)), None);
        prop_assert_eq!(debouncer.poll(now + delay), last);
        prop_assert_eq!(debouncer.poll(now + delay * 2), None);
    }
}

// ===== Property 4: Sentinel visibility =====

proptest! {
    #[test]
    fn one_row_sentinel_is_fully_in_or_out(
        viewport_start in 0u32..200,
        viewport_len in 1u32..60,
        sentinel_row in 0u32..400,
        margin in 0u16..10,
    ) {
        let geometry = SentinelGeometry {
            viewport: RowSpan::new(viewport_start, viewport_len),
            sentinel: RowSpan::new(sentinel_row, 1),
        };
        let low = viewport_start.saturating_sub(u32::from(margin));
        let high = viewport_start + viewport_len + u32::from(margin);
        let inside = sentinel_row >= low && sentinel_row < high;

        let ratio = geometry.visible_ratio(margin);
        prop_assert_eq!(ratio, if inside { 1.0 } else { 0.0 });
    }
}
