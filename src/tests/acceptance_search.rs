//! Acceptance tests: typing a query, debouncing, caching.

use crate::state::{PresentationState, SearchSettings};
use crate::test_harness::{AppHarness, STUB_ZEN};
use crossterm::event::{KeyCode, KeyModifiers};
use std::time::Duration;

fn settings() -> SearchSettings {
    SearchSettings::default()
}

#[test]
fn startup_shows_empty_state_without_requests() {
    // GIVEN: App started without a query
    let mut harness = AppHarness::new("", settings(), 80, 24);

    // WHEN: Debounce period passes
    harness.commit(&settings());

    // THEN: Empty state, nothing fetched
    let output = harness.render_to_string();
    assert!(output.contains("Start searching for repositories"));
    assert!(harness.api_calls().is_empty());
}

#[test]
fn typed_query_is_fetched_once_after_debounce() {
    let mut harness = AppHarness::new("", settings(), 80, 24);

    // WHEN: User types in bursts shorter than the debounce period
    harness.type_text("rea");
    harness.advance(Duration::from_millis(300));
    harness.type_text("ct");
    harness.advance(Duration::from_millis(300));

    // THEN: Nothing committed yet
    assert!(harness.state().committed_query().is_blank());
    assert!(!harness.state().fetcher().is_fetching());

    // WHEN: The pause after the last keystroke reaches the debounce period
    harness.advance(Duration::from_millis(200));
    harness.settle();

    // THEN: One search for the final text, starting at page 1
    assert_eq!(harness.state().committed_query().as_str(), "react");
    assert_eq!(harness.api_calls().first(), Some(&("react".to_string(), 1)));
    assert!(harness.render_to_string().contains("facebook/react"));
}

#[test]
fn initial_query_searches_on_startup() {
    let mut harness = AppHarness::new("react", settings(), 80, 24);
    harness.commit(&settings());

    assert_eq!(harness.state().presentation().state.label(), "results");
    assert_eq!(harness.api_calls().first(), Some(&("react".to_string(), 1)));
}

#[test]
fn no_results_state_has_no_sentinel() {
    let mut harness = AppHarness::new("", settings(), 80, 24);
    harness.type_text("no-results");
    harness.commit(&settings());

    let output = harness.render_to_string();
    assert!(output.contains("No repositories found"));
    assert!(!harness.state().trigger().is_observing());
    assert_eq!(harness.api_calls(), vec![("no-results".to_string(), 1)]);
}

#[test]
fn returning_to_a_cached_query_makes_no_requests() {
    let mut harness = AppHarness::new("", settings(), 80, 24);

    // GIVEN: Results loaded for "react", then for "vue"
    harness.type_text("react");
    harness.commit(&settings());
    harness.press_with_mods(KeyCode::Char('u'), KeyModifiers::CONTROL);
    harness.type_text("vue");
    harness.commit(&settings());
    let calls_before = harness.api_calls().len();

    // WHEN: User goes back to "react" within the stale time
    harness.press_with_mods(KeyCode::Char('u'), KeyModifiers::CONTROL);
    harness.type_text("react");
    harness.commit(&settings());

    // THEN: Results come from the cache
    assert_eq!(harness.api_calls().len(), calls_before);
    assert_eq!(harness.state().committed_query().as_str(), "react");
    match harness.state().presentation().state {
        PresentationState::Results { set, .. } => assert_eq!(set.item_count(), 3),
        other => panic!("Expected Results, got {:?}", other),
    }
}

#[test]
fn clearing_the_query_returns_to_empty_state() {
    let mut harness = AppHarness::new("react", settings(), 80, 24);
    harness.commit(&settings());

    harness.press_with_mods(KeyCode::Char('u'), KeyModifiers::CONTROL);
    harness.commit(&settings());

    assert_eq!(harness.state().presentation().state, PresentationState::Empty);
    assert!(!harness.state().trigger().is_observing());
}

#[test]
fn health_check_reports_zen_in_status_bar() {
    let mut harness = AppHarness::new("", settings(), 80, 24);

    harness.press(KeyCode::Tab);
    harness.press(KeyCode::Char('z'));
    harness.settle();

    let output = harness.render_to_string();
    assert!(output.contains("GitHub API connection successful!"));
    assert_eq!(
        harness.state().health().status_line(),
        Some(format!("GitHub API connection successful! Zen: \"{STUB_ZEN}\""))
    );
}
