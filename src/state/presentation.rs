//! Presentation state selection.
//!
//! Picks what the body of the screen shows from the query and fetch state.
//! Precedence is fixed, first match wins:
//!
//! 1. Empty - query is blank
//! 2. Loading - first page in flight, no data yet
//! 3. Error - latest attempt failed
//! 4. NoResults - success with `total_count == 0`
//! 5. Results - success with `total_count > 0`
//!
//! Under [`ErrorDisplay::Overlay`] an error that arrives after results were
//! shown keeps the results as the body and is surfaced as an [`ErrorAlert`].

use super::fetcher::FetchState;
use crate::model::{FetchError, PagedResultSet, Query};
use serde::Deserialize;
use std::sync::Arc;

/// How fetch errors are displayed when results are already on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorDisplay {
    /// The Error state replaces the body.
    #[default]
    Replace,
    /// Retained results stay in the body; the error shows as a dismissible alert.
    Overlay,
}

impl ErrorDisplay {
    /// Parse a config / CLI value.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "replace" => Some(Self::Replace),
            "overlay" => Some(Self::Overlay),
            _ => None,
        }
    }
}

/// Error surfaced next to the body instead of replacing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorAlert {
    /// Human-readable message.
    pub message: String,
    /// HTTP status, where available.
    pub status: Option<u16>,
}

impl From<&FetchError> for ErrorAlert {
    fn from(error: &FetchError) -> Self {
        Self {
            message: error.user_message(),
            status: error.status(),
        }
    }
}

/// Primary body content. Exactly one is active at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresentationState {
    /// No query entered.
    Empty,
    /// First page in flight.
    Loading,
    /// Latest attempt failed.
    Error {
        /// Human-readable message.
        message: String,
        /// HTTP status, where available.
        status: Option<u16>,
    },
    /// Query matched nothing.
    NoResults,
    /// Accumulated results.
    Results {
        /// Pages fetched so far.
        set: Arc<PagedResultSet>,
        /// More pages exist.
        has_next_page: bool,
        /// Next page in flight.
        fetching_next_page: bool,
    },
}

impl PresentationState {
    /// Short label, used in logs and the status bar.
    pub fn label(&self) -> &'static str {
        match self {
            PresentationState::Empty => "empty",
            PresentationState::Loading => "loading",
            PresentationState::Error { .. } => "error",
            PresentationState::NoResults => "no-results",
            PresentationState::Results { .. } => "results",
        }
    }
}

/// Body plus optional overlay alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presentation {
    /// Primary body content.
    pub state: PresentationState,
    /// Error alert layered over the body (overlay policy only).
    pub alert: Option<ErrorAlert>,
}

impl Presentation {
    fn body(state: PresentationState) -> Self {
        Self { state, alert: None }
    }
}

/// Select the presentation for `query` and `fetch_state` under `policy`.
pub fn select(query: &Query, fetch_state: &FetchState, policy: ErrorDisplay) -> Presentation {
    if query.is_blank() {
        return Presentation::body(PresentationState::Empty);
    }

    match fetch_state {
        // Non-blank query whose first request has not been issued yet
        // (debounce just emitted) reads as loading.
        FetchState::Idle | FetchState::Loading => Presentation::body(PresentationState::Loading),
        FetchState::Error { error, retained } => match (policy, retained) {
            (ErrorDisplay::Overlay, Some(set)) => Presentation {
                state: data_state(set, false),
                alert: Some(ErrorAlert::from(error)),
            },
            _ => Presentation::body(PresentationState::Error {
                message: error.user_message(),
                status: error.status(),
            }),
        },
        FetchState::Success(set) => Presentation::body(data_state(set, false)),
        FetchState::FetchingNextPage(set) => Presentation::body(data_state(set, true)),
    }
}

fn data_state(set: &Arc<PagedResultSet>, fetching_next_page: bool) -> PresentationState {
    match set.first_total_count() {
        Some(total) if total > 0 => PresentationState::Results {
            set: Arc::clone(set),
            has_next_page: set.has_next_page(),
            fetching_next_page,
        },
        _ => PresentationState::NoResults,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Page, PageNumber};
    use crate::test_harness::{page_of, repo};

    fn set(page: Page) -> Arc<PagedResultSet> {
        Arc::new(PagedResultSet::new().with_page(PageNumber::FIRST, page))
    }

    fn results_set() -> Arc<PagedResultSet> {
        set(page_of(65, vec![repo(1, "facebook/react"), repo(2, "vuejs/vue")]))
    }

    fn rate_limited() -> FetchError {
        FetchError::from_status(403, "API rate limit exceeded")
    }

    #[test]
    fn blank_query_is_empty_regardless_of_fetch_state() {
        let states = [
            FetchState::Idle,
            FetchState::Loading,
            FetchState::Success(results_set()),
            FetchState::Error {
                error: rate_limited(),
                retained: None,
            },
        ];
        for fetch_state in states {
            let presentation = select(&Query::new("  "), &fetch_state, ErrorDisplay::Replace);
            assert_eq!(presentation.state, PresentationState::Empty);
        }
    }

    #[test]
    fn loading_when_first_page_in_flight() {
        let presentation = select(&Query::new("react"), &FetchState::Loading, ErrorDisplay::Replace);
        assert_eq!(presentation.state, PresentationState::Loading);
    }

    #[test]
    fn error_replaces_body_by_default() {
        let fetch_state = FetchState::Error {
            error: rate_limited(),
            retained: Some(results_set()),
        };
        let presentation = select(&Query::new("react"), &fetch_state, ErrorDisplay::Replace);
        match presentation.state {
            PresentationState::Error { status, .. } => assert_eq!(status, Some(403)),
            other => panic!("Expected Error, got {:?}", other),
        }
        assert_eq!(presentation.alert, None);
    }

    #[test]
    fn overlay_keeps_retained_results_and_raises_alert() {
        let fetch_state = FetchState::Error {
            error: rate_limited(),
            retained: Some(results_set()),
        };
        let presentation = select(&Query::new("react"), &fetch_state, ErrorDisplay::Overlay);
        assert_eq!(presentation.state.label(), "results");
        assert_eq!(presentation.alert.and_then(|a| a.status), Some(403));
    }

    #[test]
    fn overlay_without_retained_results_shows_error_body() {
        let fetch_state = FetchState::Error {
            error: rate_limited(),
            retained: None,
        };
        let presentation = select(&Query::new("error"), &fetch_state, ErrorDisplay::Overlay);
        assert_eq!(presentation.state.label(), "error");
        assert_eq!(presentation.alert, None);
    }

    #[test]
    fn zero_total_is_no_results() {
        let fetch_state = FetchState::Success(set(page_of(0, vec![])));
        let presentation = select(&Query::new("no-results"), &fetch_state, ErrorDisplay::Replace);
        assert_eq!(presentation.state, PresentationState::NoResults);
    }

    #[test]
    fn positive_total_is_results() {
        let fetch_state = FetchState::Success(results_set());
        let presentation = select(&Query::new("react"), &fetch_state, ErrorDisplay::Replace);
        match presentation.state {
            PresentationState::Results {
                set,
                has_next_page,
                fetching_next_page,
            } => {
                assert_eq!(set.item_count(), 2);
                assert!(has_next_page);
                assert!(!fetching_next_page);
            }
            other => panic!("Expected Results, got {:?}", other),
        }
    }

    #[test]
    fn fetching_next_page_keeps_results_visible() {
        let fetch_state = FetchState::FetchingNextPage(results_set());
        let presentation = select(&Query::new("react"), &fetch_state, ErrorDisplay::Replace);
        assert!(matches!(
            presentation.state,
            PresentationState::Results {
                fetching_next_page: true,
                ..
            }
        ));
    }

    #[test]
    fn error_display_parses_config_values() {
        assert_eq!(ErrorDisplay::parse("replace"), Some(ErrorDisplay::Replace));
        assert_eq!(ErrorDisplay::parse("overlay"), Some(ErrorDisplay::Overlay));
        assert_eq!(ErrorDisplay::parse("toast"), None);
        assert_eq!(ErrorDisplay::default(), ErrorDisplay::Replace);
    }
}
