//! UI state machine (pure).
//!
//! All state transitions are pure functions testable without TUI. Time is
//! always passed in, never read.

pub mod accumulator;
pub mod app_state;
pub mod cache;
pub mod debounce;
pub mod fetcher;
pub mod health;
pub mod presentation;
pub mod search_input;
pub mod visibility;

// Re-export for convenience
pub use app_state::{AppState, FocusPane, SearchSettings};
pub use cache::{CacheKey, PageCache};
pub use debounce::Debouncer;
pub use fetcher::{ApplyOutcome, FetchRequest, FetchResponse, FetchState, PaginationFetcher};
pub use health::HealthState;
pub use presentation::{ErrorAlert, ErrorDisplay, Presentation, PresentationState};
pub use search_input::InputState;
pub use visibility::{RowSpan, SentinelGeometry, TriggerOptions, VisibilityTrigger};
