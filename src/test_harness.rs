//! Acceptance Test Harness for TUI testing
//!
//! Provides fixtures, a scripted [`SearchApi`] and a high-level wrapper around
//! `TuiApp<TestBackend>` with a synthetic clock for simulating user
//! interactions in acceptance tests.

use crate::api::{FetchWorker, SearchApi};
use crate::config::keybindings::KeyBindings;
use crate::model::{FetchError, Owner, Page, PageNumber, Query, Repository};
use crate::state::{AppState, HealthState, SearchSettings};
use crate::view::{Theme, TuiApp};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// How long the harness waits for the fetch worker before failing the test.
const WORKER_WAIT: Duration = Duration::from_secs(5);

/// Convert a ratatui buffer to a string representation for snapshot testing.
///
/// Captures the visual output character by character, preserving layout.
/// Empty lines are removed to keep snapshots clean.
pub(crate) fn buffer_to_string(buffer: &ratatui::buffer::Buffer) -> String {
    let area = buffer.area();
    let mut lines = Vec::new();

    for y in area.top()..area.bottom() {
        let mut line = String::new();
        for x in area.left()..area.right() {
            let cell = &buffer[(x, y)];
            line.push_str(cell.symbol());
        }
        let trimmed = line.trim_end();
        if !trimmed.is_empty() {
            lines.push(trimmed.to_string());
        }
    }

    lines.join("\n")
}

// ===== Fixtures =====

/// Bare repository `owner/name` with no description, stars or language.
pub(crate) fn repo(id: u64, full_name: &str) -> Repository {
    let (owner, name) = full_name.split_once('/').unwrap_or(("", full_name));
    Repository {
        id,
        name: name.to_string(),
        display_name: full_name.to_string(),
        url: format!("https://github.com/{full_name}"),
        description: None,
        star_count: 0,
        language: None,
        owner: Owner {
            name: owner.to_string(),
            avatar_url: String::new(),
        },
    }
}

/// Complete page with the given total.
pub(crate) fn page_of(total_count: u64, items: Vec<Repository>) -> Page {
    Page::new(total_count, items)
}

fn described(
    id: u64,
    full_name: &str,
    description: &str,
    stars: u64,
    language: &str,
) -> Repository {
    Repository {
        description: Some(description.to_string()),
        star_count: stars,
        language: Some(language.to_string()),
        ..repo(id, full_name)
    }
}

/// Total reported by [`StubSearchApi`] for ordinary queries.
pub(crate) const STUB_TOTAL: u64 = 65;

/// Zen message returned by [`StubSearchApi`].
pub(crate) const STUB_ZEN: &str = "Keep it logically awesome.";

/// Scripted search backend.
///
/// - `no-results` matches nothing
/// - `error` fails with a rate-limit response
/// - anything else returns two repositories on page 1, one on page 2, and
///   empty pages after that
///
/// Every call is recorded.
#[derive(Debug, Default)]
pub(crate) struct StubSearchApi {
    calls: Mutex<Vec<(String, u32)>>,
}

impl StubSearchApi {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// `(query, page)` of every search call so far, in order.
    pub(crate) fn calls(&self) -> Vec<(String, u32)> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }
}

impl SearchApi for StubSearchApi {
    fn search_repositories(
        &self,
        query: &Query,
        page: PageNumber,
        _per_page: u32,
    ) -> Result<Page, FetchError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((query.as_str().to_string(), page.get()));
        }

        match (query.as_str(), page.get()) {
            ("no-results", _) => Ok(page_of(0, vec![])),
            ("error", _) => Err(FetchError::from_status(403, "API rate limit exceeded")),
            (_, 1) => Ok(page_of(
                STUB_TOTAL,
                vec![
                    described(
                        10270250,
                        "facebook/react",
                        "The library for web and native user interfaces.",
                        220_000,
                        "JavaScript",
                    ),
                    described(
                        11730342,
                        "vuejs/vue",
                        "This is the repo for Vue 2. For Vue 3, go to https://github.com/vuejs/core",
                        210_000,
                        "TypeScript",
                    ),
                ],
            )),
            (_, 2) => Ok(page_of(
                STUB_TOTAL,
                vec![described(
                    24195339,
                    "angular/angular",
                    "Deliver web apps with confidence",
                    95_000,
                    "TypeScript",
                )],
            )),
            _ => Ok(page_of(STUB_TOTAL, vec![])),
        }
    }

    fn zen(&self) -> Result<String, FetchError> {
        Ok(STUB_ZEN.to_string())
    }
}

// ===== AppHarness =====

/// Test harness for acceptance testing
///
/// Wraps `TuiApp<TestBackend>` backed by [`StubSearchApi`]. Time only moves
/// when the test calls [`AppHarness::advance`].
pub(crate) struct AppHarness {
    app: TuiApp<TestBackend>,
    api: Arc<StubSearchApi>,
    now: Instant,
}

impl AppHarness {
    /// Start the app with `initial_query` on a `width` x `height` terminal.
    pub(crate) fn new(initial_query: &str, settings: SearchSettings, width: u16, height: u16) -> Self {
        let now = Instant::now();
        let api = Arc::new(StubSearchApi::new());
        let worker = FetchWorker::spawn(api.clone()).expect("spawn fetch worker");
        let terminal = Terminal::new(TestBackend::new(width, height)).expect("test terminal");
        let app = TuiApp::new_for_test(
            terminal,
            AppState::new(initial_query, &settings, now),
            worker,
            KeyBindings::default(),
            Theme::default(),
        );
        Self { app, api, now }
    }

    /// Send a single key. Returns true if the app asked to quit.
    pub(crate) fn press(&mut self, code: KeyCode) -> bool {
        self.press_with_mods(code, KeyModifiers::NONE)
    }

    /// Send a key with modifiers. Returns true if the app asked to quit.
    pub(crate) fn press_with_mods(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        self.app.handle_key_test(KeyEvent::new(code, modifiers), self.now)
    }

    /// Type each character of `text` at the current instant.
    pub(crate) fn type_text(&mut self, text: &str) {
        for ch in text.chars() {
            self.press(KeyCode::Char(ch));
        }
    }

    /// Move the clock forward and run timers.
    pub(crate) fn advance(&mut self, by: Duration) {
        self.now += by;
        self.app.tick_test(self.now);
    }

    /// Render and answer worker traffic until nothing is in flight.
    ///
    /// Follows infinite-scroll fetches the draws trigger.
    pub(crate) fn settle(&mut self) {
        loop {
            self.app.tick_test(self.now);
            self.app.render_test().expect("render");
            if !self.busy() {
                return;
            }
            assert!(
                self.app.wait_for_event_test(self.now, WORKER_WAIT),
                "fetch worker did not answer"
            );
        }
    }

    /// Let the debounce period elapse, then settle.
    pub(crate) fn commit(&mut self, settings: &SearchSettings) {
        self.advance(settings.debounce);
        self.settle();
    }

    fn busy(&self) -> bool {
        let state = self.app.app_state();
        state.fetcher().is_fetching() || matches!(state.health(), HealthState::Pending)
    }

    /// Current app state.
    pub(crate) fn state(&self) -> &AppState {
        self.app.app_state()
    }

    /// Search calls the backend received.
    pub(crate) fn api_calls(&self) -> Vec<(String, u32)> {
        self.api.calls()
    }

    /// Render and return the screen as text.
    pub(crate) fn render_to_string(&mut self) -> String {
        self.app.render_test().expect("render");
        buffer_to_string(self.app.terminal().backend().buffer())
    }
}
