//! Application state and transitions.
//!
//! AppState is the root state type. It wires the search input, debouncer,
//! pagination fetcher, page cache, visibility trigger and health probe
//! together. It performs no I/O: operations that need the network return a
//! [`Job`] for the shell to hand to the fetch worker, and outcomes come back
//! through [`AppState::apply`].

use super::cache::PageCache;
use super::debounce::Debouncer;
use super::fetcher::{ApplyOutcome, PaginationFetcher};
use super::health::HealthState;
use super::presentation::{select, ErrorDisplay, Presentation, PresentationState};
use super::search_input::InputState;
use super::visibility::{SentinelGeometry, TriggerOptions, VisibilityTrigger};
use crate::api::{Job, WorkerEvent};
use crate::model::{KeyAction, Query};
use std::time::{Duration, Instant};
use tracing::{debug, info};

// ===== SearchSettings =====

/// Tunables resolved from configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchSettings {
    /// Results per page.
    pub per_page: u32,
    /// Quiet period before a typed query is committed.
    pub debounce: Duration,
    /// How long cached result sets stay fresh.
    pub stale_time: Duration,
    /// Rows below the viewport that count as visible for the sentinel.
    pub margin_rows: u16,
    /// Minimum visible fraction of the sentinel.
    pub threshold: f32,
    /// Error presentation policy.
    pub error_display: ErrorDisplay,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            per_page: crate::model::DEFAULT_PER_PAGE,
            debounce: super::debounce::DEFAULT_DEBOUNCE,
            stale_time: super::cache::DEFAULT_STALE_TIME,
            margin_rows: super::visibility::DEFAULT_MARGIN_ROWS,
            threshold: super::visibility::DEFAULT_THRESHOLD,
            error_display: ErrorDisplay::default(),
        }
    }
}

// ===== FocusPane =====

/// Which pane receives key input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusPane {
    /// The search box; printable keys edit the query.
    #[default]
    Input,
    /// The result list; keys map through the key bindings.
    List,
}

// ===== AppState =====

/// Application state. Pure data, no side effects.
#[derive(Debug, Clone)]
pub struct AppState {
    input: InputState,
    debouncer: Debouncer,
    fetcher: PaginationFetcher,
    cache: PageCache,
    trigger: VisibilityTrigger,
    health: HealthState,

    /// Which pane currently has keyboard focus.
    pub focus: FocusPane,

    /// Whether the help overlay is visible.
    pub help_visible: bool,

    /// Index of the first visible result card.
    scroll_offset: usize,

    /// Result cards that fit in the list viewport, as of the last draw.
    viewport_items: usize,

    alert_dismissed: bool,
    error_display: ErrorDisplay,
    margin_rows: u16,
    threshold: f32,
}

impl AppState {
    /// Fresh state with `initial_query` in the search box.
    ///
    /// The initial text is scheduled through the debouncer like any edit, so
    /// the first search is issued one debounce period after `now`.
    pub fn new(initial_query: &str, settings: &SearchSettings, now: Instant) -> Self {
        Self {
            input: InputState::new(initial_query),
            debouncer: Debouncer::new(initial_query, settings.debounce, now),
            fetcher: PaginationFetcher::new(settings.per_page),
            cache: PageCache::new(settings.stale_time),
            trigger: VisibilityTrigger::new(),
            health: HealthState::default(),
            focus: FocusPane::Input,
            help_visible: false,
            scroll_offset: 0,
            viewport_items: 1,
            alert_dismissed: false,
            error_display: settings.error_display,
            margin_rows: settings.margin_rows,
            threshold: settings.threshold,
        }
    }

    // ===== Accessors =====

    /// Search box contents.
    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Query the results belong to (the last one the debouncer committed).
    pub fn committed_query(&self) -> &Query {
        self.fetcher.query()
    }

    /// Pagination state machine.
    pub fn fetcher(&self) -> &PaginationFetcher {
        &self.fetcher
    }

    /// Page cache.
    pub fn cache(&self) -> &PageCache {
        &self.cache
    }

    /// Sentinel subscription.
    pub fn trigger(&self) -> &VisibilityTrigger {
        &self.trigger
    }

    /// Health probe state.
    pub fn health(&self) -> &HealthState {
        &self.health
    }

    /// Error presentation policy.
    pub fn error_display(&self) -> ErrorDisplay {
        self.error_display
    }

    /// Index of the first visible result card.
    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    /// When the pending debounce emission is due, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.debouncer.next_deadline()
    }

    /// What the body shows right now.
    pub fn presentation(&self) -> Presentation {
        let mut presentation = select(
            self.fetcher.query(),
            self.fetcher.state(),
            self.error_display,
        );
        if self.alert_dismissed {
            presentation.alert = None;
        }
        presentation
    }

    // ===== Input =====

    /// Apply an edit to the search box and restart the debounce timer if the
    /// text changed.
    pub fn edit_input(&mut self, edit: impl FnOnce(InputState) -> InputState, now: Instant) {
        let before = self.input.text().to_string();
        self.input = edit(std::mem::take(&mut self.input));
        if self.input.text() != before {
            self.debouncer.on_input(self.input.text(), now);
        }
    }

    /// Advance timers. Returns a job when the debouncer commits a query that
    /// needs fetching.
    pub fn tick(&mut self, now: Instant) -> Option<Job> {
        let emitted = self.debouncer.poll(now)?;
        self.commit_query(Query::new(emitted), now)
    }

    fn commit_query(&mut self, query: Query, now: Instant) -> Option<Job> {
        if &query == self.fetcher.query() {
            return None;
        }
        info!(query = %query, "Search query committed");
        self.scroll_offset = 0;
        self.alert_dismissed = false;
        let request = self.fetcher.set_query(query, &mut self.cache, now);
        self.sync_trigger();
        request.map(Job::Search)
    }

    // ===== Worker events =====

    /// Fold a worker event into the state.
    pub fn apply(&mut self, event: WorkerEvent, now: Instant) {
        match event {
            WorkerEvent::Search(response) => {
                let page = response.request.page.get();
                match self.fetcher.apply(response, &mut self.cache, now) {
                    ApplyOutcome::Applied => {
                        debug!(page, state = self.presentation().state.label(), "Page applied");
                    }
                    ApplyOutcome::Failed => self.alert_dismissed = false,
                    ApplyOutcome::Stale => {}
                }
                self.sync_trigger();
                self.clamp_scroll();
            }
            WorkerEvent::Health(result) => self.health.finish(result),
        }
    }

    // ===== Infinite scroll =====

    /// Feed the sentinel position sampled after a draw. Returns the next-page
    /// job when the sentinel just came into view.
    pub fn observe_sentinel(&mut self, geometry: SentinelGeometry) -> Option<Job> {
        if !self.trigger.observe(geometry) {
            return None;
        }
        let request = self.fetcher.fetch_next_page();
        self.sync_trigger();
        request.map(Job::Search)
    }

    /// Keep the sentinel subscription in step with the fetch state.
    ///
    /// The sentinel exists only while results are shown; any change to its
    /// options re-registers the observation.
    fn sync_trigger(&mut self) {
        let showing_results = matches!(
            self.presentation().state,
            PresentationState::Results { .. }
        );
        if !showing_results {
            self.trigger.detach();
            return;
        }

        let options = TriggerOptions {
            margin_rows: self.margin_rows,
            threshold: self.threshold,
            has_next_page: self.fetcher.has_next_page(),
            enabled: !self.fetcher.is_fetching_next_page(),
        };
        if self.trigger.is_observing() {
            self.trigger.update(options);
        } else {
            self.trigger.attach(options);
        }
    }

    /// Record how many cards the list viewport holds.
    pub fn set_viewport_items(&mut self, items: usize) {
        self.viewport_items = items.max(1);
    }

    // ===== Actions =====

    /// Apply a list-pane key action. `Quit` is handled by the caller.
    pub fn handle_action(&mut self, action: KeyAction) -> Option<Job> {
        match action {
            KeyAction::ScrollUp => self.scroll_by(-1),
            KeyAction::ScrollDown => self.scroll_by(1),
            KeyAction::PageUp => self.scroll_by(-page_delta(self.viewport_items)),
            KeyAction::PageDown => self.scroll_by(page_delta(self.viewport_items)),
            KeyAction::ScrollToTop => self.scroll_offset = 0,
            KeyAction::ScrollToBottom => {
                self.scroll_offset = self.result_count().saturating_sub(1);
            }
            KeyAction::FocusInput => self.focus = FocusPane::Input,
            KeyAction::ToggleFocus => self.toggle_focus(),
            KeyAction::Retry => return self.retry(),
            KeyAction::Refresh => return self.refresh(),
            KeyAction::HealthCheck => return self.start_health_check(),
            KeyAction::DismissAlert => self.dismiss_alert(),
            KeyAction::Help => self.help_visible = !self.help_visible,
            KeyAction::Quit => {}
        }
        None
    }

    /// Switch focus between the search box and the list.
    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            FocusPane::Input => FocusPane::List,
            FocusPane::List => FocusPane::Input,
        };
    }

    /// Re-issue the failed request.
    pub fn retry(&mut self) -> Option<Job> {
        let request = self.fetcher.retry()?;
        info!(query = %request.query, page = request.page.get(), "Retrying search");
        self.alert_dismissed = false;
        self.sync_trigger();
        Some(Job::Search(request))
    }

    /// Drop cached results for the current query and fetch page 1 again.
    pub fn refresh(&mut self) -> Option<Job> {
        let request = self.fetcher.refresh(&mut self.cache)?;
        info!(query = %request.query, "Refreshing search");
        self.scroll_offset = 0;
        self.sync_trigger();
        Some(Job::Search(request))
    }

    /// Start an API connectivity probe unless one is running.
    pub fn start_health_check(&mut self) -> Option<Job> {
        self.health.start().then_some(Job::HealthCheck)
    }

    /// Hide the current error alert.
    pub fn dismiss_alert(&mut self) {
        self.alert_dismissed = true;
    }

    /// Cancel pending timers and observations.
    pub fn shutdown(&mut self) {
        self.debouncer.cancel();
        self.trigger.detach();
    }

    // ===== Scrolling =====

    fn result_count(&self) -> usize {
        self.fetcher.result_set().map_or(0, |set| set.item_count())
    }

    fn scroll_by(&mut self, delta: isize) {
        let max = self.result_count().saturating_sub(1);
        let target = self.scroll_offset.saturating_add_signed(delta);
        self.scroll_offset = target.min(max);
    }

    fn clamp_scroll(&mut self) {
        let max = self.result_count().saturating_sub(1);
        self.scroll_offset = self.scroll_offset.min(max);
    }
}

fn page_delta(viewport_items: usize) -> isize {
    isize::try_from(viewport_items.max(1)).unwrap_or(isize::MAX)
}

#[cfg(test)]
#[path = "app_state_tests.rs"]
mod tests;
