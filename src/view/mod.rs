//! TUI rendering and terminal management (impure shell)

mod alert;
pub mod constants;
mod help;
mod layout;
pub mod repository_list;
mod search_input;
mod state_display;
mod styles;

pub use help::render_help_overlay;
pub use layout::{calculate_body_area, render_layout, APP_TITLE};
pub use repository_list::{sentinel_geometry, RepositoryList};
pub use search_input::SearchInput;
pub use styles::{ColorConfig, Theme};

use crate::api::{FetchWorker, GithubClient, Job, SearchApi};
use crate::config::keybindings::KeyBindings;
use crate::config::ResolvedConfig;
use crate::model::{AppError, FetchError, KeyAction};
use crate::state::search_input as edit;
use crate::state::{AppState, FocusPane, PresentationState, SearchSettings};
use constants::CARD_HEIGHT;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Longest the loop sleeps waiting for terminal input.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// HTTP client could not be built
    #[error("Fetch setup error: {0}")]
    Fetch(#[from] FetchError),

    /// Application error
    #[error("Application error: {0}")]
    App(#[from] AppError),
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    terminal: Terminal<B>,
    app_state: AppState,
    worker: FetchWorker,
    key_bindings: KeyBindings,
    theme: Theme,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen and starts the
    /// fetch worker.
    pub fn new(
        api: Arc<dyn SearchApi>,
        settings: &SearchSettings,
        initial_query: &str,
        theme: Theme,
    ) -> Result<Self, TuiError> {
        let worker = FetchWorker::spawn(api)?;

        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;

        Ok(Self {
            terminal,
            app_state: AppState::new(initial_query, settings, Instant::now()),
            worker,
            key_bindings: KeyBindings::default(),
            theme,
        })
    }

    /// Run the main event loop
    ///
    /// Returns when user quits (q or Ctrl+C). Sleeps until terminal input,
    /// the next debounce deadline or the poll interval, whichever is first.
    pub fn run(&mut self) -> Result<(), TuiError> {
        let mut dirty = true;

        loop {
            let now = Instant::now();
            dirty |= self.tick(now);

            // A draw can reveal the sentinel and queue the next page.
            while dirty {
                dirty = self.draw()?;
            }

            let timeout = match self.app_state.next_deadline() {
                Some(deadline) => deadline.saturating_duration_since(now).min(POLL_INTERVAL),
                None => POLL_INTERVAL,
            };

            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        if self.handle_key(key, Instant::now()) {
                            info!("Quit requested");
                            self.app_state.shutdown();
                            return Ok(());
                        }
                        dirty = true;
                    }
                    Event::Resize(width, height) => {
                        debug!(width, height, "Terminal resized");
                        dirty = true;
                    }
                    _ => {}
                }
            }
        }
    }
}

impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Drain finished fetches and advance the debounce timer.
    ///
    /// Returns true if anything changed that needs a redraw.
    fn tick(&mut self, now: Instant) -> bool {
        let mut changed = false;
        while let Some(event) = self.worker.try_recv() {
            self.app_state.apply(event, now);
            changed = true;
        }
        if let Some(job) = self.app_state.tick(now) {
            self.submit(job);
            changed = true;
        }
        changed
    }

    /// Hand a job to the fetch worker.
    fn submit(&mut self, job: Job) {
        debug!(?job, "Submitting job");
        if !self.worker.submit(job) {
            warn!("Fetch worker has stopped; job dropped");
        }
    }

    /// Handle a single keyboard event
    ///
    /// Returns true if app should quit
    fn handle_key(&mut self, key: KeyEvent, now: Instant) -> bool {
        // Special case: Ctrl+C should always quit, even if not in bindings
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        // Help overlay swallows everything but its own dismissal keys
        if self.app_state.help_visible {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
                self.app_state.help_visible = false;
            }
            return false;
        }

        if self.app_state.focus == FocusPane::Input && self.handle_input_key(key, now) {
            return false;
        }

        // Look up action in key bindings
        let action = match self.key_bindings.get(key) {
            Some(action) => action,
            None => return false, // Unknown key, ignore
        };

        if action == KeyAction::Quit {
            return true;
        }
        if let Some(job) = self.app_state.handle_action(action) {
            self.submit(job);
        }
        false
    }

    /// Editing keys for the search box. Returns true if the key was consumed.
    fn handle_input_key(&mut self, key: KeyEvent, now: Instant) -> bool {
        let control = key.modifiers.contains(KeyModifiers::CONTROL);
        let state = &mut self.app_state;
        match key.code {
            KeyCode::Char('u') if control => state.edit_input(edit::handle_clear, now),
            KeyCode::Char(ch) if !control => {
                state.edit_input(|input| edit::handle_char_input(input, ch), now)
            }
            KeyCode::Backspace => state.edit_input(edit::handle_backspace, now),
            KeyCode::Delete => state.edit_input(edit::handle_delete, now),
            KeyCode::Left => state.edit_input(edit::handle_cursor_left, now),
            KeyCode::Right => state.edit_input(edit::handle_cursor_right, now),
            KeyCode::Home => state.edit_input(edit::handle_home, now),
            KeyCode::End => state.edit_input(edit::handle_end, now),
            KeyCode::Esc | KeyCode::Enter => state.focus = FocusPane::List,
            // Tab and remaining control chords go through the bindings
            _ => return false,
        }
        true
    }

    /// Render the current frame, then sample the sentinel position.
    ///
    /// Returns true if the draw queued a fetch (the next frame shows its
    /// loading row).
    fn draw(&mut self) -> Result<bool, TuiError> {
        let size = self.terminal.size()?;
        let body = calculate_body_area(Rect::new(0, 0, size.width, size.height));
        self.app_state
            .set_viewport_items(usize::from(body.height / CARD_HEIGHT));

        let app_state = &self.app_state;
        let theme = &self.theme;
        self.terminal.draw(|frame| {
            render_layout(frame, app_state, theme);
        })?;

        let PresentationState::Results { set, .. } = self.app_state.presentation().state else {
            return Ok(false);
        };
        let geometry = sentinel_geometry(set.item_count(), self.app_state.scroll_offset(), body.height);
        match self.app_state.observe_sentinel(geometry) {
            Some(job) => {
                self.submit(job);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

// ===== Test Helpers =====
//
// The following methods are ONLY for testing within the crate.
// DO NOT use these in production code.

#[cfg(test)]
#[allow(dead_code)] // Not all helpers used in every test module
impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Create TuiApp for testing (test-only constructor)
    ///
    /// Skips terminal initialization. Used by the acceptance test harness.
    pub(crate) fn new_for_test(
        terminal: Terminal<B>,
        app_state: AppState,
        worker: FetchWorker,
        key_bindings: KeyBindings,
        theme: Theme,
    ) -> Self {
        Self {
            terminal,
            app_state,
            worker,
            key_bindings,
            theme,
        }
    }

    /// Get reference to app state (test-only accessor)
    pub(crate) fn app_state(&self) -> &AppState {
        &self.app_state
    }

    /// Handle a single keyboard event at `now` (test-only accessor)
    ///
    /// Returns true if app should quit.
    pub(crate) fn handle_key_test(&mut self, key: KeyEvent, now: Instant) -> bool {
        self.handle_key(key, now)
    }

    /// Advance timers and drain finished fetches (test-only accessor)
    pub(crate) fn tick_test(&mut self, now: Instant) -> bool {
        self.tick(now)
    }

    /// Render frames until nothing new is queued (test-only accessor)
    pub(crate) fn render_test(&mut self) -> Result<(), TuiError> {
        while self.draw()? {}
        Ok(())
    }

    /// Block up to `timeout` for one worker event and apply it.
    ///
    /// Returns false on timeout.
    pub(crate) fn wait_for_event_test(&mut self, now: Instant, timeout: Duration) -> bool {
        match self.worker.recv_timeout(timeout) {
            Some(event) => {
                self.app_state.apply(event, now);
                true
            }
            None => false,
        }
    }

    /// Get reference to terminal (test-only accessor)
    pub(crate) fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }
}

/// Initialize and run the TUI application against the configured API.
///
/// Handles terminal setup, runs the event loop, and ensures cleanup on exit.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run_with_config(
    config: &ResolvedConfig,
    initial_query: &str,
    theme: Theme,
) -> Result<(), TuiError> {
    let client = GithubClient::new(&config.client_config())?;
    info!(api_url = %config.api_url, "Starting TUI");

    let mut app = match TuiApp::new(
        Arc::new(client),
        &config.search_settings(),
        initial_query,
        theme,
    ) {
        Ok(app) => app,
        Err(e) => {
            restore_terminal()?;
            return Err(e);
        }
    };
    let result = app.run();

    // Hand the terminal back before joining the fetch thread
    restore_terminal()?;
    drop(app);

    result
}

/// Restore terminal to normal state
///
/// Disables raw mode and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}
