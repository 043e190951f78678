//! Screen layout rendering.
//!
//! Pure layout logic: title bar, search box, body and status bar stacked
//! vertically, with the alert and help overlay drawn on top.

use super::alert::render_alert;
use super::constants::{SEARCH_INPUT_HEIGHT, STATUS_BAR_HEIGHT, TITLE_BAR_HEIGHT};
use super::help::render_help_overlay;
use super::repository_list::{format_count, RepositoryList};
use super::search_input::SearchInput;
use super::state_display::render_state;
use super::styles::Theme;
use crate::state::{AppState, FocusPane, PresentationState};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Application title shown in the top bar.
pub const APP_TITLE: &str = "GitHub Repository Search";

/// Split the frame into title, search box, body and status bar.
fn split(area: Rect) -> [Rect; 4] {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(TITLE_BAR_HEIGHT),
            Constraint::Length(SEARCH_INPUT_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .split(area);
    [chunks[0], chunks[1], chunks[2], chunks[3]]
}

/// Area of the body (result list or state message) for a frame of `area`.
pub fn calculate_body_area(area: Rect) -> Rect {
    split(area)[2]
}

/// Render the whole screen for `state`.
pub fn render_layout(frame: &mut Frame, state: &AppState, theme: &Theme) {
    let [title_area, input_area, body_area, status_area] = split(frame.area());
    let presentation = state.presentation();

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(APP_TITLE, theme.title))),
        title_area,
    );
    frame.render_widget(
        SearchInput::new(state.input(), state.focus == FocusPane::Input, theme),
        input_area,
    );

    match &presentation.state {
        PresentationState::Results {
            set,
            has_next_page,
            fetching_next_page,
        } => frame.render_widget(
            RepositoryList::new(
                set,
                state.scroll_offset(),
                *has_next_page,
                *fetching_next_page,
                theme,
            ),
            body_area,
        ),
        other => render_state(frame, body_area, other, theme),
    }

    if let Some(alert) = &presentation.alert {
        render_alert(frame, body_area, alert, theme);
    }

    render_status_bar(frame, status_area, state, &presentation.state, theme);

    if state.help_visible {
        render_help_overlay(frame, theme);
    }
}

/// Left side of the status bar: health probe output wins over the result summary.
fn status_text(state: &AppState, body: &PresentationState) -> String {
    if let Some(line) = state.health().status_line() {
        return line;
    }
    match body {
        PresentationState::Results { set, .. } => format!(
            "{} of {} repositories",
            format_count(set.item_count() as u64),
            format_count(set.first_total_count().unwrap_or(0)),
        ),
        PresentationState::Loading => "Searching...".to_string(),
        PresentationState::Error { .. } => "Request failed".to_string(),
        PresentationState::NoResults => "0 repositories".to_string(),
        PresentationState::Empty => "Ready".to_string(),
    }
}

fn key_hints(focus: FocusPane) -> &'static str {
    match focus {
        FocusPane::Input => "Esc:results  Ctrl+r:retry  ?:help  Ctrl+c:quit",
        FocusPane::List => "j/k:scroll  /:search  r:retry  z:ping  ?:help  q:quit",
    }
}

fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    body: &PresentationState,
    theme: &Theme,
) {
    let status = status_text(state, body);
    let hints = key_hints(state.focus);
    let gap = usize::from(area.width)
        .saturating_sub(status.chars().count())
        .saturating_sub(hints.len())
        .max(2);

    let line = Line::from(vec![
        Span::styled(format!(" {status}"), theme.status_bar),
        Span::styled(" ".repeat(gap.saturating_sub(1)), theme.status_bar),
        Span::styled(hints, theme.muted),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
