//! Body content for every presentation state except Results.

use super::constants::{CARD_HEIGHT, SKELETON_CARDS};
use super::styles::Theme;
use crate::state::PresentationState;
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

/// Empty state headline.
pub const EMPTY_TITLE: &str = "Start searching for repositories";
/// Empty state description.
pub const EMPTY_DESCRIPTION: &str = "Enter a search term to find GitHub repositories";
/// Error state headline.
pub const ERROR_TITLE: &str = "Something went wrong";
/// Error state description.
pub const ERROR_DESCRIPTION: &str =
    "An error occurred while fetching repositories. Please try again.";
/// Error state action hint.
pub const RETRY_HINT: &str = "Press r (or Ctrl+R) to try again";
/// NoResults headline.
pub const NO_RESULTS_TITLE: &str = "No repositories found";
/// NoResults description.
pub const NO_RESULTS_DESCRIPTION: &str =
    "Try adjusting your search terms or search for something else.";
/// Loading label above the skeleton.
pub const LOADING_LABEL: &str = "Searching repositories...";

/// Render `state` into `area`. Results are drawn by the repository list.
pub fn render_state(frame: &mut Frame, area: Rect, state: &PresentationState, theme: &Theme) {
    match state {
        PresentationState::Empty => {
            render_message(frame, area, theme, EMPTY_TITLE, EMPTY_DESCRIPTION, Vec::new());
        }
        PresentationState::Loading => render_skeleton(frame, area, theme),
        PresentationState::Error { message, status } => {
            let mut detail = vec![Line::from(Span::styled(
                match status {
                    Some(code) => format!("{message} (HTTP {code})"),
                    None => message.clone(),
                },
                theme.error,
            ))];
            detail.push(Line::default());
            detail.push(Line::from(Span::styled(RETRY_HINT, theme.key)));
            render_message(frame, area, theme, ERROR_TITLE, ERROR_DESCRIPTION, detail);
        }
        PresentationState::NoResults => {
            render_message(
                frame,
                area,
                theme,
                NO_RESULTS_TITLE,
                NO_RESULTS_DESCRIPTION,
                Vec::new(),
            );
        }
        PresentationState::Results { .. } => {}
    }
}

/// Centered headline, description and optional extra lines.
fn render_message(
    frame: &mut Frame,
    area: Rect,
    theme: &Theme,
    title: &'static str,
    description: &'static str,
    extra: Vec<Line<'static>>,
) {
    let mut lines = vec![
        Line::default(),
        Line::from(Span::styled(title, theme.headline)),
        Line::from(Span::styled(description, theme.muted)),
    ];
    if !extra.is_empty() {
        lines.push(Line::default());
        lines.extend(extra);
    }

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

/// Placeholder cards shaped like the real ones.
fn render_skeleton(frame: &mut Frame, area: Rect, theme: &Theme) {
    let width = usize::from(area.width);
    let bar = |fraction: usize| "░".repeat(width * fraction / 10);

    let mut lines = vec![Line::from(Span::styled(LOADING_LABEL, theme.muted))];
    for _ in 0..SKELETON_CARDS {
        lines.push(Line::from(Span::styled(bar(4), theme.skeleton)));
        lines.push(Line::from(Span::styled(bar(8), theme.skeleton)));
        lines.push(Line::from(Span::styled(bar(2), theme.skeleton)));
        for _ in 3..CARD_HEIGHT {
            lines.push(Line::default());
        }
    }

    frame.render_widget(Paragraph::new(lines), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_harness::buffer_to_string;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn render(state: &PresentationState) -> String {
        let theme = Theme::default();
        let mut terminal = Terminal::new(TestBackend::new(70, 12)).expect("terminal");
        terminal
            .draw(|frame| render_state(frame, frame.area(), state, &theme))
            .expect("draw");
        buffer_to_string(terminal.backend().buffer())
    }

    #[test]
    fn empty_state_invites_search() {
        let output = render(&PresentationState::Empty);
        assert!(output.contains(EMPTY_TITLE));
        assert!(output.contains(EMPTY_DESCRIPTION));
    }

    #[test]
    fn error_state_shows_status_and_retry_hint() {
        let output = render(&PresentationState::Error {
            message: "GitHub API rate limit exceeded".to_string(),
            status: Some(403),
        });
        assert!(output.contains(ERROR_TITLE));
        assert!(output.contains("(HTTP 403)"));
        assert!(output.contains(RETRY_HINT));
    }

    #[test]
    fn no_results_state() {
        let output = render(&PresentationState::NoResults);
        assert!(output.contains(NO_RESULTS_TITLE));
    }

    #[test]
    fn loading_state_draws_skeleton() {
        let output = render(&PresentationState::Loading);
        assert!(output.starts_with(LOADING_LABEL));
        assert!(output.contains('░'));
    }
}
