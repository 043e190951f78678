//! Dismissible error alert drawn over the result list.

use super::constants::{ALERT_HEIGHT, ALERT_MAX_WIDTH};
use super::styles::Theme;
use crate::state::ErrorAlert;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Alert headline.
pub const ALERT_MESSAGE: &str = "Failed to load repositories. Please try again.";

/// Top-right corner of `area`, clipped to fit.
fn alert_area(area: Rect) -> Rect {
    let width = ALERT_MAX_WIDTH.min(area.width);
    let height = ALERT_HEIGHT.min(area.height);
    Rect {
        x: area.x + area.width - width,
        y: area.y,
        width,
        height,
    }
}

/// Draw `alert` in the top-right corner of `area`.
pub fn render_alert(frame: &mut Frame, area: Rect, alert: &ErrorAlert, theme: &Theme) {
    let popup = alert_area(area);
    if popup.width < 3 || popup.height < 3 {
        return;
    }

    let detail = match alert.status {
        Some(status) => format!("{} (HTTP {status})", alert.message),
        None => alert.message.clone(),
    };
    let lines = vec![
        Line::from(Span::styled(ALERT_MESSAGE, theme.headline)),
        Line::from(Span::styled(detail, theme.error)),
        Line::from(Span::styled("r retry · x dismiss", theme.muted)),
    ];

    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: true }).block(
            Block::default()
                .title(" Error ")
                .borders(Borders::ALL)
                .border_style(theme.error),
        ),
        popup,
    );
}
