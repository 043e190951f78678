//! Search input widget for rendering the search bar.

use super::styles::Theme;
use crate::state::InputState;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Placeholder shown while the box is empty and unfocused.
pub const PLACEHOLDER: &str = "Search repositories...";

/// Search input widget.
///
/// Draws a block cursor at the caret while focused.
pub struct SearchInput<'a> {
    input: &'a InputState,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> SearchInput<'a> {
    /// Create new SearchInput widget.
    pub fn new(input: &'a InputState, focused: bool, theme: &'a Theme) -> Self {
        Self {
            input,
            focused,
            theme,
        }
    }

    fn line(&self) -> Line<'a> {
        let text = self.input.text();

        if !self.focused {
            if text.is_empty() {
                return Line::from(Span::styled(PLACEHOLDER, self.theme.placeholder));
            }
            return Line::from(text.to_string());
        }

        // Split text into before/at/after cursor; cursor counts chars
        let cursor = self.input.cursor();
        let before: String = text.chars().take(cursor).collect();
        let mut rest = text.chars().skip(cursor);
        let cursor_char = rest.next().map(String::from).unwrap_or_else(|| " ".to_string());
        let after: String = rest.collect();

        Line::from(vec![
            Span::raw(before),
            Span::styled(cursor_char, self.theme.cursor),
            Span::raw(after),
        ])
    }
}

impl Widget for SearchInput<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.focused_border
        } else {
            self.theme.unfocused_border
        };

        let paragraph = Paragraph::new(self.line()).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Search ")
                .border_style(border_style),
        );

        paragraph.render(area, buf);
    }
}
