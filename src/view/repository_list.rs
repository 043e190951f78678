//! Repository cards and the infinite-scroll sentinel.
//!
//! Cards have a fixed height, so list geometry is plain arithmetic: card `i`
//! starts at content row `i * CARD_HEIGHT` and the sentinel sits right after
//! the last card.

use super::constants::{CARD_HEIGHT, SENTINEL_HEIGHT};
use super::styles::Theme;
use crate::model::{PagedResultSet, Repository};
use crate::state::{RowSpan, SentinelGeometry};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Text shown in the sentinel row while the next page loads.
pub const LOADING_MORE: &str = "Loading more…";

/// Text shown in the sentinel row once every page is loaded.
pub const END_OF_RESULTS: &str = "End of results";

/// Where the sentinel sits relative to the viewport.
///
/// `scroll_offset` is the index of the first visible card and
/// `viewport_rows` the height of the list area.
pub fn sentinel_geometry(
    item_count: usize,
    scroll_offset: usize,
    viewport_rows: u16,
) -> SentinelGeometry {
    SentinelGeometry {
        viewport: RowSpan::new(card_row(scroll_offset), u32::from(viewport_rows)),
        sentinel: RowSpan::new(card_row(item_count), u32::from(SENTINEL_HEIGHT)),
    }
}

fn card_row(index: usize) -> u32 {
    u32::try_from(index)
        .unwrap_or(u32::MAX)
        .saturating_mul(u32::from(CARD_HEIGHT))
}

/// Format `n` with comma thousands separators: `220000` → `220,000`.
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Cut `text` to at most `max_width` display columns, ending with `…` when
/// anything was dropped.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let budget = max_width - 1;
    let mut used = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push('…');
    out
}

/// Scrollable list of repository cards followed by the sentinel row.
pub struct RepositoryList<'a> {
    set: &'a PagedResultSet,
    scroll_offset: usize,
    has_next_page: bool,
    fetching_next_page: bool,
    theme: &'a Theme,
}

impl<'a> RepositoryList<'a> {
    /// Create the widget for `set`, starting at card `scroll_offset`.
    pub fn new(
        set: &'a PagedResultSet,
        scroll_offset: usize,
        has_next_page: bool,
        fetching_next_page: bool,
        theme: &'a Theme,
    ) -> Self {
        Self {
            set,
            scroll_offset,
            has_next_page,
            fetching_next_page,
            theme,
        }
    }

    fn card_lines(&self, repo: &'a Repository, width: usize) -> [Line<'a>; 4] {
        let name = Line::from(Span::styled(
            truncate_to_width(&repo.display_name, width),
            self.theme.repo_name,
        ));

        let description = match repo.description.as_deref() {
            Some(text) if !text.trim().is_empty() => Line::from(Span::styled(
                truncate_to_width(text.trim(), width),
                self.theme.description,
            )),
            _ => Line::from(Span::styled("No description", self.theme.muted)),
        };

        let mut stats = vec![Span::styled(
            format!("★ {}", format_count(repo.star_count)),
            self.theme.stars,
        )];
        if let Some(language) = repo.language.as_deref() {
            stats.push(Span::raw("  "));
            stats.push(Span::styled(format!("● {language}"), self.theme.language));
        }

        [name, description, Line::from(stats), Line::default()]
    }

    fn sentinel_line(&self) -> Line<'a> {
        if self.fetching_next_page {
            Line::from(Span::styled(LOADING_MORE, self.theme.muted))
        } else if !self.has_next_page {
            Line::from(Span::styled(END_OF_RESULTS, self.theme.muted))
        } else {
            Line::default()
        }
    }
}

impl Widget for RepositoryList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let height = usize::from(area.height);
        let width = usize::from(area.width);
        let mut lines: Vec<Line> = Vec::with_capacity(height);

        for repo in self.set.items().skip(self.scroll_offset) {
            if lines.len() >= height {
                break;
            }
            lines.extend(self.card_lines(repo, width));
        }
        if lines.len() < height {
            lines.push(self.sentinel_line());
        }
        lines.truncate(height);

        Paragraph::new(lines).render(area, buf);
    }
}
