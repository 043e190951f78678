//! Color and text styling.
//!
//! All widgets take their styles from a [`Theme`] so `--no-color` and
//! `NO_COLOR` are honoured in one place. Modifiers (bold, dim) survive with
//! colors disabled; only foreground and background colors are dropped.

use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Determines whether colors should be enabled or disabled based on:
/// - `--no-color` CLI flag
/// - `NO_COLOR` environment variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig from CLI args and environment.
    ///
    /// Priority (first match wins):
    /// 1. `--no-color` flag (disables colors)
    /// 2. `NO_COLOR` env var (any value disables colors)
    /// 3. Default: colors enabled
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var_os("NO_COLOR").is_none();
        Self { enabled }
    }

    /// Explicit setting, ignoring the environment.
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== Theme =====

/// Styles for every element the UI draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Application title bar.
    pub title: Style,
    /// Border of the focused pane.
    pub focused_border: Style,
    /// Border of an unfocused pane.
    pub unfocused_border: Style,
    /// Cursor cell in the search box.
    pub cursor: Style,
    /// Placeholder text in an empty search box.
    pub placeholder: Style,
    /// Repository full name.
    pub repo_name: Style,
    /// Repository description.
    pub description: Style,
    /// Star count.
    pub stars: Style,
    /// Primary language.
    pub language: Style,
    /// Secondary text: hints, sentinel, empty descriptions.
    pub muted: Style,
    /// Headline of a body state (Empty, Error, NoResults).
    pub headline: Style,
    /// Error text and alert border.
    pub error: Style,
    /// Skeleton placeholder blocks.
    pub skeleton: Style,
    /// Key names in the help overlay.
    pub key: Style,
    /// Section headers in the help overlay.
    pub section_header: Style,
    /// Status bar background.
    pub status_bar: Style,
}

impl Theme {
    /// Theme for `config`.
    pub fn new(config: ColorConfig) -> Self {
        let colored = Self::colored();
        if config.colors_enabled() {
            colored
        } else {
            colored.without_colors()
        }
    }

    fn colored() -> Self {
        Self {
            title: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            focused_border: Style::default().fg(Color::Cyan),
            unfocused_border: Style::default().fg(Color::DarkGray),
            cursor: Style::default()
                .bg(Color::White)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            placeholder: Style::default().fg(Color::DarkGray),
            repo_name: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            description: Style::default().fg(Color::White),
            stars: Style::default().fg(Color::Yellow),
            language: Style::default().fg(Color::Green),
            muted: Style::default().fg(Color::DarkGray),
            headline: Style::default().add_modifier(Modifier::BOLD),
            error: Style::default().fg(Color::Red),
            skeleton: Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM),
            key: Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            section_header: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            status_bar: Style::default().bg(Color::DarkGray).fg(Color::White),
        }
    }

    fn without_colors(self) -> Self {
        let strip = |style: Style| Style {
            fg: None,
            bg: None,
            ..style
        };
        Self {
            title: strip(self.title),
            focused_border: strip(self.focused_border).add_modifier(Modifier::BOLD),
            unfocused_border: strip(self.unfocused_border),
            cursor: Style::default().add_modifier(Modifier::REVERSED),
            placeholder: strip(self.placeholder).add_modifier(Modifier::DIM),
            repo_name: strip(self.repo_name),
            description: strip(self.description),
            stars: strip(self.stars),
            language: strip(self.language),
            muted: strip(self.muted).add_modifier(Modifier::DIM),
            headline: strip(self.headline),
            error: strip(self.error).add_modifier(Modifier::BOLD),
            skeleton: strip(self.skeleton),
            key: strip(self.key),
            section_header: strip(self.section_header),
            status_bar: Style::default().add_modifier(Modifier::REVERSED),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(ColorConfig::new(true))
    }
}

// ===== Tests =====

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn color_config_respects_no_color_flag() {
        let config = ColorConfig::from_env_and_args(true);
        assert!(
            !config.colors_enabled(),
            "--no-color flag should disable colors"
        );
    }

    #[test]
    #[serial(no_color)]
    fn color_config_no_color_env_any_value_disables() {
        // NO_COLOR can be any value (even empty string)
        std::env::set_var("NO_COLOR", "");
        let config = ColorConfig::from_env_and_args(false);
        std::env::remove_var("NO_COLOR");
        assert!(
            !config.colors_enabled(),
            "NO_COLOR with empty string should disable colors"
        );
    }

    #[test]
    #[serial(no_color)]
    fn color_config_enables_colors_by_default() {
        std::env::remove_var("NO_COLOR");
        let config = ColorConfig::from_env_and_args(false);
        assert!(config.colors_enabled(), "Colors should be enabled by default");
    }

    #[test]
    fn colored_theme_has_foreground_colors() {
        let theme = Theme::new(ColorConfig::new(true));
        assert!(theme.repo_name.fg.is_some());
        assert!(theme.error.fg.is_some());
    }

    #[test]
    fn colorless_theme_drops_colors_but_keeps_emphasis() {
        let theme = Theme::new(ColorConfig::new(false));
        assert_eq!(theme.repo_name.fg, None);
        assert_eq!(theme.status_bar.bg, None);
        assert!(theme.repo_name.add_modifier.contains(Modifier::BOLD));
        assert!(theme.cursor.add_modifier.contains(Modifier::REVERSED));
    }
}
