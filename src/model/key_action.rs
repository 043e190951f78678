//! Domain-level keyboard actions independent of key bindings.

/// Domain-level actions that can be mapped to key bindings.
///
/// These represent user intent, not specific keys. The mapping from
/// `crossterm::event::KeyEvent` to `KeyAction` is handled by `KeyBindings`.
/// Text entry in the search input bypasses this mapping entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Scrolling
    /// Scroll the result list up by one repository. Default: k/↑
    ScrollUp,
    /// Scroll the result list down by one repository. Default: j/↓
    ScrollDown,
    /// Scroll up by one page height. Default: Ctrl+u/Page Up
    PageUp,
    /// Scroll down by one page height. Default: Ctrl+d/Page Down
    PageDown,
    /// Jump to the first repository. Default: g/Home
    ScrollToTop,
    /// Jump to the last loaded repository. Default: G/End
    ScrollToBottom,

    // Focus
    /// Move focus to the search input. Default: / or i
    FocusInput,
    /// Toggle focus between input and list. Default: Tab
    ToggleFocus,

    // Fetching
    /// Re-issue the request that failed. Default: r
    Retry,
    /// Drop the cached result set and refetch from page 1. Default: R
    Refresh,
    /// Probe GitHub API connectivity. Default: z
    HealthCheck,
    /// Dismiss the error alert overlay. Default: x
    DismissAlert,

    // Application
    /// Toggle the help overlay. Default: ?
    Help,
    /// Quit. Default: q
    Quit,
}
