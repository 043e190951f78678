//! Layout dimension constants for TUI rendering.
//!
//! Centralized location for all layout-related numeric values to enable
//! consistent tuning across the application.

/// Height of the title bar in lines.
pub const TITLE_BAR_HEIGHT: u16 = 1;

/// Height of the search input widget in lines.
///
/// Includes border and text input area.
pub const SEARCH_INPUT_HEIGHT: u16 = 3;

/// Height of the status bar in lines.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Rows per repository card: name, description, stats, spacer.
pub const CARD_HEIGHT: u16 = 4;

/// Rows the sentinel occupies below the last card.
pub const SENTINEL_HEIGHT: u16 = 1;

/// Skeleton cards shown while the first page loads.
pub const SKELETON_CARDS: u16 = 3;

/// Width percentage for help overlay popup.
pub const HELP_POPUP_WIDTH_PERCENT: u16 = 70;

/// Height percentage for help overlay popup.
pub const HELP_POPUP_HEIGHT_PERCENT: u16 = 80;

/// Maximum width of the error alert box.
pub const ALERT_MAX_WIDTH: u16 = 50;

/// Height of the error alert box (border + message + detail + hint).
pub const ALERT_HEIGHT: u16 = 5;
