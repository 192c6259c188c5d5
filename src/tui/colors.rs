//! Color constants for the terminal user interface.

use ratatui::style::Color;

// Priority accents used in the task table and the form selectors.

/// Used for high priority.
pub const HIGH_RED: Color = Color::Rgb(200, 60, 60);
/// Used for medium priority.
pub const MEDIUM_GOLD: Color = Color::Rgb(255, 215, 0);
/// Used for low priority.
pub const LOW_GREEN: Color = Color::Rgb(90, 160, 90);
/// Used for completed rows.
pub const DONE_GREY: Color = Color::Rgb(110, 110, 110);
