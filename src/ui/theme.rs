//! Color theme constants.
//!
//! Defines the minimal dark color palette used throughout the UI.

use ratatui::style::Color;

use crate::models::ItineraryStatus;

/// Accent color - white for highlights and important elements
pub const COLOR_ACCENT: Color = Color::White;

/// Header text color
pub const COLOR_HEADER: Color = Color::White;

/// Dim text for less important info
pub const COLOR_DIM: Color = Color::DarkGray;

/// Inline error messages
pub const COLOR_ERROR: Color = Color::Red;

/// Loading indicators
pub const COLOR_LOADING: Color = Color::Gray;

/// Color of an itinerary status label.
pub fn status_color(status: ItineraryStatus) -> Color {
    match status {
        ItineraryStatus::Scheduled => Color::LightBlue,
        ItineraryStatus::Confirmed => Color::LightGreen,
        ItineraryStatus::Completed => Color::Gray,
        ItineraryStatus::Cancelled => Color::Red,
    }
}
