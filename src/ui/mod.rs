//! UI rendering for the itinerary browser.
//!
//! Layout, top to bottom: header, filter bar, spacing, the list window,
//! then a footer with the list status line and the detail panel.

mod browse_list;
mod detail;
mod helpers;
mod theme;

pub use browse_list::item_details;
pub use helpers::truncate;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::app::{App, FOOTER_ROWS};

/// Render the whole screen.
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),               // Header
            Constraint::Length(1),               // Filters
            Constraint::Length(1),               // Spacing
            Constraint::Min(1),                  // List
            Constraint::Length(1),               // Status line
            Constraint::Length(FOOTER_ROWS - 1), // Detail panel
        ])
        .split(frame.area());

    browse_list::render_header(frame, chunks[0], app);
    browse_list::render_filter_bar(frame, chunks[1], app);
    browse_list::render_list_content(frame, chunks[3], app);
    browse_list::render_status_line(frame, chunks[4], app);
    detail::render_detail_panel(frame, chunks[5], app);
}
