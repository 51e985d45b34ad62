//! Full-screen itinerary list rendering
//!
//! Header, filter bar, the visible window of itineraries and the list status
//! line (loading, inline error, end of list).

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, ROWS_PER_ITEM};
use crate::list::ListPhase;
use crate::models::ItineraryWithTour;

use super::helpers::{centered_area, padding_between, truncate};
use super::theme::{status_color, COLOR_ACCENT, COLOR_DIM, COLOR_ERROR, COLOR_HEADER, COLOR_LOADING};

/// Render the header: quit hint (left) | title (center) | loaded count (right)
pub fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let area = centered_area(area);
    let title = "itineraries";
    let hint = "q";
    let count = if app.list.has_more() || app.list.is_loading() {
        format!("{}+", app.items().len())
    } else {
        app.items().len().to_string()
    };

    let width = area.width as usize;
    let left_gap = (width.saturating_sub(title.len())) / 2;
    let left = format!("{}{}", hint, " ".repeat(left_gap.saturating_sub(hint.len())));
    let used = left.len() + title.len();
    let right_gap = width.saturating_sub(used + count.len());

    let line = Line::from(vec![
        Span::styled(left, Style::default().fg(COLOR_DIM)),
        Span::styled(title, Style::default().fg(COLOR_HEADER).add_modifier(Modifier::BOLD)),
        Span::raw(" ".repeat(right_gap)),
        Span::styled(count, Style::default().fg(COLOR_DIM)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Render the active filters
pub fn render_filter_bar(frame: &mut Frame, area: Rect, app: &App) {
    let area = centered_area(area);
    let summary = truncate(&app.filters.describe(), (area.width as usize).saturating_sub(9));
    let line = Line::from(vec![
        Span::styled("filters: ", Style::default().fg(COLOR_DIM)),
        Span::styled(summary, Style::default().fg(Color::White)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Render the visible itineraries, or the empty/initial state
pub fn render_list_content(frame: &mut Frame, area: Rect, app: &App) {
    let area = centered_area(area);

    if app.items().is_empty() {
        let (text, color) = match app.list.phase() {
            ListPhase::Loading => ("loading...".to_string(), COLOR_LOADING),
            ListPhase::Error => (String::new(), COLOR_DIM),
            ListPhase::Idle if app.list.state().is_empty_result() => {
                ("no itineraries match these filters".to_string(), COLOR_DIM)
            }
            ListPhase::Idle => (String::new(), COLOR_DIM),
        };
        let line = Line::from(Span::styled(text, Style::default().fg(color)));
        frame.render_widget(Paragraph::new(line), area);
        return;
    }

    let visible = (area.height / ROWS_PER_ITEM) as usize;
    for (display_idx, (i, item)) in app
        .items()
        .iter()
        .enumerate()
        .skip(app.scroll_offset)
        .take(visible)
        .enumerate()
    {
        let y = area.y + display_idx as u16 * ROWS_PER_ITEM;
        render_item(frame, Rect::new(area.x, y, area.width, 2), item, i == app.selected_index);
    }
}

/// Render one itinerary (2 lines + spacing)
/// Line 1: > Tour name                               confirmed
/// Line 2:   2025-03-10 08:00-12:00 · Ubatuba, SP · 12 slots
fn render_item(frame: &mut Frame, area: Rect, item: &ItineraryWithTour, is_selected: bool) {
    let content_width = (area.width as usize).saturating_sub(2);
    let status = item.itinerary.status;
    let status_text = status.label();

    let title_max = content_width.saturating_sub(status_text.len() + 2);
    let title = truncate(&item.title(), title_max);
    let padding = padding_between(&title, status_text, content_width);

    let (prefix, prefix_style, title_style) = if is_selected {
        (
            "> ",
            Style::default().fg(COLOR_ACCENT),
            Style::default().fg(COLOR_HEADER).add_modifier(Modifier::BOLD),
        )
    } else {
        ("  ", Style::default(), Style::default().fg(Color::White))
    };

    let title_line = Line::from(vec![
        Span::styled(prefix, prefix_style),
        Span::styled(title, title_style),
        Span::raw(padding),
        Span::styled(status_text, Style::default().fg(status_color(status))),
    ]);
    frame.render_widget(Paragraph::new(title_line), Rect::new(area.x, area.y, area.width, 1));

    let details = truncate(&item_details(item), content_width);
    let details_line = Line::from(vec![
        Span::raw("  "),
        Span::styled(details, Style::default().fg(COLOR_DIM)),
    ]);
    frame.render_widget(
        Paragraph::new(details_line),
        Rect::new(area.x, area.y + 1, area.width, 1),
    );
}

/// Second line of an item: when, where and free slots.
pub fn item_details(item: &ItineraryWithTour) -> String {
    let it = &item.itinerary;
    let mut when = it.day().to_string();
    match (it.start_time.is_empty(), it.end_time.is_empty()) {
        (false, false) => when.push_str(&format!(" {}-{}", it.start_time, it.end_time)),
        (false, true) => when.push_str(&format!(" {}", it.start_time)),
        _ => {}
    }

    let mut parts = vec![when.trim().to_string()];
    if let Some(location) = item.location() {
        parts.push(location);
    }
    parts.push(match it.available_slots {
        1 => "1 slot".to_string(),
        n => format!("{} slots", n),
    });
    parts.retain(|p| !p.is_empty());
    parts.join(" · ")
}

/// Render the list status line: loading more, inline error, or end of list
pub fn render_status_line(frame: &mut Frame, area: Rect, app: &App) {
    let area = centered_area(area);
    let width = area.width as usize;

    let line = match app.list.phase() {
        ListPhase::Loading if !app.items().is_empty() => Line::from(Span::styled(
            "loading more...",
            Style::default().fg(COLOR_LOADING),
        )),
        ListPhase::Error => {
            let message = app.list.error().unwrap_or_default();
            let hint = "  r to retry";
            Line::from(vec![
                Span::styled(
                    truncate(message, width.saturating_sub(hint.len())),
                    Style::default().fg(COLOR_ERROR),
                ),
                Span::styled(hint, Style::default().fg(COLOR_DIM)),
            ])
        }
        ListPhase::Idle if app.list.state().is_exhausted() && !app.items().is_empty() => {
            Line::from(Span::styled(
                "end of list",
                Style::default().fg(COLOR_DIM),
            ))
        }
        _ => Line::default(),
    };
    frame.render_widget(Paragraph::new(line), area);
}
