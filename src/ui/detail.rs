//! Detail panel for the selected itinerary.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, DetailState};
use crate::models::ItineraryDetail;

use super::helpers::centered_area;
use super::theme::{COLOR_DIM, COLOR_ERROR, COLOR_HEADER, COLOR_LOADING};

pub fn render_detail_panel(frame: &mut Frame, area: Rect, app: &App) {
    let area = centered_area(area);
    let lines = match &app.detail {
        DetailState::Hidden => vec![Line::from(Span::styled(
            "enter details · s status · c clear · r retry",
            Style::default().fg(COLOR_DIM),
        ))],
        DetailState::Loading { id } => vec![Line::from(Span::styled(
            format!("loading itinerary #{}...", id),
            Style::default().fg(COLOR_LOADING),
        ))],
        DetailState::Failed { id, message } => vec![Line::from(vec![
            Span::styled(format!("#{}: ", id), Style::default().fg(COLOR_DIM)),
            Span::styled(message.clone(), Style::default().fg(COLOR_ERROR)),
        ])],
        DetailState::Loaded(detail) => detail_lines(detail),
    };

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(COLOR_DIM));
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

fn detail_lines(detail: &ItineraryDetail) -> Vec<Line<'static>> {
    let it = &detail.itinerary;
    let name = it
        .tour_name
        .clone()
        .unwrap_or_else(|| format!("Itinerary #{}", it.id));

    let rating = match detail.average_rating_value() {
        Some(avg) => format!("{:.1}/5 ({} reviews)", avg, detail.review_count),
        None => "no reviews yet".to_string(),
    };

    let mut extras = Vec::new();
    if !detail.price.is_empty() {
        extras.push(format!("R$ {}", detail.price));
    }
    if detail.includes_meal {
        extras.push("meal included".to_string());
    }
    if detail.includes_transport {
        extras.push("transport included".to_string());
    }

    let mut lines = vec![
        Line::from(vec![
            Span::styled(name, Style::default().fg(COLOR_HEADER).add_modifier(Modifier::BOLD)),
            Span::styled(format!("  {}", rating), Style::default().fg(Color::Yellow)),
        ]),
        Line::from(Span::styled(
            format!("{} · {} slots · {}", it.day(), it.available_slots, it.status.label()),
            Style::default().fg(COLOR_DIM),
        )),
    ];
    if !extras.is_empty() {
        lines.push(Line::from(Span::raw(extras.join(" · "))));
    }
    let description = it
        .tour_description
        .as_deref()
        .filter(|d| !d.is_empty())
        .unwrap_or(&detail.destination_description);
    if !description.is_empty() {
        lines.push(Line::from(Span::raw(description.to_string())));
    }
    if let Some(review) = detail.reviews.first() {
        lines.push(Line::from(Span::styled(
            format!("\"{}\" - {}", review.comment, review.reviewer_name),
            Style::default().fg(COLOR_DIM),
        )));
    }
    lines
}
