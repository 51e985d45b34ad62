//! Application state for the itinerary browser.
//!
//! [`App`] owns one [`IncrementalListController`] for the itinerary listing
//! and translates terminal input into controller calls: filter changes become
//! reset keys, cursor movement becomes [`ScrollMetrics`].

mod handlers;
mod messages;

pub use messages::AppMessage;

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::adapters::ReqwestHttpClient;
use crate::api::{ItineraryFilters, ItineraryPageSource, VoyageClient};
use crate::config::AppConfig;
use crate::list::{
    ApplyOutcome, DispatchOutcome, IncrementalListController, PageOutcome, ScrollMetrics,
    SharedPageSource,
};
use crate::models::{ItineraryDetail, ItineraryStatus, ItineraryWithTour};
use crate::traits::HttpError;

/// Rows used by the header, filter bar and spacing above the list.
pub const HEADER_ROWS: u16 = 3;
/// Rows reserved under the list for the status line and detail panel.
pub const FOOTER_ROWS: u16 = 7;
/// Rows one itinerary occupies (title, details, blank line).
pub const ROWS_PER_ITEM: u16 = 3;

/// Detail panel state for the selected itinerary.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    Hidden,
    Loading { id: u64 },
    Loaded(Box<ItineraryDetail>),
    Failed { id: u64, message: String },
}

/// Main application state.
pub struct App {
    /// Paged itinerary listing
    pub list: IncrementalListController<ItineraryWithTour>,
    /// Active filters; their reset key drives list sessions
    pub filters: ItineraryFilters,
    /// Backend client shared with fetch tasks
    pub client: VoyageClient,
    /// Itineraries requested per page
    pub page_limit: u32,
    /// Index of the highlighted itinerary
    pub selected_index: usize,
    /// Index of the first visible itinerary
    pub scroll_offset: usize,
    pub detail: DetailState,
    pub terminal_width: u16,
    pub terminal_height: u16,
    /// Receiver for async messages, taken by the event loop
    pub message_rx: Option<mpsc::UnboundedReceiver<AppMessage>>,
    /// Sender for async messages (clone this to pass to async tasks)
    pub message_tx: mpsc::UnboundedSender<AppMessage>,
    pub should_quit: bool,
    /// Redraw needed on the next loop iteration
    pub needs_redraw: bool,
}

impl App {
    /// Build the app with a reqwest-backed client configured from `config`.
    pub fn new(config: &AppConfig, filters: ItineraryFilters) -> Result<Self, HttpError> {
        let http = ReqwestHttpClient::with_timeout(config.request_timeout)?;
        let mut client = VoyageClient::with_http(&config.api_url, Arc::new(http));
        client.set_auth_token(config.auth_token.clone());
        Ok(Self::with_client(config, client, filters))
    }

    /// Build the app around an existing client.
    pub fn with_client(config: &AppConfig, client: VoyageClient, filters: ItineraryFilters) -> Self {
        let (message_tx, message_rx) = mpsc::unbounded_channel();
        Self {
            list: IncrementalListController::with_threshold(config.near_bottom_threshold),
            filters,
            client,
            page_limit: config.page_limit,
            selected_index: 0,
            scroll_offset: 0,
            detail: DetailState::Hidden,
            terminal_width: 80,
            terminal_height: 24,
            message_rx: Some(message_rx),
            message_tx,
            should_quit: false,
            needs_redraw: true,
        }
    }

    fn page_source(&self) -> SharedPageSource<ItineraryWithTour> {
        Arc::new(
            ItineraryPageSource::new(self.client.clone(), self.filters.clone())
                .with_limit(self.page_limit),
        )
    }

    /// Attach the list for the current filters if they changed.
    ///
    /// Returns true when a new list session was started.
    pub fn sync_list(&mut self) -> bool {
        let key = self.filters.reset_key();
        let source = self.page_source();
        let restarted = self.list.sync_reset_key(source, key);
        if restarted {
            self.selected_index = 0;
            self.scroll_offset = 0;
            self.detail = DetailState::Hidden;
            self.mark_dirty();
        }
        restarted
    }

    /// Replace the filters and restart the list if the key changed.
    pub fn set_filters(&mut self, filters: ItineraryFilters) {
        info!(filters = %filters.describe(), "Filters changed");
        self.filters = filters;
        self.sync_list();
    }

    /// Step the status filter through "any" and each status.
    pub fn cycle_status_filter(&mut self) {
        let mut filters = self.filters.clone();
        filters.status = ItineraryStatus::cycle(filters.status);
        self.set_filters(filters);
    }

    pub fn clear_filters(&mut self) {
        self.set_filters(ItineraryFilters::cleared());
    }

    pub fn items(&self) -> &[ItineraryWithTour] {
        self.list.items()
    }

    pub fn selected_item(&self) -> Option<&ItineraryWithTour> {
        self.list.items().get(self.selected_index)
    }

    /// Rows available to the list area.
    pub fn list_viewport_rows(&self) -> u16 {
        self.terminal_height
            .saturating_sub(HEADER_ROWS + FOOTER_ROWS)
            .max(ROWS_PER_ITEM)
    }

    /// Number of whole itineraries that fit in the list area.
    pub fn visible_items(&self) -> usize {
        (self.list_viewport_rows() / ROWS_PER_ITEM).max(1) as usize
    }

    /// Current viewport measured in rows.
    pub fn scroll_metrics(&self) -> ScrollMetrics {
        let rows = u32::from(ROWS_PER_ITEM);
        let scroll_top = u32::try_from(self.scroll_offset).unwrap_or(u32::MAX).saturating_mul(rows);
        let content = u32::try_from(self.list.items().len())
            .unwrap_or(u32::MAX)
            .saturating_mul(rows);
        ScrollMetrics::new(scroll_top, u32::from(self.list_viewport_rows()), content)
    }

    /// Report the viewport to the list controller.
    pub fn check_scroll(&mut self) -> Option<DispatchOutcome> {
        let metrics = self.scroll_metrics();
        let outcome = self.list.on_scroll(metrics);
        if let Some(outcome) = outcome {
            debug!(?metrics, ?outcome, "Near bottom");
            if outcome.is_dispatched() {
                self.mark_dirty();
            }
        }
        outcome
    }

    /// Move the selection by `delta` items and keep it visible.
    pub fn move_selection(&mut self, delta: isize) {
        let len = self.list.items().len();
        if len > 0 {
            let max = (len - 1) as isize;
            let next = (self.selected_index as isize + delta).clamp(0, max);
            self.selected_index = next as usize;
            self.ensure_selection_visible();
        }
        self.mark_dirty();
        self.check_scroll();
    }

    pub fn page_down(&mut self) {
        self.move_selection(self.visible_items() as isize);
    }

    pub fn page_up(&mut self) {
        self.move_selection(-(self.visible_items() as isize));
    }

    fn ensure_selection_visible(&mut self) {
        let visible = self.visible_items();
        if self.selected_index < self.scroll_offset {
            self.scroll_offset = self.selected_index;
        } else if self.selected_index >= self.scroll_offset + visible {
            self.scroll_offset = self.selected_index + 1 - visible;
        }
    }

    /// Explicit retry of a failed page.
    pub fn retry(&mut self) -> DispatchOutcome {
        let outcome = self.list.retry();
        self.mark_dirty();
        outcome
    }

    /// Fetch the detail of the selected itinerary in the background.
    pub fn open_detail(&mut self) {
        let Some(id) = self.selected_item().map(|item| item.itinerary.id) else {
            return;
        };
        if matches!(&self.detail, DetailState::Loaded(d) if d.itinerary.id == id) {
            return;
        }

        self.detail = DetailState::Loading { id };
        self.mark_dirty();

        let client = self.client.clone();
        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            let message = match client.fetch_itinerary_detail(id).await {
                Ok(detail) => AppMessage::DetailLoaded {
                    id,
                    detail: Box::new(detail),
                },
                Err(err) => AppMessage::DetailFailed {
                    id,
                    error: err.user_message(),
                },
            };
            let _ = tx.send(message);
        });
    }

    pub fn close_detail(&mut self) {
        self.detail = DetailState::Hidden;
        self.mark_dirty();
    }

    /// Apply a page fetch outcome from the list's channel.
    pub fn handle_page_outcome(&mut self, outcome: PageOutcome<ItineraryWithTour>) -> ApplyOutcome {
        let applied = self.list.handle_outcome(outcome);
        if applied != ApplyOutcome::StaleDiscarded {
            let len = self.list.items().len();
            if self.selected_index >= len {
                self.selected_index = len.saturating_sub(1);
            }
            self.mark_dirty();
        }
        applied
    }

    /// Handle a message from a background task.
    pub fn handle_message(&mut self, message: AppMessage) {
        match message {
            AppMessage::DetailLoaded { id, detail } => {
                if self.detail == (DetailState::Loading { id }) {
                    self.detail = DetailState::Loaded(detail);
                    self.mark_dirty();
                }
            }
            AppMessage::DetailFailed { id, error } => {
                if self.detail == (DetailState::Loading { id }) {
                    self.detail = DetailState::Failed { id, message: error };
                    self.mark_dirty();
                }
            }
        }
    }

    pub fn update_terminal_dimensions(&mut self, width: u16, height: u16) {
        self.terminal_width = width;
        self.terminal_height = height;
        self.ensure_selection_visible();
        self.mark_dirty();
    }

    pub fn mark_dirty(&mut self) {
        self.needs_redraw = true;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockHttpClient, MockResponse};
    use crate::list::ListPhase;
    use crate::traits::Response;

    fn itinerary(id: u64) -> serde_json::Value {
        serde_json::json!({"id": id, "passeio_id": id * 10, "status": "agendado", "passeio_nome": format!("Tour {}", id)})
    }

    fn app_with(mock: &MockHttpClient, height: u16) -> App {
        let config = AppConfig::default().with_page_limit(5).with_near_bottom_threshold(0);
        let client = VoyageClient::with_http("http://api.test", Arc::new(mock.clone()));
        let mut app = App::with_client(&config, client, ItineraryFilters::new());
        app.update_terminal_dimensions(80, height);
        app
    }

    fn page_response(ids: std::ops::RangeInclusive<u64>, has_next: bool) -> MockResponse {
        let items: Vec<_> = ids.map(itinerary).collect();
        MockResponse::Success(Response::json_body(
            200,
            &serde_json::json!({"roteiros": items, "pagination": {"hasNext": has_next}}),
        ))
    }

    fn mock_backend() -> MockHttpClient {
        let mock = MockHttpClient::new();
        mock.set_response("http://api.test/roteiros?page=1&limit=5", page_response(1..=5, true));
        mock.set_response("http://api.test/roteiros?page=2&limit=5", page_response(6..=8, false));
        mock.set_response(
            "http://api.test/passeios",
            MockResponse::Success(Response::json_body(200, &serde_json::json!({"passeios": []}))),
        );
        mock
    }

    #[tokio::test]
    async fn test_sync_list_loads_first_page_once() {
        let mock = mock_backend();
        let mut app = app_with(&mock, 40);

        assert!(app.sync_list());
        assert!(!app.sync_list());
        assert_eq!(app.list.process_next().await, Some(ApplyOutcome::Replaced { count: 5 }));
        assert_eq!(app.items().len(), 5);
        assert_eq!(app.items()[0].title(), "Tour 1");
    }

    #[tokio::test]
    async fn test_scrolling_to_end_loads_next_page() {
        let mock = mock_backend();
        // 3 visible items: 19 - 3 - 7 = 9 rows
        let mut app = app_with(&mock, 19);
        app.sync_list();
        app.list.process_next().await;
        assert_eq!(app.visible_items(), 3);

        app.move_selection(1);
        assert!(!app.list.is_loading());

        app.move_selection(3);
        assert_eq!(app.scroll_offset, 2);
        assert!(app.list.is_loading());
        assert_eq!(app.list.process_next().await, Some(ApplyOutcome::Appended { count: 3 }));
        assert_eq!(app.items().len(), 8);
        assert!(!app.list.has_more());
    }

    #[tokio::test]
    async fn test_default_threshold_waits_for_the_last_items() {
        let mock = MockHttpClient::new();
        mock.set_response("http://api.test/roteiros?page=1&limit=20", page_response(1..=20, true));
        mock.set_response(
            "http://api.test/passeios",
            MockResponse::Success(Response::json_body(200, &serde_json::json!({"passeios": []}))),
        );
        let config = AppConfig::default().with_page_limit(20);
        let client = VoyageClient::with_http("http://api.test", Arc::new(mock.clone()));
        let mut app = App::with_client(&config, client, ItineraryFilters::new());
        // 30 list rows: 10 visible items out of 60 rows of content
        app.update_terminal_dimensions(80, 40);
        app.sync_list();
        app.list.process_next().await;

        app.move_selection(1);
        app.page_down();
        assert_eq!(app.scroll_offset, 2);
        assert!(!app.list.is_loading());

        app.move_selection(8);
        assert_eq!(app.scroll_offset, 10);
        assert!(app.list.is_loading());
    }

    #[tokio::test]
    async fn test_filter_change_restarts_list() {
        let mock = mock_backend();
        mock.set_response(
            "http://api.test/roteiros?page=1&limit=5&status=agendado",
            page_response(1..=1, false),
        );
        let mut app = app_with(&mock, 40);
        app.sync_list();
        let first_epoch = app.list.epoch();

        app.cycle_status_filter();
        assert_eq!(app.filters.status, Some(ItineraryStatus::Scheduled));
        assert_eq!(app.list.epoch(), first_epoch + 1);

        // The first session's page is stale by now, whichever lands first
        let mut applied = vec![
            app.list.process_next().await.unwrap(),
            app.list.process_next().await.unwrap(),
        ];
        applied.sort_by_key(|a| matches!(a, ApplyOutcome::StaleDiscarded));
        assert_eq!(
            applied,
            vec![ApplyOutcome::Replaced { count: 1 }, ApplyOutcome::StaleDiscarded]
        );
        assert_eq!(app.items().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_page_then_retry() {
        let mock = MockHttpClient::new();
        mock.set_default_response(MockResponse::Success(Response::json_body(
            500,
            &serde_json::json!({}),
        )));
        let mut app = app_with(&mock, 40);
        app.sync_list();
        assert_eq!(app.list.process_next().await, Some(ApplyOutcome::Failed));
        assert_eq!(app.list.phase(), ListPhase::Error);
        assert!(app.list.error().is_some());

        // The initial page failed, so the retry requests page 1 again.
        assert_eq!(app.retry(), DispatchOutcome::Dispatched { page: 1 });
    }

    #[tokio::test]
    async fn test_detail_roundtrip_ignores_other_ids() {
        let mock = mock_backend();
        mock.set_response(
            "http://api.test/roteiros/1",
            MockResponse::Success(Response::json_body(
                200,
                &serde_json::json!({"roteiro": {"id": 1, "passeio_id": 10, "status": "agendado", "avaliacao_media": "4.5"}}),
            )),
        );
        let mut app = app_with(&mock, 40);
        app.sync_list();
        app.list.process_next().await;

        app.open_detail();
        assert_eq!(app.detail, DetailState::Loading { id: 1 });

        let mut rx = app.message_rx.take().unwrap();
        app.handle_message(AppMessage::DetailFailed {
            id: 99,
            error: "late".to_string(),
        });
        assert_eq!(app.detail, DetailState::Loading { id: 1 });

        let message = rx.recv().await.unwrap();
        app.handle_message(message);
        match &app.detail {
            DetailState::Loaded(detail) => assert_eq!(detail.average_rating_value(), Some(4.5)),
            other => panic!("unexpected detail state: {:?}", other),
        }
    }
}
