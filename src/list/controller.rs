//! Incremental list controller.
//!
//! Drives page-by-page loading of one listing from a [`PageSource`]:
//!
//! - `attach` starts a session for a reset key and fetches page 1,
//! - `load_more` fetches the next page unless one is in flight or the
//!   source is exhausted,
//! - scroll signals call `load_more` when the viewport nears the bottom,
//! - a new reset key starts a new session and invalidates the old one.
//!
//! Fetches run as tokio tasks. Each task reports a [`PageOutcome`] tagged
//! with the epoch it was started in; the host feeds outcomes back through
//! [`IncrementalListController::handle_outcome`], which drops any outcome
//! whose epoch is no longer current.

use std::any::Any;
use std::fmt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use super::messages::{ApplyOutcome, DispatchOutcome, LoadKind, PageOutcome, PageRequest};
use super::scroll::{ScrollMetrics, DEFAULT_NEAR_BOTTOM_THRESHOLD};
use super::state::{ListPhase, ListState};
use crate::error::FetchError;
use crate::traits::PageSource;

/// Shared handle to a page source.
pub type SharedPageSource<T> = Arc<dyn PageSource<T>>;

/// Pagination controller for a single listing.
///
/// `K` is the reset key: any equality-comparable value, typically the
/// serialized filter set. All methods take `&mut self` and are expected to
/// be called from the host's event loop; dispatching a fetch requires a
/// tokio runtime.
pub struct IncrementalListController<T: Send + 'static, K = String> {
    state: ListState<T>,
    source: Option<SharedPageSource<T>>,
    reset_key: Option<K>,
    epoch: u64,
    threshold: u32,
    outcome_tx: mpsc::UnboundedSender<PageOutcome<T>>,
    outcome_rx: Option<mpsc::UnboundedReceiver<PageOutcome<T>>>,
}

impl<T, K> Default for IncrementalListController<T, K>
where
    T: Send + 'static,
    K: PartialEq + fmt::Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, K> IncrementalListController<T, K>
where
    T: Send + 'static,
    K: PartialEq + fmt::Debug,
{
    /// Create a detached controller with the default near-bottom threshold.
    pub fn new() -> Self {
        Self::with_threshold(DEFAULT_NEAR_BOTTOM_THRESHOLD)
    }

    /// Create a detached controller with a custom near-bottom threshold.
    pub fn with_threshold(threshold: u32) -> Self {
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        Self {
            state: ListState::new(),
            source: None,
            reset_key: None,
            epoch: 0,
            threshold,
            outcome_tx,
            outcome_rx: Some(outcome_rx),
        }
    }

    pub fn state(&self) -> &ListState<T> {
        &self.state
    }

    pub fn items(&self) -> &[T] {
        self.state.items()
    }

    pub fn page(&self) -> u32 {
        self.state.page()
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    pub fn has_more(&self) -> bool {
        self.state.has_more()
    }

    pub fn error(&self) -> Option<&str> {
        self.state.error()
    }

    pub fn phase(&self) -> ListPhase {
        self.state.phase()
    }

    /// Current session number. Bumped by every attach, reset and detach.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn reset_key(&self) -> Option<&K> {
        self.reset_key.as_ref()
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    pub fn is_attached(&self) -> bool {
        self.source.is_some()
    }

    /// Start a new session for `key` and fetch page 1 immediately.
    ///
    /// Any fetch still outstanding from an earlier session is ignored when it
    /// resolves.
    pub fn attach(&mut self, source: SharedPageSource<T>, key: K) -> DispatchOutcome {
        self.epoch += 1;
        info!(epoch = self.epoch, reset_key = ?key, "List session started");

        self.state.reset();
        self.source = Some(source);
        self.reset_key = Some(key);
        self.dispatch(PageRequest::initial())
    }

    /// Attach only if `key` differs from the current reset key.
    ///
    /// Returns true when a new session was started. With an unchanged key the
    /// supplied source is dropped and the running session continues.
    pub fn sync_reset_key(&mut self, source: SharedPageSource<T>, key: K) -> bool {
        if self.source.is_some() && self.reset_key.as_ref() == Some(&key) {
            return false;
        }
        self.attach(source, key);
        true
    }

    /// Request the next page.
    ///
    /// Returns without side effects if a fetch is in flight or the source
    /// has reported its last page.
    pub fn load_more(&mut self) -> DispatchOutcome {
        if self.source.is_none() {
            return DispatchOutcome::Detached;
        }
        if self.state.is_loading() {
            return DispatchOutcome::InFlight;
        }
        if !self.state.has_more() {
            return DispatchOutcome::Exhausted;
        }
        self.dispatch(PageRequest::incremental(self.state.page()))
    }

    /// Host signal that the viewport is near the end of the content.
    ///
    /// May fire many times per gesture; the in-flight guard of
    /// [`load_more`](Self::load_more) absorbs the repeats.
    pub fn on_scroll_near_bottom(&mut self) -> DispatchOutcome {
        self.load_more()
    }

    /// Evaluate a scroll position against the threshold.
    ///
    /// Returns `None` when the viewport is not near the bottom.
    pub fn on_scroll(&mut self, metrics: ScrollMetrics) -> Option<DispatchOutcome> {
        if metrics.is_near_bottom(self.threshold) {
            Some(self.on_scroll_near_bottom())
        } else {
            None
        }
    }

    /// Explicit retry after a failure, for views where no further scroll
    /// event will arrive.
    pub fn retry(&mut self) -> DispatchOutcome {
        if let Some(error) = self.state.error() {
            info!(epoch = self.epoch, error, "Retrying failed page");
        }
        self.load_more()
    }

    /// End the session. Outstanding fetches become stale.
    pub fn detach(&mut self) {
        self.epoch += 1;
        debug!(epoch = self.epoch, "List detached");
        self.source = None;
        self.reset_key = None;
        self.state.reset();
    }

    /// Edit the loaded items in place without touching pagination.
    pub fn replace_items<F>(&mut self, f: F)
    where
        F: FnOnce(&mut Vec<T>),
    {
        f(self.state.items_mut());
    }

    /// Hand the outcome receiver to a host that polls it in its own loop.
    ///
    /// Returns `None` if it was already taken.
    pub fn take_outcome_rx(&mut self) -> Option<mpsc::UnboundedReceiver<PageOutcome<T>>> {
        self.outcome_rx.take()
    }

    /// Wait for the next fetch outcome and apply it.
    ///
    /// Returns `None` if the receiver was handed out with
    /// [`take_outcome_rx`](Self::take_outcome_rx).
    pub async fn process_next(&mut self) -> Option<ApplyOutcome> {
        let outcome = self.outcome_rx.as_mut()?.recv().await?;
        Some(self.handle_outcome(outcome))
    }

    /// Apply a fetch outcome to the list.
    ///
    /// Outcomes from an earlier epoch change nothing.
    pub fn handle_outcome(&mut self, outcome: PageOutcome<T>) -> ApplyOutcome {
        let PageOutcome {
            epoch,
            request,
            result,
        } = outcome;

        if epoch != self.epoch {
            debug!(
                outcome_epoch = epoch,
                current_epoch = self.epoch,
                page = request.page,
                "Discarding stale page outcome"
            );
            return ApplyOutcome::StaleDiscarded;
        }

        match result {
            Ok(page) => {
                let count = page.items.len();
                debug!(
                    epoch,
                    page = request.page,
                    count,
                    has_more = page.has_more,
                    "Page loaded"
                );
                match request.kind {
                    LoadKind::Initial => {
                        self.state.apply_initial(page.items, page.has_more);
                        ApplyOutcome::Replaced { count }
                    }
                    LoadKind::Incremental => {
                        self.state
                            .apply_incremental(request.page, page.items, page.has_more);
                        ApplyOutcome::Appended { count }
                    }
                }
            }
            Err(err) => {
                warn!(
                    epoch,
                    page = request.page,
                    code = err.error_code(),
                    "Page fetch failed: {}",
                    err
                );
                self.state.apply_failure(&err.user_message());
                ApplyOutcome::Failed
            }
        }
    }

    fn dispatch(&mut self, request: PageRequest) -> DispatchOutcome {
        let Some(source) = self.source.clone() else {
            return DispatchOutcome::Detached;
        };

        self.state.begin_load();
        let epoch = self.epoch;
        let tx = self.outcome_tx.clone();
        debug!(epoch, page = request.page, kind = ?request.kind, "Dispatching page fetch");

        tokio::spawn(async move {
            // A panicking source still has to report back, or `loading`
            // would never clear.
            let result = match AssertUnwindSafe(source.fetch_page(request.page))
                .catch_unwind()
                .await
            {
                Ok(result) => result,
                Err(payload) => {
                    let message = panic_message(payload.as_ref());
                    error!(epoch, page = request.page, "Page source panicked: {}", message);
                    Err(FetchError::other(format!("Page source failed: {}", message)))
                }
            };
            // The controller owns the receiver; a send error means it is gone.
            let _ = tx.send(PageOutcome {
                epoch,
                request,
                result,
            });
        });

        DispatchOutcome::Dispatched { page: request.page }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::state::DEFAULT_ERROR_MESSAGE;
    use crate::models::FetchResult;

    fn numbers(pages: u32) -> SharedPageSource<u32> {
        Arc::new(move |page: u32| async move {
            let start = (page - 1) * 3 + 1;
            Ok::<_, FetchError>(FetchResult::new(
                (start..start + 3).collect(),
                page < pages,
            ))
        })
    }

    #[tokio::test]
    async fn test_detached_controller_does_nothing() {
        let mut list: IncrementalListController<u32> = IncrementalListController::new();
        assert!(!list.is_attached());
        assert_eq!(list.load_more(), DispatchOutcome::Detached);
        assert!(!list.is_loading());
    }

    #[tokio::test]
    async fn test_attach_loads_first_page() {
        let mut list = IncrementalListController::new();
        let outcome = list.attach(numbers(2), "{}".to_string());
        assert_eq!(outcome, DispatchOutcome::Dispatched { page: 1 });
        assert!(list.is_loading());
        assert_eq!(list.epoch(), 1);

        let applied = list.process_next().await;
        assert_eq!(applied, Some(ApplyOutcome::Replaced { count: 3 }));
        assert_eq!(list.items(), &[1, 2, 3]);
        assert_eq!(list.page(), 2);
    }

    #[tokio::test]
    async fn test_load_more_guards() {
        let mut list = IncrementalListController::new();
        list.attach(numbers(2), "{}".to_string());
        assert_eq!(list.load_more(), DispatchOutcome::InFlight);

        list.process_next().await;
        assert_eq!(list.load_more(), DispatchOutcome::Dispatched { page: 2 });
        list.process_next().await;

        assert!(!list.has_more());
        assert_eq!(list.load_more(), DispatchOutcome::Exhausted);
        assert_eq!(list.items(), &[1, 2, 3, 4, 5, 6]);
    }

    #[tokio::test]
    async fn test_sync_reset_key_ignores_equal_key() {
        let mut list = IncrementalListController::new();
        assert!(list.sync_reset_key(numbers(1), "a".to_string()));
        list.process_next().await;

        assert!(!list.sync_reset_key(numbers(1), "a".to_string()));
        assert_eq!(list.epoch(), 1);
        assert!(!list.is_loading());

        assert!(list.sync_reset_key(numbers(1), "b".to_string()));
        assert_eq!(list.epoch(), 2);
        assert!(list.is_loading());
        assert_eq!(list.reset_key().map(String::as_str), Some("b"));
    }

    #[tokio::test]
    async fn test_on_scroll_respects_threshold() {
        let mut list = IncrementalListController::with_threshold(10);
        list.attach(numbers(3), 0u8);
        list.process_next().await;

        assert_eq!(list.on_scroll(ScrollMetrics::new(0, 20, 100)), None);
        assert_eq!(
            list.on_scroll(ScrollMetrics::new(75, 20, 100)),
            Some(DispatchOutcome::Dispatched { page: 2 })
        );
        assert_eq!(
            list.on_scroll(ScrollMetrics::new(80, 20, 100)),
            Some(DispatchOutcome::InFlight)
        );
    }

    #[tokio::test]
    async fn test_detach_makes_in_flight_fetch_stale() {
        let mut list = IncrementalListController::new();
        list.attach(numbers(2), "{}".to_string());
        let mut rx = list.take_outcome_rx().unwrap();
        list.detach();

        let outcome = rx.recv().await.unwrap();
        assert_eq!(list.handle_outcome(outcome), ApplyOutcome::StaleDiscarded);
        assert!(list.items().is_empty());
        assert!(!list.is_loading());
        assert_eq!(list.process_next().await, None);
    }

    #[tokio::test]
    async fn test_replace_items_keeps_pagination() {
        let mut list = IncrementalListController::new();
        list.attach(numbers(2), "{}".to_string());
        list.process_next().await;

        list.replace_items(|items| items.retain(|n| n % 2 == 1));
        assert_eq!(list.items(), &[1, 3]);
        assert_eq!(list.page(), 2);
        assert!(list.has_more());
    }

    #[tokio::test]
    async fn test_failure_is_recorded_and_retry_clears_it() {
        let flaky: SharedPageSource<u32> = Arc::new(|page: u32| async move {
            if page == 2 {
                Err(FetchError::other(""))
            } else {
                Ok(FetchResult::more(vec![page]))
            }
        });
        let mut list = IncrementalListController::new();
        list.attach(flaky, ());
        list.process_next().await;

        list.load_more();
        assert_eq!(list.process_next().await, Some(ApplyOutcome::Failed));
        assert_eq!(list.phase(), ListPhase::Error);
        assert_eq!(list.error(), Some(DEFAULT_ERROR_MESSAGE));

        assert_eq!(list.retry(), DispatchOutcome::Dispatched { page: 2 });
        assert_eq!(list.error(), None);
    }
}
