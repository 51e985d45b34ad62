//! Scripted page source for testing list loading.
//!
//! Pages are answered from per-page queues of canned results. Individual
//! pages can be held open with a [`PageGate`] so tests control exactly when
//! a fetch resolves.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

use crate::error::FetchError;
use crate::models::FetchResult;
use crate::traits::PageSource;

type ScriptedResult<T> = Result<FetchResult<T>, FetchError>;

/// Holds a page fetch open until released or dropped.
#[derive(Debug)]
pub struct PageGate {
    tx: oneshot::Sender<()>,
}

impl PageGate {
    /// Let the held fetch complete.
    pub fn release(self) {
        let _ = self.tx.send(());
    }
}

/// Page source answering from scripted results.
///
/// Each page has a queue of results. A fetch pops the front of the queue,
/// except that the last result stays in place and is repeated.
///
/// # Example
///
/// ```ignore
/// use voyage::adapters::mock::ScriptedPageSource;
/// use voyage::models::FetchResult;
///
/// let source = ScriptedPageSource::new()
///     .with_page(1, FetchResult::more(vec![1, 2, 3]))
///     .with_page(2, FetchResult::last(vec![4, 5]));
/// ```
#[derive(Debug, Clone)]
pub struct ScriptedPageSource<T> {
    pages: Arc<Mutex<HashMap<u32, VecDeque<ScriptedResult<T>>>>>,
    gates: Arc<Mutex<HashMap<u32, oneshot::Receiver<()>>>>,
    calls: Arc<Mutex<Vec<u32>>>,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
}

impl<T: Clone> ScriptedPageSource<T> {
    pub fn new() -> Self {
        Self {
            pages: Arc::new(Mutex::new(HashMap::new())),
            gates: Arc::new(Mutex::new(HashMap::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            in_flight: Arc::new(AtomicUsize::new(0)),
            max_in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Queue a successful result for `page`.
    pub fn with_page(self, page: u32, result: FetchResult<T>) -> Self {
        self.push(page, Ok(result));
        self
    }

    /// Queue a failure for `page`.
    pub fn with_error(self, page: u32, error: FetchError) -> Self {
        self.push(page, Err(error));
        self
    }

    /// Queue any result for `page`.
    pub fn push(&self, page: u32, result: ScriptedResult<T>) {
        let mut pages = self.pages.lock().unwrap();
        pages.entry(page).or_default().push_back(result);
    }

    /// Hold the next fetch of `page` open until the returned gate is
    /// released or dropped.
    pub fn hold_page(&self, page: u32) -> PageGate {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(page, rx);
        PageGate { tx }
    }

    /// Pages requested so far, in call order.
    pub fn calls(&self) -> Vec<u32> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Highest number of fetches that were outstanding at the same time.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    fn next_result(&self, page: u32) -> ScriptedResult<T> {
        let mut pages = self.pages.lock().unwrap();
        match pages.get_mut(&page) {
            Some(queue) if queue.len() > 1 => queue
                .pop_front()
                .unwrap_or_else(|| Err(FetchError::other("empty script"))),
            Some(queue) => queue
                .front()
                .cloned()
                .unwrap_or_else(|| Err(FetchError::other("empty script"))),
            None => Err(FetchError::other(format!(
                "no scripted response for page {}",
                page
            ))),
        }
    }
}

impl<T: Clone> Default for ScriptedPageSource<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T> PageSource<T> for ScriptedPageSource<T>
where
    T: Clone + Send + Sync + 'static,
{
    async fn fetch_page(&self, page: u32) -> Result<FetchResult<T>, FetchError> {
        self.calls.lock().unwrap().push(page);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let gate = self.gates.lock().unwrap().remove(&page);
        if let Some(gate) = gate {
            // A dropped gate releases the fetch as well.
            let _ = gate.await;
        }

        let result = self.next_result(page);
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripted_pages_and_calls() {
        let source = ScriptedPageSource::new()
            .with_page(1, FetchResult::more(vec!["a"]))
            .with_page(2, FetchResult::last(vec!["b"]));

        assert_eq!(source.fetch_page(1).await.unwrap().items, vec!["a"]);
        assert!(!source.fetch_page(2).await.unwrap().has_more);
        assert!(source.fetch_page(3).await.is_err());
        assert_eq!(source.calls(), vec![1, 2, 3]);
        assert_eq!(source.max_in_flight(), 1);
    }

    #[tokio::test]
    async fn test_queue_pops_then_repeats_last() {
        let source = ScriptedPageSource::new()
            .with_error(2, FetchError::other("flaky"))
            .with_page(2, FetchResult::last(vec![7]));

        assert!(source.fetch_page(2).await.is_err());
        assert_eq!(source.fetch_page(2).await.unwrap().items, vec![7]);
        assert_eq!(source.fetch_page(2).await.unwrap().items, vec![7]);
    }

    #[tokio::test]
    async fn test_held_page_waits_for_release() {
        let source = ScriptedPageSource::new().with_page(1, FetchResult::last(vec![1u32]));
        let gate = source.hold_page(1);

        let task = {
            let source = source.clone();
            tokio::spawn(async move { source.fetch_page(1).await })
        };
        tokio::task::yield_now().await;
        assert!(!task.is_finished());

        gate.release();
        let page = task.await.unwrap().unwrap();
        assert_eq!(page.items, vec![1]);
    }
}
