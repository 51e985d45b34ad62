//! Pagination state for one attached listing.
//!
//! [`ListState`] is read-only outside this crate. The controller is the only
//! writer, and it writes through the small set of transitions defined here.

/// Message shown when a failed fetch carries no message of its own.
pub const DEFAULT_ERROR_MESSAGE: &str = "Failed to load more items";

/// Coarse state of a listing, derived from [`ListState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListPhase {
    /// Nothing in flight; more pages may or may not exist.
    Idle,
    /// A page fetch is outstanding.
    Loading,
    /// The last fetch failed; the next `load_more` retries it.
    Error,
}

/// Items loaded so far plus the bookkeeping needed to fetch the next page.
#[derive(Debug, Clone, PartialEq)]
pub struct ListState<T> {
    items: Vec<T>,
    page: u32,
    loading: bool,
    has_more: bool,
    error: Option<String>,
    /// A page has been applied since the last reset
    loaded: bool,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ListState<T> {
    /// Fresh state: no items, next page is 1, more pages assumed.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            page: 1,
            loading: false,
            has_more: true,
            error: None,
            loaded: false,
        }
    }

    /// Items in arrival order across pages.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Next page an incremental load will request.
    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn phase(&self) -> ListPhase {
        if self.loading {
            ListPhase::Loading
        } else if self.error.is_some() {
            ListPhase::Error
        } else {
            ListPhase::Idle
        }
    }

    /// True while a fetch is outstanding and no page of the current session
    /// has landed yet. A retry after a failed first page counts as well.
    pub fn is_initial_load(&self) -> bool {
        self.loading && !self.loaded
    }

    /// True once the source reported no further pages and nothing is in flight.
    pub fn is_exhausted(&self) -> bool {
        !self.has_more && !self.loading
    }

    /// At least one page landed, nothing is in flight, no error, no items.
    pub fn is_empty_result(&self) -> bool {
        self.loaded && !self.loading && self.error.is_none() && self.items.is_empty()
    }

    pub(crate) fn reset(&mut self) {
        self.items.clear();
        self.page = 1;
        self.loading = false;
        self.has_more = true;
        self.error = None;
        self.loaded = false;
    }

    pub(crate) fn begin_load(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// First page of a session: replace items, next request is page 2.
    pub(crate) fn apply_initial(&mut self, items: Vec<T>, has_more: bool) {
        self.items = items;
        self.has_more = has_more;
        self.page = 2;
        self.loading = false;
        self.loaded = true;
    }

    /// Any later page: append and advance past the page that was fetched.
    pub(crate) fn apply_incremental(&mut self, fetched_page: u32, items: Vec<T>, has_more: bool) {
        self.items.extend(items);
        self.has_more = has_more;
        self.page = fetched_page + 1;
        self.loading = false;
        self.loaded = true;
    }

    /// Record a failure. Items, page and has_more stay as they were.
    pub(crate) fn apply_failure(&mut self, message: &str) {
        self.loading = false;
        self.error = Some(if message.trim().is_empty() {
            DEFAULT_ERROR_MESSAGE.to_string()
        } else {
            message.to_string()
        });
    }

    pub(crate) fn items_mut(&mut self) -> &mut Vec<T> {
        &mut self.items
    }
}
