//! Messages exchanged between the list controller and its fetch tasks.

use crate::error::FetchError;
use crate::models::FetchResult;

/// Which code path a page request belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadKind {
    /// First page of a session: replaces items.
    Initial,
    /// Any later page: appends items.
    Incremental,
}

/// A page the controller asked its source for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub kind: LoadKind,
}

impl PageRequest {
    pub fn initial() -> Self {
        Self {
            page: 1,
            kind: LoadKind::Initial,
        }
    }

    pub fn incremental(page: u32) -> Self {
        Self {
            page,
            kind: LoadKind::Incremental,
        }
    }
}

/// Result of a fetch task, tagged with the session it was started in.
#[derive(Debug)]
pub struct PageOutcome<T> {
    pub epoch: u64,
    pub request: PageRequest,
    pub result: Result<FetchResult<T>, FetchError>,
}

/// What a call to `load_more` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A fetch for this page was started.
    Dispatched { page: u32 },
    /// A fetch is already outstanding; nothing happened.
    InFlight,
    /// The source reported no more pages; nothing happened.
    Exhausted,
    /// No source is attached; nothing happened.
    Detached,
}

impl DispatchOutcome {
    pub fn is_dispatched(&self) -> bool {
        matches!(self, DispatchOutcome::Dispatched { .. })
    }
}

/// What applying a [`PageOutcome`] did to the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// First page replaced the items.
    Replaced { count: usize },
    /// A later page was appended.
    Appended { count: usize },
    /// The fetch failed and the error was recorded.
    Failed,
    /// The outcome belonged to an earlier session and was dropped.
    StaleDiscarded,
}
