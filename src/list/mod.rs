//! Incremental, scroll-driven list loading.
//!
//! [`IncrementalListController`] owns a [`ListState`] for one listing and
//! coordinates page fetches from a [`PageSource`](crate::traits::PageSource):
//! at most one fetch in flight, append on scroll, full reset when the reset
//! key changes, and stale results dropped by epoch.

pub mod controller;
pub mod messages;
pub mod scroll;
pub mod state;

pub use controller::{IncrementalListController, SharedPageSource};
pub use messages::{ApplyOutcome, DispatchOutcome, LoadKind, PageOutcome, PageRequest};
pub use scroll::{ScrollMetrics, DEFAULT_NEAR_BOTTOM_THRESHOLD};
pub use state::{ListPhase, ListState, DEFAULT_ERROR_MESSAGE};
