//! Trait abstractions for dependency injection and testability.
//!
//! - [`HttpClient`] - HTTP GET against the itinerary backend
//! - [`PageSource`] - the paged fetch function the list controller consumes

pub mod http;
pub mod page_source;

pub use http::{Headers, HttpClient, HttpError, Response};
pub use page_source::PageSource;
