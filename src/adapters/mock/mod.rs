//! Mock implementations for testing.
//!
//! # Available Mocks
//!
//! - [`MockHttpClient`] - HTTP client with configurable responses
//! - [`ScriptedPageSource`] - page source with canned pages and gating

pub mod http;
pub mod pages;

pub use http::{MockHttpClient, MockResponse, RecordedRequest};
pub use pages::{PageGate, ScriptedPageSource};
