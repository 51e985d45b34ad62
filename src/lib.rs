//! voyage - terminal itinerary browser with an incremental list loader
//!
//! The core is [`list::IncrementalListController`], a scroll-driven paged
//! loader that any host can drive. The rest of the crate is one such host: a
//! ratatui browser over the itinerary REST API.
//!
//! This library exposes modules for use in integration tests.

pub mod adapters;
pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod list;
pub mod models;
pub mod tracing_setup;
pub mod traits;
pub mod ui;
