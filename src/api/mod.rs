//! Itinerary backend API.
//!
//! - [`VoyageClient`] talks to the REST endpoints
//! - [`ItineraryFilters`] is the query and reset key of the listing
//! - [`ItineraryPageSource`] feeds the list controller one page at a time

pub mod client;
pub mod filters;
pub mod source;

pub use client::{DestinationQuery, TourQuery, VoyageClient, DEFAULT_API_URL};
pub use filters::ItineraryFilters;
pub use source::{ItineraryPageSource, DEFAULT_PAGE_LIMIT};
