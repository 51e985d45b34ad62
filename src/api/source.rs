//! Itinerary page source.
//!
//! Adapts [`VoyageClient`] to the list controller's [`PageSource`] contract.
//! Each page of itineraries is enriched with the tour it runs; tour lookups
//! for a page are issued concurrently and a failed lookup only leaves that
//! itinerary without tour details.

use async_trait::async_trait;
use futures::future::join_all;
use tracing::warn;

use super::client::{TourQuery, VoyageClient};
use super::filters::ItineraryFilters;
use crate::error::FetchError;
use crate::models::{FetchResult, Itinerary, ItineraryWithTour, Tour};
use crate::traits::PageSource;

/// Default number of itineraries per page.
pub const DEFAULT_PAGE_LIMIT: u32 = 10;

/// Page source over `GET /roteiros` for one filter set.
#[derive(Debug, Clone)]
pub struct ItineraryPageSource {
    client: VoyageClient,
    filters: ItineraryFilters,
    limit: u32,
}

impl ItineraryPageSource {
    pub fn new(client: VoyageClient, filters: ItineraryFilters) -> Self {
        Self {
            client,
            filters,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit.max(1);
        self
    }

    pub fn filters(&self) -> &ItineraryFilters {
        &self.filters
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    async fn lookup_tour(&self, itinerary: &Itinerary) -> Option<Tour> {
        let query = TourQuery {
            destination_id: Some(itinerary.tour_id),
            page: None,
            limit: Some(1),
        };
        match self.client.list_tours(&query).await {
            Ok(response) => response.items.into_iter().next(),
            Err(err) => {
                warn!(
                    itinerary_id = itinerary.id,
                    tour_id = itinerary.tour_id,
                    code = err.error_code(),
                    "Tour lookup failed: {}",
                    err
                );
                None
            }
        }
    }
}

#[async_trait]
impl PageSource<ItineraryWithTour> for ItineraryPageSource {
    async fn fetch_page(&self, page: u32) -> Result<FetchResult<ItineraryWithTour>, FetchError> {
        let response = self
            .client
            .list_itineraries(&self.filters, page, self.limit)
            .await?;
        let has_more = response.pagination.has_next;

        let tours = join_all(response.items.iter().map(|it| self.lookup_tour(it))).await;
        let items = response
            .items
            .into_iter()
            .zip(tours)
            .map(|(itinerary, tour)| ItineraryWithTour::new(itinerary, tour))
            .collect();

        Ok(FetchResult::new(items, has_more))
    }
}
