//! Itinerary list filters.
//!
//! A filter set is both the query of `GET /roteiros` and the reset key of the
//! itinerary list: any change to it starts a fresh list session.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::ItineraryStatus;

/// Active filters of the itinerary listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItineraryFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ItineraryStatus>,
    #[serde(rename = "data", default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(rename = "destino", default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<u64>,
    #[serde(rename = "criadorId", default, skip_serializing_if = "Option::is_none")]
    pub creator_id: Option<u64>,
}

impl ItineraryFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, status: ItineraryStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_destination(mut self, destination: u64) -> Self {
        self.destination = Some(destination);
        self
    }

    pub fn with_creator(mut self, creator_id: u64) -> Self {
        self.creator_id = Some(creator_id);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.date.is_none()
            && self.destination.is_none()
            && self.creator_id.is_none()
    }

    /// Drop every filter.
    pub fn cleared() -> Self {
        Self::default()
    }

    /// Serialized form of the active filters, used as the list reset key.
    ///
    /// Unset filters are omitted, so an empty filter set yields `{}`.
    pub fn reset_key(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Query string for `GET /roteiros` (without the leading `?`).
    ///
    /// Parameters appear in a fixed order: `page`, `limit`, then each set
    /// filter.
    pub fn to_query(&self, page: u32, limit: u32) -> String {
        let mut params = vec![format!("page={}", page), format!("limit={}", limit)];
        if let Some(status) = self.status {
            params.push(format!("status={}", status.as_str()));
        }
        if let Some(date) = self.date {
            let date = date.format("%Y-%m-%d").to_string();
            params.push(format!("data={}", urlencoding::encode(&date)));
        }
        if let Some(destination) = self.destination {
            params.push(format!("destino={}", destination));
        }
        if let Some(creator_id) = self.creator_id {
            params.push(format!("criadorId={}", creator_id));
        }
        params.join("&")
    }

    /// Short human summary for the filter bar.
    pub fn describe(&self) -> String {
        if self.is_empty() {
            return "all itineraries".to_string();
        }
        let mut parts = Vec::new();
        if let Some(status) = self.status {
            parts.push(format!("status: {}", status.label()));
        }
        if let Some(date) = self.date {
            parts.push(format!("date: {}", date.format("%Y-%m-%d")));
        }
        if let Some(destination) = self.destination {
            parts.push(format!("destination: #{}", destination));
        }
        if let Some(creator_id) = self.creator_id {
            parts.push(format!("creator: #{}", creator_id));
        }
        parts.join(", ")
    }
}
