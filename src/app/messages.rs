//! AppMessage enum for async communication within the application.

use crate::models::ItineraryDetail;

/// Messages received from async operations other than page fetches.
///
/// Page fetch results travel on the list controller's own channel.
#[derive(Debug, Clone)]
pub enum AppMessage {
    /// Detail of an itinerary arrived
    DetailLoaded {
        id: u64,
        detail: Box<ItineraryDetail>,
    },
    /// Detail request failed
    DetailFailed { id: u64, error: String },
}
