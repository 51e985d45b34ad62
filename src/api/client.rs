//! HTTP client for the itinerary backend.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::debug;

use super::filters::ItineraryFilters;
use crate::adapters::ReqwestHttpClient;
use crate::error::{classify_http_error, FetchError};
use crate::models::{ApiListResponse, Destination, ItineraryDetail, ItineraryDetailResponse, Itinerary, Tour};
use crate::traits::{Headers, HttpClient};

/// Default backend URL.
pub const DEFAULT_API_URL: &str = "http://localhost:3000";

/// Query of `GET /passeios`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TourQuery {
    pub destination_id: Option<u64>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl TourQuery {
    fn to_query(&self) -> String {
        let mut params = Vec::new();
        if let Some(page) = self.page {
            params.push(format!("page={}", page));
        }
        if let Some(limit) = self.limit {
            params.push(format!("limit={}", limit));
        }
        if let Some(destination_id) = self.destination_id {
            params.push(format!("destino_id={}", destination_id));
        }
        params.join("&")
    }
}

/// Query of `GET /destinos`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DestinationQuery {
    pub state: Option<String>,
    pub city: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl DestinationQuery {
    fn to_query(&self) -> String {
        let mut params = Vec::new();
        if let Some(page) = self.page {
            params.push(format!("page={}", page));
        }
        if let Some(limit) = self.limit {
            params.push(format!("limit={}", limit));
        }
        if let Some(state) = self.state.as_deref().filter(|s| !s.is_empty()) {
            params.push(format!("estado={}", urlencoding::encode(state)));
        }
        if let Some(city) = self.city.as_deref().filter(|c| !c.is_empty()) {
            params.push(format!("cidade={}", urlencoding::encode(city)));
        }
        params.join("&")
    }
}

/// Client for the itinerary, tour and destination endpoints.
#[derive(Clone)]
pub struct VoyageClient {
    /// Base URL of the backend, without trailing slash
    pub base_url: String,
    http: Arc<dyn HttpClient>,
    /// Optional token sent as `Authorization: Bearer`
    auth_token: Option<String>,
}

impl std::fmt::Debug for VoyageClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VoyageClient")
            .field("base_url", &self.base_url)
            .field("authenticated", &self.auth_token.is_some())
            .finish()
    }
}

impl VoyageClient {
    /// Client for `base_url` using the reqwest transport.
    pub fn new(base_url: &str) -> Self {
        Self::with_http(base_url, Arc::new(ReqwestHttpClient::new()))
    }

    /// Client for `base_url` over an arbitrary transport.
    pub fn with_http(base_url: &str, http: Arc<dyn HttpClient>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
            auth_token: None,
        }
    }

    /// Set the authentication token for Bearer auth.
    pub fn with_auth(mut self, token: &str) -> Self {
        self.auth_token = Some(token.to_string());
        self
    }

    pub fn set_auth_token(&mut self, token: Option<String>) {
        self.auth_token = token;
    }

    pub fn auth_token(&self) -> Option<&str> {
        self.auth_token.as_deref()
    }

    fn headers(&self) -> Headers {
        let mut headers = Headers::new();
        headers.insert("Accept".to_string(), "application/json".to_string());
        if let Some(ref token) = self.auth_token {
            headers.insert("Authorization".to_string(), format!("Bearer {}", token));
        }
        headers
    }

    fn url(&self, path: &str, query: &str) -> String {
        if query.is_empty() {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}{}?{}", self.base_url, path, query)
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        debug!(url, "GET");
        let response = self
            .http
            .get(url, &self.headers())
            .await
            .map_err(|e| classify_http_error(e, url))?;
        debug!(url, status = response.status, "Response received");

        if !response.is_success() {
            let message = response
                .text()
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(FetchError::HttpStatus {
                status: response.status,
                message,
            });
        }

        Ok(response.json::<T>()?)
    }

    /// `GET /roteiros?page&limit&...filters`
    pub async fn list_itineraries(
        &self,
        filters: &ItineraryFilters,
        page: u32,
        limit: u32,
    ) -> Result<ApiListResponse<Itinerary>, FetchError> {
        let url = self.url("/roteiros", &filters.to_query(page, limit));
        self.get_json(&url).await
    }

    /// `GET /passeios?page&limit&destino_id`
    pub async fn list_tours(&self, query: &TourQuery) -> Result<ApiListResponse<Tour>, FetchError> {
        let url = self.url("/passeios", &query.to_query());
        self.get_json(&url).await
    }

    /// `GET /destinos?page&limit&estado&cidade`
    pub async fn list_destinations(
        &self,
        query: &DestinationQuery,
    ) -> Result<ApiListResponse<Destination>, FetchError> {
        let url = self.url("/destinos", &query.to_query());
        self.get_json(&url).await
    }

    /// `GET /roteiros/{id}`
    pub async fn fetch_itinerary_detail(&self, id: u64) -> Result<ItineraryDetail, FetchError> {
        let url = self.url(&format!("/roteiros/{}", id), "");
        let envelope: ItineraryDetailResponse = self.get_json(&url).await?;
        Ok(envelope.itinerary)
    }
}
