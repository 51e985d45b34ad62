//! Page-level wire and contract types.

use serde::Deserialize;

/// One page returned by a page source.
///
/// This is the whole contract between the list controller and whatever
/// supplies its data: the items of the page and whether another page
/// exists after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResult<T> {
    pub items: Vec<T>,
    pub has_more: bool,
}

impl<T> FetchResult<T> {
    pub fn new(items: Vec<T>, has_more: bool) -> Self {
        Self { items, has_more }
    }

    /// A page followed by at least one more.
    pub fn more(items: Vec<T>) -> Self {
        Self::new(items, true)
    }

    /// The final page of the listing.
    pub fn last(items: Vec<T>) -> Self {
        Self::new(items, false)
    }
}

/// Pagination block the backend attaches to every list response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaginationInfo {
    pub total: u64,
    pub total_pages: u32,
    pub current_page: u32,
    pub limit: u32,
    pub has_next: bool,
    pub has_previous: bool,
}

/// Envelope of the list endpoints.
///
/// The backend names the array after the resource (`roteiros`, `passeios`,
/// `destinos`); all of them land in `items`. A response without the array
/// is treated as an empty page.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiListResponse<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default = "Vec::new", alias = "roteiros", alias = "passeios", alias = "destinos")]
    pub items: Vec<T>,
    #[serde(default)]
    pub pagination: PaginationInfo,
}

impl<T> ApiListResponse<T> {
    /// Convert into the controller's page contract.
    pub fn into_fetch_result(self) -> FetchResult<T> {
        FetchResult::new(self.items, self.pagination.has_next)
    }
}
