//! Paged data source abstraction.
//!
//! A [`PageSource`] is the list controller's only view of where items come
//! from: given a 1-based page number it yields that page's items and whether
//! more pages follow. Filters are baked into the source when it is built;
//! when they change the host builds a new source and hands it to the
//! controller together with a new reset key.

use async_trait::async_trait;
use std::future::Future;

use crate::error::FetchError;
use crate::models::FetchResult;

/// Trait for fetching one page of a listing.
///
/// Async closures of the shape `Fn(u32) -> impl Future<Output = Result<..>>`
/// implement this trait directly, so small hosts and tests do not need a
/// named type.
///
/// # Example
///
/// ```ignore
/// use voyage::models::FetchResult;
/// use voyage::traits::PageSource;
///
/// let source = |page: u32| async move {
///     Ok(FetchResult::new(vec![page * 10, page * 10 + 1], page < 3))
/// };
/// let first = source.fetch_page(1).await?;
/// assert_eq!(first.items, vec![10, 11]);
/// ```
#[async_trait]
pub trait PageSource<T: Send>: Send + Sync {
    /// Fetch the page with the given 1-based index.
    async fn fetch_page(&self, page: u32) -> Result<FetchResult<T>, FetchError>;
}

#[async_trait]
impl<T, F, Fut> PageSource<T> for F
where
    T: Send + 'static,
    F: Fn(u32) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<FetchResult<T>, FetchError>> + Send + 'static,
{
    async fn fetch_page(&self, page: u32) -> Result<FetchResult<T>, FetchError> {
        (self)(page).await
    }
}
