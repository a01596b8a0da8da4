use crate::shared::error::FetchError;
use crate::traceability::domain::ProductNode;
use async_trait::async_trait;
use futures::future::join_all;

/// ProductFetcher port for resolving products the caller does not hold yet
///
/// This port abstracts the external product service. Products owned by other
/// organizations are routinely missing from the seed and are resolved here.
///
/// # Async Support
/// Implementations must be `Send + Sync`: sibling lookups are issued
/// concurrently during a tree build.
#[async_trait]
pub trait ProductFetcher: Send + Sync {
    /// Fetches a single product by id
    ///
    /// # Errors
    /// - `FetchError::NotFound` when the product does not exist
    /// - `FetchError::AccessDenied` when the caller may not see it
    /// - `FetchError::Transport` when the service cannot be reached
    async fn fetch_product_by_id(&self, id: &str) -> Result<ProductNode, FetchError>;

    /// Fetches several products at once
    ///
    /// Products that cannot be found are left out of the result. The default
    /// implementation issues one concurrent single fetch per id and only
    /// fails when every lookup failed on transport.
    async fn fetch_products_by_ids(&self, ids: &[String]) -> Result<Vec<ProductNode>, FetchError> {
        let results = join_all(ids.iter().map(|id| self.fetch_product_by_id(id))).await;

        let mut found = Vec::new();
        let mut transport_error = None;
        for result in results {
            match result {
                Ok(node) => found.push(node),
                Err(e) if e.is_transport() => transport_error = Some(e),
                Err(_) => {}
            }
        }

        match transport_error {
            Some(e) if found.is_empty() => Err(e),
            _ => Ok(found),
        }
    }

    /// Whether `fetch_products_by_ids` is a real batch call worth preferring
    fn supports_batch(&self) -> bool {
        false
    }
}
