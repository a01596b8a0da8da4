use crate::ports::outbound::ProductFetcher;
use crate::shared::error::FetchError;
use crate::traceability::domain::ProductNode;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

/// CachingProductFetcher wraps a ProductFetcher and remembers what it found.
///
/// Builds never share node stores, so without this decorator every build
/// asks the product service again. Wrapping the fetcher keeps resolved
/// products across builds of a long-lived process.
///
/// Only successful lookups are cached; `NotFound`, `AccessDenied` and
/// transport failures are asked again next time.
pub struct CachingProductFetcher<F: ProductFetcher> {
    inner: F,
    cache: Arc<DashMap<String, ProductNode>>,
}

impl<F: ProductFetcher> CachingProductFetcher<F> {
    /// Creates a new caching fetcher wrapping the given inner fetcher
    pub fn new(inner: F) -> Self {
        Self {
            inner,
            cache: Arc::new(DashMap::new()),
        }
    }

    /// Returns the current cache size
    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }

    /// Drops every cached product
    pub fn clear(&self) {
        self.cache.clear();
    }
}

#[async_trait]
impl<F: ProductFetcher> ProductFetcher for CachingProductFetcher<F> {
    async fn fetch_product_by_id(&self, id: &str) -> Result<ProductNode, FetchError> {
        if let Some(cached) = self.cache.get(id) {
            return Ok(cached.clone());
        }

        let product = self.inner.fetch_product_by_id(id).await?;
        self.cache.insert(product.id.clone(), product.clone());
        Ok(product)
    }

    async fn fetch_products_by_ids(&self, ids: &[String]) -> Result<Vec<ProductNode>, FetchError> {
        let mut found = Vec::with_capacity(ids.len());
        let mut missing = Vec::new();
        for id in ids {
            match self.cache.get(id) {
                Some(cached) => found.push(cached.clone()),
                None => missing.push(id.clone()),
            }
        }

        if !missing.is_empty() {
            let fetched = self.inner.fetch_products_by_ids(&missing).await?;
            for product in fetched {
                self.cache.insert(product.id.clone(), product.clone());
                found.push(product);
            }
        }
        Ok(found)
    }

    fn supports_batch(&self) -> bool {
        self.inner.supports_batch()
    }
}
