use super::NodeStore;
use crate::ports::outbound::ProductFetcher;
use crate::shared::error::FetchError;
use crate::traceability::domain::{ProductNode, TraversalDirection};
use futures::future::join_all;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

/// GraphResolver service resolving the immediate neighbors of a product
///
/// Lookups go to the `NodeStore` first. Misses are fetched from the product
/// service concurrently and written back to the store, so each id is fetched
/// at most once per build.
///
/// A neighbor that cannot be resolved is skipped with a warning. Gaps in
/// cross-organization visibility are expected, so this is never fatal.
pub struct GraphResolver<'a, F: ProductFetcher + ?Sized> {
    fetcher: &'a F,
    store: &'a NodeStore,
    unresolved: AtomicUsize,
}

impl<'a, F: ProductFetcher + ?Sized> GraphResolver<'a, F> {
    pub fn new(fetcher: &'a F, store: &'a NodeStore) -> Self {
        Self {
            fetcher,
            store,
            unresolved: AtomicUsize::new(0),
        }
    }

    pub fn store(&self) -> &NodeStore {
        self.store
    }

    /// Number of neighbor references skipped so far
    pub fn unresolved_count(&self) -> usize {
        self.unresolved.load(Ordering::Relaxed)
    }

    /// Resolves a single product, fetching and caching it on a miss
    pub async fn resolve(&self, id: &str) -> Result<ProductNode, FetchError> {
        if let Some(node) = self.store.get(id) {
            return Ok(node);
        }

        let node = self.fetcher.fetch_product_by_id(id).await?;
        self.store.put(node.clone());
        Ok(node)
    }

    /// Resolves the neighbors of `id` in `direction`
    ///
    /// If `id` itself cannot be resolved the result is empty.
    pub async fn neighbors(&self, id: &str, direction: TraversalDirection) -> Vec<ProductNode> {
        match self.resolve(id).await {
            Ok(node) => self.neighbors_of(&node, direction).await,
            Err(e) => {
                tracing::warn!(product = id, error = %e, "Could not resolve product; treating it as having no neighbors");
                Vec::new()
            }
        }
    }

    /// Resolves the neighbors of an already resolved product
    ///
    /// The result follows the order of the edge list. Every occurrence of an
    /// id yields a neighbor, even when the list repeats it.
    pub async fn neighbors_of(
        &self,
        node: &ProductNode,
        direction: TraversalDirection,
    ) -> Vec<ProductNode> {
        let edge_ids = direction.edge_ids(node);
        if edge_ids.is_empty() {
            return Vec::new();
        }

        let mut seen = HashSet::new();
        let missing: Vec<String> = edge_ids
            .iter()
            .filter(|id| !self.store.has(id) && seen.insert(id.as_str()))
            .cloned()
            .collect();

        let failures = self.fetch_missing(missing).await;

        let mut neighbors = Vec::with_capacity(edge_ids.len());
        for neighbor_id in edge_ids {
            match self.store.get(neighbor_id) {
                Some(neighbor) => neighbors.push(neighbor),
                None => {
                    self.unresolved.fetch_add(1, Ordering::Relaxed);
                    let reason = failures
                        .get(neighbor_id)
                        .map(String::as_str)
                        .unwrap_or("not returned by the product service");
                    tracing::warn!(
                        product = %node.id,
                        neighbor = %neighbor_id,
                        %direction,
                        reason,
                        "Skipping unresolved neighbor"
                    );
                }
            }
        }
        neighbors
    }

    /// Fetches `missing` into the store, returning the failure reason per id
    async fn fetch_missing(&self, missing: Vec<String>) -> HashMap<String, String> {
        let mut failures = HashMap::new();
        if missing.is_empty() {
            return failures;
        }

        if missing.len() > 1 && self.fetcher.supports_batch() {
            match self.fetcher.fetch_products_by_ids(&missing).await {
                Ok(nodes) => {
                    for node in nodes {
                        self.store.put(node);
                    }
                    return failures;
                }
                Err(e) => {
                    tracing::debug!(error = %e, count = missing.len(), "Batch fetch failed; falling back to single fetches");
                }
            }
        }

        let results = join_all(
            missing
                .iter()
                .map(|id| self.fetcher.fetch_product_by_id(id)),
        )
        .await;

        for (id, result) in missing.into_iter().zip(results) {
            match result {
                Ok(node) => self.store.put(node),
                Err(e) => {
                    failures.insert(id, e.to_string());
                }
            }
        }
        failures
    }
}
