use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use supply_trace::prelude::*;

/// Mock ProductFetcher standing in for the remote product service
///
/// Serves products from an in-memory map. Individual ids can be marked as
/// access denied, and the whole service can be taken offline.
#[derive(Default, Clone)]
pub struct MockProductFetcher {
    pub products: HashMap<String, ProductNode>,
    pub denied: HashSet<String>,
    pub offline: bool,
    pub calls: Arc<AtomicUsize>,
}

#[allow(dead_code)]
impl MockProductFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_product(mut self, product: ProductNode) -> Self {
        self.products.insert(product.id.clone(), product);
        self
    }

    pub fn with_products(self, products: impl IntoIterator<Item = ProductNode>) -> Self {
        products.into_iter().fold(self, Self::with_product)
    }

    pub fn with_denied(mut self, id: &str) -> Self {
        self.denied.insert(id.to_string());
        self
    }

    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Self::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProductFetcher for MockProductFetcher {
    async fn fetch_product_by_id(&self, id: &str) -> std::result::Result<ProductNode, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.offline {
            return Err(FetchError::Transport {
                details: "mock product service is offline".to_string(),
            });
        }
        if self.denied.contains(id) {
            return Err(FetchError::AccessDenied { id: id.to_string() });
        }
        self.products
            .get(id)
            .cloned()
            .ok_or_else(|| FetchError::NotFound { id: id.to_string() })
    }
}
