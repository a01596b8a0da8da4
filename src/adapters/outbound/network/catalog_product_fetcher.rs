use crate::ports::outbound::ProductFetcher;
use crate::shared::error::FetchError;
use crate::traceability::domain::ProductNode;
use async_trait::async_trait;
use std::collections::HashMap;

/// CatalogProductFetcher resolves products from an in-memory catalog
///
/// Stands in for the product service when working offline: the CLI seeds a
/// build with the caller's own products and resolves everything else here.
/// Unknown ids are `NotFound`; this fetcher never fails on transport.
pub struct CatalogProductFetcher {
    products: HashMap<String, ProductNode>,
}

impl CatalogProductFetcher {
    pub fn new(products: impl IntoIterator<Item = ProductNode>) -> Self {
        Self {
            products: products
                .into_iter()
                .map(|product| (product.id.clone(), product))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[async_trait]
impl ProductFetcher for CatalogProductFetcher {
    async fn fetch_product_by_id(&self, id: &str) -> Result<ProductNode, FetchError> {
        self.products
            .get(id)
            .cloned()
            .ok_or_else(|| FetchError::NotFound { id: id.to_string() })
    }
}
