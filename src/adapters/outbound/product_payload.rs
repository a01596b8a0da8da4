use crate::traceability::domain::ProductNode;
use serde::Deserialize;

/// Wire shape of a product list
///
/// Both the catalog file and the product service batch endpoint accept either
/// a bare array or an object wrapping it in `products`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ProductPayload {
    List(Vec<ProductNode>),
    Wrapped { products: Vec<ProductNode> },
}

impl ProductPayload {
    pub(crate) fn into_products(self) -> Vec<ProductNode> {
        match self {
            ProductPayload::List(products) | ProductPayload::Wrapped { products } => products,
        }
    }
}
