use crate::adapters::outbound::product_payload::ProductPayload;
use crate::ports::outbound::CatalogReader;
use crate::shared::error::TraceError;
use crate::shared::security::{read_regular_file, MAX_FILE_SIZE};
use crate::shared::Result;
use crate::traceability::domain::ProductNode;
use std::path::Path;

/// FileSystemReader adapter for reading product catalogs from disk
///
/// A catalog is a JSON document holding either an array of products or an
/// object with a `products` array, using the product service's camelCase
/// field names.
pub struct FileSystemReader;

impl FileSystemReader {
    pub fn new() -> Self {
        Self
    }

    fn parse_catalog(path: &Path, content: &str) -> Result<Vec<ProductNode>> {
        let payload: ProductPayload =
            serde_json::from_str(content).map_err(|e| TraceError::CatalogParseError {
                path: path.to_path_buf(),
                details: e.to_string(),
            })?;
        let products = payload.into_products();

        if let Some(index) = products.iter().position(|p| p.id.trim().is_empty()) {
            return Err(TraceError::CatalogParseError {
                path: path.to_path_buf(),
                details: format!("product at index {} has an empty id", index),
            }
            .into());
        }

        Ok(products)
    }
}

impl Default for FileSystemReader {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogReader for FileSystemReader {
    fn read_catalog(&self, path: &Path) -> Result<Vec<ProductNode>> {
        if !path.exists() {
            return Err(TraceError::CatalogNotFound {
                path: path.to_path_buf(),
                suggestion: "Pass an existing JSON product catalog with --catalog <file>"
                    .to_string(),
            }
            .into());
        }

        // Read catalog content with security checks
        let content = read_regular_file(path, "catalog", MAX_FILE_SIZE).map_err(|e| {
            TraceError::CatalogParseError {
                path: path.to_path_buf(),
                details: e.to_string(),
            }
        })?;

        let products = Self::parse_catalog(path, &content)?;
        tracing::debug!(path = %path.display(), count = products.len(), "Catalog loaded");
        Ok(products)
    }
}
