use crate::shared::Result;
use crate::traceability::domain::ProductNode;
use std::path::Path;

/// CatalogReader port for loading the product list a build is seeded with
pub trait CatalogReader {
    /// Reads every product record from the catalog at `path`
    ///
    /// # Errors
    /// Returns an error if the catalog is missing, unsafe to read, or malformed
    fn read_catalog(&self, path: &Path) -> Result<Vec<ProductNode>>;
}
