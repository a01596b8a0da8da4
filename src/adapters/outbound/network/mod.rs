/// Product service adapters
mod caching_product_fetcher;
mod catalog_product_fetcher;
mod http_product_client;

pub use caching_product_fetcher::CachingProductFetcher;
pub use catalog_product_fetcher::CatalogProductFetcher;
pub use http_product_client::HttpProductFetcher;
