/// Mock implementations for testing
mod mock_product_fetcher;
mod mock_progress_reporter;

pub use mock_product_fetcher::MockProductFetcher;
pub use mock_progress_reporter::MockProgressReporter;
