/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (product service, file system, console).
pub mod catalog_reader;
pub mod formatter;
pub mod output_presenter;
pub mod product_fetcher;
pub mod progress_reporter;

pub use catalog_reader::CatalogReader;
pub use formatter::TreeFormatter;
pub use output_presenter::OutputPresenter;
pub use product_fetcher::ProductFetcher;
pub use progress_reporter::ProgressReporter;
