//! supply-trace - traceability trees for supply-chain product graphs
//!
//! This library turns a product graph (products linked to their components
//! and consumers, possibly owned by different organizations and possibly
//! cyclic) into a rooted tree with a layout hint, ready for display.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`traceability`): Product graph model, tree model and
//!   the services that walk one into the other
//! - **Application Layer** (`application`): Use cases and DTOs
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use supply_trace::prelude::*;
//! use std::path::Path;
//!
//! # async fn example() -> Result<()> {
//! // Create adapters
//! let catalog = FileSystemReader::new().read_catalog(Path::new("catalog.json"))?;
//! let fetcher = CatalogProductFetcher::new(catalog.clone());
//! let progress_reporter = StderrProgressReporter::new();
//!
//! // Create use case
//! let use_case = BuildTreeUseCase::new(fetcher, progress_reporter);
//!
//! // Execute
//! let request = BuildTreeRequest::builder()
//!     .root_id("shoe")
//!     .direction(TraversalDirection::TowardComponents)
//!     .seed_nodes(catalog)
//!     .caller_organization_id("org-1")
//!     .build()?;
//! let response = use_case.execute(request).await?;
//!
//! // Format output
//! let output = TextFormatter::new(false).format(&response)?;
//! println!("{}", output);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod cli;
pub mod config;
pub mod logger;
pub mod ports;
pub mod shared;
pub mod traceability;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemReader, FileSystemWriter, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{JsonFormatter, TextFormatter};
    pub use crate::adapters::outbound::network::{
        CachingProductFetcher, CatalogProductFetcher, HttpProductFetcher,
    };
    pub use crate::application::dto::{
        BuildStats, BuildTreeRequest, BuildTreeResponse, OutputFormat,
    };
    pub use crate::application::use_cases::BuildTreeUseCase;
    pub use crate::ports::outbound::{
        CatalogReader, OutputPresenter, ProductFetcher, ProgressReporter, TreeFormatter,
    };
    pub use crate::shared::error::{FetchError, TraceError};
    pub use crate::shared::Result;
    pub use crate::traceability::domain::{
        LayoutHint, NodeMarker, ProductKind, ProductNode, TraversalDirection, TreeNode, Viewport,
    };
    pub use crate::traceability::policies::OwnershipClassifier;
    pub use crate::traceability::services::{
        BackEdgePolicy, GraphResolver, LayoutEstimator, MaterializeOptions, NodeStore,
        RootSelector, TreeMaterializer,
    };
}
