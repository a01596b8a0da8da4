pub mod graph_resolver;
pub mod layout_estimator;
pub mod node_store;
pub mod root_selector;
pub mod tree_materializer;

pub use graph_resolver::GraphResolver;
pub use layout_estimator::LayoutEstimator;
pub use node_store::NodeStore;
pub use root_selector::RootSelector;
pub use tree_materializer::{
    BackEdgePolicy, MaterializeOptions, Materialized, TreeMaterializer, DEFAULT_MAX_NODES,
};
