use crate::application::dto::{BuildStats, BuildTreeRequest, BuildTreeResponse};
use crate::ports::outbound::{ProductFetcher, ProgressReporter};
use crate::shared::error::TraceError;
use crate::shared::Result;
use crate::traceability::domain::{ProductNode, TreeNode, Viewport};
use crate::traceability::services::{
    GraphResolver, LayoutEstimator, NodeStore, RootSelector, TreeMaterializer,
};

/// BuildTreeUseCase - Core use case for materializing a traceability tree
///
/// Orchestrates root selection, the tree walk and layout estimation using
/// generic dependency injection for the product service and progress output.
///
/// # Type Parameters
/// * `F` - ProductFetcher implementation resolving products outside the seed
/// * `PR` - ProgressReporter implementation
///
/// Every call to [`execute`](Self::execute) starts from a fresh node store.
/// Dropping the returned future abandons in-flight fetches and publishes
/// nothing.
pub struct BuildTreeUseCase<F, PR> {
    product_fetcher: F,
    progress_reporter: PR,
}

impl<F, PR> BuildTreeUseCase<F, PR>
where
    F: ProductFetcher,
    PR: ProgressReporter,
{
    /// Creates a new BuildTreeUseCase with injected dependencies
    pub fn new(product_fetcher: F, progress_reporter: PR) -> Self {
        Self {
            product_fetcher,
            progress_reporter,
        }
    }

    /// Executes the tree build
    ///
    /// # Returns
    /// The tree (or an empty-state marker when there is nothing to show),
    /// its layout hint and the root candidates for the requested direction
    ///
    /// # Errors
    /// Fails only when the chosen root cannot be resolved at all; missing
    /// neighbors are omitted from the tree instead.
    pub async fn execute(&self, request: BuildTreeRequest) -> Result<BuildTreeResponse> {
        let BuildTreeRequest {
            root_id: preferred_root,
            direction,
            seed_nodes,
            viewport,
            caller_organization_id,
            options,
        } = request;

        // Step 1: Seed a fresh node store
        let store = NodeStore::seeded(seed_nodes);
        self.progress_reporter.report(&format!(
            "📦 Seeded {} product(s) for a {} tree",
            store.len(),
            direction
        ));

        // Step 2: Compute root candidates
        let root_candidates = RootSelector::candidates(&store.all(), direction);

        // Step 3: Choose the root
        let Some(root_id) = Self::choose_root(preferred_root.as_deref(), &root_candidates, &store)
        else {
            self.progress_reporter
                .report_completion("ℹ️  No products to trace: returning an empty tree");
            return Ok(Self::build_empty_response(
                root_candidates,
                viewport,
                store.generation(),
            ));
        };

        self.progress_reporter
            .report(&format!("🌳 Building tree from '{}'...", root_id));

        // Step 4: Walk the graph
        let resolver = GraphResolver::new(&self.product_fetcher, &store);
        let materializer =
            TreeMaterializer::new(&resolver, caller_organization_id.as_deref(), options);
        let materialized = materializer
            .materialize(&root_id, direction)
            .await
            .map_err(|e| TraceError::from_root_fetch(&root_id, e))?;

        // Step 5: Derive the layout from the tree shape
        let layout = LayoutEstimator::for_tree(&materialized.tree, viewport);

        let stats = BuildStats {
            nodes_created: materialized.nodes_created,
            unresolved_neighbors: resolver.unresolved_count(),
            truncated: materialized.truncated,
            generation: store.generation(),
        };
        self.report_outcome(&materialized.tree, &stats, options.max_nodes);

        Ok(BuildTreeResponse::new(
            materialized.tree,
            layout,
            root_candidates,
            stats,
        ))
    }

    /// Picks the id to build from
    ///
    /// A preferred id unknown to the store is used as is: it belongs to
    /// another organization and is fetched during the walk. A known id is
    /// honoured when it is a root candidate. There are no candidates only
    /// when the store is empty.
    fn choose_root(
        preferred: Option<&str>,
        candidates: &[ProductNode],
        store: &NodeStore,
    ) -> Option<String> {
        if let Some(id) = preferred {
            if !store.has(id) {
                return Some(id.to_string());
            }
        }

        let selected = RootSelector::select(candidates, preferred)?;
        if let Some(id) = preferred.filter(|id| *id != selected.id) {
            tracing::debug!(
                preferred = id,
                selected = %selected.id,
                "Preferred root is not a candidate for this direction"
            );
        }
        Some(selected.id.clone())
    }

    fn build_empty_response(
        root_candidates: Vec<ProductNode>,
        viewport: Viewport,
        generation: u64,
    ) -> BuildTreeResponse {
        let tree = TreeNode::empty_state();
        let layout = LayoutEstimator::for_tree(&tree, viewport);
        let stats = BuildStats {
            nodes_created: 0,
            unresolved_neighbors: 0,
            truncated: false,
            generation,
        };
        BuildTreeResponse::new(tree, layout, root_candidates, stats)
    }

    fn report_outcome(&self, tree: &TreeNode, stats: &BuildStats, max_nodes: usize) {
        if stats.unresolved_neighbors > 0 {
            self.progress_reporter.report_error(&format!(
                "⚠️  Warning: {} linked product(s) could not be resolved and were omitted",
                stats.unresolved_neighbors
            ));
        }
        if stats.truncated {
            self.progress_reporter.report_error(&format!(
                "⚠️  Warning: Tree was truncated (node cap {}). Some branches are not shown.",
                max_nodes
            ));
        }

        tracing::info!(
            nodes = stats.nodes_created,
            depth = tree.depth(),
            unresolved = stats.unresolved_neighbors,
            truncated = stats.truncated,
            generation = stats.generation,
            "Tree build finished"
        );
        self.progress_reporter.report_completion(&format!(
            "✅ Tree complete: {} node(s), depth {}",
            tree.node_count(),
            tree.depth()
        ));
    }
}

#[cfg(test)]
mod tests;
