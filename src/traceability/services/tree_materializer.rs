use super::GraphResolver;
use crate::ports::outbound::ProductFetcher;
use crate::shared::error::FetchError;
use crate::traceability::domain::{ProductNode, TraversalDirection, TreeNode};
use crate::traceability::policies::OwnershipClassifier;
use std::collections::HashSet;

/// Default cap on tree nodes created by one materialization
pub const DEFAULT_MAX_NODES: usize = 5_000;

/// What to emit for an edge pointing back at a product already on the path
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BackEdgePolicy {
    /// Leave the edge out, so no root-to-leaf path repeats a product
    #[default]
    Prune,
    /// Emit the product as a childless `BackReference` node
    Leaf,
}

impl std::str::FromStr for BackEdgePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "prune" => Ok(BackEdgePolicy::Prune),
            "leaf" => Ok(BackEdgePolicy::Leaf),
            _ => Err(format!(
                "Invalid back-edge policy: {}. Please specify 'prune' or 'leaf'",
                s
            )),
        }
    }
}

/// Limits and policies for one materialization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaterializeOptions {
    pub max_nodes: usize,
    pub back_edges: BackEdgePolicy,
}

impl Default for MaterializeOptions {
    fn default() -> Self {
        Self {
            max_nodes: DEFAULT_MAX_NODES,
            back_edges: BackEdgePolicy::default(),
        }
    }
}

/// A materialized tree together with how it was bounded
#[derive(Debug, Clone, PartialEq)]
pub struct Materialized {
    pub tree: TreeNode,
    pub nodes_created: usize,
    /// True when the node cap cut off some branches
    pub truncated: bool,
}

/// Mutable state of one walk
struct WalkState {
    /// Product ids on the stack from the root to the current node
    path: HashSet<String>,
    created: usize,
    truncated: bool,
}

impl WalkState {
    /// Reserves room for one more tree node, if the cap allows it
    fn claim(&mut self, max_nodes: usize) -> bool {
        if self.created >= max_nodes {
            self.truncated = true;
            return false;
        }
        self.created += 1;
        true
    }
}

/// TreeMaterializer service turning the product graph into a rooted tree
///
/// The walk is depth first and emits one `TreeNode` per distinct path from
/// the root. Cycles are cut with a path-local visited set: a product may
/// appear in several branches, but never twice on the same path. A global
/// node cap bounds pathological fan-out.
///
/// Neighbor lookups for one node run concurrently through the resolver; the
/// walk waits for all of them and descends in edge-list order, so output is
/// deterministic.
pub struct TreeMaterializer<'r, 'a, F: ProductFetcher + ?Sized> {
    resolver: &'r GraphResolver<'a, F>,
    caller_organization_id: Option<&'r str>,
    options: MaterializeOptions,
}

impl<'r, 'a, F: ProductFetcher + ?Sized> TreeMaterializer<'r, 'a, F> {
    pub fn new(
        resolver: &'r GraphResolver<'a, F>,
        caller_organization_id: Option<&'r str>,
        options: MaterializeOptions,
    ) -> Self {
        Self {
            resolver,
            caller_organization_id,
            options,
        }
    }

    /// Materializes the tree rooted at `root_id`
    ///
    /// # Errors
    /// Returns the fetch error when the root itself cannot be resolved.
    /// Unresolvable neighbors never fail the walk.
    pub async fn materialize(
        &self,
        root_id: &str,
        direction: TraversalDirection,
    ) -> Result<Materialized, FetchError> {
        let root = self.resolver.resolve(root_id).await?;

        let mut state = WalkState {
            path: HashSet::new(),
            created: 1,
            truncated: false,
        };

        let tree = if direction.is_recursive() {
            self.walk(root, direction, &mut state).await
        } else {
            self.one_hop(root, direction, &mut state).await
        };

        tracing::debug!(
            root = root_id,
            %direction,
            nodes = state.created,
            truncated = state.truncated,
            "Materialized tree"
        );

        Ok(Materialized {
            tree,
            nodes_created: state.created,
            truncated: state.truncated,
        })
    }

    fn tree_node(&self, product: &ProductNode) -> TreeNode {
        TreeNode::from_product(
            product,
            OwnershipClassifier::is_external(product, self.caller_organization_id),
        )
    }

    /// Resolves direct neighbors of `root` and attaches them as leaves
    async fn one_hop(
        &self,
        root: ProductNode,
        direction: TraversalDirection,
        state: &mut WalkState,
    ) -> TreeNode {
        let mut tree = self.tree_node(&root);
        for neighbor in self.resolver.neighbors_of(&root, direction).await {
            if !state.claim(self.options.max_nodes) {
                break;
            }
            tree.children.push(self.tree_node(&neighbor));
        }
        tree
    }

    /// Whether `node` gets its neighbors resolved; records truncation at the cap
    fn can_expand(
        &self,
        node: &ProductNode,
        direction: TraversalDirection,
        state: &mut WalkState,
    ) -> bool {
        if direction.edge_ids(node).is_empty() {
            return false;
        }
        if state.created >= self.options.max_nodes {
            state.truncated = true;
            return false;
        }
        true
    }

    /// Puts `node` on the path and resolves the neighbors still to visit
    async fn open(
        &self,
        node: ProductNode,
        tree: TreeNode,
        direction: TraversalDirection,
        state: &mut WalkState,
    ) -> Frame {
        state.path.insert(node.id.clone());
        let pending = self.resolver.neighbors_of(&node, direction).await;
        Frame {
            product_id: node.id,
            tree,
            pending: pending.into_iter(),
        }
    }

    /// Depth-first walk from `root`, which the caller has already counted
    ///
    /// Open nodes live on an explicit stack, so chain length is bounded only
    /// by the node cap.
    async fn walk(
        &self,
        root: ProductNode,
        direction: TraversalDirection,
        state: &mut WalkState,
    ) -> TreeNode {
        let tree = self.tree_node(&root);
        if !self.can_expand(&root, direction, state) {
            return tree;
        }

        let mut root_frame = self.open(root, tree, direction, state).await;
        let mut stack: Vec<Frame> = Vec::new();

        loop {
            let frame = stack.last_mut().unwrap_or(&mut root_frame);
            let Some(neighbor) = frame.pending.next() else {
                match stack.pop() {
                    Some(finished) => {
                        state.path.remove(&finished.product_id);
                        stack
                            .last_mut()
                            .unwrap_or(&mut root_frame)
                            .tree
                            .children
                            .push(finished.tree);
                        continue;
                    }
                    None => break,
                }
            };

            if state.path.contains(&neighbor.id) {
                match self.options.back_edges {
                    BackEdgePolicy::Prune => continue,
                    BackEdgePolicy::Leaf => {
                        if !state.claim(self.options.max_nodes) {
                            frame.pending = Vec::new().into_iter();
                            continue;
                        }
                        let is_external = OwnershipClassifier::is_external(
                            &neighbor,
                            self.caller_organization_id,
                        );
                        frame
                            .tree
                            .children
                            .push(TreeNode::back_reference(&neighbor, is_external));
                        continue;
                    }
                }
            }

            if !state.claim(self.options.max_nodes) {
                frame.pending = Vec::new().into_iter();
                continue;
            }
            let child = self.tree_node(&neighbor);
            if !self.can_expand(&neighbor, direction, state) {
                frame.tree.children.push(child);
                continue;
            }
            let opened = self.open(neighbor, child, direction, state).await;
            stack.push(opened);
        }

        root_frame.tree
    }
}

/// A product on the current path with the neighbors not yet visited
struct Frame {
    product_id: String,
    tree: TreeNode,
    pending: std::vec::IntoIter<ProductNode>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traceability::domain::NodeMarker;
    use crate::traceability::services::NodeStore;
    use async_trait::async_trait;

    /// Fetcher for tests where every product is already seeded
    struct NothingRemote;

    #[async_trait]
    impl ProductFetcher for NothingRemote {
        async fn fetch_product_by_id(&self, id: &str) -> Result<ProductNode, FetchError> {
            Err(FetchError::NotFound { id: id.to_string() })
        }
    }

    fn node(id: &str, children: &[&str]) -> ProductNode {
        ProductNode::new(id, id.to_uppercase(), "org-1").with_children(children.iter().copied())
    }

    async fn build(
        nodes: Vec<ProductNode>,
        root: &str,
        direction: TraversalDirection,
        options: MaterializeOptions,
    ) -> Materialized {
        let store = NodeStore::seeded(nodes);
        let resolver = GraphResolver::new(&NothingRemote, &store);
        TreeMaterializer::new(&resolver, Some("org-1"), options)
            .materialize(root, direction)
            .await
            .unwrap()
    }

    fn shape(tree: &TreeNode) -> String {
        if tree.children.is_empty() {
            return tree.source_id.clone();
        }
        let children: Vec<String> = tree.children.iter().map(shape).collect();
        format!("{}({})", tree.source_id, children.join(","))
    }

    #[tokio::test]
    async fn test_root_without_neighbors_is_single_node() {
        let result = build(
            vec![node("a", &[])],
            "a",
            TraversalDirection::TowardComponents,
            MaterializeOptions::default(),
        )
        .await;

        assert_eq!(shape(&result.tree), "a");
        assert_eq!(result.nodes_created, 1);
        assert!(!result.truncated);
    }

    #[tokio::test]
    async fn test_shared_component_is_replicated_per_path() {
        let nodes = vec![
            node("kit", &["left", "right"]),
            node("left", &["screw"]),
            node("right", &["screw"]),
            node("screw", &["steel"]),
            node("steel", &[]),
        ];

        let result = build(
            nodes,
            "kit",
            TraversalDirection::TowardComponents,
            MaterializeOptions::default(),
        )
        .await;

        assert_eq!(
            shape(&result.tree),
            "kit(left(screw(steel)),right(screw(steel)))"
        );
        assert_eq!(result.nodes_created, 7);
    }

    #[tokio::test]
    async fn test_cycle_is_pruned_by_default() {
        let nodes = vec![node("a", &["b"]), node("b", &["c"]), node("c", &["a"])];

        let result = build(
            nodes,
            "a",
            TraversalDirection::TowardComponents,
            MaterializeOptions::default(),
        )
        .await;

        assert_eq!(shape(&result.tree), "a(b(c))");
    }

    #[tokio::test]
    async fn test_cycle_as_back_reference_leaf() {
        let nodes = vec![node("a", &["b"]), node("b", &["a"])];
        let options = MaterializeOptions {
            back_edges: BackEdgePolicy::Leaf,
            ..MaterializeOptions::default()
        };

        let result = build(nodes, "a", TraversalDirection::TowardComponents, options).await;

        assert_eq!(shape(&result.tree), "a(b(a))");
        let back = &result.tree.children[0].children[0];
        assert_eq!(back.marker, NodeMarker::BackReference);
        assert!(back.is_leaf());
    }

    #[tokio::test]
    async fn test_self_reference_terminates() {
        let result = build(
            vec![node("a", &["a", "b"]), node("b", &[])],
            "a",
            TraversalDirection::TowardComponents,
            MaterializeOptions::default(),
        )
        .await;

        assert_eq!(shape(&result.tree), "a(b)");
    }

    #[tokio::test]
    async fn test_same_node_in_sibling_branches_after_backtracking() {
        // b -> a is a back edge only below a; c reaches b again on its own path
        let nodes = vec![
            node("a", &["b", "c"]),
            node("b", &["a"]),
            node("c", &["b"]),
        ];

        let result = build(
            nodes,
            "a",
            TraversalDirection::TowardComponents,
            MaterializeOptions::default(),
        )
        .await;

        assert_eq!(shape(&result.tree), "a(b,c(b))");
    }

    #[tokio::test]
    async fn test_node_cap_truncates() {
        // Full binary fan-out, 4 levels deep = 15 nodes
        let nodes = vec![
            node("r", &["a", "b"]),
            node("a", &["c", "d"]),
            node("b", &["c", "d"]),
            node("c", &["e", "f"]),
            node("d", &["e", "f"]),
            node("e", &[]),
            node("f", &[]),
        ];
        let options = MaterializeOptions {
            max_nodes: 5,
            ..MaterializeOptions::default()
        };

        let result = build(nodes, "r", TraversalDirection::TowardComponents, options).await;

        assert_eq!(result.tree.node_count(), 5);
        assert_eq!(result.nodes_created, 5);
        assert!(result.truncated);
    }

    #[tokio::test]
    async fn test_long_chain_is_bounded_only_by_node_cap() {
        let nodes: Vec<ProductNode> = (0..300)
            .map(|i| {
                let children: Vec<String> = if i < 299 {
                    vec![format!("p{}", i + 1)]
                } else {
                    Vec::new()
                };
                node(&format!("p{}", i), &[]).with_children(children)
            })
            .collect();

        let result = build(
            nodes,
            "p0",
            TraversalDirection::TowardComponents,
            MaterializeOptions::default(),
        )
        .await;

        assert_eq!(result.tree.depth(), 300);
        assert_eq!(result.nodes_created, 300);
        assert!(!result.truncated);
    }

    #[tokio::test]
    async fn test_direct_parents_only_is_one_hop() {
        let nodes = vec![
            ProductNode::new("bolt", "Bolt", "org-1").with_parents(["frame", "wheel"]),
            ProductNode::new("frame", "Frame", "org-1").with_parents(["bike"]),
            ProductNode::new("wheel", "Wheel", "org-2").with_parents(["bike"]),
            ProductNode::new("bike", "Bike", "org-1"),
        ];

        let result = build(
            nodes,
            "bolt",
            TraversalDirection::DirectParentsOnly,
            MaterializeOptions::default(),
        )
        .await;

        assert_eq!(shape(&result.tree), "bolt(frame,wheel)");
        assert!(result.tree.children.iter().all(TreeNode::is_leaf));
        assert!(result.tree.children[1].is_external);
    }

    #[tokio::test]
    async fn test_unknown_root_is_an_error() {
        let store = NodeStore::new();
        let resolver = GraphResolver::new(&NothingRemote, &store);
        let result = TreeMaterializer::new(&resolver, None, MaterializeOptions::default())
            .materialize("ghost", TraversalDirection::TowardComponents)
            .await;

        assert_eq!(
            result.unwrap_err(),
            FetchError::NotFound {
                id: "ghost".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_rematerializing_is_idempotent() {
        let nodes = vec![
            node("kit", &["left", "right"]),
            node("left", &["screw"]),
            node("right", &["screw", "kit"]),
            node("screw", &[]),
        ];
        let store = NodeStore::seeded(nodes);
        let resolver = GraphResolver::new(&NothingRemote, &store);
        let materializer =
            TreeMaterializer::new(&resolver, Some("org-1"), MaterializeOptions::default());

        let first = materializer
            .materialize("kit", TraversalDirection::TowardComponents)
            .await
            .unwrap();
        let second = materializer
            .materialize("kit", TraversalDirection::TowardComponents)
            .await
            .unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_back_edge_policy_from_str() {
        use std::str::FromStr;
        assert_eq!(BackEdgePolicy::from_str("Leaf").unwrap(), BackEdgePolicy::Leaf);
        assert_eq!(BackEdgePolicy::from_str("prune").unwrap(), BackEdgePolicy::Prune);
        assert!(BackEdgePolicy::from_str("merge").is_err());
    }
}
