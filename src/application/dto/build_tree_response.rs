use crate::traceability::domain::{LayoutHint, ProductNode, TreeNode};
use serde::Serialize;

/// Counters describing how a build went
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildStats {
    /// Tree nodes created by the walk
    pub nodes_created: usize,
    /// Neighbor references skipped because they could not be resolved
    pub unresolved_neighbors: usize,
    /// True when the node or depth cap cut off branches
    pub truncated: bool,
    /// Generation of the node store used for this build
    pub generation: u64,
}

/// BuildTreeResponse - Output of the tree building use case
///
/// This is everything the visualization layer needs: the tree, a layout
/// hint for it, and the alternative roots the user can switch to.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildTreeResponse {
    pub tree: TreeNode,
    pub layout: LayoutHint,
    pub root_candidates: Vec<ProductNode>,
    pub stats: BuildStats,
}

impl BuildTreeResponse {
    pub fn new(
        tree: TreeNode,
        layout: LayoutHint,
        root_candidates: Vec<ProductNode>,
        stats: BuildStats,
    ) -> Self {
        Self {
            tree,
            layout,
            root_candidates,
            stats,
        }
    }

    /// True when there was nothing to build a tree from
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty_state()
    }
}
