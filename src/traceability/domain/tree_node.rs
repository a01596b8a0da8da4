use super::{ProductKind, ProductNode};
use serde::Serialize;

/// What a materialized tree node stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeMarker {
    /// An ordinary product on the path from the root
    Product,
    /// A product already on the current path; never expanded
    BackReference,
    /// Placeholder returned when there is nothing to show
    EmptyState,
}

/// One node of a materialized traceability tree
///
/// A product reachable through two different chains from the root shows up
/// as two separate `TreeNode`s with independent subtrees.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeNode {
    pub label: String,
    pub source_id: String,
    pub kind: ProductKind,
    pub is_external: bool,
    pub marker: NodeMarker,
    pub children: Vec<TreeNode>,
}

const EMPTY_STATE_LABEL: &str = "Nothing to show";

impl TreeNode {
    pub fn from_product(product: &ProductNode, is_external: bool) -> Self {
        Self {
            label: product.name.clone(),
            source_id: product.id.clone(),
            kind: product.kind,
            is_external,
            marker: NodeMarker::Product,
            children: Vec::new(),
        }
    }

    pub fn back_reference(product: &ProductNode, is_external: bool) -> Self {
        Self {
            marker: NodeMarker::BackReference,
            ..Self::from_product(product, is_external)
        }
    }

    pub fn empty_state() -> Self {
        Self {
            label: EMPTY_STATE_LABEL.to_string(),
            source_id: String::new(),
            kind: ProductKind::default(),
            is_external: false,
            marker: NodeMarker::EmptyState,
            children: Vec::new(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn is_empty_state(&self) -> bool {
        self.marker == NodeMarker::EmptyState
    }

    /// Number of levels, counting the root as 1
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(TreeNode::depth).max().unwrap_or(0)
    }

    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(TreeNode::node_count).sum::<usize>()
    }

    /// Every root-to-leaf path as a list of source ids
    pub fn paths(&self) -> Vec<Vec<&str>> {
        if self.children.is_empty() {
            return vec![vec![self.source_id.as_str()]];
        }
        self.children
            .iter()
            .flat_map(|child| child.paths())
            .map(|mut path| {
                path.insert(0, self.source_id.as_str());
                path
            })
            .collect()
    }
}
