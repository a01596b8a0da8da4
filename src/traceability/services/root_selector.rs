use crate::traceability::domain::{ProductNode, TraversalDirection};
use std::collections::HashSet;

/// RootSelector service proposing where a tree walk should start
///
/// Candidates are computed by set membership over the known products, so the
/// rules hold even when `parent_ids` and `children_ids` disagree.
pub struct RootSelector;

impl RootSelector {
    /// Computes the candidate roots for `direction`
    ///
    /// - `TowardComponents`: products nobody lists as a component, plus
    ///   products with no edges at all
    /// - `TowardConsumers`: products somebody lists as a component
    /// - `DirectParentsOnly`: every product
    ///
    /// When the rule leaves nothing (e.g. every product sits on a cycle),
    /// every product is a candidate. Candidates keep the order of `nodes`.
    pub fn candidates(nodes: &[ProductNode], direction: TraversalDirection) -> Vec<ProductNode> {
        let referenced_as_component: HashSet<&str> = nodes
            .iter()
            .flat_map(|node| node.children_ids.iter().map(String::as_str))
            .collect();

        let candidates: Vec<ProductNode> = match direction {
            TraversalDirection::TowardComponents => nodes
                .iter()
                .filter(|node| {
                    !referenced_as_component.contains(node.id.as_str()) || node.is_standalone()
                })
                .cloned()
                .collect(),
            TraversalDirection::TowardConsumers => nodes
                .iter()
                .filter(|node| referenced_as_component.contains(node.id.as_str()))
                .cloned()
                .collect(),
            TraversalDirection::DirectParentsOnly => nodes.to_vec(),
        };

        if candidates.is_empty() {
            nodes.to_vec()
        } else {
            candidates
        }
    }

    /// Picks the root among `candidates`
    ///
    /// The preferred id wins when it is a candidate; otherwise the first
    /// candidate is used.
    pub fn select<'c>(
        candidates: &'c [ProductNode],
        preferred_id: Option<&str>,
    ) -> Option<&'c ProductNode> {
        preferred_id
            .and_then(|id| candidates.iter().find(|node| node.id == id))
            .or_else(|| candidates.first())
    }
}
