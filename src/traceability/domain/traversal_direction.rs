use super::ProductNode;

/// Which edge list a tree walk follows
///
/// The same product graph is shown from three vantage points: the supplier
/// view walks what a product is made of, the brand view walks what consumes a
/// component, and the upstream view is a single hop over direct parents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraversalDirection {
    /// Follow `children_ids` recursively (supplier view)
    TowardComponents,
    /// Follow `parent_ids` recursively (brand / downstream view)
    TowardConsumers,
    /// Follow `parent_ids` for exactly one hop (upstream view)
    DirectParentsOnly,
}

impl TraversalDirection {
    /// The ids this direction follows out of `node`
    pub fn edge_ids<'n>(&self, node: &'n ProductNode) -> &'n [String] {
        match self {
            TraversalDirection::TowardComponents => &node.children_ids,
            TraversalDirection::TowardConsumers | TraversalDirection::DirectParentsOnly => {
                &node.parent_ids
            }
        }
    }

    /// Whether resolved neighbors are expanded further
    pub fn is_recursive(&self) -> bool {
        !matches!(self, TraversalDirection::DirectParentsOnly)
    }
}

impl std::str::FromStr for TraversalDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "components" | "toward-components" | "supplier" => {
                Ok(TraversalDirection::TowardComponents)
            }
            "consumers" | "toward-consumers" | "brand" | "downstream" => {
                Ok(TraversalDirection::TowardConsumers)
            }
            "parents" | "direct-parents" | "upstream" => Ok(TraversalDirection::DirectParentsOnly),
            _ => Err(format!(
                "Invalid direction: {}. Please specify 'components', 'consumers' or 'parents'",
                s
            )),
        }
    }
}

impl std::fmt::Display for TraversalDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TraversalDirection::TowardComponents => write!(f, "components"),
            TraversalDirection::TowardConsumers => write!(f, "consumers"),
            TraversalDirection::DirectParentsOnly => write!(f, "parents"),
        }
    }
}
