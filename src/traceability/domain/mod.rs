pub mod layout_hint;
pub mod product_node;
pub mod traversal_direction;
pub mod tree_node;

pub use layout_hint::{LayoutHint, Translate, Viewport};
pub use product_node::{ProductKind, ProductNode};
pub use traversal_direction::TraversalDirection;
pub use tree_node::{NodeMarker, TreeNode};
