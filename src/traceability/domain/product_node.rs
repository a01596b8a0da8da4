use serde::{Deserialize, Serialize};

/// Where a product sits in the bill of materials.
///
/// Only the rendering layer looks at this; traversal never does.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductKind {
    RawMaterial,
    #[default]
    Component,
    SubAssembly,
    FinalProduct,
}

impl std::fmt::Display for ProductKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ProductKind::RawMaterial => "raw material",
            ProductKind::Component => "component",
            ProductKind::SubAssembly => "sub-assembly",
            ProductKind::FinalProduct => "final product",
        };
        write!(f, "{}", name)
    }
}

/// A product record in the traceability graph
///
/// `parent_ids` lists the products this one is used by and `children_ids`
/// the products it is made of. The two lists are maintained independently
/// by the product store and may disagree with each other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductNode {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub kind: ProductKind,
    #[serde(default)]
    pub parent_ids: Vec<String>,
    #[serde(default)]
    pub children_ids: Vec<String>,
    pub owner_id: String,
}

impl ProductNode {
    pub fn new(id: impl Into<String>, name: impl Into<String>, owner_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            sku: None,
            category: None,
            description: None,
            kind: ProductKind::default(),
            parent_ids: Vec::new(),
            children_ids: Vec::new(),
            owner_id: owner_id.into(),
        }
    }

    pub fn with_kind(mut self, kind: ProductKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_sku(mut self, sku: impl Into<String>) -> Self {
        self.sku = Some(sku.into());
        self
    }

    pub fn with_parents<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parent_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_children<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.children_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    /// True when the product has no edges in either direction
    pub fn is_standalone(&self) -> bool {
        self.parent_ids.is_empty() && self.children_ids.is_empty()
    }
}
