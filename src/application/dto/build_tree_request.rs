use crate::shared::error::TraceError;
use crate::shared::Result;
use crate::traceability::domain::{ProductNode, TraversalDirection, Viewport};
use crate::traceability::services::MaterializeOptions;

/// BuildTreeRequest - Input of the tree building use case
///
/// Use [`BuildTreeRequest::builder`] to construct one; the builder validates
/// the limits and viewport.
#[derive(Debug, Clone)]
pub struct BuildTreeRequest {
    /// Explicit root; when absent the first root candidate is used
    pub root_id: Option<String>,
    pub direction: TraversalDirection,
    /// Products the caller already holds; unknown ids are fetched lazily
    pub seed_nodes: Vec<ProductNode>,
    pub viewport: Viewport,
    /// Organization of the viewer, used to flag foreign products
    pub caller_organization_id: Option<String>,
    pub options: MaterializeOptions,
}

impl BuildTreeRequest {
    pub fn builder() -> BuildTreeRequestBuilder {
        BuildTreeRequestBuilder::default()
    }
}

/// Builder for [`BuildTreeRequest`]
#[derive(Debug, Clone)]
pub struct BuildTreeRequestBuilder {
    root_id: Option<String>,
    direction: TraversalDirection,
    seed_nodes: Vec<ProductNode>,
    viewport: Viewport,
    caller_organization_id: Option<String>,
    options: MaterializeOptions,
}

impl Default for BuildTreeRequestBuilder {
    fn default() -> Self {
        Self {
            root_id: None,
            direction: TraversalDirection::TowardComponents,
            seed_nodes: Vec::new(),
            viewport: Viewport::default(),
            caller_organization_id: None,
            options: MaterializeOptions::default(),
        }
    }
}

impl BuildTreeRequestBuilder {
    pub fn root_id(mut self, root_id: impl Into<String>) -> Self {
        self.root_id = Some(root_id.into());
        self
    }

    pub fn maybe_root_id(mut self, root_id: Option<String>) -> Self {
        self.root_id = root_id;
        self
    }

    pub fn direction(mut self, direction: TraversalDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn seed_nodes(mut self, seed_nodes: Vec<ProductNode>) -> Self {
        self.seed_nodes = seed_nodes;
        self
    }

    pub fn viewport(mut self, width: f64, height: f64) -> Self {
        self.viewport = Viewport::new(width, height);
        self
    }

    pub fn caller_organization_id(mut self, organization_id: impl Into<String>) -> Self {
        self.caller_organization_id = Some(organization_id.into());
        self
    }

    pub fn maybe_caller_organization_id(mut self, organization_id: Option<String>) -> Self {
        self.caller_organization_id = organization_id;
        self
    }

    pub fn options(mut self, options: MaterializeOptions) -> Self {
        self.options = options;
        self
    }

    /// Validates and builds the request
    ///
    /// # Errors
    /// Returns `TraceError::Validation` for an empty root id, a zero node cap
    /// or a negative/non-finite viewport.
    pub fn build(self) -> Result<BuildTreeRequest> {
        if matches!(self.root_id.as_deref(), Some(id) if id.trim().is_empty()) {
            return Err(validation("root id must not be empty"));
        }
        if self.options.max_nodes == 0 {
            return Err(validation("max_nodes must be at least 1"));
        }
        for (name, value) in [
            ("viewport width", self.viewport.width),
            ("viewport height", self.viewport.height),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(validation(&format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }

        Ok(BuildTreeRequest {
            root_id: self.root_id,
            direction: self.direction,
            seed_nodes: self.seed_nodes,
            viewport: self.viewport,
            caller_organization_id: self.caller_organization_id,
            options: self.options,
        })
    }
}

fn validation(message: &str) -> anyhow::Error {
    TraceError::Validation {
        message: message.to_string(),
    }
    .into()
}
