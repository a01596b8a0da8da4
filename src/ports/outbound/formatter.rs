use crate::application::dto::BuildTreeResponse;
use crate::shared::Result;

/// TreeFormatter port for rendering a build result
///
/// This port abstracts the output representation (JSON for a visualization
/// front end, an indented text tree for terminals).
pub trait TreeFormatter {
    /// Formats the tree, layout hint and root candidates of a build
    ///
    /// # Errors
    /// Returns an error if serialization fails
    fn format(&self, response: &BuildTreeResponse) -> Result<String>;
}
