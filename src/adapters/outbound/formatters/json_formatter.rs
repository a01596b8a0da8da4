use crate::application::dto::BuildTreeResponse;
use crate::ports::outbound::TreeFormatter;
use crate::shared::Result;

/// JsonFormatter adapter for visualization front ends
///
/// Emits the response as pretty-printed camelCase JSON: `tree`, `layout`,
/// `rootCandidates` and `stats`.
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeFormatter for JsonFormatter {
    fn format(&self, response: &BuildTreeResponse) -> Result<String> {
        let mut json = serde_json::to_string_pretty(response)
            .map_err(|e| anyhow::anyhow!("Failed to serialize tree to JSON: {}", e))?;
        json.push('\n');
        Ok(json)
    }
}
