// ABOUTME: TermLookupTool - the get_wildfire_term tool backed by a TermStore.
// ABOUTME: Returns the stored definition, or a sentinel string on a miss.

use std::sync::Arc;

use async_trait::async_trait;

use crate::store::TermStore;
use crate::tool::{Tool, ToolResult};

/// Sentinel returned when no matching term exists. A miss is a successful
/// tool outcome that the model is expected to relay, not an error.
pub const NO_TERM_FOUND: &str = "No term found";

/// Looks up wildfire terminology definitions for the model.
pub struct TermLookupTool {
    store: Arc<dyn TermStore>,
}

impl TermLookupTool {
    /// Create a lookup tool over the given store.
    pub fn new(store: Arc<dyn TermStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for TermLookupTool {
    fn name(&self) -> &str {
        "get_wildfire_term"
    }

    fn description(&self) -> &str {
        "Get the definition of a term related to wildfires."
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "term": {
                    "type": "string",
                    "description": "A term related to wildfires like fuel or prescribed fire"
                }
            },
            "required": ["term"],
            "additionalProperties": false
        })
    }

    async fn execute(&self, params: serde_json::Value) -> Result<ToolResult, anyhow::Error> {
        let term = params["term"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("Missing required parameter: term"))?;

        match self.store.find_definition(term).await? {
            Some(def) => Ok(ToolResult::text(def)),
            None => Ok(ToolResult::text(NO_TERM_FOUND)),
        }
    }
}
