// ABOUTME: Defines the ToolResult type - the outcome of a tool execution,
// ABOUTME: convertible into the context block fed back to the model.

use crate::llm::ContentBlock;

/// Result of a tool execution.
///
/// A lookup miss is a successful result carrying the sentinel text; only
/// genuine failures (unknown tool, bad arguments, store errors) are error
/// results.
#[derive(Debug, Clone)]
pub struct ToolResult {
    /// The output content.
    pub content: String,

    /// Whether this result represents an error.
    pub is_error: bool,
}

impl ToolResult {
    /// Create a successful text result.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_error: false,
        }
    }

    /// Create an error result.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: message.into(),
            is_error: true,
        }
    }

    /// Convert into the context block paired with the originating call id.
    pub fn into_block(self, call_id: impl Into<String>) -> ContentBlock {
        if self.is_error {
            ContentBlock::tool_error(call_id, self.content)
        } else {
            ContentBlock::tool_result(call_id, self.content)
        }
    }
}
