// ABOUTME: Prelude module - convenient imports for common use cases.
// ABOUTME: Use `use firegpt::prelude::*;` to get started quickly.

pub use crate::config::Config;
pub use crate::error::{FireGptError, LlmError, QueryError, StoreError, ToolError};
pub use crate::llm::{
    ContentBlock, LlmClient, Message, OpenRouterClient, Request, Response, Role, StopReason,
    ToolCall, ToolDefinition, Usage,
};
pub use crate::query::{QueryOutcome, QueryRunner};
pub use crate::server::{AppState, QueryRequest, QueryResponse, router};
pub use crate::store::{InMemoryTermStore, TermEntry, TermStore};
pub use crate::tool::{Registry, Tool, ToolResult};
pub use crate::tools::{NO_TERM_FOUND, TermLookupTool};
