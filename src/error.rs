// ABOUTME: Defines all error types for the firegpt library using thiserror.
// ABOUTME: Each submodule has its own error enum, unified under FireGptError.

/// Top-level error type for the firegpt library.
#[derive(Debug, thiserror::Error)]
pub enum FireGptError {
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Query error: {0}")]
    Query(#[from] QueryError),
}

/// Errors from LLM client operations.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),

    #[error("Missing credentials: {0}")]
    MissingCredentials(String),
}

/// Errors from tool operations.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    Unknown(String),

    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    #[error("Execution failed: {0}")]
    Execution(#[source] anyhow::Error),
}

/// Errors from the terminology store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors from the query orchestration loop.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Tool loop exceeded after {rounds} rounds")]
    ToolLoopExceeded { rounds: usize },

    #[error("Empty prompt")]
    EmptyPrompt,
}
