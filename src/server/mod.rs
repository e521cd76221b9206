// ABOUTME: HTTP boundary - axum router, handlers, and error-to-status mapping.
// ABOUTME: Exposes the query endpoint plus tool manifest and direct tool runner.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::error::{LlmError, QueryError};
use crate::llm::{LlmClient, ToolDefinition};
use crate::query::QueryRunner;
use crate::tool::Registry;

/// Message returned when the tool loop bound is hit.
pub const TOOL_LOOP_FALLBACK: &str =
    "The assistant could not complete the request: tool call limit reached.";

/// Shared state for all request handlers.
///
/// The model client is injected at construction. Starting without
/// credentials still serves; query requests then fail fast without an
/// upstream attempt.
#[derive(Clone)]
pub struct AppState {
    pub client: Option<Arc<dyn LlmClient>>,
    pub registry: Registry,
    pub config: Arc<Config>,
}

/// Request body for the query endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct QueryRequest {
    pub msg: String,
}

/// Success body for the query endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct QueryResponse {
    pub msg: String,
}

/// Error body for all endpoints.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Request body for running a tool directly.
#[derive(Debug, Serialize, Deserialize)]
pub struct RunToolRequest {
    pub name: String,
    #[serde(default)]
    pub args: serde_json::Value,
}

/// Success body for running a tool directly.
#[derive(Debug, Serialize, Deserialize)]
pub struct RunToolResponse {
    pub output: String,
}

/// An error mapped to an HTTP status and client-visible message.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn missing_credentials() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Missing API key")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                error: self.message,
            }),
        )
            .into_response()
    }
}

impl From<QueryError> for ApiError {
    fn from(err: QueryError) -> Self {
        match err {
            QueryError::EmptyPrompt => Self::new(StatusCode::BAD_REQUEST, "Empty prompt"),
            QueryError::ToolLoopExceeded { .. } => {
                Self::new(StatusCode::BAD_GATEWAY, TOOL_LOOP_FALLBACK)
            }
            QueryError::Llm(LlmError::MissingCredentials(msg)) => {
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
            QueryError::Llm(e) => Self::new(
                StatusCode::BAD_GATEWAY,
                format!("Upstream model request failed: {e}"),
            ),
        }
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let timeout = Duration::from_secs(state.config.request_timeout_secs);

    Router::new()
        .route("/health", get(health))
        .route("/api/ai/query", post(query))
        .route("/api/tools", get(list_tools))
        .route("/api/tools/run", post(run_tool))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(TimeoutLayer::new(timeout))
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

async fn query(
    State(state): State<AppState>,
    Json(body): Json<QueryRequest>,
) -> Result<Json<QueryResponse>, ApiError> {
    let client = state
        .client
        .clone()
        .ok_or_else(ApiError::missing_credentials)?;

    let runner = QueryRunner::new(client, state.registry.clone())
        .model(&state.config.model)
        .max_tool_rounds(state.config.max_tool_rounds);

    let outcome = runner.run(&body.msg).await?;

    tracing::info!(
        model_calls = outcome.model_calls,
        tool_use_count = outcome.tool_use_count,
        input_tokens = outcome.usage.input_tokens,
        output_tokens = outcome.usage.output_tokens,
        "query completed"
    );

    Ok(Json(QueryResponse {
        msg: outcome.answer,
    }))
}

async fn list_tools(State(state): State<AppState>) -> Json<Vec<ToolDefinition>> {
    Json(state.registry.to_definitions().await)
}

async fn run_tool(
    State(state): State<AppState>,
    Json(body): Json<RunToolRequest>,
) -> Result<Json<RunToolResponse>, ApiError> {
    let tool = state.registry.get(&body.name).await.ok_or_else(|| {
        ApiError::new(
            StatusCode::NOT_FOUND,
            format!("Unknown tool: {}", body.name),
        )
    })?;

    let args = if body.args.is_null() {
        serde_json::json!({})
    } else {
        body.args
    };

    let result = tool
        .execute(args)
        .await
        .map_err(|e| ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    if result.is_error {
        return Err(ApiError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            result.content,
        ));
    }

    Ok(Json(RunToolResponse {
        output: result.content,
    }))
}
