// ABOUTME: QueryRunner - executes the model/tool loop for one user prompt.
// ABOUTME: Explicit state machine with a bounded number of tool rounds.

use std::sync::Arc;

use futures::future::join_all;
use tracing::Instrument;
use uuid::Uuid;

use crate::error::QueryError;
use crate::llm::{ContentBlock, LlmClient, Message, Request, Role, ToolCall, Usage};
use crate::tool::{Registry, ToolResult};

/// Default bound on passes through the tool-execution state.
pub const DEFAULT_MAX_TOOL_ROUNDS: usize = 5;

/// Default system prompt for dashboard queries.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are FireGPT, a wildfire assistant for the FireAID \
     dashboard. Use the provided tools to look up wildfire terminology when it helps answer the \
     user's question.";

/// Appended to the system prompt on every query after tool results exist.
pub const ANSWER_FROM_TOOLS_INSTRUCTION: &str = "Answer the user's question using the tool \
     output already retrieved. Do not request further tool calls.";

/// Loop state for one `run` invocation.
///
/// Every ToolUse appended to the context is paired with exactly one
/// ToolResult before the next transition back to AwaitingModel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoopState {
    AwaitingModel,
    HasToolRequests,
    Done,
}

/// Result from running a query.
#[derive(Debug, Clone)]
pub struct QueryOutcome {
    /// Final text content from the model.
    pub answer: String,

    /// Number of model queries issued.
    pub model_calls: usize,

    /// Number of tool invocations made during execution.
    pub tool_use_count: usize,

    /// Number of tool rounds (cycles through HasToolRequests).
    pub rounds: usize,

    /// Total token usage across all model queries.
    pub usage: Usage,
}

/// Orchestrates one user prompt to a final answer.
///
/// Explicitly constructed and injected; each `run` call owns its
/// conversation context exclusively, so runners over a shared registry and
/// client are safe to use from concurrent requests.
pub struct QueryRunner {
    client: Arc<dyn LlmClient>,
    tools: Registry,
    model: String,
    system_prompt: String,
    max_tool_rounds: usize,
}

impl QueryRunner {
    /// Create a runner with default model, prompt, and loop bound.
    pub fn new(client: Arc<dyn LlmClient>, tools: Registry) -> Self {
        Self {
            client,
            tools,
            model: String::new(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            max_tool_rounds: DEFAULT_MAX_TOOL_ROUNDS,
        }
    }

    /// Set the model identifier.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the system prompt.
    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    /// Set the maximum number of tool rounds.
    pub fn max_tool_rounds(mut self, max: usize) -> Self {
        self.max_tool_rounds = max;
        self
    }

    /// Run the loop for one prompt and return the final answer.
    pub async fn run(&self, prompt: &str) -> Result<QueryOutcome, QueryError> {
        let query_id = Uuid::new_v4();
        let span = tracing::info_span!("query", %query_id);
        self.run_inner(prompt).instrument(span).await
    }

    async fn run_inner(&self, prompt: &str) -> Result<QueryOutcome, QueryError> {
        if prompt.trim().is_empty() {
            return Err(QueryError::EmptyPrompt);
        }

        let mut context = vec![Message::user(prompt)];
        let mut state = LoopState::AwaitingModel;
        let mut pending: Vec<ToolCall> = Vec::new();
        let mut answer = String::new();

        let mut rounds = 0;
        let mut model_calls = 0;
        let mut tool_use_count = 0;
        let mut usage = Usage::default();

        loop {
            match state {
                LoopState::AwaitingModel => {
                    let mut system = self.system_prompt.clone();
                    if rounds > 0 {
                        system.push_str("\n\n");
                        system.push_str(ANSWER_FROM_TOOLS_INSTRUCTION);
                    }

                    let request = Request::new(&self.model)
                        .system(system)
                        .messages(context.clone())
                        .tools(self.tools.to_definitions().await)
                        .max_tokens(4096);

                    let response = self.client.create_message(&request).await?;
                    model_calls += 1;
                    usage.add(&response.usage);

                    let calls = response.tool_calls();
                    if calls.is_empty() {
                        answer = response.text();
                        state = LoopState::Done;
                    } else {
                        context.push(Message {
                            role: Role::Assistant,
                            content: response.content.clone(),
                        });
                        pending = calls;
                        state = LoopState::HasToolRequests;
                    }
                }
                LoopState::HasToolRequests => {
                    rounds += 1;
                    if rounds > self.max_tool_rounds {
                        tracing::warn!(
                            max_tool_rounds = self.max_tool_rounds,
                            "model kept requesting tools past the loop bound"
                        );
                        return Err(QueryError::ToolLoopExceeded {
                            rounds: self.max_tool_rounds,
                        });
                    }

                    tool_use_count += pending.len();

                    // Lookups are independent reads, so they run
                    // concurrently; join_all yields results in request
                    // order, keeping the context canonical.
                    let results =
                        join_all(pending.drain(..).map(|call| self.invoke(call))).await;

                    context.push(Message::tool_results(results));
                    state = LoopState::AwaitingModel;
                }
                LoopState::Done => {
                    tracing::debug!(model_calls, tool_use_count, rounds, "query finished");
                    return Ok(QueryOutcome {
                        answer,
                        model_calls,
                        tool_use_count,
                        rounds,
                        usage,
                    });
                }
            }
        }
    }

    /// Resolve one tool call to a result block carrying the same call id.
    ///
    /// Unknown tools and execution failures come back as explicit error
    /// results fed into the context, so the model can adapt instead of the
    /// loop crashing.
    async fn invoke(&self, call: ToolCall) -> ContentBlock {
        let result = match self.tools.get(&call.name).await {
            Some(tool) => tool
                .execute(call.arguments)
                .await
                .unwrap_or_else(|e| ToolResult::error(e.to_string())),
            None => {
                tracing::warn!(tool = %call.name, "model requested unknown tool");
                ToolResult::error(format!("Unknown tool: {}", call.name))
            }
        };
        result.into_block(&call.id)
    }
}
