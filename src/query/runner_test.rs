// ABOUTME: Tests for QueryRunner - loop transitions, call pairing, bounds.
// ABOUTME: Uses scripted mock clients; no network access.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use super::*;
use crate::error::{LlmError, QueryError};
use crate::llm::{ContentBlock, LlmClient, Request, Response, StopReason, Usage};
use crate::store::{InMemoryTermStore, TermEntry};
use crate::tool::Registry;
use crate::tools::{NO_TERM_FOUND, TermLookupTool};

/// Replays a fixed script of responses and records every request.
struct ScriptedClient {
    responses: Mutex<VecDeque<Response>>,
    requests: Mutex<Vec<Request>>,
}

impl ScriptedClient {
    fn new(responses: Vec<Response>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn recorded(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl LlmClient for ScriptedClient {
    async fn create_message(&self, req: &Request) -> Result<Response, LlmError> {
        self.requests.lock().unwrap().push(req.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or(LlmError::Api {
                status: 0,
                message: "script exhausted".into(),
            })
    }
}

/// Always requests another tool call, no matter the context.
struct EndlessToolClient {
    calls: Mutex<usize>,
}

#[async_trait::async_trait]
impl LlmClient for EndlessToolClient {
    async fn create_message(&self, _req: &Request) -> Result<Response, LlmError> {
        let mut calls = self.calls.lock().unwrap();
        *calls += 1;
        Ok(tool_response(vec![(
            format!("call_{}", *calls),
            "get_wildfire_term",
            serde_json::json!({"term": "fuel"}),
        )]))
    }
}

fn text_response(text: &str) -> Response {
    Response {
        id: "resp_text".into(),
        content: vec![ContentBlock::text(text)],
        stop_reason: StopReason::EndTurn,
        model: "test-model".into(),
        usage: Usage {
            input_tokens: 10,
            output_tokens: 5,
        },
    }
}

fn tool_response(calls: Vec<(String, &str, serde_json::Value)>) -> Response {
    Response {
        id: "resp_tools".into(),
        content: calls
            .into_iter()
            .map(|(id, name, input)| ContentBlock::ToolUse {
                id,
                name: name.into(),
                input,
            })
            .collect(),
        stop_reason: StopReason::ToolUse,
        model: "test-model".into(),
        usage: Usage {
            input_tokens: 10,
            output_tokens: 5,
        },
    }
}

async fn term_registry() -> Registry {
    let store = InMemoryTermStore::new(vec![
        TermEntry {
            term: "fuel".into(),
            def: "Combustible material".into(),
        },
        TermEntry {
            term: "prescribed fire".into(),
            def: "A planned, controlled burn...".into(),
        },
    ]);
    let registry = Registry::new();
    registry.register(TermLookupTool::new(Arc::new(store))).await;
    registry
}

fn tool_results_of(req: &Request) -> Vec<(String, String, bool)> {
    req.messages
        .iter()
        .flat_map(|m| m.content.iter())
        .filter_map(|b| match b {
            ContentBlock::ToolResult {
                tool_use_id,
                content,
                is_error,
            } => Some((tool_use_id.clone(), content.clone(), *is_error)),
            _ => None,
        })
        .collect()
}

#[tokio::test]
async fn test_plain_answer_single_query() {
    let client = Arc::new(ScriptedClient::new(vec![text_response("Stay safe out there.")]));
    let runner = QueryRunner::new(client.clone(), term_registry().await).model("test-model");

    let outcome = runner.run("Any advice?").await.unwrap();

    assert_eq!(outcome.answer, "Stay safe out there.");
    assert_eq!(outcome.model_calls, 1);
    assert_eq!(outcome.tool_use_count, 0);
    assert_eq!(outcome.rounds, 0);
    assert_eq!(client.recorded().len(), 1);
}

#[tokio::test]
async fn test_single_tool_call_two_queries() {
    let client = Arc::new(ScriptedClient::new(vec![
        tool_response(vec![(
            "call_1".into(),
            "get_wildfire_term",
            serde_json::json!({"term": "fuel"}),
        )]),
        text_response("Fuel is combustible material."),
    ]));
    let runner = QueryRunner::new(client.clone(), term_registry().await).model("test-model");

    let outcome = runner.run("What is fuel?").await.unwrap();

    assert_eq!(outcome.answer, "Fuel is combustible material.");
    assert_eq!(outcome.model_calls, 2);
    assert_eq!(outcome.tool_use_count, 1);
    assert_eq!(outcome.rounds, 1);

    let requests = client.recorded();
    assert_eq!(requests.len(), 2);

    // The second query's context carries the paired result under the
    // originating call id.
    let results = tool_results_of(&requests[1]);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].0, "call_1");
    assert_eq!(results[0].1, "Combustible material");
    assert!(!results[0].2);

    // And the follow-up query tells the model to answer from tool output.
    let system = requests[1].system.as_deref().unwrap();
    assert!(system.contains(ANSWER_FROM_TOOLS_INSTRUCTION));

    let first_system = requests[0].system.as_deref().unwrap();
    assert!(!first_system.contains(ANSWER_FROM_TOOLS_INSTRUCTION));
}

#[tokio::test]
async fn test_case_insensitive_lookup_through_loop() {
    let client = Arc::new(ScriptedClient::new(vec![
        tool_response(vec![(
            "call_1".into(),
            "get_wildfire_term",
            serde_json::json!({"term": "Fuel"}),
        )]),
        text_response("Done."),
    ]));
    let runner = QueryRunner::new(client.clone(), term_registry().await).model("test-model");

    runner.run("What is Fuel?").await.unwrap();

    let results = tool_results_of(&client.recorded()[1]);
    assert_eq!(results[0].1, "Combustible material");
}

#[tokio::test]
async fn test_missing_term_sentinel_still_completes() {
    let client = Arc::new(ScriptedClient::new(vec![
        tool_response(vec![(
            "call_1".into(),
            "get_wildfire_term",
            serde_json::json!({"term": "firebreak"}),
        )]),
        text_response("I could not find that term."),
    ]));
    let runner = QueryRunner::new(client.clone(), term_registry().await).model("test-model");

    let outcome = runner.run("What is a firebreak?").await.unwrap();

    assert_eq!(outcome.answer, "I could not find that term.");
    let results = tool_results_of(&client.recorded()[1]);
    assert_eq!(results[0].1, NO_TERM_FOUND);
    assert!(!results[0].2, "a miss is not an error result");
}

#[tokio::test]
async fn test_unknown_tool_feeds_error_back() {
    let client = Arc::new(ScriptedClient::new(vec![
        tool_response(vec![(
            "call_1".into(),
            "count_fires",
            serde_json::json!({"year_start": 2020}),
        )]),
        text_response("I cannot count fires."),
    ]));
    let runner = QueryRunner::new(client.clone(), term_registry().await).model("test-model");

    let outcome = runner.run("How many fires in 2020?").await.unwrap();

    assert_eq!(outcome.answer, "I cannot count fires.");
    let results = tool_results_of(&client.recorded()[1]);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].0, "call_1");
    assert_eq!(results[0].1, "Unknown tool: count_fires");
    assert!(results[0].2);
}

#[tokio::test]
async fn test_multiple_calls_paired_in_request_order() {
    let client = Arc::new(ScriptedClient::new(vec![
        tool_response(vec![
            (
                "call_a".into(),
                "get_wildfire_term",
                serde_json::json!({"term": "fuel"}),
            ),
            (
                "call_b".into(),
                "get_wildfire_term",
                serde_json::json!({"term": "prescribed fire"}),
            ),
        ]),
        text_response("Both found."),
    ]));
    let runner = QueryRunner::new(client.clone(), term_registry().await).model("test-model");

    let outcome = runner.run("Define fuel and prescribed fire").await.unwrap();
    assert_eq!(outcome.tool_use_count, 2);

    let results = tool_results_of(&client.recorded()[1]);
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].0, "call_a");
    assert_eq!(results[0].1, "Combustible material");
    assert_eq!(results[1].0, "call_b");
    assert_eq!(results[1].1, "A planned, controlled burn...");
}

#[tokio::test]
async fn test_tool_loop_exceeded() {
    let client = Arc::new(EndlessToolClient {
        calls: Mutex::new(0),
    });
    let runner = QueryRunner::new(client.clone(), term_registry().await)
        .model("test-model")
        .max_tool_rounds(5);

    let result = runner.run("What is fuel?").await;

    match result {
        Err(QueryError::ToolLoopExceeded { rounds }) => assert_eq!(rounds, 5),
        other => panic!("Expected ToolLoopExceeded, got {:?}", other.map(|o| o.answer)),
    }

    // Five full rounds ran, the sixth request for tools tripped the bound.
    assert_eq!(*client.calls.lock().unwrap(), 6);
}

#[tokio::test]
async fn test_empty_prompt_rejected() {
    let client = Arc::new(ScriptedClient::new(vec![]));
    let runner = QueryRunner::new(client.clone(), term_registry().await).model("test-model");

    let result = runner.run("   ").await;
    assert!(matches!(result, Err(QueryError::EmptyPrompt)));
    assert!(client.recorded().is_empty(), "no model query is attempted");
}

#[tokio::test]
async fn test_upstream_error_propagates() {
    let client = Arc::new(ScriptedClient::new(vec![]));
    let runner = QueryRunner::new(client, term_registry().await).model("test-model");

    let result = runner.run("What is fuel?").await;
    assert!(matches!(
        result,
        Err(QueryError::Llm(LlmError::Api { .. }))
    ));
}

#[tokio::test]
async fn test_request_carries_tool_manifest() {
    let client = Arc::new(ScriptedClient::new(vec![text_response("Hi.")]));
    let runner = QueryRunner::new(client.clone(), term_registry().await).model("test-model");

    runner.run("Hello").await.unwrap();

    let requests = client.recorded();
    assert_eq!(requests[0].tools.len(), 1);
    assert_eq!(requests[0].tools[0].name, "get_wildfire_term");
}
