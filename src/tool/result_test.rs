// ABOUTME: Tests for ToolResult - constructors and conversion into the
// ABOUTME: context block paired with the originating call id.

use super::*;
use crate::llm::ContentBlock;

#[test]
fn test_text_result() {
    let result = ToolResult::text("A planned, controlled burn...");
    assert_eq!(result.content, "A planned, controlled burn...");
    assert!(!result.is_error);
}

#[test]
fn test_error_result() {
    let result = ToolResult::error("Unknown tool: count_fires");
    assert_eq!(result.content, "Unknown tool: count_fires");
    assert!(result.is_error);
}

#[test]
fn test_text_result_into_block_keeps_call_id() {
    let block = ToolResult::text("Combustible material").into_block("call_1");
    match block {
        ContentBlock::ToolResult {
            tool_use_id,
            content,
            is_error,
        } => {
            assert_eq!(tool_use_id, "call_1");
            assert_eq!(content, "Combustible material");
            assert!(!is_error);
        }
        _ => panic!("Expected ToolResult block"),
    }
}

#[test]
fn test_error_result_into_block_marks_error() {
    let block = ToolResult::error("Missing required parameter: term").into_block("call_2");
    match block {
        ContentBlock::ToolResult {
            tool_use_id,
            is_error,
            ..
        } => {
            assert_eq!(tool_use_id, "call_2");
            assert!(is_error);
        }
        _ => panic!("Expected ToolResult block"),
    }
}
