// ABOUTME: Query module - the tool-calling orchestration loop.
// ABOUTME: Drives model queries and tool invocations to a final answer.

mod runner;

pub use runner::*;

#[cfg(test)]
mod runner_test;
