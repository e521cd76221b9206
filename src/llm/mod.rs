// ABOUTME: LLM module - client abstraction for language model providers.
// ABOUTME: Defines conversation types, the client trait, and the OpenRouter provider.

mod client;
mod openai;
mod openrouter;
mod types;

pub use client::*;
pub use openai::*;
pub use openrouter::*;
pub use types::*;
