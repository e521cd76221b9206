// ABOUTME: Root module for firegpt - the FireAID dashboard's LLM query service.
// ABOUTME: Re-exports all public types from submodules.

pub mod config;
pub mod error;
pub mod llm;
pub mod prelude;
pub mod query;
pub mod server;
pub mod store;
pub mod tool;
pub mod tools;

pub use error::FireGptError;
