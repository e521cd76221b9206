// ABOUTME: Tool module - defines tools, registry, and execution.
// ABOUTME: Core abstraction for model-invokable capabilities.

mod registry;
mod result;
mod traits;

pub use registry::*;
pub use result::*;
pub use traits::*;

#[cfg(test)]
mod result_test;
