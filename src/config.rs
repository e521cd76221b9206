// ABOUTME: Environment-driven configuration for the firegpt server.
// ABOUTME: Invalid values fall back to defaults with a warning.

use std::path::PathBuf;

use crate::llm::OPENROUTER_DEFAULT_MODEL;
use crate::query::DEFAULT_MAX_TOOL_ROUNDS;

/// Default listen address.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Default per-request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address to bind the HTTP listener to.
    pub bind_addr: String,

    /// Model identifier sent to OpenRouter.
    pub model: String,

    /// Maximum tool rounds per query.
    pub max_tool_rounds: usize,

    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,

    /// Optional path to a JSON file of {term, def} records.
    pub terms_path: Option<PathBuf>,

    /// Optional HTTP-Referer header for OpenRouter attribution.
    pub referer: Option<String>,

    /// Optional X-Title header for OpenRouter attribution.
    pub title: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            model: OPENROUTER_DEFAULT_MODEL.to_string(),
            max_tool_rounds: DEFAULT_MAX_TOOL_ROUNDS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            terms_path: None,
            referer: None,
            title: None,
        }
    }
}

impl Config {
    /// Load configuration from FIREGPT_* environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            bind_addr: std::env::var("FIREGPT_BIND").unwrap_or(defaults.bind_addr),
            model: std::env::var("FIREGPT_MODEL").unwrap_or(defaults.model),
            max_tool_rounds: parse_env("FIREGPT_MAX_TOOL_ROUNDS", defaults.max_tool_rounds),
            request_timeout_secs: parse_env(
                "FIREGPT_REQUEST_TIMEOUT_SECS",
                defaults.request_timeout_secs,
            ),
            terms_path: std::env::var("FIREGPT_TERMS_PATH").ok().map(PathBuf::from),
            referer: std::env::var("FIREGPT_REFERER").ok(),
            title: std::env::var("FIREGPT_TITLE").ok(),
        }
    }
}

fn parse_env<T: std::str::FromStr + Copy>(name: &str, default: T) -> T {
    match std::env::var(name) {
        Ok(value) => value.parse().unwrap_or_else(|_| {
            tracing::warn!(var = name, value = %value, "invalid value, using default");
            default
        }),
        Err(_) => default,
    }
}

#[cfg(test)]
mod config_test {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR);
        assert_eq!(config.model, OPENROUTER_DEFAULT_MODEL);
        assert_eq!(config.max_tool_rounds, DEFAULT_MAX_TOOL_ROUNDS);
        assert_eq!(config.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
        assert!(config.terms_path.is_none());
    }

    #[test]
    fn test_parse_env_fallback() {
        // Unset variables fall back to the provided default.
        assert_eq!(parse_env("FIREGPT_TEST_UNSET_VAR", 7usize), 7);
    }
}
