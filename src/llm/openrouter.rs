// ABOUTME: OpenRouter API client wrapping the OpenAI-compatible API.
// ABOUTME: Supports custom HTTP-Referer and X-Title headers for app identification.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};

use super::openai::{OpenAIError, OpenAIRequest, OpenAIResponse};
use super::{Request, Response};
use crate::error::LlmError;

/// Base URL for OpenRouter's OpenAI-compatible API.
pub const OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Default model when none is specified.
pub const OPENROUTER_DEFAULT_MODEL: &str = "openai/gpt-5";

/// Client for the OpenRouter API.
/// OpenRouter provides a unified API that routes to various LLM providers.
#[derive(Debug, Clone)]
pub struct OpenRouterClient {
    api_key: String,
    http: reqwest::Client,
    default_model: String,
}

impl OpenRouterClient {
    /// Create a new OpenRouter client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_headers(api_key, None, None)
    }

    /// Create a new OpenRouter client from the OPENROUTER_API_KEY environment variable.
    pub fn from_env() -> Result<Self, LlmError> {
        Self::from_key(std::env::var("OPENROUTER_API_KEY").ok())
    }

    /// Create a new OpenRouter client from an already-resolved key lookup.
    pub fn from_key(api_key: Option<String>) -> Result<Self, LlmError> {
        let api_key = api_key.ok_or_else(|| {
            LlmError::MissingCredentials(
                "OPENROUTER_API_KEY environment variable not set".to_string(),
            )
        })?;
        Ok(Self::new(api_key))
    }

    /// Create a new OpenRouter client with custom headers for app identification.
    ///
    /// # Arguments
    /// * `api_key` - OpenRouter API key
    /// * `referer` - HTTP-Referer header (your app's URL, helps OpenRouter track usage)
    /// * `title` - X-Title header (your app's name, displayed in OpenRouter dashboard)
    pub fn with_headers(
        api_key: impl Into<String>,
        referer: Option<&str>,
        title: Option<&str>,
    ) -> Self {
        let http = reqwest::Client::builder()
            .default_headers(attribution_headers(referer, title))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            api_key: api_key.into(),
            http,
            default_model: OPENROUTER_DEFAULT_MODEL.to_string(),
        }
    }

    /// Set the default model to use when none is specified in the request.
    pub fn with_default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }
}

/// Build the attribution headers OpenRouter uses to identify the calling app.
/// Values that are not valid header values are skipped.
fn attribution_headers(referer: Option<&str>, title: Option<&str>) -> HeaderMap {
    let mut headers = HeaderMap::new();

    if let Some(referer) = referer {
        if let Ok(value) = HeaderValue::from_str(referer) {
            headers.insert("HTTP-Referer", value);
        }
    }

    if let Some(title) = title {
        if let Ok(value) = HeaderValue::from_str(title) {
            headers.insert("X-Title", value);
        }
    }

    headers
}

#[async_trait]
impl super::client::LlmClient for OpenRouterClient {
    async fn create_message(&self, req: &Request) -> Result<Response, LlmError> {
        let mut openai_req = OpenAIRequest::from(req);

        if openai_req.model.is_empty() {
            openai_req.model = self.default_model.clone();
        }

        tracing::debug!(model = %openai_req.model, messages = openai_req.messages.len(), "sending chat completion");

        let url = format!("{}/chat/completions", OPENROUTER_BASE_URL);

        let response = self
            .http
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&openai_req)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error: OpenAIError = response.json().await?;
            tracing::warn!(status = status.as_u16(), message = %error.error.message, "upstream API error");
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: error.error.message,
            });
        }

        let openai_resp: OpenAIResponse = response.json().await?;
        Ok(Response::from(openai_resp))
    }
}
