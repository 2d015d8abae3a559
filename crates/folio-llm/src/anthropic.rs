//! Anthropic Provider Implementation
//!
//! Provides integration with Anthropic's Messages API.
//!
//! # Features
//!
//! - Async HTTP communication with the Messages API
//! - Configurable endpoint, API key and request timeout
//! - HTTP status mapped onto [`LlmError`] variants so the gateway can tell
//!   transient failures from permanent ones
//!
//! A single request is made per call; retries belong to
//! [`ModelGateway`](crate::ModelGateway).
//!
//! # Examples
//!
//! ```no_run
//! use folio_domain::{LlmProvider, ModelParams};
//! use folio_llm::AnthropicProvider;
//!
//! let provider = AnthropicProvider::from_api_key("sk-ant-...").unwrap();
//! let reply = provider.complete("Say hello", &ModelParams::query()).unwrap();
//! println!("{}", reply);
//! ```

use crate::LlmError;
use folio_domain::traits::LlmProvider as LlmProviderTrait;
use folio_domain::ModelParams;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::runtime::Runtime;

/// Default Anthropic API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.anthropic.com";

/// API version header value
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Default timeout for LLM requests (120 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Anthropic Messages API provider
///
/// Owns a current-thread tokio runtime and blocks on each request, so it must
/// not be called from inside another async runtime.
pub struct AnthropicProvider {
    endpoint: String,
    api_key: String,
    client: reqwest::Client,
    runtime: Runtime,
}

/// Request body for the Messages API
#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f64,
    messages: Vec<Message<'a>>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

/// Response from the Messages API
#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: Option<String>,
}

impl AnthropicProvider {
    /// Create a new Anthropic provider
    ///
    /// # Parameters
    ///
    /// - `endpoint`: API base URL (e.g., "https://api.anthropic.com")
    /// - `api_key`: Anthropic API key
    /// - `timeout`: per-request timeout
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::Other`] if the HTTP client or runtime cannot be built.
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::Other(format!("Failed to build HTTP client: {}", e)))?;

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| LlmError::Other(format!("Failed to start runtime: {}", e)))?;

        Ok(Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            client,
            runtime,
        })
    }

    /// Create a provider for the public endpoint with the default timeout
    pub fn from_api_key(api_key: impl Into<String>) -> Result<Self, LlmError> {
        Self::new(
            DEFAULT_ENDPOINT,
            api_key,
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        )
    }

    /// API base URL
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send one Messages API request
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The endpoint cannot be reached
    /// - The API key is rejected
    /// - The model is not available
    /// - Response format is invalid
    pub async fn send(&self, prompt: &str, params: &ModelParams) -> Result<String, LlmError> {
        let url = format!("{}/v1/messages", self.endpoint);

        let request_body = MessagesRequest {
            model: &params.model,
            max_tokens: params.max_tokens,
            temperature: params.temperature,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| LlmError::Communication(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(error_for_status(status.as_u16(), body, &params.model));
        }

        let parsed = response
            .json::<MessagesResponse>()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        first_text(parsed)
    }
}

/// Map a non-success HTTP status onto an error variant
fn error_for_status(status: u16, body: String, model: &str) -> LlmError {
    match status {
        401 | 403 => LlmError::Authentication(body),
        404 => LlmError::ModelNotAvailable(model.to_string()),
        429 => LlmError::RateLimitExceeded,
        _ => LlmError::Api { status, body },
    }
}

fn first_text(response: MessagesResponse) -> Result<String, LlmError> {
    response
        .content
        .into_iter()
        .find_map(|block| block.text)
        .ok_or_else(|| LlmError::InvalidResponse("missing content[0].text".to_string()))
}

impl LlmProviderTrait for AnthropicProvider {
    type Error = LlmError;

    fn complete(&self, prompt: &str, params: &ModelParams) -> Result<String, Self::Error> {
        self.runtime.block_on(self.send(prompt, params))
    }

    fn name(&self) -> &str {
        "anthropic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anthropic_provider_creation() {
        let provider = AnthropicProvider::new(
            "https://api.example.com/",
            "key",
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(provider.endpoint(), "https://api.example.com");
        assert_eq!(provider.api_key, "key");
    }

    #[test]
    fn test_default_endpoint() {
        let provider = AnthropicProvider::from_api_key("key").unwrap();
        assert_eq!(provider.endpoint(), DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_request_body_shape() {
        let body = MessagesRequest {
            model: "claude-2.1",
            max_tokens: 1000,
            temperature: 0.2,
            messages: vec![Message {
                role: "user",
                content: "hi",
            }],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "claude-2.1");
        assert_eq!(json["max_tokens"], 1000);
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "hi");
    }

    #[test]
    fn test_parse_response_text() {
        let parsed: MessagesResponse = serde_json::from_str(
            r#"{"id":"msg_1","content":[{"type":"text","text":"Invoice Number: 42"}]}"#,
        )
        .unwrap();
        assert_eq!(first_text(parsed).unwrap(), "Invoice Number: 42");
    }

    #[test]
    fn test_parse_response_without_text() {
        let parsed: MessagesResponse = serde_json::from_str(r#"{"content":[]}"#).unwrap();
        assert!(matches!(first_text(parsed), Err(LlmError::InvalidResponse(_))));
    }

    #[test]
    fn test_status_mapping() {
        assert!(matches!(
            error_for_status(401, "bad key".into(), "m"),
            LlmError::Authentication(_)
        ));
        assert_eq!(
            error_for_status(404, String::new(), "claude-x"),
            LlmError::ModelNotAvailable("claude-x".to_string())
        );
        assert_eq!(error_for_status(429, String::new(), "m"), LlmError::RateLimitExceeded);
        assert_eq!(
            error_for_status(529, "overloaded".into(), "m"),
            LlmError::Api {
                status: 529,
                body: "overloaded".to_string()
            }
        );
    }

    #[test]
    fn test_anthropic_error_handling() {
        // Use invalid endpoint to trigger error
        let provider =
            AnthropicProvider::new("http://localhost:99999", "key", Duration::from_secs(1)).unwrap();

        let result = provider.complete("test", &ModelParams::query());

        match result {
            Err(LlmError::Communication(_)) => {} // Expected
            other => panic!("Expected Communication error, got {:?}", other),
        }
    }

    // Integration tests (requires a valid ANTHROPIC_API_KEY)
    #[test]
    #[ignore] // Only run when the API is reachable
    fn test_anthropic_complete_integration() {
        let key = std::env::var("ANTHROPIC_API_KEY").unwrap_or_default();
        let provider = AnthropicProvider::from_api_key(key).unwrap();
        let result = provider.complete("Say 'hello' and nothing else", &ModelParams::query());

        if let Ok(response) = result {
            assert!(!response.is_empty());
        }
    }
}
