//! Folio LLM Provider Layer
//!
//! Provider implementations of the `LlmProvider` trait from `folio-domain`,
//! and the [`ModelGateway`] that wraps every outbound model call with a
//! bounded retry policy.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic, scriptable mock for testing
//! - `AnthropicProvider`: Anthropic Messages API integration
//!
//! # Examples
//!
//! ```
//! use folio_domain::ModelParams;
//! use folio_llm::{MockProvider, ModelGateway, RetryPolicy};
//!
//! let gateway = ModelGateway::new(MockProvider::new("Hello from LLM!"));
//! let result = gateway
//!     .complete("test prompt", &ModelParams::query(), &RetryPolicy::single_attempt())
//!     .unwrap();
//! assert_eq!(result, "Hello from LLM!");
//! ```

#![warn(missing_docs)]

pub mod anthropic;
pub mod backoff;
pub mod gateway;
pub mod retry;

use folio_domain::traits::LlmProvider as LlmProviderTrait;
use folio_domain::ModelParams;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

pub use anthropic::AnthropicProvider;
pub use backoff::Backoff;
pub use gateway::{GatewayError, ModelGateway, RecordingSleeper, Sleeper, ThreadSleeper};
pub use retry::RetryPolicy;

/// Errors that can occur during LLM operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Credentials were rejected
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Non-success HTTP status not covered by another variant
    #[error("API error {status}: {body}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body
        body: String,
    },

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

impl LlmError {
    /// Whether a retry may succeed where this attempt failed
    pub fn is_transient(&self) -> bool {
        match self {
            LlmError::Communication(_) | LlmError::RateLimitExceeded => true,
            LlmError::Api { status, .. } => *status == 408 || *status == 429 || *status >= 500,
            LlmError::InvalidResponse(_)
            | LlmError::ModelNotAvailable(_)
            | LlmError::Authentication(_)
            | LlmError::Other(_) => false,
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Mock LLM provider for deterministic testing
///
/// This provider returns pre-configured responses without making any network calls.
/// Scripted replies (see [`MockProvider::push_reply`]) are consumed first, in
/// order; then prompt-specific responses; then the default response.
///
/// # Examples
///
/// ```
/// use folio_domain::{LlmProvider, ModelParams};
/// use folio_llm::{LlmError, MockProvider};
///
/// let params = ModelParams::query();
///
/// // Simple fixed response
/// let provider = MockProvider::new("Fixed response");
/// assert_eq!(provider.complete("any prompt", &params).unwrap(), "Fixed response");
///
/// // Scripted sequence
/// let provider = MockProvider::new("finally");
/// provider.push_reply(Err(LlmError::RateLimitExceeded));
/// assert!(provider.complete("p", &params).is_err());
/// assert_eq!(provider.complete("p", &params).unwrap(), "finally");
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: Arc<Mutex<Result<String, LlmError>>>,
    responses: Arc<Mutex<HashMap<String, Result<String, LlmError>>>>,
    script: Arc<Mutex<VecDeque<Result<String, LlmError>>>>,
    prompts: Arc<Mutex<Vec<String>>>,
    last_params: Arc<Mutex<Option<ModelParams>>>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self::with_default(Ok(response.into()))
    }

    /// Create a MockProvider that fails every call with `error`
    pub fn failing(error: LlmError) -> Self {
        Self::with_default(Err(error))
    }

    fn with_default(default_response: Result<String, LlmError>) -> Self {
        Self {
            default_response: Arc::new(Mutex::new(default_response)),
            responses: Arc::new(Mutex::new(HashMap::new())),
            script: Arc::new(Mutex::new(VecDeque::new())),
            prompts: Arc::new(Mutex::new(Vec::new())),
            last_params: Arc::new(Mutex::new(None)),
        }
    }

    /// Add a specific response for a given prompt
    pub fn add_response(&mut self, prompt: impl Into<String>, response: impl Into<String>) {
        lock(&self.responses).insert(prompt.into(), Ok(response.into()));
    }

    /// Configure to return an error for a specific prompt
    pub fn add_error(&mut self, prompt: impl Into<String>, error: LlmError) {
        lock(&self.responses).insert(prompt.into(), Err(error));
    }

    /// Queue a reply returned by the next call, ahead of any other response
    pub fn push_reply(&self, reply: Result<String, LlmError>) {
        lock(&self.script).push_back(reply);
    }

    /// Get the number of times complete was called
    pub fn call_count(&self) -> usize {
        lock(&self.prompts).len()
    }

    /// Reset the call count and recorded prompts
    pub fn reset_call_count(&self) {
        lock(&self.prompts).clear();
    }

    /// Prompts received so far, in call order
    pub fn prompts(&self) -> Vec<String> {
        lock(&self.prompts).clone()
    }

    /// The most recent prompt received
    pub fn last_prompt(&self) -> Option<String> {
        lock(&self.prompts).last().cloned()
    }

    /// Parameters of the most recent call
    pub fn last_params(&self) -> Option<ModelParams> {
        lock(&self.last_params).clone()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl LlmProviderTrait for MockProvider {
    type Error = LlmError;

    fn complete(&self, prompt: &str, params: &ModelParams) -> Result<String, Self::Error> {
        lock(&self.prompts).push(prompt.to_string());
        *lock(&self.last_params) = Some(params.clone());

        if let Some(reply) = lock(&self.script).pop_front() {
            return reply;
        }

        if let Some(response) = lock(&self.responses).get(prompt) {
            return response.clone();
        }

        lock(&self.default_response).clone()
    }

    fn name(&self) -> &str {
        "mock"
    }
}
