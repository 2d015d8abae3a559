//! Model Gateway
//!
//! The single boundary through which every outbound model call passes. The
//! gateway is constructed explicitly and injected into the components that
//! need it; an unconfigured gateway is a distinct state that fails fast
//! instead of a missing client checked at every call site.
//!
//! # Retry behavior
//!
//! - Transient failures (see [`LlmError::is_transient`]) are retried up to
//!   the call site's [`RetryPolicy`], sleeping a randomized exponential delay
//!   between attempts.
//! - Non-transient failures end the call immediately.
//! - Every failed attempt is logged before the next retry or final failure.
//! - The retry loop blocks the calling thread; there is no cancellation hook.

use crate::retry::RetryPolicy;
use crate::{lock, LlmError};
use folio_domain::traits::LlmProvider;
use folio_domain::ModelParams;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors surfaced by [`ModelGateway::complete`]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GatewayError {
    /// The gateway was used before a provider was configured
    #[error("API client not initialized")]
    NotInitialized,

    /// A provider was configured twice
    #[error("Gateway already configured")]
    AlreadyConfigured,

    /// Model parameters or retry policy failed validation
    #[error("Invalid model parameters: {0}")]
    InvalidParams(String),

    /// Every attempt failed with a transient error
    #[error("{source}")]
    Exhausted {
        /// Number of attempts made
        attempts: u32,
        /// Error from the final attempt
        source: LlmError,
    },

    /// An attempt failed with an error that retrying cannot fix
    #[error("{0}")]
    Rejected(#[source] LlmError),
}

impl GatewayError {
    /// The provider error behind this failure, if any
    pub fn llm_error(&self) -> Option<&LlmError> {
        match self {
            GatewayError::Exhausted { source, .. } => Some(source),
            GatewayError::Rejected(source) => Some(source),
            _ => None,
        }
    }
}

/// Blocks the calling thread between attempts
pub trait Sleeper: Send + Sync {
    /// Sleep for `duration`
    fn sleep(&self, duration: Duration);
}

/// Sleeps with [`std::thread::sleep`]
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Records requested delays without sleeping
///
/// Clones share the same record.
#[derive(Debug, Clone, Default)]
pub struct RecordingSleeper {
    delays: Arc<Mutex<Vec<Duration>>>,
}

impl RecordingSleeper {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Delays requested so far, in order
    pub fn delays(&self) -> Vec<Duration> {
        lock(&self.delays).clone()
    }
}

impl Sleeper for RecordingSleeper {
    fn sleep(&self, duration: Duration) {
        lock(&self.delays).push(duration);
    }
}

enum GatewayState<P> {
    NotConfigured,
    Ready(P),
}

/// Boundary component wrapping all outbound model calls
pub struct ModelGateway<P> {
    state: GatewayState<P>,
    sleeper: Arc<dyn Sleeper>,
}

impl<P> ModelGateway<P>
where
    P: LlmProvider<Error = LlmError>,
{
    /// Create a gateway with no provider; every call fails with
    /// [`GatewayError::NotInitialized`] until [`configure`](Self::configure)
    pub fn unconfigured() -> Self {
        Self {
            state: GatewayState::NotConfigured,
            sleeper: Arc::new(ThreadSleeper),
        }
    }

    /// Create a gateway ready to call `provider`
    pub fn new(provider: P) -> Self {
        Self {
            state: GatewayState::Ready(provider),
            sleeper: Arc::new(ThreadSleeper),
        }
    }

    /// Replace the sleeper used between attempts
    pub fn with_sleeper(mut self, sleeper: impl Sleeper + 'static) -> Self {
        self.sleeper = Arc::new(sleeper);
        self
    }

    /// Configure the provider; allowed once
    pub fn configure(&mut self, provider: P) -> Result<(), GatewayError> {
        if self.is_configured() {
            return Err(GatewayError::AlreadyConfigured);
        }
        self.state = GatewayState::Ready(provider);
        Ok(())
    }

    /// Whether a provider has been configured
    pub fn is_configured(&self) -> bool {
        matches!(self.state, GatewayState::Ready(_))
    }

    /// The configured provider
    pub fn provider(&self) -> Option<&P> {
        match &self.state {
            GatewayState::Ready(provider) => Some(provider),
            GatewayState::NotConfigured => None,
        }
    }

    /// Issue a completion request under `policy`
    ///
    /// # Errors
    ///
    /// - [`GatewayError::NotInitialized`] if no provider is configured (never retried)
    /// - [`GatewayError::InvalidParams`] if `params` or `policy` are invalid
    /// - [`GatewayError::Rejected`] on the first non-transient failure
    /// - [`GatewayError::Exhausted`] once `policy.max_attempts` transient failures occurred
    pub fn complete(
        &self,
        prompt: &str,
        params: &ModelParams,
        policy: &RetryPolicy,
    ) -> Result<String, GatewayError> {
        let provider = match &self.state {
            GatewayState::Ready(provider) => provider,
            GatewayState::NotConfigured => return Err(GatewayError::NotInitialized),
        };

        params.validate().map_err(GatewayError::InvalidParams)?;
        policy.validate().map_err(GatewayError::InvalidParams)?;

        debug!(
            "Calling {} model '{}' (prompt {} chars, max {} attempts)",
            provider.name(),
            params.model,
            prompt.len(),
            policy.max_attempts
        );

        let mut backoff = policy.backoff();
        let mut attempts = 0;

        loop {
            attempts += 1;

            let error = match provider.complete(prompt, params) {
                Ok(text) => {
                    debug!("Model response length: {} chars", text.len());
                    return Ok(text);
                }
                Err(e) => e,
            };

            warn!(
                "Model call attempt {}/{} failed: {}",
                attempts, policy.max_attempts, error
            );

            if !error.is_transient() {
                return Err(GatewayError::Rejected(error));
            }
            if attempts >= policy.max_attempts {
                return Err(GatewayError::Exhausted {
                    attempts,
                    source: error,
                });
            }

            let delay = backoff.next_delay();
            debug!("Retrying in {} ms", delay.as_millis());
            self.sleeper.sleep(delay);
        }
    }
}
