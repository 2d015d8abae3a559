//! Retry policies for model calls
//!
//! Each call site names its policy explicitly: structured extraction uses
//! [`RetryPolicy::standard`], question answering uses
//! [`RetryPolicy::single_attempt`] unless configured otherwise.

use crate::backoff::Backoff;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default number of attempts for retried calls
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default lower bound of a backoff delay (1 second)
pub const DEFAULT_MIN_BACKOFF_MS: u64 = 1_000;

/// Default upper bound of a backoff delay (60 seconds)
pub const DEFAULT_MAX_BACKOFF_MS: u64 = 60_000;

/// Bounded retry policy for one call site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: u32,

    /// Lower bound of each backoff delay (milliseconds)
    #[serde(default = "default_min_backoff_ms")]
    pub min_backoff_ms: u64,

    /// Upper bound of each backoff delay (milliseconds)
    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,
}

impl RetryPolicy {
    /// Up to 3 attempts with randomized exponential backoff from 1s capped at 60s
    pub fn standard() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            min_backoff_ms: DEFAULT_MIN_BACKOFF_MS,
            max_backoff_ms: DEFAULT_MAX_BACKOFF_MS,
        }
    }

    /// A single attempt, never retried
    pub fn single_attempt() -> Self {
        Self {
            max_attempts: 1,
            ..Self::standard()
        }
    }

    /// Whether this policy ever retries
    pub fn retries(&self) -> bool {
        self.max_attempts > 1
    }

    /// Backoff sequence for one call
    pub fn backoff(&self) -> Backoff {
        Backoff::new(
            Duration::from_millis(self.min_backoff_ms),
            Duration::from_millis(self.max_backoff_ms),
        )
    }

    /// Validate the policy
    pub fn validate(&self) -> Result<(), String> {
        if self.max_attempts == 0 {
            return Err("max_attempts must be at least 1".to_string());
        }
        if self.min_backoff_ms > self.max_backoff_ms {
            return Err(format!(
                "min_backoff_ms {} exceeds max_backoff_ms {}",
                self.min_backoff_ms, self.max_backoff_ms
            ));
        }
        Ok(())
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::standard()
    }
}

fn default_min_backoff_ms() -> u64 {
    DEFAULT_MIN_BACKOFF_MS
}

fn default_max_backoff_ms() -> u64 {
    DEFAULT_MAX_BACKOFF_MS
}
