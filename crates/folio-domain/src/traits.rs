//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use crate::completion::ModelParams;

/// Trait for LLM provider operations
///
/// Implemented by the infrastructure layer (folio-llm). A provider issues a
/// single request; retry policy belongs to the gateway wrapping it.
pub trait LlmProvider {
    /// Error type for LLM operations
    type Error;

    /// Generate a text completion for `prompt`
    fn complete(&self, prompt: &str, params: &ModelParams) -> Result<String, Self::Error>;

    /// Short provider name used in logs
    fn name(&self) -> &str {
        "llm"
    }
}
