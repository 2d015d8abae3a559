//! Error types for the analysis pipeline

use folio_llm::GatewayError;
use thiserror::Error;

/// Errors that can occur during analysis
///
/// Only [`ExtractorError::Config`] and [`ExtractorError::NotInitialized`]
/// escape the extraction and question-answering components; model failures
/// are turned into error sections or error-prefixed answers there.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractorError {
    /// Invalid chunking parameters or analysis configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// The model gateway was used before a provider was configured
    #[error("API client not initialized")]
    NotInitialized,

    /// Model gateway failure
    #[error("{0}")]
    Gateway(GatewayError),

    /// No text was extracted from the source document
    #[error("No text found in document.")]
    EmptyInput,
}

impl From<GatewayError> for ExtractorError {
    fn from(e: GatewayError) -> Self {
        match e {
            GatewayError::NotInitialized => ExtractorError::NotInitialized,
            GatewayError::InvalidParams(message) => ExtractorError::Config(message),
            GatewayError::AlreadyConfigured => {
                ExtractorError::Config("Gateway already configured".to_string())
            }
            other => ExtractorError::Gateway(other),
        }
    }
}

/// Split a gateway failure into one a component recovers from (`Ok`) and
/// one that must propagate (`Err`)
pub(crate) fn recoverable(e: GatewayError) -> Result<GatewayError, ExtractorError> {
    match ExtractorError::from(e) {
        ExtractorError::Gateway(e) => Ok(e),
        fatal => Err(fatal),
    }
}
