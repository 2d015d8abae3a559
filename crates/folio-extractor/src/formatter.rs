//! Structured extraction over the whole document

use crate::config::CallConfig;
use crate::error::{recoverable, ExtractorError};
use crate::prompt::ExtractionPrompt;
use folio_domain::traits::LlmProvider;
use folio_domain::ExtractionSection;
use folio_llm::{LlmError, ModelGateway};
use std::sync::Arc;
use tracing::{debug, error, info};

/// Content of the error section produced for a blank completion
pub const UNPARSEABLE_RESPONSE: &str = "Unable to parse response";

/// Asks the model for a sectioned analysis of an entire invoice
pub struct ExtractionFormatter<P> {
    gateway: Arc<ModelGateway<P>>,
    call: CallConfig,
}

impl<P> ExtractionFormatter<P>
where
    P: LlmProvider<Error = LlmError>,
{
    /// Create a formatter using the default extraction call settings
    pub fn new(gateway: Arc<ModelGateway<P>>) -> Self {
        Self::with_call(gateway, CallConfig::extraction())
    }

    /// Create a formatter with explicit call settings
    pub fn with_call(gateway: Arc<ModelGateway<P>>, call: CallConfig) -> Self {
        Self { gateway, call }
    }

    /// Extract sections from `text`
    ///
    /// The text is sent whole; a very long document may exceed the model's
    /// context and come back as an error section.
    ///
    /// # Errors
    ///
    /// Only [`ExtractorError::NotInitialized`] and [`ExtractorError::Config`]
    /// are returned. Every other failure is reported as a single
    /// [`ExtractionSection::error`].
    pub fn extract(&self, text: &str) -> Result<Vec<ExtractionSection>, ExtractorError> {
        let prompt = ExtractionPrompt::new(text).build();
        debug!("Extraction prompt length: {} chars", prompt.len());

        match self
            .gateway
            .complete(&prompt, &self.call.params(), &self.call.retry)
        {
            Ok(reply) if reply.trim().is_empty() => {
                error!("Model returned an empty analysis");
                Ok(vec![ExtractionSection::error(UNPARSEABLE_RESPONSE)])
            }
            Ok(reply) => {
                info!("Extracted analysis ({} chars)", reply.len());
                Ok(vec![ExtractionSection::analysis(reply)])
            }
            Err(e) => {
                let e = recoverable(e)?;
                error!("Error extracting invoice details: {}", e);
                Ok(vec![ExtractionSection::error(format!("Error: {}", e))])
            }
        }
    }
}
