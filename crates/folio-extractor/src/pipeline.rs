//! End-to-end invoice analysis

use crate::answerer::QueryAnswerer;
use crate::chunking::TextChunker;
use crate::classifier::{FieldClassifier, MarkerTableClassifier};
use crate::config::AnalysisConfig;
use crate::context::{ContextSelectionPolicy, FirstNChunksPolicy};
use crate::error::ExtractorError;
use crate::formatter::ExtractionFormatter;
use folio_domain::traits::LlmProvider;
use folio_domain::InvoiceDetails;
use folio_llm::{LlmError, ModelGateway};
use std::sync::Arc;
use tracing::{info, warn};

/// Answer given when a question is asked without document text
pub const NO_CONTEXT_ANSWER: &str = "Unable to process questions without document context.";

/// Runs extraction, classification and question answering against one gateway
pub struct InvoicePipeline<P> {
    formatter: ExtractionFormatter<P>,
    answerer: QueryAnswerer<P>,
    classifier: Box<dyn FieldClassifier>,
    config: AnalysisConfig,
}

impl<P> InvoicePipeline<P>
where
    P: LlmProvider<Error = LlmError>,
{
    /// Create a pipeline owning `gateway`
    ///
    /// # Errors
    ///
    /// Returns [`ExtractorError::Config`] if `config` fails validation.
    pub fn new(gateway: ModelGateway<P>, config: AnalysisConfig) -> Result<Self, ExtractorError> {
        Self::from_shared(Arc::new(gateway), config)
    }

    /// Create a pipeline over a shared gateway
    pub fn from_shared(
        gateway: Arc<ModelGateway<P>>,
        config: AnalysisConfig,
    ) -> Result<Self, ExtractorError> {
        config.validate().map_err(ExtractorError::Config)?;

        let chunker = TextChunker::new(config.chunk_size, config.chunk_overlap)?;
        let formatter =
            ExtractionFormatter::with_call(Arc::clone(&gateway), config.extraction.clone());
        let answerer = QueryAnswerer::new(gateway)
            .with_chunker(chunker)
            .with_policy(FirstNChunksPolicy::new(config.context_chunks))
            .with_call(config.query.clone());

        Ok(Self {
            formatter,
            answerer,
            classifier: Box::new(MarkerTableClassifier::default()),
            config,
        })
    }

    /// Replace the field classifier
    pub fn with_classifier(mut self, classifier: impl FieldClassifier + 'static) -> Self {
        self.classifier = Box::new(classifier);
        self
    }

    /// Replace the question context policy
    pub fn with_context_policy(mut self, policy: impl ContextSelectionPolicy + 'static) -> Self {
        self.answerer = self.answerer.with_policy(policy);
        self
    }

    /// Configuration in use
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyze an invoice's text
    ///
    /// Empty or whitespace-only text yields a failed [`InvoiceDetails`]
    /// without calling the model.
    pub fn analyze(&self, text: &str) -> Result<InvoiceDetails, ExtractorError> {
        if text.trim().is_empty() {
            warn!("No text found in document");
            return Ok(InvoiceDetails::failed(ExtractorError::EmptyInput.to_string()));
        }

        info!("Analyzing invoice ({} chars)", text.chars().count());
        let sections = self.formatter.extract(text)?;
        let present_fields = self.classifier.classify(&sections);
        info!(
            "Analysis complete: {} sections, {} fields present",
            sections.len(),
            present_fields.len()
        );

        Ok(InvoiceDetails::new(sections, text, present_fields))
    }

    /// Answer `question` about previously analyzed `details`
    ///
    /// Empty or whitespace-only text is answered with [`NO_CONTEXT_ANSWER`]
    /// without calling the model.
    pub fn ask(&self, question: &str, details: &InvoiceDetails) -> Result<String, ExtractorError> {
        if details.raw_text.trim().is_empty() {
            return Ok(NO_CONTEXT_ANSWER.to_string());
        }
        self.answerer.answer(question, &details.raw_text)
    }
}
