//! Folio Extractor
//!
//! Turns an invoice's extracted text into a sectioned analysis, infers which
//! invoice fields it mentions, and answers free-form questions about it.
//!
//! # Architecture
//!
//! ```text
//! Text ─┬─► ExtractionFormatter ─► Gateway ─► Sections ─► Classifier ─► InvoiceDetails
//!       │
//!       └─► Chunker ─► ContextSelector ─► QueryAnswerer ─► Gateway ─► Answer
//! ```
//!
//! # Key Features
//!
//! - **Whole-document extraction**: One prompt over the full text, five fixed sections
//! - **Field presence**: Marker-table classification behind [`FieldClassifier`]
//! - **Question answering**: Overlapping chunks, positional context selection
//! - **Bounded retries**: Per-call-site [`RetryPolicy`](folio_llm::RetryPolicy) in [`AnalysisConfig`]
//! - **Failures as data**: Model errors become error sections or error-prefixed answers
//!
//! # Example Usage
//!
//! ```
//! use folio_extractor::{AnalysisConfig, InvoicePipeline};
//! use folio_llm::{MockProvider, ModelGateway};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let gateway = ModelGateway::new(MockProvider::new("Invoice Number: 123"));
//! let pipeline = InvoicePipeline::new(gateway, AnalysisConfig::default())?;
//!
//! let details = pipeline.analyze("ACME Corp\nInvoice #123")?;
//! println!("Present: {:?}", details.present_fields);
//! println!("Missing: {:?}", details.missing_fields());
//!
//! let answer = pipeline.ask("What is the invoice number?", &details)?;
//! println!("{}", answer);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]

mod answerer;
mod chunking;
mod classifier;
mod config;
mod context;
mod error;
mod formatter;
mod pipeline;
mod prompt;

#[cfg(test)]
mod tests;

pub use answerer::{QueryAnswerer, QUESTION_ERROR_PREFIX};
pub use chunking::{chunk_text, TextChunker, DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE};
pub use classifier::{FieldClassifier, MarkerTableClassifier};
pub use config::{AnalysisConfig, CallConfig};
pub use context::{
    select_context, ContextSelectionPolicy, FirstNChunksPolicy, DEFAULT_CONTEXT_CHUNKS,
};
pub use error::ExtractorError;
pub use formatter::{ExtractionFormatter, UNPARSEABLE_RESPONSE};
pub use pipeline::{InvoicePipeline, NO_CONTEXT_ANSWER};
pub use prompt::{ExtractionPrompt, QueryPrompt, EXTRACTION_SECTIONS};
