//! Folio Domain Layer
//!
//! This crate contains the core domain model for Folio. It has ZERO external
//! dependencies and defines the value objects and trait interfaces that the
//! provider, extraction and CLI layers depend upon.
//!
//! ## Key Concepts
//!
//! - **Chunk**: A bounded window over the document text, with its start offset
//! - **Model parameters**: Model identifier, output budget and temperature for one call
//! - **Section**: One titled block of analysis text returned by the model
//! - **Invoice details**: The per-document aggregate handed to the presentation layer
//! - **Marker table**: Fixed mapping from marker labels to the invoice fields they imply
//!
//! ## Architecture
//!
//! - No external crate dependencies
//! - Pure data and lookup logic only
//! - Infrastructure implementations (HTTP providers, retry) live in other crates

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod chunk;
pub mod completion;
pub mod field;
pub mod section;
pub mod traits;

// Re-exports for convenience
pub use chunk::Chunk;
pub use completion::ModelParams;
pub use field::{FieldMarkerTable, FieldName, MarkerEntry, REQUIRED_FIELDS};
pub use section::{ExtractionSection, InvoiceDetails, ANALYSIS_SECTION_TITLE, ERROR_SECTION_TITLE};
pub use traits::LlmProvider;
