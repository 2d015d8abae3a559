//! Extraction sections and the per-document aggregate

use crate::field::{FieldName, REQUIRED_FIELDS};
use std::collections::BTreeSet;

/// Title of the section wrapping a successful analysis
pub const ANALYSIS_SECTION_TITLE: &str = "Invoice Analysis";

/// Title of the section reporting a failed analysis
pub const ERROR_SECTION_TITLE: &str = "Error";

/// One titled block of analysis text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionSection {
    /// Section title
    pub title: String,
    /// Section body
    pub content: String,
}

impl ExtractionSection {
    /// Create a section
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// Section wrapping a model analysis
    pub fn analysis(content: impl Into<String>) -> Self {
        Self::new(ANALYSIS_SECTION_TITLE, content)
    }

    /// Section describing a failure
    pub fn error(content: impl Into<String>) -> Self {
        Self::new(ERROR_SECTION_TITLE, content)
    }

    /// Whether this section reports a failure
    pub fn is_error(&self) -> bool {
        self.title == ERROR_SECTION_TITLE
    }
}

/// Result of analyzing one document
///
/// Created fresh per document and never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvoiceDetails {
    /// Analysis sections, in order
    pub sections: Vec<ExtractionSection>,
    /// The text the analysis was run on
    pub raw_text: String,
    /// Fields the analysis mentions
    pub present_fields: BTreeSet<FieldName>,
    /// Pipeline-level failure, if the analysis could not run at all
    pub error: Option<String>,
}

impl InvoiceDetails {
    /// Aggregate for a successful run
    pub fn new(
        sections: Vec<ExtractionSection>,
        raw_text: impl Into<String>,
        present_fields: BTreeSet<FieldName>,
    ) -> Self {
        Self {
            sections,
            raw_text: raw_text.into(),
            present_fields,
            error: None,
        }
    }

    /// Aggregate carrying only an error
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::default()
        }
    }

    /// Whether the pipeline short-circuited
    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }

    /// Whether a field was found
    pub fn has_field(&self, field: FieldName) -> bool {
        self.present_fields.contains(&field)
    }

    /// Required fields that were not found, in checklist order
    pub fn missing_fields(&self) -> Vec<FieldName> {
        REQUIRED_FIELDS
            .iter()
            .copied()
            .filter(|field| !self.present_fields.contains(field))
            .collect()
    }
}
