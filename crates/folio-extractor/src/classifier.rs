//! Field presence classification
//!
//! Infers which invoice fields an analysis mentions by looking for marker
//! labels in the text. Matching is a plain case-sensitive substring test, so
//! a marker inside a longer word (`"Taxonomy"` for `Tax`) still counts.

use folio_domain::{ExtractionSection, FieldMarkerTable, FieldName};
use std::collections::BTreeSet;
use tracing::debug;

/// Decides which fields are present in extracted sections
pub trait FieldClassifier: Send + Sync {
    /// Classify `sections`; never fails
    fn classify(&self, sections: &[ExtractionSection]) -> BTreeSet<FieldName>;
}

/// Classifies the first section's content against a [`FieldMarkerTable`]
#[derive(Debug, Clone, Default)]
pub struct MarkerTableClassifier {
    table: FieldMarkerTable,
}

impl MarkerTableClassifier {
    /// Create a classifier over `table`
    pub fn new(table: FieldMarkerTable) -> Self {
        Self { table }
    }

    /// The marker table in use
    pub fn table(&self) -> &FieldMarkerTable {
        &self.table
    }

    /// Fields implied by markers found in `content`
    pub fn classify_text(&self, content: &str) -> BTreeSet<FieldName> {
        self.table
            .entries()
            .iter()
            .filter(|entry| content.contains(entry.marker.as_str()))
            .flat_map(|entry| entry.fields.iter().copied())
            .collect()
    }
}

impl FieldClassifier for MarkerTableClassifier {
    fn classify(&self, sections: &[ExtractionSection]) -> BTreeSet<FieldName> {
        let Some(first) = sections.first() else {
            return BTreeSet::new();
        };

        let fields = self.classify_text(&first.content);
        debug!("Found {} fields in '{}' section", fields.len(), first.title);
        fields
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    const MARKERS: [&str; 5] = ["Recipient", "Invoice", "Line Items", "Tax", "Total"];

    proptest! {
        /// Property: Adding text never removes a present field
        #[test]
        fn test_presence_is_monotonic(base in "\\PC{0,100}", extra in "\\PC{0,100}") {
            let classifier = MarkerTableClassifier::default();
            let before = classifier.classify_text(&base);
            let after = classifier.classify_text(&format!("{}{}", base, extra));
            prop_assert!(before.is_subset(&after));
        }

        /// Property: Inserting a marker adds every field it implies
        #[test]
        fn test_inserted_marker_is_found(
            prefix in "[a-z ]{0,40}",
            suffix in "[a-z ]{0,40}",
            idx in 0usize..MARKERS.len(),
        ) {
            let classifier = MarkerTableClassifier::default();
            let content = format!("{}{}{}", prefix, MARKERS[idx], suffix);
            let fields = classifier.classify_text(&content);
            let entry = &classifier.table().entries()[idx];
            for field in &entry.fields {
                prop_assert!(fields.contains(field));
            }
        }
    }
}
