//! Invoice field names and the marker table that implies them

use std::fmt;
use std::str::FromStr;

/// An invoice field whose presence is reported to the presentation layer
///
/// Ordering follows declaration order, which is the order fields are listed
/// in a checklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldName {
    /// Name of the invoice recipient
    RecipientName,
    /// Shipping address of the recipient
    ShippingAddress,
    /// Invoice number
    InvoiceNumber,
    /// Invoice date
    Date,
    /// Line items
    LineItems,
    /// Tax information
    TaxInformation,
    /// Total amount
    TotalAmount,
}

impl FieldName {
    /// Every field, in checklist order
    pub const ALL: [FieldName; 7] = [
        FieldName::RecipientName,
        FieldName::ShippingAddress,
        FieldName::InvoiceNumber,
        FieldName::Date,
        FieldName::LineItems,
        FieldName::TaxInformation,
        FieldName::TotalAmount,
    ];

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            FieldName::RecipientName => "Recipient Name",
            FieldName::ShippingAddress => "Shipping Address",
            FieldName::InvoiceNumber => "Invoice Number",
            FieldName::Date => "Date",
            FieldName::LineItems => "Line Items",
            FieldName::TaxInformation => "Tax Information",
            FieldName::TotalAmount => "Total Amount",
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FieldName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldName::ALL
            .iter()
            .copied()
            .find(|field| field.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown field name: {}", s))
    }
}

/// Fields a complete invoice is expected to carry
pub const REQUIRED_FIELDS: [FieldName; 6] = [
    FieldName::RecipientName,
    FieldName::ShippingAddress,
    FieldName::InvoiceNumber,
    FieldName::Date,
    FieldName::LineItems,
    FieldName::TaxInformation,
];

/// One row of the marker table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerEntry {
    /// Substring searched for in the analysis text
    pub marker: String,
    /// Fields implied present when the marker is found
    pub fields: Vec<FieldName>,
}

impl MarkerEntry {
    /// Create a marker entry
    pub fn new(marker: impl Into<String>, fields: impl Into<Vec<FieldName>>) -> Self {
        Self {
            marker: marker.into(),
            fields: fields.into(),
        }
    }
}

/// Fixed mapping from marker label to the set of fields it implies
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMarkerTable {
    entries: Vec<MarkerEntry>,
}

impl FieldMarkerTable {
    /// Build a table from explicit entries
    pub fn new(entries: Vec<MarkerEntry>) -> Self {
        Self { entries }
    }

    /// The invoice marker table
    ///
    /// | Marker       | Implies                           |
    /// |--------------|-----------------------------------|
    /// | `Recipient`  | Recipient Name, Shipping Address  |
    /// | `Invoice`    | Invoice Number, Date              |
    /// | `Line Items` | Line Items                        |
    /// | `Tax`        | Tax Information                   |
    /// | `Total`      | Total Amount                      |
    pub fn standard() -> Self {
        Self::new(vec![
            MarkerEntry::new(
                "Recipient",
                [FieldName::RecipientName, FieldName::ShippingAddress],
            ),
            MarkerEntry::new("Invoice", [FieldName::InvoiceNumber, FieldName::Date]),
            MarkerEntry::new("Line Items", [FieldName::LineItems]),
            MarkerEntry::new("Tax", [FieldName::TaxInformation]),
            MarkerEntry::new("Total", [FieldName::TotalAmount]),
        ])
    }

    /// Entries in table order
    pub fn entries(&self) -> &[MarkerEntry] {
        &self.entries
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for FieldMarkerTable {
    fn default() -> Self {
        Self::standard()
    }
}
