//! LLM prompt engineering for invoice analysis

/// Named sections the extraction prompt asks the model to fill, with the
/// details each one covers
pub const EXTRACTION_SECTIONS: [(&str, &str); 5] = [
    ("Recipient Information", "Name, Address, Contact"),
    ("Invoice Details", "Number, Date, PO Box, Due Date"),
    ("Line Items", "Quantity, Description, Unit Price, Total"),
    ("Financial Summary", "Subtotal, Tax, Total"),
    ("Additional Details", "Signature, Notes"),
];

/// Builds the structured-extraction prompt over the whole document
pub struct ExtractionPrompt<'a> {
    text: &'a str,
}

impl<'a> ExtractionPrompt<'a> {
    /// Create a prompt for `text`
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }

    /// Build the complete extraction prompt
    pub fn build(&self) -> String {
        let mut prompt = String::new();

        prompt.push_str("Analyze this invoice and extract information in these sections:\n\n");
        for (idx, (title, details)) in EXTRACTION_SECTIONS.iter().enumerate() {
            prompt.push_str(&format!("{}. {} ({})\n", idx + 1, title, details));
        }
        prompt.push('\n');
        prompt.push_str(EXTRACTION_FORMAT);
        prompt.push_str("\n\nInvoice text:\n");
        prompt.push_str(self.text);

        prompt
    }
}

/// Builds the question-answering prompt over a selected context
pub struct QueryPrompt<'a> {
    question: &'a str,
    context: &'a str,
}

impl<'a> QueryPrompt<'a> {
    /// Create a prompt answering `question` from `context`
    pub fn new(question: &'a str, context: &'a str) -> Self {
        Self { question, context }
    }

    /// Build the complete question prompt
    pub fn build(&self) -> String {
        let mut prompt = String::new();

        prompt.push_str(QUERY_INSTRUCTIONS);
        prompt.push_str("\n\nInvoice Content:\n");
        prompt.push_str(self.context);
        prompt.push_str("\n\nQuestion: ");
        prompt.push_str(self.question);
        prompt.push_str("\n\n");
        prompt.push_str(QUERY_REMINDER);

        prompt
    }
}

const EXTRACTION_FORMAT: &str = "Format each section clearly and include all found information.";

const QUERY_INSTRUCTIONS: &str = r#"You are an AI assistant analyzing an invoice document. Use the following invoice content to answer the question.
Only use information present in the invoice content. If information is not available, say so."#;

const QUERY_REMINDER: &str =
    "Provide a clear, direct answer based only on the information in the invoice.";
