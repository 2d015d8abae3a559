//! Ask command implementation.

use crate::cli::AskArgs;
use crate::commands::load_document;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::provider::Provider;
use folio_domain::InvoiceDetails;
use folio_extractor::InvoicePipeline;
use std::collections::BTreeSet;

/// Execute the ask command.
///
/// Answers from the document text directly, without running extraction.
pub fn execute_ask(
    args: AskArgs,
    pipeline: &InvoicePipeline<Provider>,
    formatter: &Formatter,
) -> Result<()> {
    let question = args.question();
    if question.trim().is_empty() {
        return Err(CliError::InvalidInput("Question must not be empty".to_string()));
    }

    let text = load_document(&args.file)?;
    let details = InvoiceDetails::new(Vec::new(), text, BTreeSet::new());
    let answer = pipeline.ask(&question, &details)?;

    println!("{}", formatter.format_answer(&question, &answer)?);

    Ok(())
}
