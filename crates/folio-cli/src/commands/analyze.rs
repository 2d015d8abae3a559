//! Analyze command implementation.

use crate::cli::AnalyzeArgs;
use crate::commands::load_document;
use crate::error::Result;
use crate::output::Formatter;
use crate::provider::Provider;
use folio_extractor::InvoicePipeline;

/// Execute the analyze command.
pub fn execute_analyze(
    args: AnalyzeArgs,
    pipeline: &InvoicePipeline<Provider>,
    formatter: &Formatter,
) -> Result<()> {
    let text = load_document(&args.file)?;
    let details = pipeline.analyze(&text)?;

    println!("{}", formatter.format_details(&details)?);

    Ok(())
}
