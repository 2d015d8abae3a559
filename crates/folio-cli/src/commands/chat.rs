//! Chat command implementation.

use crate::cli::ChatArgs;
use crate::commands::load_document;
use crate::error::Result;
use crate::output::Formatter;
use crate::provider::Provider;
use crate::repl;
use folio_extractor::InvoicePipeline;

/// Execute the chat command: analyze once, then take questions.
pub fn execute_chat(
    args: ChatArgs,
    pipeline: &InvoicePipeline<Provider>,
    formatter: &Formatter,
    history_size: usize,
) -> Result<()> {
    let text = load_document(&args.file)?;
    let details = pipeline.analyze(&text)?;

    println!("{}", formatter.format_details(&details)?);
    println!();

    if details.is_failed() {
        return Ok(());
    }

    repl::run_chat(pipeline, &details, formatter, history_size)
}
