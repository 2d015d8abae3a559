//! Interactive chat over an analyzed invoice.

use crate::config::folio_dir;
use crate::error::Result;
use crate::output::Formatter;
use crate::provider::Provider;
use folio_domain::InvoiceDetails;
use folio_extractor::InvoicePipeline;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::PathBuf;

/// Run the chat loop until `exit` or end of input.
pub fn run_chat(
    pipeline: &InvoicePipeline<Provider>,
    details: &InvoiceDetails,
    formatter: &Formatter,
    history_size: usize,
) -> Result<()> {
    println!(
        "{}",
        formatter.info("Ask questions about this invoice. Type 'help' for commands, 'exit' to quit")
    );
    println!();

    let editor_config = rustyline::Config::builder()
        .max_history_size(history_size)?
        .auto_add_history(false)
        .build();
    let mut editor = DefaultEditor::with_config(editor_config)?;

    let history_path = get_history_path()?;
    let _ = editor.load_history(&history_path);

    loop {
        match editor.readline("folio> ") {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                editor.add_history_entry(line).ok();

                match parse_chat_line(line) {
                    ChatCommand::Exit => {
                        println!("{}", formatter.info("Goodbye!"));
                        break;
                    }
                    ChatCommand::Help => print_help(formatter),
                    ChatCommand::Summary => match formatter.format_details(details) {
                        Ok(out) => println!("{}", out),
                        Err(e) => eprintln!("{}", formatter.error(&e.to_string())),
                    },
                    ChatCommand::Question(question) => {
                        match pipeline
                            .ask(question, details)
                            .map_err(Into::into)
                            .and_then(|answer| formatter.format_answer(question, &answer))
                        {
                            Ok(out) => println!("{}\n", out),
                            Err(e) => eprintln!("{}", formatter.error(&e.to_string())),
                        }
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", formatter.info("Use 'exit' to quit"));
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("{}", formatter.error(&format!("Error: {}", err)));
                break;
            }
        }
    }

    editor.save_history(&history_path).ok();

    Ok(())
}

/// Chat input type.
#[derive(Debug, PartialEq, Eq)]
enum ChatCommand<'a> {
    Exit,
    Help,
    Summary,
    Question(&'a str),
}

/// Parse a trimmed, non-empty chat line.
fn parse_chat_line(line: &str) -> ChatCommand<'_> {
    match line {
        "exit" | "quit" | "q" => ChatCommand::Exit,
        "help" | "?" => ChatCommand::Help,
        "summary" | "fields" => ChatCommand::Summary,
        question => ChatCommand::Question(question),
    }
}

fn get_history_path() -> Result<PathBuf> {
    let dir = folio_dir()?;
    std::fs::create_dir_all(&dir)?;
    Ok(dir.join("history.txt"))
}

fn print_help(formatter: &Formatter) {
    println!("{}", formatter.info("Available commands:"));
    println!();
    println!("  <question>        - Ask a question about the invoice");
    println!("  summary, fields   - Show the analysis and field checklist again");
    println!("  help, ?           - Show this help");
    println!("  exit, quit, q     - Leave chat");
    println!();
}
