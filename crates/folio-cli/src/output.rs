//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use folio_domain::{FieldName, InvoiceDetails};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format an analysis.
    pub fn format_details(&self, details: &InvoiceDetails) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_details_json(details),
            OutputFormat::Table => Ok(self.format_details_table(details)),
            OutputFormat::Quiet => Ok(self.format_details_quiet(details)),
        }
    }

    /// Format an answer to `question`.
    pub fn format_answer(&self, question: &str, answer: &str) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
                "question": question,
                "answer": answer,
            }))?),
            OutputFormat::Table | OutputFormat::Quiet => Ok(answer.to_string()),
        }
    }

    fn format_details_json(&self, details: &InvoiceDetails) -> Result<String> {
        let sections: Vec<serde_json::Value> = details
            .sections
            .iter()
            .map(|s| {
                serde_json::json!({
                    "title": s.title,
                    "content": s.content,
                })
            })
            .collect();

        let json = serde_json::json!({
            "sections": sections,
            "present_fields": labels(details.present_fields.iter().copied()),
            "missing_fields": labels(details.missing_fields()),
            "error": details.error,
        });

        Ok(serde_json::to_string_pretty(&json)?)
    }

    fn format_details_table(&self, details: &InvoiceDetails) -> String {
        if let Some(error) = &details.error {
            return self.error(error);
        }

        let mut out = String::new();
        for section in &details.sections {
            let title = if section.is_error() {
                self.colorize(&section.title, "red")
            } else {
                self.colorize(&section.title, "cyan")
            };
            out.push_str(&title);
            out.push('\n');
            out.push_str(section.content.trim_end());
            out.push_str("\n\n");
        }

        let mut builder = Builder::default();
        builder.push_record(["Field", "Status"]);
        for field in FieldName::ALL {
            let status = if details.has_field(field) {
                "Found"
            } else {
                "Missing"
            };
            builder.push_record([field.label(), status]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        out.push_str(&table.to_string());

        let missing = details.missing_fields();
        if !missing.is_empty() {
            out.push('\n');
            out.push_str(&self.warning(&format!(
                "Missing required fields: {}",
                labels(missing).join(", ")
            )));
        }

        out
    }

    fn format_details_quiet(&self, details: &InvoiceDetails) -> String {
        labels(details.present_fields.iter().copied()).join("\n")
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

fn labels(fields: impl IntoIterator<Item = FieldName>) -> Vec<&'static str> {
    fields.into_iter().map(|f| f.label()).collect()
}
