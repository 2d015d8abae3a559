//! Command implementations.

pub mod analyze;
pub mod ask;
pub mod chat;
pub mod config;

pub use self::analyze::execute_analyze;
pub use self::ask::execute_ask;
pub use self::chat::execute_chat;
pub use self::config::execute_config;

use crate::error::Result;
use std::io::Read;

/// Read a document's text from `path`, or from stdin when `path` is "-".
pub fn load_document(path: &str) -> Result<String> {
    if path == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }
    Ok(std::fs::read_to_string(path)?)
}
