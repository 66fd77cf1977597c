//! Parse error types.

use alloc::string::{String, ToString};
use core::fmt;

/// Error produced while parsing IR text.
///
/// Syntax errors carry the byte offset where parsing stopped; semantic
/// errors (bad opcode typing, dangling branch targets) are detected after
/// the text is consumed and carry no position.
#[derive(Debug, Clone)]
pub struct ParseError {
    pub message: String,
    pub position: Option<usize>,
}

impl ParseError {
    /// A semantic error with no source position.
    pub(crate) fn semantic(message: String) -> Self {
        ParseError {
            message,
            position: None,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.position {
            Some(position) => write!(f, "Parse error at position {}: {}", position, self.message),
            None => write!(f, "Parse error: {}", self.message),
        }
    }
}

impl core::error::Error for ParseError {}

pub(crate) fn parse_error(original_input: &str, remaining_input: &str, message: &str) -> ParseError {
    ParseError {
        message: message.to_string(),
        position: Some(original_input.len() - remaining_input.len()),
    }
}
