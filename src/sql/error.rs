//! Error types for tokenizing and parsing.

use thiserror::Error;

/// Errors that abort the parse of a statement.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// No lexical rule matched at `offset`.
    #[error("Lexical error at offset {offset}")]
    Lexical { offset: usize },

    #[error("Invalid syntax")]
    Syntax,
}

impl ParseError {
    /// Byte offset of the offending character, for lexical errors
    pub fn offset(&self) -> Option<usize> {
        match self {
            ParseError::Lexical { offset } => Some(*offset),
            ParseError::Syntax => None,
        }
    }
}

/// Result type for tokenizer and parser operations.
pub type ParseResult<T> = Result<T, ParseError>;
