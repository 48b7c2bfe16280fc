//! Line-oriented reading of SQL scripts.
//!
//! A script holds one statement per line. Blank lines are skipped and every
//! other line is handed to the parser on its own, so a failure on one line
//! does not affect the lines after it.

use crate::sql::{self, ParseError, ParseResult, Statement, Token, Tokenizer};
use std::io::{self, BufRead};

/// A non-blank line of a script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    /// 1-based line number in the script
    pub number: usize,
    pub text: String,
}

impl SourceLine {
    pub fn parse(&self) -> ParseResult<Statement> {
        sql::parse(&self.text)
    }

    pub fn tokenize(&self) -> ParseResult<Vec<Token>> {
        Tokenizer::new(self.text.as_str()).tokenize()
    }

    /// A caret under the character a lexical error points at
    pub fn error_marker(&self, err: &ParseError) -> Option<String> {
        let offset = err.offset()?;
        let column = self.text.get(..offset)?.chars().count();
        Some(format!("{}^", " ".repeat(column)))
    }
}

/// Iterator over the non-blank lines of a script.
pub struct ScriptReader<R> {
    lines: io::Lines<R>,
    line_number: usize,
}

impl<R: BufRead> ScriptReader<R> {
    pub fn new(reader: R) -> Self {
        ScriptReader {
            lines: reader.lines(),
            line_number: 0,
        }
    }
}

impl<R: BufRead> Iterator for ScriptReader<R> {
    type Item = io::Result<SourceLine>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let text = match self.lines.next()? {
                Ok(text) => text,
                Err(e) => return Some(Err(e)),
            };
            self.line_number += 1;

            if !text.trim().is_empty() {
                return Some(Ok(SourceLine {
                    number: self.line_number,
                    text,
                }));
            }
        }
    }
}

/// Counts of parsed and rejected statements in a script.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScriptSummary {
    pub parsed: usize,
    pub failed: usize,
}

impl ScriptSummary {
    pub fn record<T, E>(&mut self, result: &Result<T, E>) {
        match result {
            Ok(_) => self.parsed += 1,
            Err(_) => self.failed += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.parsed + self.failed
    }
}
