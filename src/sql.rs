// SQL module - tokenizing and parsing into an AST

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod token;

pub use ast::*;
pub use error::{ParseError, ParseResult};
pub use lexer::Tokenizer;
pub use parser::Parser;
pub use token::*;

/// Parse a single `;`-terminated statement
pub fn parse(sql: &str) -> ParseResult<Statement> {
    Parser::new(Tokenizer::new(sql))?.parse_statement()
}
