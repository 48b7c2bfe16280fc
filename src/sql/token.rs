// SQL tokens for lexical analysis

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Literals
    StringLiteral,
    Number,
    SqlFunction,
    Identifier,

    // Keywords
    Select,
    Is,
    Not,
    Null,
    Order,
    By,
    Insert,
    Into,
    Values,
    Delete,
    From,
    Where,
    Use,

    // Operators
    Comparison,

    // Delimiters
    Separator,
    LeftParen,
    RightParen,
    Eol,
}

impl TokenKind {
    /// Upper-case name used when printing tokens and diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::StringLiteral => "STRING_LITERAL",
            TokenKind::Number => "NUMBER",
            TokenKind::SqlFunction => "SQL_FUNCTION",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::Select => "SELECT",
            TokenKind::Is => "IS",
            TokenKind::Not => "NOT",
            TokenKind::Null => "NULL",
            TokenKind::Order => "ORDER",
            TokenKind::By => "BY",
            TokenKind::Insert => "INSERT",
            TokenKind::Into => "INTO",
            TokenKind::Values => "VALUES",
            TokenKind::Delete => "DELETE",
            TokenKind::From => "FROM",
            TokenKind::Where => "WHERE",
            TokenKind::Use => "USE",
            TokenKind::Comparison => "COMPARISON",
            TokenKind::Separator => "SEPARATOR",
            TokenKind::LeftParen => "LP",
            TokenKind::RightParen => "RP",
            TokenKind::Eol => "EOL",
        }
    }

    /// Check if the kind can appear where a value is expected
    pub fn is_value(&self) -> bool {
        matches!(
            self,
            TokenKind::StringLiteral | TokenKind::Number | TokenKind::SqlFunction
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A matched piece of input together with where it started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    /// Byte offset of the first character of `text` in the input
    pub offset: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, offset: usize) -> Self {
        Token {
            kind,
            text: text.into(),
            offset,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}) at {}", self.kind, self.text, self.offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_kinds() {
        assert!(TokenKind::StringLiteral.is_value());
        assert!(TokenKind::Number.is_value());
        assert!(TokenKind::SqlFunction.is_value());
        assert!(!TokenKind::Identifier.is_value());
        assert!(!TokenKind::Null.is_value());
    }

    #[test]
    fn test_token_display() {
        let token = Token::new(TokenKind::Identifier, "users.id", 7);
        assert_eq!(token.to_string(), "IDENTIFIER(users.id) at 7");

        let token = Token::new(TokenKind::LeftParen, "(", 0);
        assert_eq!(token.to_string(), "LP(() at 0");
    }
}
