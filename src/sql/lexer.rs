// SQL lexer - tokenizes SQL statements

use super::error::{ParseError, ParseResult};
use super::token::{Token, TokenKind};
use log::trace;
use regex::Regex;
use std::sync::LazyLock;

/// Lexical rules in priority order. At every position the first rule whose
/// pattern matches there wins, even when a later rule would match more text,
/// so keywords must come before `IDENTIFIER` and are not guarded by word
/// boundaries.
const RULES: &[(TokenKind, &str)] = &[
    (TokenKind::StringLiteral, r#"".*""#),
    (TokenKind::Number, r"\d+"),
    (TokenKind::SqlFunction, r"\w+\(\)"),
    (TokenKind::Select, "SELECT"),
    (TokenKind::Separator, ","),
    (TokenKind::Is, "IS"),
    (TokenKind::Not, "NOT"),
    (TokenKind::Null, "NULL"),
    (TokenKind::Order, "ORDER"),
    (TokenKind::By, "BY"),
    (TokenKind::Insert, "INSERT"),
    (TokenKind::Into, "INTO"),
    (TokenKind::LeftParen, r"\("),
    (TokenKind::RightParen, r"\)"),
    (TokenKind::Values, "VALUES"),
    (TokenKind::Delete, "DELETE"),
    (TokenKind::From, "FROM"),
    (TokenKind::Where, "WHERE"),
    (TokenKind::Comparison, "[<>=]"),
    (TokenKind::Use, "USE"),
    (TokenKind::Identifier, r"\w+(?:\.\w+)?"),
    (TokenKind::Eol, ";"),
];

// Anchored so a rule only matches at the start of the remaining input.
static MATCHERS: LazyLock<Vec<(TokenKind, Regex)>> = LazyLock::new(|| {
    RULES
        .iter()
        .map(|(kind, pattern)| {
            let regex = Regex::new(&format!("^(?:{})", pattern))
                .unwrap_or_else(|e| panic!("invalid pattern for {}: {}", kind, e));
            (*kind, regex)
        })
        .collect()
});

pub struct Tokenizer {
    input: String,
    position: usize,
    current_token: Option<Token>,
}

impl Tokenizer {
    pub fn new(input: impl Into<String>) -> Self {
        Tokenizer {
            input: input.into(),
            position: 0,
            current_token: None,
        }
    }

    /// Get the next token from the input.
    ///
    /// Returns `Ok(None)` once only whitespace is left, and a lexical error
    /// carrying the offset of the first character no rule matches.
    pub fn next_token(&mut self) -> ParseResult<Option<Token>> {
        self.skip_whitespace();

        if self.position >= self.input.len() {
            self.current_token = None;
            return Ok(None);
        }

        let rest = &self.input[self.position..];
        for (kind, regex) in MATCHERS.iter() {
            if let Some(m) = regex.find(rest) {
                let token = Token::new(*kind, m.as_str(), self.position);
                trace!("{}", token);
                self.position += m.end();
                self.current_token = Some(token.clone());
                return Ok(Some(token));
            }
        }

        Err(ParseError::Lexical {
            offset: self.position,
        })
    }

    /// The token most recently returned by `next_token`
    pub fn current_token(&self) -> Option<&Token> {
        self.current_token.as_ref()
    }

    /// Tokenize the rest of the input
    pub fn tokenize(&mut self) -> ParseResult<Vec<Token>> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    fn skip_whitespace(&mut self) {
        let rest = &self.input[self.position..];
        self.position += rest.find(|c: char| !is_space(c)).unwrap_or(rest.len());
    }
}

// Unicode whitespace plus the ASCII file/group/record/unit separators.
fn is_space(c: char) -> bool {
    c.is_whitespace() || ('\x1c'..='\x1f').contains(&c)
}
