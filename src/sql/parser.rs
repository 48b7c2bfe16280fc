// SQL parser - converts tokens to AST

use super::ast::*;
use super::error::{ParseError, ParseResult};
use super::lexer::Tokenizer;
use super::token::{Token, TokenKind};
use log::debug;

/// LL(1) recursive-descent parser over a single tokenizer.
pub struct Parser {
    tokenizer: Tokenizer,
    current_token: Option<Token>,
}

impl Parser {
    /// Create a parser and pull the first lookahead token
    pub fn new(mut tokenizer: Tokenizer) -> ParseResult<Self> {
        let current_token = tokenizer.next_token()?;
        Ok(Parser {
            tokenizer,
            current_token,
        })
    }

    /// Parse one `;`-terminated statement.
    ///
    /// Only the token following the terminator is read, as the next
    /// lookahead, so calling this again parses the next statement of the
    /// same input.
    pub fn parse_statement(&mut self) -> ParseResult<Statement> {
        match self.current_kind() {
            Some(TokenKind::Select) => Ok(Statement::Select(self.parse_select()?)),
            Some(TokenKind::Insert) => Ok(Statement::Insert(self.parse_insert()?)),
            Some(TokenKind::Delete) => Ok(Statement::Delete(self.parse_delete()?)),
            Some(TokenKind::Use) => Ok(Statement::Use(self.parse_use()?)),
            _ => Err(self.syntax_error("SELECT, INSERT, DELETE or USE")),
        }
    }

    /// Parse a SELECT statement
    fn parse_select(&mut self) -> ParseResult<SelectStatement> {
        self.expect(TokenKind::Select)?;
        let columns = self.parse_column_list()?;
        self.expect(TokenKind::From)?;
        let table = self.parse_identifier()?;

        let where_clause = if self.check(TokenKind::Where) {
            self.expect(TokenKind::Where)?;
            Some(self.parse_condition()?)
        } else {
            None
        };

        let order_by = if self.check(TokenKind::Order) {
            self.expect(TokenKind::Order)?;
            self.expect(TokenKind::By)?;
            Some(self.parse_identifier()?)
        } else {
            None
        };

        self.expect(TokenKind::Eol)?;

        Ok(SelectStatement {
            columns,
            table,
            where_clause,
            order_by,
        })
    }

    /// Parse an INSERT statement
    fn parse_insert(&mut self) -> ParseResult<InsertStatement> {
        self.expect(TokenKind::Insert)?;
        self.expect(TokenKind::Into)?;
        let table = self.parse_identifier()?;

        self.expect(TokenKind::LeftParen)?;
        let columns = self.parse_column_list()?;
        self.expect(TokenKind::RightParen)?;

        self.expect(TokenKind::Values)?;

        self.expect(TokenKind::LeftParen)?;
        let values = self.parse_value_list()?;
        self.expect(TokenKind::RightParen)?;

        self.expect(TokenKind::Eol)?;

        Ok(InsertStatement {
            table,
            columns,
            values,
        })
    }

    /// Parse a DELETE statement
    fn parse_delete(&mut self) -> ParseResult<DeleteStatement> {
        self.expect(TokenKind::Delete)?;
        self.expect(TokenKind::From)?;
        let table = self.parse_identifier()?;

        let where_clause = if self.check(TokenKind::Where) {
            self.expect(TokenKind::Where)?;
            Some(self.parse_condition()?)
        } else {
            None
        };

        self.expect(TokenKind::Eol)?;

        Ok(DeleteStatement {
            table,
            where_clause,
        })
    }

    /// Parse a USE statement
    fn parse_use(&mut self) -> ParseResult<UseStatement> {
        self.expect(TokenKind::Use)?;
        let database = self.parse_identifier()?;
        self.expect(TokenKind::Eol)?;

        Ok(UseStatement { database })
    }

    /// Parse `identifier (, identifier)*`
    fn parse_column_list(&mut self) -> ParseResult<ColumnList> {
        let mut columns = ColumnList::new(self.parse_identifier()?);

        while self.check(TokenKind::Separator) {
            self.expect(TokenKind::Separator)?;
            columns.push(self.parse_identifier()?);
        }

        Ok(columns)
    }

    /// Parse `value (, value)*`
    fn parse_value_list(&mut self) -> ParseResult<ValueList> {
        let mut values = ValueList::new(self.parse_value()?);

        while self.check(TokenKind::Separator) {
            self.expect(TokenKind::Separator)?;
            values.push(self.parse_value()?);
        }

        Ok(values)
    }

    /// Parse a WHERE condition
    fn parse_condition(&mut self) -> ParseResult<Comparison> {
        let left = self.parse_identifier()?;

        match self.current_kind() {
            Some(TokenKind::Is) => {
                let operator = self.expect(TokenKind::Is)?;
                let right = if self.check(TokenKind::Not) {
                    self.expect(TokenKind::Not)?;
                    let null = self.expect(TokenKind::Null)?;
                    Operand::NegatedNull(NegatedNull { operator: null })
                } else {
                    self.expect(TokenKind::Null)?;
                    Operand::Null
                };
                Ok(Comparison {
                    left,
                    operator,
                    right,
                })
            }
            Some(TokenKind::Comparison) => {
                let operator = self.expect(TokenKind::Comparison)?;
                let right = Operand::Literal(self.parse_value()?);
                Ok(Comparison {
                    left,
                    operator,
                    right,
                })
            }
            _ => Err(self.syntax_error("IS or COMPARISON")),
        }
    }

    /// Parse a string, number or function literal
    fn parse_value(&mut self) -> ParseResult<Literal> {
        let kind = match self.current_kind() {
            Some(kind) if kind.is_value() => kind,
            _ => return Err(self.syntax_error("value")),
        };

        let token = self.expect(kind)?;
        let literal_kind = match kind {
            TokenKind::StringLiteral => LiteralKind::String,
            TokenKind::Number => LiteralKind::Number,
            _ => LiteralKind::Function,
        };
        Ok(Literal::new(literal_kind, token.text))
    }

    fn parse_identifier(&mut self) -> ParseResult<Identifier> {
        let token = self.expect(TokenKind::Identifier)?;
        Ok(Identifier::new(token.text))
    }

    // Helper methods

    fn current_kind(&self) -> Option<TokenKind> {
        self.current_token.as_ref().map(|t| t.kind)
    }

    /// Check if the lookahead is of the given kind
    fn check(&self, kind: TokenKind) -> bool {
        self.current_kind() == Some(kind)
    }

    /// Consume the lookahead if it is of the given kind and return it
    fn expect(&mut self, kind: TokenKind) -> ParseResult<Token> {
        match self.current_token.take() {
            Some(token) if token.kind == kind => {
                self.current_token = self.tokenizer.next_token()?;
                Ok(token)
            }
            other => {
                self.current_token = other;
                Err(self.syntax_error(kind.name()))
            }
        }
    }

    fn syntax_error(&self, expected: &str) -> ParseError {
        match &self.current_token {
            Some(token) => debug!("Expected {}, found {}", expected, token),
            None => debug!("Expected {}, found end of input", expected),
        }
        ParseError::Syntax
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(sql: &str) -> ParseResult<Statement> {
        Parser::new(Tokenizer::new(sql))?.parse_statement()
    }

    #[test]
    fn test_parse_select_simple() {
        let stmt = parse("SELECT a, b FROM t;").unwrap();

        match stmt {
            Statement::Select(select) => {
                assert_eq!(select.columns.names(), vec!["a", "b"]);
                assert_eq!(select.table.name, "t");
                assert!(select.where_clause.is_none());
                assert!(select.order_by.is_none());
            }
            _ => panic!("Expected SELECT statement"),
        }
    }

    #[test]
    fn test_parse_select_with_where_and_order_by() {
        let stmt = parse("SELECT a FROM t WHERE a = 5 ORDER BY a;").unwrap();

        match stmt {
            Statement::Select(select) => {
                let condition = select.where_clause.unwrap();
                assert_eq!(condition.left.name, "a");
                assert_eq!(condition.operator.kind, TokenKind::Comparison);
                assert_eq!(condition.operator.text, "=");
                assert_eq!(
                    condition.right,
                    Operand::Literal(Literal::new(LiteralKind::Number, "5"))
                );
                assert_eq!(select.order_by, Some(Identifier::new("a")));
            }
            _ => panic!("Expected SELECT statement"),
        }
    }

    #[test]
    fn test_parse_insert() {
        let stmt = parse(r#"INSERT INTO t (a,b) VALUES ("x", 1);"#).unwrap();

        match stmt {
            Statement::Insert(insert) => {
                assert_eq!(insert.table.name, "t");
                assert_eq!(insert.columns.names(), vec!["a", "b"]);
                assert_eq!(
                    insert.values.values(),
                    &[
                        Literal::new(LiteralKind::String, "\"x\""),
                        Literal::new(LiteralKind::Number, "1"),
                    ]
                );
            }
            _ => panic!("Expected INSERT statement"),
        }
    }

    #[test]
    fn test_parse_delete_is_not_null() {
        let stmt = parse("DELETE FROM t WHERE a IS NOT NULL;").unwrap();

        match stmt {
            Statement::Delete(delete) => {
                assert_eq!(delete.table.name, "t");
                let condition = delete.where_clause.unwrap();
                assert_eq!(condition.left.name, "a");
                assert_eq!(condition.operator.text, "IS");
                match condition.right {
                    Operand::NegatedNull(negated) => {
                        assert_eq!(negated.operator.kind, TokenKind::Null);
                    }
                    other => panic!("Expected NOT NULL operand, got {:?}", other),
                }
            }
            _ => panic!("Expected DELETE statement"),
        }
    }

    #[test]
    fn test_parse_is_null() {
        let stmt = parse("SELECT a FROM t WHERE b IS NULL;").unwrap();

        match stmt {
            Statement::Select(select) => {
                assert_eq!(select.where_clause.unwrap().right, Operand::Null);
            }
            _ => panic!("Expected SELECT statement"),
        }
    }

    #[test]
    fn test_parse_use() {
        let stmt = parse("USE mydb;").unwrap();
        assert_eq!(
            stmt,
            Statement::Use(UseStatement {
                database: Identifier::new("mydb"),
            })
        );
    }

    #[test]
    fn test_missing_columns() {
        assert_eq!(parse("SELECT FROM t;"), Err(ParseError::Syntax));
    }

    #[test]
    fn test_empty_value_list() {
        assert_eq!(
            parse("INSERT INTO t (a) VALUES ();"),
            Err(ParseError::Syntax)
        );
    }

    #[test]
    fn test_order_by_before_where() {
        assert_eq!(
            parse("SELECT a FROM t ORDER BY a WHERE a = 5;"),
            Err(ParseError::Syntax)
        );
    }

    #[test]
    fn test_delete_requires_from() {
        assert_eq!(parse("DELETE t;"), Err(ParseError::Syntax));
    }

    #[test]
    fn test_condition_requires_literal() {
        assert_eq!(
            parse("SELECT a FROM t WHERE a = b;"),
            Err(ParseError::Syntax)
        );
    }

    #[test]
    fn test_missing_terminator() {
        assert_eq!(parse("USE mydb"), Err(ParseError::Syntax));
    }

    #[test]
    fn test_unknown_statement() {
        assert_eq!(parse("UPDATE t;"), Err(ParseError::Syntax));
        assert_eq!(parse(""), Err(ParseError::Syntax));
    }

    #[test]
    fn test_lexical_error_propagates() {
        assert_eq!(
            parse("SELECT a FROM t WHERE a = $;"),
            Err(ParseError::Lexical { offset: 26 })
        );
        assert!(matches!(
            Parser::new(Tokenizer::new("#")),
            Err(ParseError::Lexical { offset: 0 })
        ));
    }

    #[test]
    fn test_parser_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<Tokenizer>();
        assert_send::<Parser>();
        assert_send::<Statement>();
    }

    #[test]
    fn test_consecutive_statements() {
        let mut parser = Parser::new(Tokenizer::new("USE a; USE b;")).unwrap();

        assert_eq!(parser.parse_statement().unwrap().to_string(), "USE a;");
        assert_eq!(parser.parse_statement().unwrap().to_string(), "USE b;");
        assert_eq!(parser.parse_statement(), Err(ParseError::Syntax));
    }
}
