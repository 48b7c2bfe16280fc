// SQL Abstract Syntax Tree (AST) definitions

use super::token::Token;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Select(SelectStatement),
    Insert(InsertStatement),
    Delete(DeleteStatement),
    Use(UseStatement),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectStatement {
    pub columns: ColumnList,
    pub table: Identifier,
    pub where_clause: Option<Comparison>,
    pub order_by: Option<Identifier>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InsertStatement {
    pub table: Identifier,
    pub columns: ColumnList,
    pub values: ValueList,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteStatement {
    pub table: Identifier,
    pub where_clause: Option<Comparison>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UseStatement {
    pub database: Identifier,
}

/// A table, column or database name, possibly qualified (`users.id`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    String,
    Number,
    Function,
}

/// A value exactly as written, quotes and parentheses included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Literal {
    pub kind: LiteralKind,
    pub value: String,
}

/// Non-empty list of column names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnList {
    columns: Vec<Identifier>,
}

/// Non-empty list of values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueList {
    values: Vec<Literal>,
}

/// `column <op> value`, `column IS NULL` or `column IS NOT NULL`.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub left: Identifier,
    /// The comparison operator or the `IS` keyword
    pub operator: Token,
    pub right: Operand,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Literal(Literal),
    NegatedNull(NegatedNull),
    Null,
}

/// Right-hand side of `IS NOT NULL`. `operator` is the `NULL` token that
/// followed `NOT`.
#[derive(Debug, Clone, PartialEq)]
pub struct NegatedNull {
    pub operator: Token,
}

impl Identifier {
    pub fn new(name: impl Into<String>) -> Self {
        Identifier { name: name.into() }
    }
}

impl Literal {
    pub fn new(kind: LiteralKind, value: impl Into<String>) -> Self {
        Literal {
            kind,
            value: value.into(),
        }
    }
}

impl ColumnList {
    pub fn new(first: Identifier) -> Self {
        ColumnList {
            columns: vec![first],
        }
    }

    pub fn push(&mut self, column: Identifier) {
        self.columns.push(column);
    }

    pub fn columns(&self) -> &[Identifier] {
        &self.columns
    }

    pub fn names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }
}

impl ValueList {
    pub fn new(first: Literal) -> Self {
        ValueList {
            values: vec![first],
        }
    }

    pub fn push(&mut self, value: Literal) {
        self.values.push(value);
    }

    pub fn values(&self) -> &[Literal] {
        &self.values
    }
}

// Rendering back to SQL text, one statement per line

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Select(select) => fmt::Display::fmt(select, f),
            Statement::Insert(insert) => fmt::Display::fmt(insert, f),
            Statement::Delete(delete) => fmt::Display::fmt(delete, f),
            Statement::Use(use_stmt) => fmt::Display::fmt(use_stmt, f),
        }
    }
}

impl fmt::Display for SelectStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SELECT {} FROM {}", self.columns, self.table)?;
        if let Some(condition) = &self.where_clause {
            write!(f, " WHERE {}", condition)?;
        }
        if let Some(column) = &self.order_by {
            write!(f, " ORDER BY {}", column)?;
        }
        f.write_str(";")
    }
}

impl fmt::Display for InsertStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "INSERT INTO {} ({}) VALUES ({});",
            self.table, self.columns, self.values
        )
    }
}

impl fmt::Display for DeleteStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DELETE FROM {}", self.table)?;
        if let Some(condition) = &self.where_clause {
            write!(f, " WHERE {}", condition)?;
        }
        f.write_str(";")
    }
}

impl fmt::Display for UseStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "USE {};", self.database)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl fmt::Display for ColumnList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.names().join(", "))
    }
}

impl fmt::Display for ValueList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", value)?;
        }
        Ok(())
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.left, self.operator.text, self.right)
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Literal(literal) => fmt::Display::fmt(literal, f),
            Operand::NegatedNull(_) => f.write_str("NOT NULL"),
            Operand::Null => f.write_str("NULL"),
        }
    }
}
