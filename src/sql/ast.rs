/// Statement and condition trees produced by the parser
use super::token::CompareOp;
use crate::types::Value;

/// Top-level query, one variant per verb
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Select(SelectStmt),
    Insert(InsertStmt),
    Update(UpdateStmt),
    Delete(DeleteStmt),
}

impl Statement {
    /// Raw `[namespace.]table` path the statement targets
    pub fn table(&self) -> &str {
        match self {
            Statement::Select(s) => &s.table,
            Statement::Insert(i) => &i.table,
            Statement::Update(u) => &u.table,
            Statement::Delete(d) => &d.table,
        }
    }

    pub fn verb(&self) -> &'static str {
        match self {
            Statement::Select(_) => "SELECT",
            Statement::Insert(_) => "INSERT_INTO",
            Statement::Update(_) => "UPDATE",
            Statement::Delete(_) => "DELETE_FROM",
        }
    }
}

/// SELECT statement
#[derive(Debug, Clone, PartialEq)]
pub struct SelectStmt {
    pub projection: Projection,
    pub table: String,
    pub where_clause: Option<Condition>,
    pub order_by: Option<OrderBy>,
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Projection {
    /// `*`
    All,
    Fields(Vec<String>),
}

/// ORDERBY field[,field...] [ASC|DESC]
///
/// One direction covers every field; later fields only break ties.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    pub fields: Vec<String>,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// INSERT INTO table (fields) VALUES (values)
#[derive(Debug, Clone, PartialEq)]
pub struct InsertStmt {
    pub table: String,
    pub fields: Vec<String>,
    pub values: Vec<Value>,
}

/// UPDATE table SET field=value[,...] [WHERE ...]
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateStmt {
    pub table: String,
    pub assignments: Vec<(String, Value)>,
    pub where_clause: Option<Condition>,
}

/// DELETE FROM table [WHERE ...]
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteStmt {
    pub table: String,
    pub where_clause: Option<Condition>,
}

/// WHERE clause: operands joined left to right by AND/OR
///
/// There is no precedence between AND and OR; only parentheses group.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub first: Operand,
    pub rest: Vec<(Connective, Operand)>,
}

impl Condition {
    pub fn single(operand: Operand) -> Self {
        Self { first: operand, rest: Vec::new() }
    }

    pub fn operand_count(&self) -> usize {
        1 + self.rest.len()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// Bare `1` or `0`
    Constant(bool),
    Compare(Comparison),
    /// Parenthesized sub-chain
    Group(Box<Condition>),
}

/// `field op value`, value already resolved through the literal vault
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub field: String,
    pub op: CompareOp,
    pub value: Value,
}

impl Comparison {
    pub fn new(field: impl Into<String>, op: CompareOp, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            op,
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connective {
    And,
    Or,
}
