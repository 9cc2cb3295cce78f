/// storeql query language
///
/// Pipeline:
/// - LiteralVault: lifts quoted literals out of the raw text
/// - Normalizer: canonical spacing, `#op#` delimiters, keyword spelling
/// - Lexer: typed tokens
/// - Parser: `Statement` with a compiled WHERE `Condition`
/// - Executor: runs the statement against the catalog

pub mod literal;
pub mod normalizer;
pub mod token;
pub mod lexer;
pub mod ast;
pub mod parser;
pub mod evaluator;
pub mod executor;

pub use literal::LiteralVault;
pub use normalizer::normalize;
pub use token::{CompareOp, Keyword, Token, TokenType};
pub use lexer::Lexer;
pub use ast::{
    Comparison, Condition, Connective, DeleteStmt, InsertStmt, Operand, OrderBy, Projection,
    SelectStmt, SortDirection, Statement, UpdateStmt,
};
pub use parser::Parser;
pub use evaluator::{row_matches, ExprEvaluator};
pub use executor::{QueryExecutor, QueryResult};

use crate::error::Result;

/// Turn query text into a statement
///
/// `literal_prefix` names the placeholder labels (`_LIT1_` for `"LIT"`).
pub fn parse_query(sql: &str, literal_prefix: &str) -> Result<Statement> {
    let (text, mut vault) = LiteralVault::extract_with_prefix(sql, literal_prefix)?;
    let normalized = normalize(&text);
    tracing::debug!(query = %normalized, literals = vault.len(), "normalized query");

    let tokens = Lexer::with_literal_prefix(&normalized, literal_prefix).tokenize()?;
    let statement = Parser::new(tokens, &mut vault).parse()?;
    tracing::debug!(verb = statement.verb(), table = statement.table(), "parsed query");

    Ok(statement)
}
