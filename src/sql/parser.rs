/// Query parser - converts the typed token stream into a `Statement`
///
/// Grammar (after normalization):
/// ```text
/// SELECT <*|f[,f...]> <from-marker> <path> [WHERE cond] [ORDERBY f[,f...] [ASC|DESC]] [LIMIT n]
/// INSERT_INTO <path> (f[,f...]) [VALUES] (v[,v...])
/// UPDATE <path> SET f=v[,f=v...] [WHERE cond]
/// DELETE_FROM <path> [WHERE cond]
/// ```
/// Placeholders are resolved through the literal vault as values are read,
/// so each literal is consumed exactly once per query.
use super::ast::*;
use super::literal::LiteralVault;
use super::token::{CompareOp, Keyword, Token, TokenType};
use crate::error::{Result, StoreError};
use crate::types::Value;

pub struct Parser<'v> {
    tokens: Vec<Token>,
    position: usize,
    vault: &'v mut LiteralVault,
}

impl<'v> Parser<'v> {
    pub fn new(mut tokens: Vec<Token>, vault: &'v mut LiteralVault) -> Self {
        if !matches!(tokens.last(), Some(t) if t.token_type == TokenType::Eof) {
            let end = tokens.last().map(|t| t.position + 1).unwrap_or(0);
            tokens.push(Token::new(TokenType::Eof, end));
        }
        Self { tokens, position: 0, vault }
    }

    /// Parse a complete statement
    pub fn parse(&mut self) -> Result<Statement> {
        let stmt = match &self.current().token_type {
            TokenType::Keyword(Keyword::Select) => Statement::Select(self.parse_select()?),
            TokenType::Keyword(Keyword::InsertInto) => Statement::Insert(self.parse_insert()?),
            TokenType::Keyword(Keyword::Update) => Statement::Update(self.parse_update()?),
            TokenType::Keyword(Keyword::DeleteFrom) => Statement::Delete(self.parse_delete()?),
            _ => return Err(self.error("Expected SELECT, INSERT INTO, UPDATE or DELETE FROM")),
        };

        if !matches!(self.current().token_type, TokenType::Eof) {
            return Err(self.error("Unexpected token"));
        }

        Ok(stmt)
    }

    fn parse_select(&mut self) -> Result<SelectStmt> {
        self.expect_keyword(Keyword::Select)?;

        let projection = if self.match_token(&TokenType::Star) {
            Projection::All
        } else {
            Projection::Fields(self.parse_identifier_list()?)
        };

        // FROM-marker position: any single word, discarded
        match self.current().token_type {
            TokenType::Word(_) => self.advance(),
            _ => return Err(self.error("Expected FROM")),
        }

        let table = self.parse_table_path()?;

        let where_clause = self.parse_where()?;

        let order_by = if self.match_keyword(Keyword::OrderBy) {
            let fields = self.parse_identifier_list()?;
            let direction = if self.match_keyword(Keyword::Desc) {
                SortDirection::Desc
            } else {
                self.match_keyword(Keyword::Asc); // Optional
                SortDirection::Asc
            };
            Some(OrderBy { fields, direction })
        } else {
            None
        };

        let limit = if self.match_keyword(Keyword::Limit) {
            Some(self.parse_usize()?)
        } else {
            None
        };

        Ok(SelectStmt {
            projection,
            table,
            where_clause,
            order_by,
            limit,
        })
    }

    fn parse_insert(&mut self) -> Result<InsertStmt> {
        self.expect_keyword(Keyword::InsertInto)?;
        let table = self.parse_table_path()?;

        self.expect(TokenType::LParen, "Expected '(' before field list")?;
        let fields = self.parse_identifier_list()?;
        self.expect(TokenType::RParen, "Expected ')' after field list")?;

        self.match_keyword(Keyword::Values);

        self.expect(TokenType::LParen, "Expected '(' before value list")?;
        let mut values = vec![self.parse_value()?];
        while self.match_token(&TokenType::Comma) {
            values.push(self.parse_value()?);
        }
        self.expect(TokenType::RParen, "Expected ')' after value list")?;

        if fields.len() != values.len() {
            return Err(StoreError::MalformedQuery(format!(
                "Field count mismatch: {} fields, {} values",
                fields.len(),
                values.len()
            )));
        }

        Ok(InsertStmt { table, fields, values })
    }

    fn parse_update(&mut self) -> Result<UpdateStmt> {
        self.expect_keyword(Keyword::Update)?;
        let table = self.parse_table_path()?;
        self.expect_keyword(Keyword::Set)?;

        let mut assignments = Vec::new();
        loop {
            let field = self.parse_identifier()?;
            self.expect(TokenType::Compare(CompareOp::Eq), "Expected '=' in assignment")?;
            let value = self.parse_value()?;
            assignments.push((field, value));

            if !self.match_token(&TokenType::Comma) {
                break;
            }
        }

        let where_clause = self.parse_where()?;

        Ok(UpdateStmt {
            table,
            assignments,
            where_clause,
        })
    }

    fn parse_delete(&mut self) -> Result<DeleteStmt> {
        self.expect_keyword(Keyword::DeleteFrom)?;
        let table = self.parse_table_path()?;
        let where_clause = self.parse_where()?;
        Ok(DeleteStmt { table, where_clause })
    }

    fn parse_where(&mut self) -> Result<Option<Condition>> {
        if self.match_keyword(Keyword::Where) {
            Ok(Some(self.parse_condition()?))
        } else {
            Ok(None)
        }
    }

    /// operand { (AND|OR) operand }
    fn parse_condition(&mut self) -> Result<Condition> {
        let first = self.parse_operand()?;
        let mut rest = Vec::new();

        loop {
            let connective = match self.current().token_type {
                TokenType::Keyword(Keyword::And) => Connective::And,
                TokenType::Keyword(Keyword::Or) => Connective::Or,
                _ => break,
            };
            self.advance();
            rest.push((connective, self.parse_operand()?));
        }

        Ok(Condition { first, rest })
    }

    fn parse_operand(&mut self) -> Result<Operand> {
        if self.match_token(&TokenType::LParen) {
            let inner = self.parse_condition()?;
            self.expect(TokenType::RParen, "Expected ')' to close group")?;
            return Ok(Operand::Group(Box::new(inner)));
        }

        let field = match &self.current().token_type {
            TokenType::Word(w) => w.clone(),
            _ => return Err(self.error("Expected comparison")),
        };

        if let TokenType::Compare(op) = self.peek().token_type {
            self.advance();
            self.advance();
            let value = self.parse_value()?;
            return Ok(Operand::Compare(Comparison { field, op, value }));
        }

        // Bare 1/0 stand for already-decided sub-expressions
        match field.as_str() {
            "1" => {
                self.advance();
                Ok(Operand::Constant(true))
            }
            "0" => {
                self.advance();
                Ok(Operand::Constant(false))
            }
            _ => Err(self.error("Expected comparison operator")),
        }
    }

    /// Comparand or assigned value
    fn parse_value(&mut self) -> Result<Value> {
        let value = match &self.current().token_type {
            TokenType::Placeholder(label) => {
                let label = label.clone();
                Value::Text(self.vault.take(&label)?)
            }
            TokenType::Word(w) => Value::from_token(w),
            // Keyword-shaped bare values keep their canonical spelling
            TokenType::Keyword(k) => Value::Text(k.as_str().to_string()),
            _ => return Err(self.error("Expected value")),
        };
        self.advance();
        Ok(value)
    }

    fn parse_table_path(&mut self) -> Result<String> {
        match &self.current().token_type {
            TokenType::Word(w) => {
                let path = w.clone();
                self.advance();
                Ok(path)
            }
            _ => Err(self.error("Expected table name")),
        }
    }

    fn parse_identifier(&mut self) -> Result<String> {
        match &self.current().token_type {
            TokenType::Word(w) => {
                let name = w.clone();
                self.advance();
                Ok(name)
            }
            _ => Err(self.error("Expected field name")),
        }
    }

    fn parse_identifier_list(&mut self) -> Result<Vec<String>> {
        let mut names = vec![self.parse_identifier()?];
        while self.match_token(&TokenType::Comma) {
            names.push(self.parse_identifier()?);
        }
        Ok(names)
    }

    fn parse_usize(&mut self) -> Result<usize> {
        let parsed = match &self.current().token_type {
            TokenType::Word(w) => w.parse::<usize>().ok(),
            _ => None,
        };
        match parsed {
            Some(n) => {
                self.advance();
                Ok(n)
            }
            None => Err(self.error("Expected non-negative integer")),
        }
    }

    fn current(&self) -> &Token {
        // `new` guarantees a trailing Eof
        &self.tokens[self.position.min(self.tokens.len() - 1)]
    }

    fn peek(&self) -> &Token {
        &self.tokens[(self.position + 1).min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) {
        if self.position < self.tokens.len() - 1 {
            self.position += 1;
        }
    }

    fn match_token(&mut self, token_type: &TokenType) -> bool {
        if &self.current().token_type == token_type {
            self.advance();
            true
        } else {
            false
        }
    }

    fn match_keyword(&mut self, keyword: Keyword) -> bool {
        self.match_token(&TokenType::Keyword(keyword))
    }

    fn expect(&mut self, token_type: TokenType, msg: &str) -> Result<()> {
        if self.match_token(&token_type) {
            Ok(())
        } else {
            Err(self.error(msg))
        }
    }

    fn expect_keyword(&mut self, keyword: Keyword) -> Result<()> {
        if self.match_keyword(keyword) {
            Ok(())
        } else {
            Err(self.error(&format!("Expected {}", keyword.as_str())))
        }
    }

    fn error(&self, msg: &str) -> StoreError {
        let token = self.current();
        StoreError::MalformedQuery(format!(
            "{} at position {} (found {})",
            msg,
            token.position,
            token.token_type.describe()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::lexer::Lexer;
    use crate::sql::normalizer::normalize;

    fn parse_sql(sql: &str) -> Result<Statement> {
        let (text, mut vault) = LiteralVault::extract(sql)?;
        let tokens = Lexer::new(&normalize(&text)).tokenize()?;
        let mut parser = Parser::new(tokens, &mut vault);
        parser.parse()
    }

    fn compare(field: &str, op: CompareOp, value: impl Into<Value>) -> Operand {
        Operand::Compare(Comparison::new(field, op, value))
    }

    #[test]
    fn test_parse_simple_select() {
        let stmt = parse_sql("SELECT * FROM users").unwrap();
        match stmt {
            Statement::Select(s) => {
                assert_eq!(s.table, "users");
                assert_eq!(s.projection, Projection::All);
                assert!(s.where_clause.is_none());
                assert!(s.order_by.is_none());
                assert!(s.limit.is_none());
            }
            _ => panic!("Expected SELECT statement"),
        }
    }

    #[test]
    fn test_parse_select_full() {
        let stmt = parse_sql(
            "select id, name from session.users where age >= 18 and name != 'bob' orderby age, id desc limit 10",
        )
        .unwrap();
        match stmt {
            Statement::Select(s) => {
                assert_eq!(s.table, "session.users");
                assert_eq!(
                    s.projection,
                    Projection::Fields(vec!["id".to_string(), "name".to_string()])
                );
                let cond = s.where_clause.unwrap();
                assert_eq!(cond.first, compare("age", CompareOp::Ge, 18));
                assert_eq!(cond.rest, vec![(Connective::And, compare("name", CompareOp::Ne, "bob"))]);
                assert_eq!(
                    s.order_by,
                    Some(OrderBy {
                        fields: vec!["age".to_string(), "id".to_string()],
                        direction: SortDirection::Desc,
                    })
                );
                assert_eq!(s.limit, Some(10));
            }
            _ => panic!("Expected SELECT statement"),
        }
    }

    #[test]
    fn test_parse_nested_groups() {
        let stmt = parse_sql("SELECT * FROM t WHERE (id < 10 OR (id > 90 AND x = 1)) AND active = 1").unwrap();
        let cond = match stmt {
            Statement::Select(s) => s.where_clause.unwrap(),
            _ => panic!("Expected SELECT statement"),
        };
        assert_eq!(cond.operand_count(), 2);
        match &cond.first {
            Operand::Group(inner) => {
                assert_eq!(inner.first, compare("id", CompareOp::Lt, 10));
                assert!(matches!(&inner.rest[0], (Connective::Or, Operand::Group(g)) if g.operand_count() == 2));
            }
            other => panic!("Expected group, got {:?}", other),
        }
        assert_eq!(cond.rest[0], (Connective::And, compare("active", CompareOp::Eq, 1)));
    }

    #[test]
    fn test_parse_insert() {
        let stmt = parse_sql("INSERT INTO users (id, name) VALUES (1, 'John Smith')").unwrap();
        match stmt {
            Statement::Insert(i) => {
                assert_eq!(i.table, "users");
                assert_eq!(i.fields, vec!["id".to_string(), "name".to_string()]);
                assert_eq!(i.values, vec![Value::Number(1.0), Value::Text("John Smith".into())]);
            }
            _ => panic!("Expected INSERT statement"),
        }
    }

    #[test]
    fn test_parse_insert_count_mismatch() {
        assert!(matches!(
            parse_sql("INSERT INTO users (id, name) VALUES (1)"),
            Err(StoreError::MalformedQuery(_))
        ));
    }

    #[test]
    fn test_parse_update() {
        let stmt = parse_sql("UPDATE users SET name = 'Jane', age = 30 WHERE id = 1").unwrap();
        match stmt {
            Statement::Update(u) => {
                assert_eq!(u.table, "users");
                assert_eq!(
                    u.assignments,
                    vec![
                        ("name".to_string(), Value::Text("Jane".into())),
                        ("age".to_string(), Value::Number(30.0)),
                    ]
                );
                assert!(u.where_clause.is_some());
            }
            _ => panic!("Expected UPDATE statement"),
        }
    }

    #[test]
    fn test_parse_delete() {
        let stmt = parse_sql("DELETE FROM users WHERE age < 18").unwrap();
        match stmt {
            Statement::Delete(d) => {
                assert_eq!(d.table, "users");
                assert!(d.where_clause.is_some());
            }
            _ => panic!("Expected DELETE statement"),
        }

        let stmt = parse_sql("delete from users").unwrap();
        assert!(matches!(stmt, Statement::Delete(DeleteStmt { where_clause: None, .. })));
    }

    #[test]
    fn test_literal_keywords_survive() {
        let stmt = parse_sql("SELECT * FROM t WHERE word = 'select' OR word = \"where and\"").unwrap();
        let cond = match stmt {
            Statement::Select(s) => s.where_clause.unwrap(),
            _ => panic!("Expected SELECT statement"),
        };
        assert_eq!(cond.first, compare("word", CompareOp::Eq, "select"));
        assert_eq!(cond.rest[0].1, compare("word", CompareOp::Eq, "where and"));
    }

    #[test]
    fn test_constant_operands() {
        let stmt = parse_sql("DELETE FROM t WHERE 1 AND x = 2").unwrap();
        match stmt {
            Statement::Delete(d) => {
                assert_eq!(d.where_clause.unwrap().first, Operand::Constant(true));
            }
            _ => panic!("Expected DELETE statement"),
        }
    }

    #[test]
    fn test_malformed_queries() {
        let cases = [
            "DROP TABLE users",
            "SELECT *",
            "SELECT * FROM",
            "SELECT * FROM t WHERE",
            "SELECT * FROM t WHERE a = 1 AND",
            "SELECT * FROM t WHERE (a = 1",
            "SELECT * FROM t WHERE a = 1)",
            "SELECT * FROM t WHERE a",
            "SELECT * FROM t LIMIT -1",
            "SELECT * FROM t LIMIT many",
            "SELECT * FROM t WHERE a = 1 b = 2",
            "UPDATE t a = 1",
            "UPDATE t SET a > 1",
            "DELETE FROM t LIMIT 1",
            "INSERT INTO t a VALUES 1",
        ];
        for sql in cases {
            assert!(
                matches!(parse_sql(sql), Err(StoreError::MalformedQuery(_))),
                "expected MalformedQuery for {:?}",
                sql
            );
        }
    }

    #[test]
    fn test_placeholder_not_in_vault() {
        assert!(matches!(
            parse_sql("SELECT * FROM t WHERE a = _LIT7_"),
            Err(StoreError::UnresolvedLiteral(_))
        ));
    }

    #[test]
    fn test_literal_touching_keyword() {
        let stmt = parse_sql("SELECT * FROM t WHERE a='x'AND b=1").unwrap();
        let cond = match stmt {
            Statement::Select(s) => s.where_clause.unwrap(),
            _ => panic!("Expected SELECT statement"),
        };
        assert_eq!(cond.first, compare("a", CompareOp::Eq, "x"));
        assert_eq!(cond.rest, vec![(Connective::And, compare("b", CompareOp::Eq, 1))]);

        let stmt = parse_sql("SELECT * FROM t WHERE a='x'LIMIT 1").unwrap();
        assert!(matches!(stmt, Statement::Select(SelectStmt { limit: Some(1), .. })));
    }

    #[test]
    fn test_lowercase_keywords_and_keyword_shaped_names() {
        let stmt = parse_sql("insert into local.desc (a) values (rock-and-roll)").unwrap();
        match stmt {
            Statement::Insert(i) => {
                assert_eq!(i.table, "local.desc");
                assert_eq!(i.values, vec![Value::Text("rock-and-roll".into())]);
            }
            _ => panic!("Expected INSERT statement"),
        }
    }
}
