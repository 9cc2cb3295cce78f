//! Row insertion and query execution

use crate::catalog::validate_row;
use crate::error::Result;
use crate::sql::{parse_query, QueryExecutor, QueryResult};
use crate::types::Row;

use super::core::Engine;

impl Engine {
    /// Insert rows directly, bypassing the query language
    ///
    /// Creates the table if needed and validates each row against its
    /// schema. Commits once after all rows are appended. Returns the number
    /// of rows inserted.
    ///
    /// # Example
    /// ```
    /// use storeql::{Engine, Row, Value};
    ///
    /// let mut engine = Engine::in_memory();
    /// let mut row = Row::new();
    /// row.insert("name".into(), Value::from("ann"));
    /// assert_eq!(engine.insert("people", vec![row]).unwrap(), 1);
    /// ```
    pub fn insert<I>(&mut self, path: &str, rows: I) -> Result<usize>
    where
        I: IntoIterator<Item = Row>,
    {
        let path = self.resolve_path(path)?;
        let table = self.catalog.get_or_create_table(&path, true)?;

        let mut count = 0;
        for row in rows {
            let row = validate_row(table, row);
            table.rows.push(row);
            count += 1;
        }

        self.commit(path.namespace)?;
        Ok(count)
    }

    /// Run one query
    ///
    /// # Example
    /// ```
    /// let mut engine = storeql::Engine::in_memory();
    /// engine.query("INSERT INTO t (id, name) VALUES (1, 'ann')").unwrap();
    /// let result = engine.query("SELECT name FROM t WHERE id = 1").unwrap();
    /// assert_eq!(result.rows.len(), 1);
    /// ```
    pub fn query(&mut self, sql: &str) -> Result<QueryResult> {
        let statement = parse_query(sql, &self.config.literal_prefix)?;

        let mut executor = QueryExecutor::new(
            &mut self.catalog,
            self.backend.as_ref(),
            self.default_namespace,
            self.config.auto_create_tables,
        );
        executor.execute(statement)
    }
}
