/// Query executor - runs parsed statements against the table catalog
use super::ast::*;
use super::evaluator::ExprEvaluator;
use crate::catalog::{validate_row, Catalog};
use crate::error::Result;
use crate::storage::StorageBackend;
use crate::types::{Namespace, Row, TablePath, Value};
use std::cmp::Ordering;

/// Query result
///
/// SELECT: the matching rows (owned copies) and their count.
/// INSERT/UPDATE/DELETE: the table's rows after the write and the number of
/// rows inserted, updated or deleted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResult {
    pub rows: Vec<Row>,
    pub affected_rows: usize,
}

impl QueryResult {
    pub fn new(rows: Vec<Row>, affected_rows: usize) -> Self {
        Self { rows, affected_rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Values of one field across all rows (missing fields read as Null)
    pub fn column(&self, field: &str) -> Vec<Value> {
        self.rows
            .iter()
            .map(|row| row.get(field).cloned().unwrap_or(Value::Null))
            .collect()
    }
}

/// Query executor
pub struct QueryExecutor<'a> {
    catalog: &'a mut Catalog,
    backend: &'a dyn StorageBackend,
    default_namespace: Namespace,
    create_tables: bool,
}

impl<'a> QueryExecutor<'a> {
    pub fn new(
        catalog: &'a mut Catalog,
        backend: &'a dyn StorageBackend,
        default_namespace: Namespace,
        create_tables: bool,
    ) -> Self {
        Self {
            catalog,
            backend,
            default_namespace,
            create_tables,
        }
    }

    /// Execute a statement
    pub fn execute(&mut self, stmt: Statement) -> Result<QueryResult> {
        match stmt {
            Statement::Select(select) => self.execute_select(select),
            Statement::Insert(insert) => self.execute_insert(insert),
            Statement::Update(update) => self.execute_update(update),
            Statement::Delete(delete) => self.execute_delete(delete),
        }
    }

    fn resolve(&self, table: &str) -> Result<TablePath> {
        TablePath::parse(table, self.default_namespace)
    }

    /// SELECT: filter, sort, limit, project. Never commits.
    fn execute_select(&mut self, stmt: SelectStmt) -> Result<QueryResult> {
        let path = self.resolve(&stmt.table)?;
        let table = self.catalog.get_or_create_table(&path, self.create_tables)?;

        let mut evaluator = ExprEvaluator::new();
        let mut rows: Vec<Row> = match &stmt.where_clause {
            Some(cond) => table
                .rows
                .iter()
                .filter(|row| evaluator.eval(cond, row))
                .cloned()
                .collect(),
            None => table.rows.clone(),
        };

        if let Some(order_by) = &stmt.order_by {
            sort_rows(&mut rows, order_by);
        }

        if let Some(limit) = stmt.limit {
            rows.truncate(limit);
        }

        if let Projection::Fields(fields) = &stmt.projection {
            for row in &mut rows {
                row.retain(|name, _| fields.contains(name));
            }
        }

        let count = rows.len();
        Ok(QueryResult::new(rows, count))
    }

    /// INSERT: build one row, validate it against the schema, append
    fn execute_insert(&mut self, stmt: InsertStmt) -> Result<QueryResult> {
        let path = self.resolve(&stmt.table)?;
        let table = self.catalog.get_or_create_table(&path, self.create_tables)?;

        let row: Row = stmt.fields.into_iter().zip(stmt.values).collect();
        let row = validate_row(table, row);
        table.rows.push(row);
        let rows = table.rows.clone();

        self.catalog.commit(path.namespace, self.backend)?;
        Ok(QueryResult::new(rows, 1))
    }

    /// UPDATE: apply every assignment to each matching row
    fn execute_update(&mut self, stmt: UpdateStmt) -> Result<QueryResult> {
        let path = self.resolve(&stmt.table)?;
        let table = self.catalog.get_or_create_table(&path, self.create_tables)?;

        let mut evaluator = ExprEvaluator::new();
        let mut affected = 0;
        for row in &mut table.rows {
            let matched = match &stmt.where_clause {
                Some(cond) => evaluator.eval(cond, row),
                None => true,
            };
            if !matched {
                continue;
            }
            for (field, value) in &stmt.assignments {
                row.insert(field.clone(), value.clone());
            }
            affected += 1;
        }
        let rows = table.rows.clone();

        self.catalog.commit(path.namespace, self.backend)?;
        Ok(QueryResult::new(rows, affected))
    }

    /// DELETE: drop matching rows, keep the rest in order
    fn execute_delete(&mut self, stmt: DeleteStmt) -> Result<QueryResult> {
        let path = self.resolve(&stmt.table)?;
        let table = self.catalog.get_or_create_table(&path, self.create_tables)?;

        let before = table.row_count();
        match &stmt.where_clause {
            Some(cond) => {
                let mut evaluator = ExprEvaluator::new();
                table.rows.retain(|row| !evaluator.eval(cond, row));
            }
            None => table.rows.clear(),
        }
        let affected = before - table.row_count();
        let rows = table.rows.clone();

        self.catalog.commit(path.namespace, self.backend)?;
        Ok(QueryResult::new(rows, affected))
    }
}

/// Stable sort on the ORDER BY fields, later fields breaking ties
///
/// A missing field sorts like Null.
pub fn sort_rows(rows: &mut [Row], order_by: &OrderBy) {
    rows.sort_by(|a, b| {
        let ordering = order_by
            .fields
            .iter()
            .map(|field| {
                let left = a.get(field).unwrap_or(&Value::Null);
                let right = b.get(field).unwrap_or(&Value::Null);
                left.sort_cmp(right)
            })
            .find(|o| *o != Ordering::Equal)
            .unwrap_or(Ordering::Equal);

        match order_by.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}
