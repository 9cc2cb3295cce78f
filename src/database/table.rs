//! Engine Table Management
//!
//! Schema definition, drop, existence checks and listings

use crate::catalog::parse_field_declaration;
use crate::error::{Result, StoreError};
use crate::types::{Namespace, Table};

use super::core::Engine;

impl Engine {
    /// Define a table from field declarations; does nothing if it exists
    ///
    /// # Example
    /// ```
    /// let mut engine = storeql::Engine::in_memory();
    /// engine
    ///     .define_table("posts", &["id auto_inc", "created timestamp", "title default='untitled'"])
    ///     .unwrap();
    /// assert!(engine.table_exists("local.posts").unwrap());
    /// ```
    pub fn define_table(&mut self, path: &str, fields: &[&str]) -> Result<()> {
        let path = self.resolve_path(path)?;
        if self.catalog.contains_table(&path) {
            return Ok(());
        }

        let mut table = Table::new();
        for decl in fields {
            let (name, spec) = parse_field_declaration(decl)?;
            table.fields.insert(name, spec);
        }

        tracing::debug!(table = %path, fields = table.fields.len(), "defined table");
        self.catalog.put_table(&path, table);
        self.commit(path.namespace)
    }

    /// Remove a table; dropping a missing table is not an error
    pub fn drop_table(&mut self, path: &str) -> Result<()> {
        let path = self.resolve_path(path)?;
        if self.catalog.drop_table(&path).is_some() {
            tracing::debug!(table = %path, "dropped table");
        }
        self.commit(path.namespace)
    }

    pub fn table_exists(&self, path: &str) -> Result<bool> {
        let path = self.resolve_path(path)?;
        Ok(self.catalog.contains_table(&path))
    }

    /// Read-only view of a table
    pub fn get_table(&self, path: &str) -> Result<&Table> {
        let path = self.resolve_path(path)?;
        self.catalog
            .get_table(&path)
            .ok_or_else(|| StoreError::UnknownTable(path.to_string()))
    }

    /// Table names in one namespace, sorted
    pub fn list_tables(&self, namespace: Namespace) -> Vec<String> {
        self.catalog.table_names(namespace)
    }

    /// Listing of both namespaces, one tab-indented table per line
    ///
    /// ```text
    /// [local]
    ///     users
    /// [session]
    /// ```
    pub fn show_tables(&self) -> String {
        let mut out = Vec::new();
        for namespace in Namespace::ALL {
            out.push(format!("[{}]", namespace));
            for name in self.list_tables(namespace) {
                out.push(format!("\t{}", name));
            }
        }
        out.join("\n")
    }
}
