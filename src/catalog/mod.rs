//! Table catalog
//!
//! Holds the in-memory tables of both namespaces and moves them to and from
//! the storage backend. One JSON document per namespace:
//! `{"tables": {"<name>": {"rows": [...], "fields": {...}, "auto_inc": n}}}`

mod schema;
mod validator;

pub use schema::parse_field_declaration;
pub use validator::{validate_row, validate_row_at};

use crate::error::{Result, StoreError};
use crate::storage::StorageBackend;
use crate::types::{Namespace, Table, TablePath};
use serde::{Deserialize, Serialize};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

/// Persisted form of one namespace
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NamespaceData {
    #[serde(default)]
    pub tables: BTreeMap<String, Table>,
}

/// Tables of every namespace
#[derive(Debug, Default)]
pub struct Catalog {
    namespaces: BTreeMap<Namespace, NamespaceData>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load both namespaces; a namespace never saved starts empty
    pub fn load(backend: &dyn StorageBackend) -> Result<Self> {
        let mut catalog = Self::new();

        for namespace in Namespace::ALL {
            let data = match backend.load(namespace)? {
                Some(blob) => serde_json::from_str::<NamespaceData>(&blob)?,
                None => NamespaceData::default(),
            };
            tracing::debug!(
                namespace = %namespace,
                tables = data.tables.len(),
                "loaded namespace"
            );
            catalog.namespaces.insert(namespace, data);
        }

        Ok(catalog)
    }

    fn namespace(&self, namespace: Namespace) -> Option<&NamespaceData> {
        self.namespaces.get(&namespace)
    }

    fn namespace_mut(&mut self, namespace: Namespace) -> &mut NamespaceData {
        self.namespaces.entry(namespace).or_default()
    }

    pub fn get_table(&self, path: &TablePath) -> Option<&Table> {
        self.namespace(path.namespace)
            .and_then(|data| data.tables.get(&path.table))
    }

    pub fn contains_table(&self, path: &TablePath) -> bool {
        self.get_table(path).is_some()
    }

    /// Existing table, or a fresh empty one when `create` is set
    pub fn get_or_create_table(&mut self, path: &TablePath, create: bool) -> Result<&mut Table> {
        let tables = &mut self.namespace_mut(path.namespace).tables;

        match tables.entry(path.table.clone()) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) if create => {
                tracing::debug!(table = %path, "created table");
                Ok(entry.insert(Table::new()))
            }
            Entry::Vacant(_) => Err(StoreError::UnknownTable(path.to_string())),
        }
    }

    /// Insert or replace a table
    pub fn put_table(&mut self, path: &TablePath, table: Table) {
        self.namespace_mut(path.namespace)
            .tables
            .insert(path.table.clone(), table);
    }

    /// Remove a table; returns it if it existed
    pub fn drop_table(&mut self, path: &TablePath) -> Option<Table> {
        self.namespace_mut(path.namespace).tables.remove(&path.table)
    }

    /// Table names of a namespace, sorted
    pub fn table_names(&self, namespace: Namespace) -> Vec<String> {
        self.namespace(namespace)
            .map(|data| data.tables.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn serialize_namespace(&self, namespace: Namespace) -> Result<String> {
        let empty = NamespaceData::default();
        let data = self.namespace(namespace).unwrap_or(&empty);
        Ok(serde_json::to_string(data)?)
    }

    /// Write one namespace back to the backend
    ///
    /// In-memory state is left as-is when the save fails.
    pub fn commit(&self, namespace: Namespace, backend: &dyn StorageBackend) -> Result<()> {
        let blob = self.serialize_namespace(namespace)?;
        tracing::debug!(namespace = %namespace, bytes = blob.len(), "commit");

        backend.save(namespace, &blob).map_err(|e| {
            tracing::warn!(namespace = %namespace, error = %e, "commit failed");
            e
        })
    }
}
