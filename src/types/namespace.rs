//! Storage namespaces and `[namespace.]table` paths

use crate::error::{Result, StoreError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the two fixed storage scopes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Namespace {
    #[default]
    Local,
    Session,
}

impl Namespace {
    pub const ALL: [Namespace; 2] = [Namespace::Local, Namespace::Session];

    pub fn as_str(&self) -> &'static str {
        match self {
            Namespace::Local => "local",
            Namespace::Session => "session",
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Namespace {
    type Err = StoreError;

    // Case-sensitive, like table names
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "local" => Ok(Namespace::Local),
            "session" => Ok(Namespace::Session),
            other => Err(StoreError::UnknownNamespace(other.to_string())),
        }
    }
}

/// Resolved table address
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TablePath {
    pub namespace: Namespace,
    pub table: String,
}

impl TablePath {
    pub fn new(namespace: Namespace, table: impl Into<String>) -> Self {
        Self { namespace, table: table.into() }
    }

    /// Parse `table` or `namespace.table`; unqualified paths use `default`
    pub fn parse(path: &str, default: Namespace) -> Result<Self> {
        let parts: Vec<&str> = path.split('.').collect();
        let (namespace, table) = match parts.as_slice() {
            [table] => (default, *table),
            [namespace, table] => (namespace.parse()?, *table),
            _ => {
                return Err(StoreError::MalformedQuery(format!(
                    "Invalid table path '{}'", path
                )))
            }
        };

        if table.is_empty() {
            return Err(StoreError::MalformedQuery(format!(
                "Missing table name in '{}'", path
            )));
        }

        Ok(Self::new(namespace, table))
    }
}

impl fmt::Display for TablePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.namespace, self.table)
    }
}
