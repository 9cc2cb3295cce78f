//! Engine configuration
//!
//! Controls namespace defaults, persisted document naming and whether
//! queries may create tables on first use.

use crate::error::Result;
use crate::types::Namespace;
use serde::{Deserialize, Serialize};

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Namespace used for unqualified table paths at startup
    pub default_namespace: Namespace,

    /// Name of the persisted document (file stem for `FileBackend`)
    pub storage_key: String,

    /// Placeholder label prefix for extracted literals (`_LIT1_`)
    pub literal_prefix: String,

    /// Create a table the first time a query names it
    ///
    /// When off, queries against a missing table fail with `UnknownTable`.
    pub auto_create_tables: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_namespace: Namespace::Local,
            storage_key: "storeql".to_string(),
            literal_prefix: "LIT".to_string(),
            auto_create_tables: true,
        }
    }
}

impl EngineConfig {
    /// Queries never create tables implicitly
    pub fn strict() -> Self {
        Self {
            auto_create_tables: false,
            ..Default::default()
        }
    }

    /// Unqualified paths resolve to the session namespace
    pub fn for_session() -> Self {
        Self {
            default_namespace: Namespace::Session,
            ..Default::default()
        }
    }

    /// Load from a JSON document; missing keys take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
