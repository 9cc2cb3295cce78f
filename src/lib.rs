//! storeql Query Engine
//!
//! SQL-like query language over tables kept in a key-value store with two
//! namespaces (`local` and `session`).
//!
//! ## Features
//! - SELECT / INSERT INTO / UPDATE / DELETE FROM with nested AND/OR filters
//! - ORDERBY with cascading fields, LIMIT, field projection
//! - Per-field schema rules: auto_inc, timestamp, default
//! - Pluggable persistence (in-memory or one JSON file per namespace)
//!
//! ## Architecture
//! - Query layer: literal vault -> normalizer -> lexer -> parser -> executor
//! - Catalog layer: per-namespace tables, schema parsing, row validation
//! - Storage layer: `StorageBackend` trait, whole-namespace commits
//!
//! ```
//! let mut engine = storeql::Engine::in_memory();
//! engine.define_table("users", &["id auto_inc", "name", "role default='guest'"]).unwrap();
//! engine.query("INSERT INTO users (name) VALUES ('ann')").unwrap();
//!
//! let result = engine.query("SELECT id, role FROM users WHERE name = 'ann'").unwrap();
//! assert_eq!(result.rows[0]["id"], storeql::Value::from(1));
//! assert_eq!(result.rows[0]["role"], storeql::Value::from("guest"));
//! ```

pub mod config;
pub mod storage;
pub mod types;
pub mod catalog;
pub mod sql;
pub mod database;

mod error;

pub use config::EngineConfig;
pub use error::{Result, StoreError};

pub use database::Engine;
pub use sql::QueryResult;
pub use storage::{FileBackend, MemoryBackend, StorageBackend};
pub use types::{FieldSpec, Namespace, Row, Table, TablePath, Value};
