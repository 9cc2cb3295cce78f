//! Engine Core - Engine structure and initialization
//!
//! The engine is the single context object every operation goes through:
//! it owns the catalog of both namespaces, the storage backend, the
//! configuration and the current default namespace.

use crate::catalog::Catalog;
use crate::config::EngineConfig;
use crate::error::Result;
use crate::storage::{MemoryBackend, StorageBackend};
use crate::types::{Namespace, TablePath};
use std::sync::Arc;

/// storeql engine instance
pub struct Engine {
    /// Tables of both namespaces
    pub(crate) catalog: Catalog,

    /// Where committed namespaces are written
    pub(crate) backend: Arc<dyn StorageBackend>,

    pub(crate) config: EngineConfig,

    /// Namespace for unqualified table paths
    pub(crate) default_namespace: Namespace,
}

impl Engine {
    /// Open an engine over a backend, loading both namespaces
    ///
    /// # Example
    /// ```
    /// use std::sync::Arc;
    /// use storeql::{Engine, EngineConfig, MemoryBackend};
    ///
    /// let engine = Engine::open(Arc::new(MemoryBackend::new()), EngineConfig::default()).unwrap();
    /// assert!(engine.list_tables(storeql::Namespace::Local).is_empty());
    /// ```
    pub fn open(backend: Arc<dyn StorageBackend>, config: EngineConfig) -> Result<Self> {
        let catalog = Catalog::load(backend.as_ref())?;
        tracing::debug!(
            default_namespace = %config.default_namespace,
            storage_key = %config.storage_key,
            "engine opened"
        );

        Ok(Self {
            catalog,
            backend,
            default_namespace: config.default_namespace,
            config,
        })
    }

    /// Engine over a fresh in-memory backend
    pub fn in_memory() -> Self {
        Self {
            catalog: Catalog::new(),
            backend: Arc::new(MemoryBackend::new()),
            config: EngineConfig::default(),
            default_namespace: Namespace::Local,
        }
    }

    /// Unqualified table paths resolve to `local` from now on
    pub fn use_local(&mut self) {
        self.default_namespace = Namespace::Local;
    }

    /// Unqualified table paths resolve to `session` from now on
    pub fn use_session(&mut self) {
        self.default_namespace = Namespace::Session;
    }

    pub fn default_namespace(&self) -> Namespace {
        self.default_namespace
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub(crate) fn resolve_path(&self, path: &str) -> Result<TablePath> {
        TablePath::parse(path, self.default_namespace)
    }

    pub(crate) fn commit(&self, namespace: Namespace) -> Result<()> {
        self.catalog.commit(namespace, self.backend.as_ref())
    }
}
