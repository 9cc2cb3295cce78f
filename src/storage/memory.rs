//! In-process backend

use super::StorageBackend;
use crate::error::Result;
use crate::types::Namespace;
use parking_lot::RwLock;
use std::collections::HashMap;

/// Keeps namespace documents in memory
///
/// Share it through an `Arc` to reopen an engine over the same data.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    blobs: RwLock<HashMap<Namespace, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a namespace document, as if it had been saved earlier
    pub fn with_blob(self, namespace: Namespace, blob: impl Into<String>) -> Self {
        self.blobs.write().insert(namespace, blob.into());
        self
    }

    /// Raw document for a namespace
    pub fn blob(&self, namespace: Namespace) -> Option<String> {
        self.blobs.read().get(&namespace).cloned()
    }
}

impl StorageBackend for MemoryBackend {
    fn load(&self, namespace: Namespace) -> Result<Option<String>> {
        Ok(self.blobs.read().get(&namespace).cloned())
    }

    fn save(&self, namespace: Namespace, blob: &str) -> Result<()> {
        self.blobs.write().insert(namespace, blob.to_string());
        Ok(())
    }
}
