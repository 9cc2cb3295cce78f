//! Persistence layer
//!
//! The engine only needs to load and save one serialized document per
//! namespace. Backends decide where that document lives.

mod file;
mod memory;

pub use file::FileBackend;
pub use memory::MemoryBackend;

use crate::error::Result;
use crate::types::Namespace;

/// Key-value persistence collaborator
///
/// `save` always receives the full namespace document; there are no
/// incremental writes.
pub trait StorageBackend: Send + Sync {
    /// Return the stored document, or `None` if the namespace was never saved
    fn load(&self, namespace: Namespace) -> Result<Option<String>>;

    /// Replace the stored document
    fn save(&self, namespace: Namespace, blob: &str) -> Result<()>;
}
