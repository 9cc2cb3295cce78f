//! JSON-file backend: one document per namespace

use super::StorageBackend;
use crate::config::EngineConfig;
use crate::error::Result;
use crate::types::Namespace;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Stores each namespace as `<dir>/<key>.<namespace>.json`
#[derive(Debug, Clone)]
pub struct FileBackend {
    dir: PathBuf,
    key: String,
}

impl FileBackend {
    pub fn new<P: AsRef<Path>>(dir: P, key: impl Into<String>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            key: key.into(),
        }
    }

    /// Use the configured storage key as file stem
    pub fn from_config<P: AsRef<Path>>(dir: P, config: &EngineConfig) -> Self {
        Self::new(dir, config.storage_key.clone())
    }

    pub fn path_for(&self, namespace: Namespace) -> PathBuf {
        self.dir.join(format!("{}.{}.json", self.key, namespace))
    }
}

impl StorageBackend for FileBackend {
    fn load(&self, namespace: Namespace) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(namespace)) {
            Ok(blob) => Ok(Some(blob)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, namespace: Namespace, blob: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)?;

        // Write aside, then rename into place
        let path = self.path_for(namespace);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, blob)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}
