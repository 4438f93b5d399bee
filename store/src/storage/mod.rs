//! Snapshot storage backends
//!
//! The store persists its state as two serialized blobs in a key-value
//! backend: full replacement after every mutation, read exactly once at
//! startup. Backends only move strings; serialization stays in the store.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use anyhow::Context;

/// Storage key for the serialized lot collection.
pub const LOTS_KEY: &str = "poederdozen";

/// Storage key for the serialized consumption history.
pub const HISTORY_KEY: &str = "poederdozen_geschiedenis";

/// Key-value backend for serialized snapshots
pub trait KvBackend {
    /// Read the value stored under `key`, if any.
    fn load(&self, key: &str) -> anyhow::Result<Option<String>>;

    /// Replace the value stored under `key`.
    fn save(&mut self, key: &str, value: &str) -> anyhow::Result<()>;
}

impl<B: KvBackend + ?Sized> KvBackend for &mut B {
    fn load(&self, key: &str) -> anyhow::Result<Option<String>> {
        (**self).load(key)
    }

    fn save(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        (**self).save(key, value)
    }
}

/// In-memory backend; state is lost when the process exits
#[derive(Debug, Default)]
pub struct MemoryBackend {
    values: HashMap<String, String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvBackend for MemoryBackend {
    fn load(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// File backend storing one JSON document per key
#[derive(Debug)]
pub struct JsonFileBackend {
    dir: PathBuf,
}

impl JsonFileBackend {
    /// Open a backend rooted at `dir`; the directory is created on the
    /// first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KvBackend for JsonFileBackend {
    fn load(&self, key: &str) -> anyhow::Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        let value = fs::read_to_string(&path)
            .with_context(|| format!("reading snapshot {}", path.display()))?;
        Ok(Some(value))
    }

    fn save(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("creating snapshot directory {}", self.dir.display()))?;
        let path = self.path_for(key);
        fs::write(&path, value)
            .with_context(|| format!("writing snapshot {}", path.display()))?;
        Ok(())
    }
}
