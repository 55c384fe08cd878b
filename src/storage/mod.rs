pub mod json_backend;

use std::{collections::HashMap, sync::Mutex};

use crate::errors::{LedgerError, Result};

pub use json_backend::JsonFileStore;

/// Key-value persistence for named string blobs.
pub trait BlobStore: Send + Sync {
    /// Returns the blob stored under `key`, or `None` if it was never written.
    fn read(&self, key: &str) -> Result<Option<String>>;
    fn write(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// In-process blob store, handy for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryStore {
    blobs: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a blob without going through the ledger, e.g. to inject legacy data.
    pub fn with_blob(self, key: &str, value: impl Into<String>) -> Self {
        if let Ok(mut blobs) = self.blobs.lock() {
            blobs.insert(key.to_string(), value.into());
        }
        self
    }

    fn guard(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.blobs
            .lock()
            .map_err(|_| LedgerError::Persistence("memory store lock poisoned".into()))
    }
}

impl BlobStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.guard()?.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        self.guard()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.guard()?.remove(key);
        Ok(())
    }
}

impl<T: BlobStore + ?Sized> BlobStore for std::sync::Arc<T> {
    fn read(&self, key: &str) -> Result<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        (**self).write(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert_eq!(store.read("students").unwrap(), None);
        store.write("students", "[]").unwrap();
        assert_eq!(store.read("students").unwrap().as_deref(), Some("[]"));
        store.remove("students").unwrap();
        assert_eq!(store.read("students").unwrap(), None);
    }
}
