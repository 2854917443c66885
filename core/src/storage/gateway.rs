use crate::Result;
use std::collections::HashMap;
use std::sync::Mutex;

/// Asynchronous-friendly key/value persistence contract the store depends
/// on. Implementations are shared with the background saver thread.
pub trait StorageGateway: Send + Sync {
    /// Load the blob stored under `key`. A missing key is `Ok(None)`,
    /// never an error.
    fn load(&self, key: &str) -> Result<Option<String>>;

    /// Persist `blob` under `key`, replacing any previous value.
    fn save(&self, key: &str, blob: &str) -> Result<()>;
}

/// Gateway backed by a plain map. Used in tests and examples.
#[derive(Default)]
pub struct MemoryGateway {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageGateway for MemoryGateway {
    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    fn save(&self, key: &str, blob: &str) -> Result<()> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), blob.to_string());
        Ok(())
    }
}
