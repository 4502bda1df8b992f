use crate::core::Storage;
use crate::utils::error::{Result, SchedulerError};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Keeps files in process memory. Clones share the same files.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn files(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, Vec<u8>>>> {
        self.files.lock().map_err(|_| SchedulerError::StorageError {
            message: "memory storage lock poisoned".to_string(),
        })
    }
}

impl Storage for MemoryStorage {
    async fn exists(&self, path: &str) -> Result<bool> {
        Ok(self.files()?.contains_key(path))
    }

    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        self.files()?
            .get(path)
            .cloned()
            .ok_or_else(|| SchedulerError::StorageError {
                message: format!("{} does not exist", path),
            })
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        self.files()?.insert(path.to_string(), data.to_vec());
        Ok(())
    }
}
