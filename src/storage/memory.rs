use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::{validate_key, StorageError, UploadStore};

/// In-memory store for tests and ephemeral deployments.
#[derive(Default)]
pub struct MemoryUploadStore {
    files: RwLock<HashMap<String, Bytes>>,
}

impl MemoryUploadStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.files.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.files.read().await.is_empty()
    }

    pub async fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.files.read().await.keys().cloned().collect();
        keys.sort();
        keys
    }
}

#[async_trait]
impl UploadStore for MemoryUploadStore {
    async fn put(&self, key: &str, data: Bytes) -> Result<u64, StorageError> {
        validate_key(key)?;
        let len = data.len() as u64;
        self.files.write().await.insert(key.to_string(), data);
        Ok(len)
    }

    async fn get(&self, key: &str) -> Result<Bytes, StorageError> {
        self.files
            .read()
            .await
            .get(key)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(key.to_string()))
    }
}
