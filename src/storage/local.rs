use async_trait::async_trait;
use bytes::Bytes;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

use super::{validate_key, StorageError, UploadStore};

/// Stages uploads as flat files inside one directory.
pub struct LocalUploadStore {
    root: PathBuf,
}

impl LocalUploadStore {
    /// Create the store, creating `root` if it does not exist yet.
    ///
    /// This is the only place the directory is created; requests never recreate it.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        info!(path = %root.display(), "Upload directory ready");
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.root.join(key))
    }
}

#[async_trait]
impl UploadStore for LocalUploadStore {
    async fn put(&self, key: &str, data: Bytes) -> Result<u64, StorageError> {
        let path = self.path_for(key)?;
        fs::write(&path, &data).await?;
        debug!(path = %path.display(), bytes = data.len(), "Staged upload written");
        Ok(data.len() as u64)
    }

    async fn get(&self, key: &str) -> Result<Bytes, StorageError> {
        let path = self.path_for(key)?;
        match fs::read(&path).await {
            Ok(data) => Ok(Bytes::from(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(StorageError::NotFound(key.to_string())),
            Err(e) => Err(StorageError::Io(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_store() -> (tempfile::TempDir, LocalUploadStore) {
        let dir = tempfile::TempDir::new().unwrap();
        let store = LocalUploadStore::new(dir.path().join("uploads")).unwrap();
        (dir, store)
    }

    #[test]
    fn test_new_creates_missing_directory() {
        let (dir, store) = create_test_store();
        assert!(store.root().is_dir());
        assert_eq!(store.root(), dir.path().join("uploads"));

        // an existing directory is fine too
        assert!(LocalUploadStore::new(store.root()).is_ok());
    }

    #[tokio::test]
    async fn test_put_then_get_returns_same_bytes() {
        let (_dir, store) = create_test_store();

        let written = store
            .put("abc.pdf", Bytes::from_static(b"%PDF-1.7 data"))
            .await
            .unwrap();
        assert_eq!(written, 13);

        let fetched = store.get("abc.pdf").await.unwrap();
        assert_eq!(&fetched[..], b"%PDF-1.7 data");
        assert!(store.root().join("abc.pdf").is_file());
    }

    #[tokio::test]
    async fn test_get_missing_key_is_not_found() {
        let (_dir, store) = create_test_store();
        let err = store.get("missing.docx").await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_put_rejects_path_components() {
        let (dir, store) = create_test_store();
        let err = store
            .put("../escape.pdf", Bytes::from_static(b"x"))
            .await
            .unwrap_err();

        assert!(matches!(err, StorageError::InvalidKey(_)));
        assert!(!dir.path().join("escape.pdf").exists());
    }
}
