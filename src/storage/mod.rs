//! Upload staging
//!
//! Uploaded bytes are staged under an opaque key derived from a fresh UUID and
//! the validated extension. The client filename never reaches the filesystem.

use async_trait::async_trait;
use bytes::Bytes;
use uuid::Uuid;

use crate::models::DocumentKind;

pub mod local;
pub mod memory;

pub use local::LocalUploadStore;
pub use memory::MemoryUploadStore;

#[async_trait]
pub trait UploadStore: Send + Sync {
    /// Write `data` under `key`, returning the number of bytes written.
    async fn put(&self, key: &str, data: Bytes) -> Result<u64, StorageError>;

    async fn get(&self, key: &str) -> Result<Bytes, StorageError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("invalid storage key: {0}")]
    InvalidKey(String),
    #[error("staged upload not found: {0}")]
    NotFound(String),
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

/// Location of one staged upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedUpload {
    pub id: Uuid,
    pub key: String,
}

impl StagedUpload {
    pub fn new(kind: DocumentKind) -> Self {
        let id = Uuid::new_v4();
        Self {
            id,
            key: format!("{}.{}", id, kind.extension()),
        }
    }
}

/// Keys are single path components; anything that could escape the store root is refused.
pub(crate) fn validate_key(key: &str) -> Result<(), StorageError> {
    let escapes = key.is_empty()
        || key == "."
        || key == ".."
        || key.contains(['/', '\\', '\0']);
    if escapes {
        return Err(StorageError::InvalidKey(key.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_staged_keys_are_unique_and_keep_extension() {
        let a = StagedUpload::new(DocumentKind::Pdf);
        let b = StagedUpload::new(DocumentKind::Pdf);

        assert_ne!(a.key, b.key);
        assert!(a.key.ends_with(".pdf"));
        assert_eq!(a.key, format!("{}.pdf", a.id));
        assert!(StagedUpload::new(DocumentKind::Docx).key.ends_with(".docx"));
    }

    #[test]
    fn test_validate_key_rejects_traversal() {
        for key in ["", ".", "..", "../etc/passwd", "a/b.pdf", "a\\b.pdf"] {
            assert!(validate_key(key).is_err(), "accepted {key:?}");
        }
        assert!(validate_key("3f1c.pdf").is_ok());
    }
}
