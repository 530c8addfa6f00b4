use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Maps a storage-relative image path to a public delivery URL.
///
/// `Ok(None)` means the object cannot be located. Implementations are called
/// synchronously from the Markdown renderer and must not block on I/O.
pub trait ImageUrlResolver: Send + Sync {
    fn public_url(&self, path: &str) -> Result<Option<String>, StorageError>;
}

impl<F> ImageUrlResolver for F
where
    F: Fn(&str) -> Option<String> + Send + Sync,
{
    fn public_url(&self, path: &str) -> Result<Option<String>, StorageError> {
        Ok(self(path))
    }
}

/// An object held in the image bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredObject {
    /// Path of the object inside the bucket.
    pub path: String,
    pub url: String,
}

/// Image bucket - abstraction over the hosted object store.
#[async_trait]
pub trait ImageStorage: ImageUrlResolver {
    /// Store `bytes` under `path`. With `upsert` unset an existing object is an error.
    async fn upload(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
        upsert: bool,
    ) -> Result<StoredObject, StorageError>;

    async fn delete(&self, path: &str) -> Result<(), StorageError>;

    /// List the objects at the bucket root.
    async fn list(&self) -> Result<Vec<StoredObject>, StorageError>;
}

/// Storage operation errors.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Storage rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Object already exists: {0}")]
    AlreadyExists(String),

    #[error("Invalid object path: {0}")]
    InvalidPath(String),

    #[error("Serialization failed: {0}")]
    Serialization(String),
}
