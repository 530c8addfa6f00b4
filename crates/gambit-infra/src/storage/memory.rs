//! In-memory image bucket - used when Supabase is not configured, and in tests.

use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;

use gambit_core::ports::{ImageStorage, ImageUrlResolver, StorageError, StoredObject};

use super::clean_path;

struct StoredImage {
    bytes: Vec<u8>,
    content_type: String,
}

/// In-memory bucket. Unlike the hosted bucket it only resolves objects that
/// were actually uploaded.
///
/// Uses a std lock because URL resolution is synchronous.
pub struct InMemoryImageStorage {
    base_url: String,
    objects: RwLock<BTreeMap<String, StoredImage>>,
}

impl InMemoryImageStorage {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            objects: RwLock::new(BTreeMap::new()),
        }
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Bytes and content type of an uploaded object.
    pub fn object(&self, path: &str) -> Option<(Vec<u8>, String)> {
        let objects = self.objects.read().ok()?;
        objects
            .get(path)
            .map(|o| (o.bytes.clone(), o.content_type.clone()))
    }
}

impl Default for InMemoryImageStorage {
    fn default() -> Self {
        Self::new("memory://post-images")
    }
}

fn poisoned<T>(_: T) -> StorageError {
    StorageError::Connection("image store lock poisoned".to_string())
}

impl ImageUrlResolver for InMemoryImageStorage {
    fn public_url(&self, path: &str) -> Result<Option<String>, StorageError> {
        let Some(path) = clean_path(path)? else {
            return Ok(None);
        };
        let objects = self.objects.read().map_err(poisoned)?;
        Ok(objects.contains_key(path).then(|| self.url_for(path)))
    }
}

#[async_trait]
impl ImageStorage for InMemoryImageStorage {
    async fn upload(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
        upsert: bool,
    ) -> Result<StoredObject, StorageError> {
        let path = clean_path(path)?
            .ok_or_else(|| StorageError::InvalidPath(path.to_string()))?
            .to_string();

        let mut objects = self.objects.write().map_err(poisoned)?;
        if !upsert && objects.contains_key(&path) {
            return Err(StorageError::AlreadyExists(path));
        }
        objects.insert(
            path.clone(),
            StoredImage {
                bytes,
                content_type: content_type.to_string(),
            },
        );

        Ok(StoredObject {
            url: self.url_for(&path),
            path,
        })
    }

    async fn delete(&self, path: &str) -> Result<(), StorageError> {
        let Some(path) = clean_path(path)? else {
            return Ok(());
        };
        self.objects.write().map_err(poisoned)?.remove(path);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<StoredObject>, StorageError> {
        let objects = self.objects.read().map_err(poisoned)?;
        Ok(objects
            .keys()
            .map(|path| StoredObject {
                path: path.clone(),
                url: self.url_for(path),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_upload_then_resolve() {
        let storage = InMemoryImageStorage::default();
        assert_eq!(storage.public_url("/torneo.png").unwrap(), None);

        storage
            .upload("torneo.png", vec![1, 2, 3], "image/png", false)
            .await
            .unwrap();

        assert_eq!(
            storage.public_url("/torneo.png").unwrap().as_deref(),
            Some("memory://post-images/torneo.png")
        );
        assert_eq!(
            storage.object("torneo.png"),
            Some((vec![1, 2, 3], "image/png".to_string()))
        );
    }

    #[tokio::test]
    async fn test_upload_without_upsert_rejects_existing() {
        let storage = InMemoryImageStorage::default();
        storage.upload("a.png", vec![], "image/png", false).await.unwrap();
        let err = storage
            .upload("a.png", vec![], "image/png", false)
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::AlreadyExists(_)));
        storage.upload("a.png", vec![9], "image/png", true).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_and_list() {
        let storage = InMemoryImageStorage::default();
        storage.upload("b.png", vec![], "image/png", false).await.unwrap();
        storage.upload("a.png", vec![], "image/png", false).await.unwrap();

        let paths: Vec<_> = storage.list().await.unwrap().into_iter().map(|o| o.path).collect();
        assert_eq!(paths, vec!["a.png", "b.png"]);

        storage.delete("/a.png").await.unwrap();
        assert_eq!(storage.list().await.unwrap().len(), 1);
    }
}
