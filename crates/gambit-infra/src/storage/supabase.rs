//! Supabase Storage client for the post image bucket.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde_json::json;

use gambit_core::ports::{ImageStorage, ImageUrlResolver, StorageError, StoredObject};

use super::clean_path;

/// Placeholder URL shipped in example env files; treated as "not configured".
const PLACEHOLDER_URL: &str = "https://placeholder.supabase.co";

/// Supabase Storage configuration.
#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    /// Project URL (e.g., https://xyz.supabase.co)
    pub url: String,
    /// Service role key, used for uploads and deletions.
    pub service_key: String,
    /// Bucket holding post images.
    pub bucket: String,
    /// `max-age` sent with uploads, in seconds.
    pub cache_max_age: u32,
}

impl SupabaseConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` unless both `SUPABASE_URL` and
    /// `SUPABASE_SERVICE_ROLE_KEY` are set to real values.
    pub fn from_env() -> Option<Self> {
        let url = std::env::var("SUPABASE_URL").ok()?;
        let service_key = std::env::var("SUPABASE_SERVICE_ROLE_KEY").ok()?;
        if url.trim().is_empty() || url == PLACEHOLDER_URL || service_key.trim().is_empty() {
            return None;
        }

        Some(Self {
            url,
            service_key,
            bucket: std::env::var("STORAGE_BUCKET").unwrap_or_else(|_| "post-images".to_string()),
            cache_max_age: std::env::var("STORAGE_CACHE_MAX_AGE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3600),
        })
    }
}

#[derive(Debug, Deserialize)]
struct ListEntry {
    name: String,
    /// Folders come back without an id.
    id: Option<String>,
}

/// Supabase-backed image bucket.
///
/// Public URLs are computed locally; only upload, delete and list go over
/// the network.
pub struct SupabaseStorage {
    client: Client,
    config: SupabaseConfig,
}

impl SupabaseStorage {
    pub fn new(config: SupabaseConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn base(&self) -> &str {
        self.config.url.trim_end_matches('/')
    }

    /// Public delivery URL of `path` inside the bucket.
    pub fn public_url_for(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base(),
            self.config.bucket,
            path
        )
    }

    fn object_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/{}/{}",
            self.base(),
            self.config.bucket,
            path
        )
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .bearer_auth(&self.config.service_key)
            .header("apikey", &self.config.service_key)
    }

    async fn check(response: Response, path: &str) -> Result<Response, StorageError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response.text().await.unwrap_or_default();
        if status == StatusCode::CONFLICT || message.contains("Duplicate") {
            return Err(StorageError::AlreadyExists(path.to_string()));
        }
        Err(StorageError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}

fn connection_error(err: reqwest::Error) -> StorageError {
    StorageError::Connection(err.to_string())
}

impl ImageUrlResolver for SupabaseStorage {
    fn public_url(&self, path: &str) -> Result<Option<String>, StorageError> {
        let trimmed = path.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            return Ok(Some(trimmed.to_string()));
        }
        Ok(clean_path(path)?.map(|p| self.public_url_for(p)))
    }
}

#[async_trait]
impl ImageStorage for SupabaseStorage {
    async fn upload(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
        upsert: bool,
    ) -> Result<StoredObject, StorageError> {
        let path = clean_path(path)?.ok_or_else(|| StorageError::InvalidPath(path.to_string()))?;

        tracing::debug!(path, content_type, upsert, bytes = bytes.len(), "Uploading image");

        let request = self
            .client
            .post(self.object_url(path))
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .header(
                reqwest::header::CACHE_CONTROL,
                format!("max-age={}", self.config.cache_max_age),
            )
            .header("x-upsert", if upsert { "true" } else { "false" })
            .body(bytes);

        let response = self
            .authorized(request)
            .send()
            .await
            .map_err(connection_error)?;
        Self::check(response, path).await?;

        tracing::info!(path, bucket = %self.config.bucket, "Image uploaded");

        Ok(StoredObject {
            path: path.to_string(),
            url: self.public_url_for(path),
        })
    }

    async fn delete(&self, path: &str) -> Result<(), StorageError> {
        let Some(path) = clean_path(path)? else {
            return Ok(());
        };

        let request = self
            .client
            .delete(format!(
                "{}/storage/v1/object/{}",
                self.base(),
                self.config.bucket
            ))
            .json(&json!({ "prefixes": [path] }));

        let response = self
            .authorized(request)
            .send()
            .await
            .map_err(connection_error)?;
        Self::check(response, path).await?;

        tracing::info!(path, "Image deleted");
        Ok(())
    }

    async fn list(&self) -> Result<Vec<StoredObject>, StorageError> {
        let request = self
            .client
            .post(format!(
                "{}/storage/v1/object/list/{}",
                self.base(),
                self.config.bucket
            ))
            .json(&json!({
                "prefix": "",
                "limit": 1000,
                "offset": 0,
                "sortBy": { "column": "name", "order": "asc" },
            }));

        let response = self
            .authorized(request)
            .send()
            .await
            .map_err(connection_error)?;
        let entries: Vec<ListEntry> = Self::check(response, "")
            .await?
            .json()
            .await
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        Ok(entries
            .into_iter()
            .filter(|entry| entry.id.is_some())
            .map(|entry| StoredObject {
                url: self.public_url_for(&entry.name),
                path: entry.name,
            })
            .collect())
    }
}
