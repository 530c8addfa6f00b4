//! Application state - shared across all handlers.

use std::sync::Arc;

use gambit_core::ports::{ImageStorage, ImageUrlResolver, PostRepository, TournamentRepository};
use gambit_core::{MarkdownRenderer, RenderConfig};
use gambit_infra::{InMemoryImageStorage, InMemoryPostRepository, InMemoryTournamentRepository};

#[cfg(feature = "postgres")]
use gambit_infra::{PostgresPostRepository, PostgresTournamentRepository};
#[cfg(feature = "supabase")]
use gambit_infra::SupabaseStorage;

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
    pub tournaments: Arc<dyn TournamentRepository>,
    pub storage: Arc<dyn ImageStorage>,
    pub renderer: Arc<MarkdownRenderer>,
    pub post_url_base: Option<String>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        let (posts, tournaments) = Self::repositories(config).await;
        let (storage, resolver) = Self::storage(config);

        tracing::info!("Application state initialized");

        Self {
            posts,
            tournaments,
            storage,
            renderer: Arc::new(MarkdownRenderer::new(RenderConfig::default(), resolver)),
            post_url_base: config.post_url_base.clone(),
        }
    }

    /// Public URL of a post page, when a base URL is configured.
    pub fn post_url(&self, slug: &str) -> Option<String> {
        self.post_url_base
            .as_deref()
            .map(|base| format!("{}/{}", base.trim_end_matches('/'), slug))
    }

    #[cfg(feature = "postgres")]
    async fn repositories(
        config: &AppConfig,
    ) -> (Arc<dyn PostRepository>, Arc<dyn TournamentRepository>) {
        let Some(db_config) = &config.database else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            return Self::memory_repositories();
        };

        match db_config.connect().await {
            Ok(conn) => {
                let posts: Arc<dyn PostRepository> =
                    Arc::new(PostgresPostRepository::new(conn.clone()));
                let tournaments: Arc<dyn TournamentRepository> =
                    Arc::new(PostgresTournamentRepository::new(conn));
                (posts, tournaments)
            }
            Err(e) => {
                tracing::error!(
                    "Failed to connect to database: {}. Using in-memory fallback.",
                    e
                );
                Self::memory_repositories()
            }
        }
    }

    #[cfg(not(feature = "postgres"))]
    async fn repositories(
        _config: &AppConfig,
    ) -> (Arc<dyn PostRepository>, Arc<dyn TournamentRepository>) {
        tracing::info!("Running without postgres feature - using in-memory repositories");
        Self::memory_repositories()
    }

    fn memory_repositories() -> (Arc<dyn PostRepository>, Arc<dyn TournamentRepository>) {
        let posts: Arc<dyn PostRepository> = Arc::new(InMemoryPostRepository::new());
        let tournaments: Arc<dyn TournamentRepository> =
            Arc::new(InMemoryTournamentRepository::new());
        (posts, tournaments)
    }

    #[cfg(feature = "supabase")]
    fn storage(config: &AppConfig) -> (Arc<dyn ImageStorage>, Arc<dyn ImageUrlResolver>) {
        match &config.storage {
            Some(storage_config) => {
                tracing::info!(bucket = %storage_config.bucket, "Using Supabase storage");
                let storage = Arc::new(SupabaseStorage::new(storage_config.clone()));
                let resolver: Arc<dyn ImageUrlResolver> = storage.clone();
                let storage: Arc<dyn ImageStorage> = storage;
                (storage, resolver)
            }
            None => {
                tracing::warn!("Supabase not configured. Images are kept in memory.");
                Self::memory_storage()
            }
        }
    }

    #[cfg(not(feature = "supabase"))]
    fn storage(_config: &AppConfig) -> (Arc<dyn ImageStorage>, Arc<dyn ImageUrlResolver>) {
        Self::memory_storage()
    }

    fn memory_storage() -> (Arc<dyn ImageStorage>, Arc<dyn ImageUrlResolver>) {
        let storage = Arc::new(InMemoryImageStorage::default());
        let resolver: Arc<dyn ImageUrlResolver> = storage.clone();
        let storage: Arc<dyn ImageStorage> = storage;
        (storage, resolver)
    }
}
