use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Post, Tournament};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Insert a new entity. Unique-key collisions surface as `RepoError::Constraint`.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Overwrite an existing entity. Returns `RepoError::NotFound` when absent.
    async fn update(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// All posts, most recently created first.
    async fn list_recent(&self) -> Result<Vec<Post>, RepoError>;

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError>;
}

/// Tournament repository.
#[async_trait]
pub trait TournamentRepository: BaseRepository<Tournament, Uuid> {
    /// All tournaments, earliest start date first.
    async fn list_by_start_date(&self) -> Result<Vec<Tournament>, RepoError>;
}
