//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};

use gambit_core::domain::{Post, Tournament};
use gambit_core::error::RepoError;
use gambit_core::ports::{PostRepository, TournamentRepository};

use super::entity::post::{self, Entity as PostEntity};
use super::entity::tournament::{self, Entity as TournamentEntity};
use super::postgres_base::{PostgresBaseRepository, query_error};

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// PostgreSQL tournament repository.
pub type PostgresTournamentRepository = PostgresBaseRepository<TournamentEntity>;

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn list_recent(&self) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::find()
            .order_by_desc(post::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        tracing::debug!(slug, "Finding post by slug");

        let result = PostEntity::find()
            .filter(post::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl TournamentRepository for PostgresTournamentRepository {
    async fn list_by_start_date(&self) -> Result<Vec<Tournament>, RepoError> {
        let result = TournamentEntity::find()
            .order_by_asc(tournament::Column::StartDate)
            .all(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}
