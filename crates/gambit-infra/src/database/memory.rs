//! In-memory repositories - used when no database is configured, and in tests.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use gambit_core::domain::{Post, Tournament};
use gambit_core::error::RepoError;
use gambit_core::ports::{BaseRepository, PostRepository, TournamentRepository};

/// An entity the in-memory repository can hold.
pub trait Record: Clone + Send + Sync + 'static {
    fn id(&self) -> Uuid;

    /// Value that must be unique across all records, if any.
    fn unique_key(&self) -> Option<&str> {
        None
    }
}

impl Record for Post {
    fn id(&self) -> Uuid {
        self.id
    }

    fn unique_key(&self) -> Option<&str> {
        Some(&self.slug)
    }
}

impl Record for Tournament {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// In-memory repository using a HashMap behind an async RwLock.
///
/// Note: Data is lost on process restart.
pub struct InMemoryRepository<T> {
    store: RwLock<HashMap<Uuid, T>>,
}

/// In-memory post repository.
pub type InMemoryPostRepository = InMemoryRepository<Post>;

/// In-memory tournament repository.
pub type InMemoryTournamentRepository = InMemoryRepository<Tournament>;

impl<T: Record> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
        }
    }

    fn check_unique(store: &HashMap<Uuid, T>, entity: &T) -> Result<(), RepoError> {
        let Some(key) = entity.unique_key() else {
            return Ok(());
        };
        let taken = store
            .values()
            .any(|other| other.id() != entity.id() && other.unique_key() == Some(key));
        if taken {
            return Err(RepoError::Constraint(format!("duplicate key: {key}")));
        }
        Ok(())
    }

    async fn snapshot(&self) -> Vec<T> {
        self.store.read().await.values().cloned().collect()
    }
}

impl<T: Record> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Record> BaseRepository<T, Uuid> for InMemoryRepository<T> {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<T>, RepoError> {
        Ok(self.store.read().await.get(&id).cloned())
    }

    async fn insert(&self, entity: T) -> Result<T, RepoError> {
        let mut store = self.store.write().await;
        if store.contains_key(&entity.id()) {
            return Err(RepoError::Constraint(format!(
                "duplicate id: {}",
                entity.id()
            )));
        }
        Self::check_unique(&store, &entity)?;
        store.insert(entity.id(), entity.clone());
        Ok(entity)
    }

    async fn update(&self, entity: T) -> Result<T, RepoError> {
        let mut store = self.store.write().await;
        if !store.contains_key(&entity.id()) {
            return Err(RepoError::NotFound);
        }
        Self::check_unique(&store, &entity)?;
        store.insert(entity.id(), entity.clone());
        Ok(entity)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        match self.store.write().await.remove(&id) {
            Some(_) => Ok(()),
            None => Err(RepoError::NotFound),
        }
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn list_recent(&self) -> Result<Vec<Post>, RepoError> {
        let mut posts = self.snapshot().await;
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        let store = self.store.read().await;
        Ok(store.values().find(|p| p.slug == slug).cloned())
    }
}

#[async_trait]
impl TournamentRepository for InMemoryTournamentRepository {
    async fn list_by_start_date(&self) -> Result<Vec<Tournament>, RepoError> {
        let mut tournaments = self.snapshot().await;
        tournaments.sort_by(|a, b| a.start_date.cmp(&b.start_date));
        Ok(tournaments)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use gambit_core::domain::{PostDraft, TournamentDraft};

    use super::*;

    fn post(slug: &str) -> Post {
        Post::new(PostDraft {
            title: format!("Post {slug}"),
            date: "2022-09-22".into(),
            version: "NOTICIA".into(),
            content: "texto".into(),
            slug: slug.into(),
            featured_image: None,
        })
    }

    fn tournament(start_date: &str) -> Tournament {
        Tournament::new(TournamentDraft {
            name: format!("Torneo {start_date}"),
            description: "Suizo".into(),
            max_players: 16,
            system: "Suizo".into(),
            time_per_player: 10,
            start_date: start_date.into(),
            start_time: "18:00".into(),
            location: "FAMAF".into(),
            prizes: String::new(),
            cost: 0.0,
        })
    }

    #[tokio::test]
    async fn test_insert_and_find_by_slug() {
        let repo = InMemoryPostRepository::new();
        let saved = repo.insert(post("torneo-22-sept")).await.unwrap();
        let found = repo.find_by_slug("torneo-22-sept").await.unwrap();
        assert_eq!(found.map(|p| p.id), Some(saved.id));
        assert_eq!(repo.find_by_slug("otro").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_duplicate_slug_is_constraint_violation() {
        let repo = InMemoryPostRepository::new();
        repo.insert(post("blitz")).await.unwrap();
        let err = repo.insert(post("blitz")).await.unwrap_err();
        assert!(matches!(err, RepoError::Constraint(_)));
    }

    #[tokio::test]
    async fn test_update_missing_and_rename_collision() {
        let repo = InMemoryPostRepository::new();
        assert!(matches!(
            repo.update(post("fantasma")).await,
            Err(RepoError::NotFound)
        ));

        repo.insert(post("uno")).await.unwrap();
        let mut dos = repo.insert(post("dos")).await.unwrap();
        dos.slug = "uno".into();
        assert!(matches!(repo.update(dos).await, Err(RepoError::Constraint(_))));
    }

    #[tokio::test]
    async fn test_list_recent_orders_newest_first() {
        let repo = InMemoryPostRepository::new();
        let mut older = post("viejo");
        older.created_at = Utc::now() - Duration::days(30);
        repo.insert(older).await.unwrap();
        repo.insert(post("nuevo")).await.unwrap();

        let slugs: Vec<_> = repo
            .list_recent()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.slug)
            .collect();
        assert_eq!(slugs, vec!["nuevo", "viejo"]);
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = InMemoryTournamentRepository::new();
        let t = repo.insert(tournament("2024-09-28")).await.unwrap();
        repo.delete(t.id).await.unwrap();
        assert!(matches!(repo.delete(t.id).await, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn test_tournaments_by_start_date() {
        let repo = InMemoryTournamentRepository::new();
        repo.insert(tournament("2024-10-05")).await.unwrap();
        repo.insert(tournament("2024-09-28")).await.unwrap();
        let dates: Vec<_> = repo
            .list_by_start_date()
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.start_date)
            .collect();
        assert_eq!(dates, vec!["2024-09-28", "2024-10-05"]);
    }
}
