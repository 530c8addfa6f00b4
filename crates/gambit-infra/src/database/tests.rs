#[cfg(test)]
mod tests {
    use crate::database::entity::{post, tournament};
    use crate::database::postgres_repo::{PostgresPostRepository, PostgresTournamentRepository};
    use gambit_core::domain::{Post, PostDraft, Tournament, TournamentStatus};
    use gambit_core::error::RepoError;
    use gambit_core::ports::{BaseRepository, PostRepository};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn post_model(slug: &str) -> post::Model {
        let now = chrono::Utc::now();
        post::Model {
            id: uuid::Uuid::new_v4(),
            title: "Hernán Moisset gana el III Torneo Amistoso Blitz".to_owned(),
            date: "2022-09-22".to_owned(),
            version: "NOTICIA".to_owned(),
            content: "El sobrino sigue imparable".to_owned(),
            slug: slug.to_owned(),
            featured_image: Some("/torneo-22-sept.png".to_owned()),
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    fn tournament_model(status: &str) -> tournament::Model {
        let now = chrono::Utc::now();
        tournament::Model {
            id: uuid::Uuid::new_v4(),
            name: "Torneo de Septiembre".to_owned(),
            description: "Sistema suizo".to_owned(),
            max_players: 32,
            system: "Suizo".to_owned(),
            time_per_player: 15,
            start_date: "2024-09-28".to_owned(),
            start_time: "10:00".to_owned(),
            location: "FAMAF".to_owned(),
            prizes: String::new(),
            cost: 2000.0,
            status: status.to_owned(),
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    #[tokio::test]
    async fn test_find_post_by_id() {
        let model = post_model("torneo-22-sept");
        let post_id = model.id;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![model]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

        let post = result.unwrap();
        assert_eq!(post.id, post_id);
        assert_eq!(post.slug, "torneo-22-sept");
        assert_eq!(post.featured_image.as_deref(), Some("/torneo-22-sept.png"));
    }

    #[tokio::test]
    async fn test_find_post_by_slug_missing() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<post::Model>::new()])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        assert_eq!(repo.find_by_slug("no-existe").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_insert_post_returns_stored_row() {
        let model = post_model("blitz");
        let post: Post = model.clone().into();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![model]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);
        let saved = repo.insert(post.clone()).await.unwrap();

        assert_eq!(saved.id, post.id);
        assert_eq!(saved.title, post.title);
    }

    #[tokio::test]
    async fn test_delete_missing_post_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let repo = PostgresPostRepository::new(db);
        let result = BaseRepository::<Post, uuid::Uuid>::delete(&repo, uuid::Uuid::new_v4()).await;

        assert!(matches!(result, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn test_update_missing_tournament_is_not_found() {
        let tournament: Tournament = tournament_model("active").into();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<tournament::Model>::new()])
            .into_connection();

        let repo = PostgresTournamentRepository::new(db);
        let result = repo.update(tournament).await;

        assert!(matches!(result, Err(RepoError::NotFound)));
    }

    #[test]
    fn test_tournament_status_mapping() {
        let active: Tournament = tournament_model("active").into();
        assert_eq!(active.status, TournamentStatus::Active);

        let unknown: Tournament = tournament_model("postponed").into();
        assert_eq!(unknown.status, TournamentStatus::Upcoming);
    }

    #[test]
    fn test_post_round_trips_through_active_model() {
        let post = Post::new(PostDraft {
            title: "Blitz".into(),
            date: "2022-09-22".into(),
            version: String::new(),
            content: "texto".into(),
            slug: "blitz".into(),
            featured_image: None,
        });
        let active: post::ActiveModel = post.clone().into();
        assert_eq!(active.slug.as_ref(), &post.slug);
        assert_eq!(active.featured_image.as_ref(), &None);
    }
}
