//! Normalizing and auditing post dates.

use anyhow::Context;

use gambit_core::content::{is_iso_date, parse_spanish_date};
use gambit_core::ports::{BaseRepository, PostRepository};

use super::Summary;

/// Rewrite dates such as `29 de Marzo` as `YYYY-MM-DD` in `year`.
/// Dates already in that format are left alone.
pub async fn fix_dates(posts: &dyn PostRepository, year: i32) -> anyhow::Result<Summary> {
    let all = posts.list_recent().await.context("listing posts")?;
    tracing::info!(count = all.len(), year, "Converting Spanish dates");

    let mut summary = Summary::default();
    for mut post in all {
        if is_iso_date(&post.date) {
            summary.skipped += 1;
            continue;
        }

        let Some(date) = parse_spanish_date(&post.date, year) else {
            tracing::warn!(title = %post.title, date = %post.date, "Could not parse date");
            summary.failed += 1;
            continue;
        };

        let original = std::mem::replace(&mut post.date, date.format("%Y-%m-%d").to_string());
        post.touch();

        match posts.update(post).await {
            Ok(post) => {
                tracing::info!(title = %post.title, from = %original, to = %post.date, "Date fixed");
                summary.updated += 1;
            }
            Err(e) => {
                tracing::error!(date = %original, error = %e, "Failed to update post");
                summary.failed += 1;
            }
        }
    }

    Ok(summary)
}

/// Log every post whose date is not `YYYY-MM-DD`. Nothing is modified;
/// invalid dates are counted as failed.
pub async fn check_dates(posts: &dyn PostRepository) -> anyhow::Result<Summary> {
    let all = posts.list_recent().await.context("listing posts")?;
    tracing::info!(count = all.len(), "Checking post dates");

    let mut summary = Summary::default();
    for post in all {
        if is_iso_date(&post.date) {
            tracing::debug!(id = %post.id, date = %post.date, "Valid date");
            summary.skipped += 1;
        } else {
            tracing::warn!(
                id = %post.id,
                title = %post.title,
                date = %post.date,
                created_at = %post.created_at,
                "Invalid date"
            );
            summary.failed += 1;
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use gambit_core::domain::{Post, PostDraft};
    use gambit_infra::InMemoryPostRepository;

    use super::*;

    fn post(slug: &str, date: &str) -> Post {
        Post::new(PostDraft {
            title: slug.to_string(),
            date: date.into(),
            version: String::new(),
            content: "texto".into(),
            slug: slug.into(),
            featured_image: None,
        })
    }

    #[tokio::test]
    async fn test_fix_dates() {
        let repo = InMemoryPostRepository::new();
        let marzo = repo.insert(post("marzo", "29 de Marzo")).await.unwrap();
        repo.insert(post("iso", "2022-09-22")).await.unwrap();
        let raro = repo.insert(post("raro", "pronto")).await.unwrap();

        let summary = fix_dates(&repo, 2022).await.unwrap();
        assert_eq!(summary.updated, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.failed, 1);

        let fixed = repo.find_by_id(marzo.id).await.unwrap().unwrap();
        assert_eq!(fixed.date, "2022-03-29");
        let untouched = repo.find_by_id(raro.id).await.unwrap().unwrap();
        assert_eq!(untouched.date, "pronto");
    }

    #[tokio::test]
    async fn test_check_dates_counts_invalid() {
        let repo = InMemoryPostRepository::new();
        repo.insert(post("a", "2022-02-30")).await.unwrap();
        repo.insert(post("b", "2022-09-22")).await.unwrap();

        let summary = check_dates(&repo).await.unwrap();
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.updated, 0);
    }
}
