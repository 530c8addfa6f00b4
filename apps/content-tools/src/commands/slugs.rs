//! Cleaning legacy slugs.

use anyhow::Context;

use gambit_core::content::clean_slug;
use gambit_core::domain::validate_slug;
use gambit_core::ports::{BaseRepository, PostRepository};

use super::Summary;

/// Strip ordering prefixes (`1.torneo` -> `torneo`). A cleaned slug that is
/// invalid or already taken is reported and left as it was.
pub async fn clean_slugs(posts: &dyn PostRepository) -> anyhow::Result<Summary> {
    let all = posts.list_recent().await.context("listing posts")?;
    tracing::info!(count = all.len(), "Cleaning slugs");

    let mut summary = Summary::default();
    for mut post in all {
        let cleaned = clean_slug(&post.slug).to_string();
        if cleaned == post.slug {
            tracing::debug!(slug = %post.slug, "Slug already clean");
            summary.skipped += 1;
            continue;
        }

        if let Err(e) = validate_slug(&cleaned) {
            tracing::warn!(slug = %post.slug, cleaned = %cleaned, error = %e, "Cleaned slug is not usable");
            summary.failed += 1;
            continue;
        }

        let original = std::mem::replace(&mut post.slug, cleaned);
        post.touch();

        match posts.update(post).await {
            Ok(post) => {
                tracing::info!(from = %original, to = %post.slug, "Slug cleaned");
                summary.updated += 1;
            }
            Err(e) => {
                tracing::error!(slug = %original, error = %e, "Failed to update post");
                summary.failed += 1;
            }
        }
    }

    Ok(summary)
}
