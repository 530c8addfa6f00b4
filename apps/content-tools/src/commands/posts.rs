//! Importing and restoring posts from Markdown files.

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use uuid::Uuid;

use gambit_core::content::{MarkdownDocument, clean_slug};
use gambit_core::domain::{Post, PostDraft};
use gambit_core::ports::{BaseRepository, PostRepository};

use super::Summary;

fn markdown_files(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).with_context(|| format!("reading {}", dir.display()))? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "md") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn read_draft(path: &Path) -> anyhow::Result<PostDraft> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let doc = MarkdownDocument::parse(&text)
        .with_context(|| format!("parsing front matter of {}", path.display()))?;

    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .context("file name is not valid UTF-8")?;
    let draft = doc.to_draft(clean_slug(stem));
    draft.validate()?;
    Ok(draft)
}

/// Import every `.md` file in `dir`. A post whose slug already exists is
/// overwritten, keeping its featured image unless the file names one.
pub async fn import_posts(posts: &dyn PostRepository, dir: &Path) -> anyhow::Result<Summary> {
    let files = markdown_files(dir)?;
    tracing::info!(count = files.len(), dir = %dir.display(), "Importing Markdown posts");

    let mut summary = Summary::default();
    for path in files {
        let mut draft = match read_draft(&path) {
            Ok(draft) => draft,
            Err(e) => {
                tracing::error!(file = %path.display(), "Skipping file: {e:#}");
                summary.failed += 1;
                continue;
            }
        };

        let result = match posts.find_by_slug(&draft.slug).await {
            Ok(Some(mut existing)) => {
                if draft.featured_image.is_none() {
                    draft.featured_image = existing.featured_image.take();
                }
                existing.apply(draft);
                posts.update(existing).await.map(|post| (post, false))
            }
            Ok(None) => posts.insert(Post::new(draft)).await.map(|post| (post, true)),
            Err(e) => Err(e),
        };

        match result {
            Ok((post, true)) => {
                tracing::info!(slug = %post.slug, title = %post.title, "Post created");
                summary.created += 1;
            }
            Ok((post, false)) => {
                tracing::info!(slug = %post.slug, title = %post.title, "Post updated");
                summary.updated += 1;
            }
            Err(e) => {
                tracing::error!(file = %path.display(), error = %e, "Failed to store post");
                summary.failed += 1;
            }
        }
    }

    Ok(summary)
}

/// Overwrite post `id` with the contents of `file`. The slug defaults to the
/// post's current one when the front matter does not set it.
pub async fn restore_post(
    posts: &dyn PostRepository,
    id: Uuid,
    file: &Path,
) -> anyhow::Result<Summary> {
    let Some(mut post) = posts.find_by_id(id).await? else {
        bail!("post {id} not found");
    };

    let text =
        std::fs::read_to_string(file).with_context(|| format!("reading {}", file.display()))?;
    let draft = MarkdownDocument::parse(&text)?.to_draft(&post.slug);
    draft.validate()?;

    post.apply(draft);
    let post = posts.update(post).await?;

    tracing::info!(
        id = %post.id,
        title = %post.title,
        slug = %post.slug,
        date = %post.date,
        version = %post.version,
        "Post restored"
    );

    Ok(Summary {
        updated: 1,
        ..Summary::default()
    })
}
