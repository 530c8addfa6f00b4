//! Bucket uploads and featured-image extraction.

use std::path::{Path, PathBuf};

use anyhow::Context;

use gambit_core::content::{extract_featured_image, remove_first_image};
use gambit_core::ports::{BaseRepository, ImageStorage, PostRepository};

use super::Summary;

const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "webp"];

fn image_files(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).with_context(|| format!("reading {}", dir.display()))? {
        let path = entry?.path();
        let is_image = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()));
        if path.is_file() && is_image {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Upload every image in `dir` under its file name, replacing existing objects.
pub async fn upload_images(storage: &dyn ImageStorage, dir: &Path) -> anyhow::Result<Summary> {
    let files = image_files(dir)?;
    tracing::info!(count = files.len(), dir = %dir.display(), "Uploading images");

    let mut summary = Summary::default();
    for path in files {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            tracing::warn!(file = %path.display(), "Skipping file with non UTF-8 name");
            summary.skipped += 1;
            continue;
        };

        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::error!(file = %path.display(), error = %e, "Failed to read image");
                summary.failed += 1;
                continue;
            }
        };
        let content_type = mime_guess::from_path(&path).first_or_octet_stream();

        match storage
            .upload(name, bytes, content_type.essence_str(), true)
            .await
        {
            Ok(stored) => {
                tracing::info!(file = name, url = %stored.url, "Image uploaded");
                summary.created += 1;
            }
            Err(e) => {
                tracing::error!(file = name, error = %e, "Failed to upload image");
                summary.failed += 1;
            }
        }
    }

    Ok(summary)
}

/// Move the first image of each post's body into `featured_image`.
pub async fn extract_featured_images(posts: &dyn PostRepository) -> anyhow::Result<Summary> {
    let all = posts.list_recent().await.context("listing posts")?;
    tracing::info!(count = all.len(), "Extracting featured images");

    let mut summary = Summary::default();
    for mut post in all {
        let Some(image) = extract_featured_image(&post.content).map(str::to_string) else {
            tracing::warn!(title = %post.title, "No image found");
            summary.skipped += 1;
            continue;
        };

        post.content = remove_first_image(&post.content);
        post.featured_image = Some(image);
        post.touch();

        match posts.update(post).await {
            Ok(post) => {
                tracing::info!(
                    title = %post.title,
                    image = post.featured_image.as_deref().unwrap_or_default(),
                    "Featured image extracted"
                );
                summary.updated += 1;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to update post");
                summary.failed += 1;
            }
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use gambit_core::domain::{Post, PostDraft};
    use gambit_infra::{InMemoryImageStorage, InMemoryPostRepository};

    use super::*;

    fn post(slug: &str, content: &str) -> Post {
        Post::new(PostDraft {
            title: slug.to_string(),
            date: "2022-09-22".into(),
            version: "NOTICIA".into(),
            content: content.into(),
            slug: slug.into(),
            featured_image: None,
        })
    }

    #[tokio::test]
    async fn test_upload_images_filters_extensions() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("torneo-22-sept.png"), [1u8, 2, 3]).unwrap();
        fs::write(dir.path().join("podio.JPG"), [4u8]).unwrap();
        fs::write(dir.path().join("notas.txt"), "no").unwrap();

        let storage = InMemoryImageStorage::default();
        let summary = upload_images(&storage, dir.path()).await.unwrap();
        assert_eq!(summary.created, 2);

        assert_eq!(
            storage.object("torneo-22-sept.png"),
            Some((vec![1, 2, 3], "image/png".to_string()))
        );
        assert_eq!(
            storage.object("podio.JPG").map(|(_, ct)| ct),
            Some("image/jpeg".to_string())
        );

        // Re-running overwrites instead of failing.
        let summary = upload_images(&storage, dir.path()).await.unwrap();
        assert_eq!(summary.failed, 0);
    }

    #[tokio::test]
    async fn test_extract_featured_images() {
        let repo = InMemoryPostRepository::new();
        let with_images = repo
            .insert(post(
                "blitz",
                "Texto\n\n![Torneo](/torneo-22-sept.png)\n\n![Podio](/podio.png)",
            ))
            .await
            .unwrap();
        repo.insert(post("sin-imagen", "Solo texto")).await.unwrap();

        let summary = extract_featured_images(&repo).await.unwrap();
        assert_eq!(summary.updated, 1);
        assert_eq!(summary.skipped, 1);

        let updated = repo.find_by_id(with_images.id).await.unwrap().unwrap();
        assert_eq!(updated.featured_image.as_deref(), Some("/torneo-22-sept.png"));
        assert!(!updated.content.contains("torneo-22-sept.png"));
        assert!(updated.content.contains("![Podio](/podio.png)"));
    }
}
