use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::slug::validate_slug;
use crate::error::DomainError;

/// Post entity - a club blog article written in Markdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    /// Publication date as entered by the editor; not a validated date.
    pub date: String,
    /// Category tag, e.g. `NOTICIA`.
    pub version: String,
    pub content: String,
    pub slug: String,
    pub featured_image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The editable fields of a post. Updates replace all of them at once.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostDraft {
    pub title: String,
    pub date: String,
    pub version: String,
    pub content: String,
    pub slug: String,
    pub featured_image: Option<String>,
}

impl PostDraft {
    /// Check required fields (in the order clients expect them reported) and
    /// the slug rules.
    pub fn validate(&self) -> Result<(), DomainError> {
        let required = [
            ("title", &self.title),
            ("content", &self.content),
            ("slug", &self.slug),
            ("date", &self.date),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(DomainError::missing_field(field));
            }
        }
        validate_slug(&self.slug)
    }
}

impl Post {
    /// Create a new post from a validated draft.
    pub fn new(draft: PostDraft) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: draft.title,
            date: draft.date,
            version: draft.version,
            content: draft.content,
            slug: draft.slug,
            featured_image: normalize_image(draft.featured_image),
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace every editable field and bump `updated_at`.
    pub fn apply(&mut self, draft: PostDraft) {
        self.title = draft.title;
        self.date = draft.date;
        self.version = draft.version;
        self.content = draft.content;
        self.slug = draft.slug;
        self.featured_image = normalize_image(draft.featured_image);
        self.touch();
    }

    /// Mark the post as modified now.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Canonical public URL of this post under `base` (e.g. `https://club.org/posts`).
    pub fn canonical_url(&self, base: &str) -> String {
        format!("{}/{}", base.trim_end_matches('/'), self.slug)
    }
}

fn normalize_image(image: Option<String>) -> Option<String> {
    image.filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> PostDraft {
        PostDraft {
            title: "III Torneo Amistoso Blitz".into(),
            date: "2022-09-22".into(),
            version: "NOTICIA".into(),
            content: "Texto".into(),
            slug: "torneo-22-sept".into(),
            featured_image: Some(String::new()),
        }
    }

    #[test]
    fn test_validate_reports_first_missing_field() {
        let mut d = draft();
        d.content = " ".into();
        d.date = String::new();
        let err = d.validate().unwrap_err();
        assert_eq!(err.to_string(), "Validation failed: Campo requerido: content");
    }

    #[test]
    fn test_empty_featured_image_is_none() {
        let post = Post::new(draft());
        assert_eq!(post.featured_image, None);
        assert_eq!(post.created_at, post.updated_at);
    }

    #[test]
    fn test_apply_replaces_fields() {
        let mut post = Post::new(draft());
        let id = post.id;
        let mut next = draft();
        next.title = "Otro".into();
        next.featured_image = Some("/portada.png".into());
        post.apply(next);
        assert_eq!(post.id, id);
        assert_eq!(post.title, "Otro");
        assert_eq!(post.featured_image.as_deref(), Some("/portada.png"));
        assert!(post.updated_at >= post.created_at);
    }

    #[test]
    fn test_canonical_url() {
        let post = Post::new(draft());
        assert_eq!(
            post.canonical_url("https://club.example/posts/"),
            "https://club.example/posts/torneo-22-sept"
        );
    }
}
