//! Post handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use gambit_core::DomainError;
use gambit_core::domain::{Post, PostDraft};
use gambit_core::ports::{BaseRepository, PostRepository};
use gambit_shared::dto::{DeleteResponse, PostRequest, PostResponse, RenderedPostResponse};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn post_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id.to_string(),
        title: post.title,
        date: post.date,
        version: post.version,
        content: post.content,
        slug: post.slug,
        featured_image: post.featured_image,
        created_at: post.created_at.to_rfc3339(),
        updated_at: post.updated_at.to_rfc3339(),
    }
}

fn draft_from(req: PostRequest) -> Result<PostDraft, DomainError> {
    let draft = PostDraft {
        title: req.title.unwrap_or_default(),
        date: req.date.unwrap_or_default(),
        version: req.version.unwrap_or_default(),
        content: req.content.unwrap_or_default(),
        slug: req.slug.unwrap_or_default(),
        featured_image: req.featured_image,
    };
    draft.validate()?;
    Ok(draft)
}

pub(crate) fn parse_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::BadRequest(format!("Invalid id: {}", raw)))
}

async fn load(state: &AppState, id: Uuid) -> AppResult<Post> {
    state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))
}

/// GET /api/posts
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.list_recent().await?;
    let body: Vec<PostResponse> = posts.into_iter().map(post_response).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// POST /api/posts
pub async fn create(
    state: web::Data<AppState>,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let draft = draft_from(body.into_inner())?;
    let post = state.posts.insert(Post::new(draft)).await?;

    tracing::info!(post_id = %post.id, slug = %post.slug, "Post created");

    Ok(HttpResponse::Created().json(post_response(post)))
}

/// GET /api/posts/{id}
pub async fn get(state: web::Data<AppState>, path: web::Path<String>) -> AppResult<HttpResponse> {
    let id = parse_id(&path)?;
    let post = load(&state, id).await?;
    Ok(HttpResponse::Ok().json(post_response(post)))
}

/// PUT /api/posts/{id}
pub async fn update(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let id = parse_id(&path)?;
    let draft = draft_from(body.into_inner())?;

    let mut post = load(&state, id).await?;
    post.apply(draft);
    let post = state.posts.update(post).await?;

    tracing::info!(post_id = %post.id, "Post updated");

    Ok(HttpResponse::Ok().json(post_response(post)))
}

/// DELETE /api/posts/{id}
pub async fn delete(state: web::Data<AppState>, path: web::Path<String>) -> AppResult<HttpResponse> {
    let id = parse_id(&path)?;
    state.posts.delete(id).await.map_err(|e| match AppError::from(e) {
        AppError::NotFound(_) => AppError::NotFound("Post not found".to_string()),
        other => other,
    })?;

    tracing::info!(post_id = %id, "Post deleted");

    Ok(HttpResponse::Ok().json(DeleteResponse { success: true }))
}

/// GET /api/posts/slug/{slug}
///
/// Returns the post with its Markdown rendered to HTML. A rendering failure
/// leaves `html` empty rather than failing the request.
pub async fn by_slug(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let slug = path.into_inner();
    let post = state
        .posts
        .find_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    let post_url = state.post_url(&post.slug);
    let html = match state.renderer.render(&post.content, post_url.as_deref()) {
        Ok(html) => Some(html),
        Err(e) => {
            tracing::error!(slug = %post.slug, error = %e, "Failed to render post");
            None
        }
    };

    Ok(HttpResponse::Ok().json(RenderedPostResponse {
        post: post_response(post),
        html,
    }))
}
