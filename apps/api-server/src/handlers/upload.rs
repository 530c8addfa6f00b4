//! Image upload handler.

use actix_multipart::Multipart;
use actix_web::{HttpResponse, web};
use futures::TryStreamExt;
use uuid::Uuid;

use gambit_core::ports::ImageStorage;
use gambit_shared::dto::UploadResponse;

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Multipart field carrying the file.
const IMAGE_FIELD: &str = "image";

const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

struct ImageUpload {
    file_name: Option<String>,
    content_type: Option<String>,
    bytes: Vec<u8>,
}

/// Unique object name: `{unix_millis}-{random}.{ext}`.
fn object_name(original: Option<&str>, content_type: &str) -> String {
    let extension = original
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .or_else(|| {
            mime_guess::get_mime_extensions_str(content_type)
                .and_then(|exts| exts.first())
                .map(|ext| ext.to_string())
        })
        .unwrap_or_else(|| "bin".to_string());

    let random = Uuid::new_v4().simple().to_string();
    format!(
        "{}-{}.{}",
        chrono::Utc::now().timestamp_millis(),
        &random[..10],
        extension
    )
}

async fn read_image(mut payload: Multipart) -> AppResult<Option<ImageUpload>> {
    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        let file_name = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(str::to_string);
        let content_type = field.content_type().map(|m| m.essence_str().to_string());

        let mut bytes = Vec::new();
        while let Some(chunk) = field
            .try_next()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?
        {
            if bytes.len() + chunk.len() > MAX_IMAGE_BYTES {
                return Err(AppError::BadRequest("Image exceeds 10 MB".to_string()));
            }
            bytes.extend_from_slice(&chunk);
        }

        return Ok(Some(ImageUpload {
            file_name,
            content_type,
            bytes,
        }));
    }

    Ok(None)
}

/// POST /api/upload-image
pub async fn upload_image(
    state: web::Data<AppState>,
    payload: Multipart,
) -> AppResult<HttpResponse> {
    let image = read_image(payload)
        .await?
        .ok_or_else(|| AppError::BadRequest("No image file provided".to_string()))?;

    let content_type = image
        .content_type
        .filter(|ct| ct != "application/octet-stream")
        .or_else(|| {
            image
                .file_name
                .as_deref()
                .and_then(|name| mime_guess::from_path(name).first_raw())
                .map(str::to_string)
        })
        .unwrap_or_else(|| "application/octet-stream".to_string());

    let name = object_name(image.file_name.as_deref(), &content_type);
    let stored = state
        .storage
        .upload(&name, image.bytes, &content_type, false)
        .await?;

    tracing::info!(file = %stored.path, content_type = %content_type, "Image uploaded");

    Ok(HttpResponse::Ok().json(UploadResponse {
        message: "Image uploaded successfully".to_string(),
        file_name: stored.path,
        url: stored.url,
    }))
}
