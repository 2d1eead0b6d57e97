//! Media upload and delivery.

use actix_multipart::{Field, Multipart, MultipartError};
use actix_web::{HttpRequest, HttpResponse, web};
use futures::TryStreamExt;

use folio_core::domain::{Upload, check_content_type, check_size};
use folio_shared::dto::UploadResponse;

use crate::caching::{CachePolicy, conditional_bytes, weak_etag};
use crate::middleware::auth::Admin;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Multipart field carrying the file.
const FILE_FIELD: &str = "file";

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        AppError::BadRequest(format!("Invalid multipart body: {}", err))
    }
}

/// Read a field into memory, failing as soon as it exceeds the size ceiling.
async fn read_field(field: &mut Field) -> AppResult<Vec<u8>> {
    let mut data = Vec::new();
    while let Some(chunk) = field.try_next().await? {
        check_size(data.len() + chunk.len())?;
        data.extend_from_slice(&chunk);
    }
    Ok(data)
}

async fn read_upload(mut payload: Multipart) -> AppResult<Option<Upload>> {
    while let Some(mut field) = payload.try_next().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let content_type = field
            .content_type()
            .map(|mime| mime.essence_str().to_string())
            .unwrap_or_default();
        // Reject before buffering the body.
        check_content_type(&content_type)?;

        let file_name = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .unwrap_or_default()
            .to_string();
        let data = read_field(&mut field).await?;

        return Ok(Some(Upload {
            file_name,
            content_type,
            data,
        }));
    }
    Ok(None)
}

/// POST /api/upload
pub async fn upload(
    _admin: Admin,
    state: web::Data<AppState>,
    payload: Multipart,
) -> AppResult<HttpResponse> {
    let upload = read_upload(payload)
        .await?
        .ok_or_else(|| AppError::BadRequest("No file provided".to_string()))?;
    upload.validate()?;

    let key = upload.storage_key(chrono::Utc::now());
    let size = upload.data.len();
    state
        .media
        .put(&key, &upload.content_type, upload.data)
        .await?;

    tracing::info!(key = %key, size, content_type = %upload.content_type, "Media stored");

    Ok(HttpResponse::Ok().json(UploadResponse {
        success: true,
        url: format!("/media/{}", key),
        key,
    }))
}

/// GET /media/{path..}
pub async fn serve(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let key = path.into_inner();
    if key.is_empty() {
        return Err(AppError::NotFound("Not found".to_string()));
    }

    let object = state
        .media
        .get(&key)
        .await?
        .ok_or_else(|| AppError::NotFound("Not found".to_string()))?;

    let etag = object
        .etag
        .clone()
        .unwrap_or_else(|| weak_etag(&object.data));

    Ok(conditional_bytes(
        &req,
        object.data,
        &object.content_type,
        &etag,
        CachePolicy::immutable_media(),
    ))
}
