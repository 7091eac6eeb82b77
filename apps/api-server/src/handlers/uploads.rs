//! Cover image uploads. The body is the raw image; the returned URI goes
//! into the post's `cover_image` on the following save.

use actix_web::{HttpRequest, HttpResponse, http::header, web};

use quill_core::services::CoverUpload;
use quill_shared::dto::{UploadQuery, UploadResponse};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Largest accepted cover image.
pub const MAX_COVER_BYTES: usize = 5 * 1024 * 1024;

/// POST /api/uploads/covers?filename=
pub async fn cover(
    state: web::Data<AppState>,
    Identity(principal): Identity,
    req: HttpRequest,
    query: web::Query<UploadQuery>,
    body: web::Bytes,
) -> AppResult<HttpResponse> {
    let content_type = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::BadRequest("Content-Type header is required".to_string()))?;

    let upload = CoverUpload {
        file_name: query.into_inner().filename,
        content_type: content_type.to_string(),
        bytes: body.to_vec(),
    };

    let uri = state.blog.upload_cover(&principal, upload).await?;
    Ok(HttpResponse::Created().json(UploadResponse { uri }))
}
