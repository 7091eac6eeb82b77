//! Moderation handlers. Every route requires an admin principal; the
//! domain service enforces it.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use quill_core::domain::PostStatus;
use quill_shared::dto::{AdminListQuery, ModerationStatsResponse};

use super::posts::{post_list, post_response};
use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/admin/posts?status=
pub async fn list(
    state: web::Data<AppState>,
    Identity(principal): Identity,
    query: web::Query<AdminListQuery>,
) -> AppResult<HttpResponse> {
    let status = match query.status.as_deref().map(str::trim) {
        None | Some("") | Some("all") => None,
        Some(raw) => Some(raw.parse::<PostStatus>()?),
    };

    let posts = state.blog.list_for_admin(&principal, status).await?;
    Ok(HttpResponse::Ok().json(post_list(posts)))
}

/// GET /api/admin/posts/stats
pub async fn stats(
    state: web::Data<AppState>,
    Identity(principal): Identity,
) -> AppResult<HttpResponse> {
    let counts = state.blog.moderation_stats(&principal).await?;
    Ok(HttpResponse::Ok().json(ModerationStatsResponse {
        total: counts.total(),
        draft: counts.draft,
        pending: counts.pending,
        published: counts.published,
        rejected: counts.rejected,
    }))
}

/// POST /api/admin/posts/{id}/approve
pub async fn approve(
    state: web::Data<AppState>,
    Identity(principal): Identity,
    id: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = state.blog.approve(*id, &principal).await?;
    Ok(HttpResponse::Ok().json(post_response(post)))
}

/// POST /api/admin/posts/{id}/reject
pub async fn reject(
    state: web::Data<AppState>,
    Identity(principal): Identity,
    id: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = state.blog.reject(*id, &principal).await?;
    Ok(HttpResponse::Ok().json(post_response(post)))
}

/// DELETE /api/admin/posts/{id}
pub async fn delete(
    state: web::Data<AppState>,
    Identity(principal): Identity,
    id: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    state.blog.delete(*id, &principal).await?;
    Ok(HttpResponse::NoContent().finish())
}
