//! Post handlers for readers and authors.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use quill_core::domain::{Category, Post, PostInput, TargetStatus};
use quill_shared::dto::{
    CreatePostRequest, PostFields, PostListResponse, PostResponse, UpdatePostRequest,
};

use crate::middleware::auth::{Identity, OptionalIdentity};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

pub(super) fn post_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id,
        slug: post.slug,
        title: post.title,
        category: post.category.label().to_string(),
        excerpt: post.excerpt,
        content: post.content,
        cover_image: post.cover_image,
        tags: post.tags,
        author_id: post.author_id,
        author_name: post.author_name,
        status: post.status.as_str().to_string(),
        reading_time: post.reading_time,
        created_at: post.created_at,
        updated_at: post.updated_at,
        published_at: post.published_at,
    }
}

pub(super) fn post_list(posts: Vec<Post>) -> PostListResponse {
    posts.into_iter().map(post_response).collect::<Vec<_>>().into()
}

fn post_input(fields: PostFields) -> AppResult<PostInput> {
    let category: Category = fields.category.trim().parse()?;
    Ok(PostInput {
        title: fields.title,
        category,
        excerpt: fields.excerpt,
        content: fields.content,
        cover_image: fields.cover_image.filter(|uri| !uri.trim().is_empty()),
        tags: fields.tags,
    })
}

fn target_status(raw: Option<&str>) -> AppResult<TargetStatus> {
    match raw.map(str::trim) {
        None | Some("") | Some("draft") => Ok(TargetStatus::Draft),
        Some("pending") => Ok(TargetStatus::Pending),
        Some(other) => Err(AppError::Validation(format!(
            "status must be draft or pending, got {other}"
        ))),
    }
}

/// GET /api/posts
pub async fn list_published(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.blog.list_published().await?;
    Ok(HttpResponse::Ok().json(post_list(posts)))
}

/// GET /api/posts/slug/{slug}
pub async fn by_slug(
    state: web::Data<AppState>,
    viewer: OptionalIdentity,
    slug: web::Path<String>,
) -> AppResult<HttpResponse> {
    let post = state.blog.get_by_slug(&slug, viewer.principal()).await?;
    Ok(HttpResponse::Ok().json(post_response(post)))
}

/// GET /api/posts/{id}
pub async fn by_id(
    state: web::Data<AppState>,
    viewer: OptionalIdentity,
    id: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = state.blog.get_by_id(*id, viewer.principal()).await?;
    Ok(HttpResponse::Ok().json(post_response(post)))
}

/// GET /api/posts/mine
pub async fn mine(
    state: web::Data<AppState>,
    Identity(principal): Identity,
) -> AppResult<HttpResponse> {
    let posts = state.blog.list_by_author(&principal).await?;
    Ok(HttpResponse::Ok().json(post_list(posts)))
}

/// POST /api/posts
pub async fn create(
    state: web::Data<AppState>,
    Identity(principal): Identity,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let target = target_status(req.status.as_deref())?;
    let input = post_input(req.post)?;

    let post = state.blog.create_post(input, &principal, target, None).await?;
    Ok(HttpResponse::Created().json(post_response(post)))
}

/// PUT /api/posts/{id}
pub async fn update(
    state: web::Data<AppState>,
    Identity(principal): Identity,
    id: web::Path<Uuid>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let input = post_input(body.into_inner())?;
    let post = state.blog.edit_post(*id, input, &principal, None).await?;
    Ok(HttpResponse::Ok().json(post_response(post)))
}

/// POST /api/posts/{id}/submit
pub async fn submit(
    state: web::Data<AppState>,
    Identity(principal): Identity,
    id: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = state.blog.submit_for_review(*id, &principal).await?;
    Ok(HttpResponse::Ok().json(post_response(post)))
}
