//! Server-sent event feeds of post changes.
//!
//! Each connection holds one subscription; dropping the response stream
//! when the client disconnects ends it.

use std::convert::Infallible;

use actix_web::{HttpResponse, web};
use futures::{Stream, StreamExt};

use quill_core::services::PostEvent;

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn sse(events: impl Stream<Item = PostEvent> + 'static) -> HttpResponse {
    let body = events.filter_map(|event| async move {
        match serde_json::to_string(&event) {
            Ok(json) => Some(Ok::<_, Infallible>(web::Bytes::from(format!(
                "data: {json}\n\n"
            )))),
            Err(e) => {
                tracing::warn!(error = %e, "Skipping unencodable post event");
                None
            }
        }
    });

    HttpResponse::Ok()
        .content_type("text/event-stream")
        .insert_header(("Cache-Control", "no-cache"))
        .streaming(body)
}

/// GET /api/posts/stream - published posts only.
pub async fn public_feed(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let events = state.blog.subscribe(None).await?;
    Ok(sse(events))
}

/// GET /api/admin/posts/stream - every change, for the moderation queue.
pub async fn admin_feed(
    state: web::Data<AppState>,
    Identity(principal): Identity,
) -> AppResult<HttpResponse> {
    if !principal.is_admin() {
        return Err(AppError::Forbidden);
    }
    let events = state.blog.subscribe(Some(&principal)).await?;
    tracing::debug!(uid = %principal.uid, "Admin change feed opened");
    Ok(sse(events))
}
