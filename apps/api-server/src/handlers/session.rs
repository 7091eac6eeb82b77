//! Session handlers.
//!
//! Credentials are checked by the external authentication provider; these
//! routes only see its verified session token.

use actix_web::{HttpResponse, web};

use quill_shared::dto::{SessionResponse, UserResponse};

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/session - who the caller is and the role resolved right now.
pub async fn current(Identity(principal): Identity) -> HttpResponse {
    HttpResponse::Ok().json(SessionResponse {
        is_admin: principal.is_admin(),
        role: principal.role.as_str().to_string(),
        uid: principal.uid,
        email: principal.email,
        display_name: principal.display_name,
        photo_url: principal.photo_url,
    })
}

/// POST /api/session - record a sign-in, creating the profile the first
/// time.
pub async fn sign_in(
    state: web::Data<AppState>,
    Identity(principal): Identity,
) -> AppResult<HttpResponse> {
    let user = state.accounts.sign_in(&principal).await?;

    Ok(HttpResponse::Ok().json(UserResponse {
        uid: user.uid,
        email: user.email,
        display_name: user.display_name,
        photo_url: user.photo_url,
        role: user.role.as_str().to_string(),
        created_at: user.created_at,
        last_sign_in_at: user.last_sign_in_at,
    }))
}
