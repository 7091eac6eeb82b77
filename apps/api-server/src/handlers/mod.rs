//! HTTP handlers and route configuration.

mod admin;
mod health;
mod posts;
mod session;
mod stream;
mod uploads;


use actix_web::web;

use crate::middleware::rate_limit::RateLimitMiddleware;
use crate::state::AppState;

/// Configure all application routes.
///
/// Literal segments under `/posts` are registered before `/posts/{id}`.
pub fn configure_routes(cfg: &mut web::ServiceConfig, state: &AppState) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            .service(
                web::resource("/session")
                    .route(web::get().to(session::current))
                    .route(web::post().to(session::sign_in)),
            )
            .service(
                web::scope("/posts")
                    .wrap(RateLimitMiddleware::new(state.limiter.clone()))
                    .service(
                        web::resource("")
                            .route(web::get().to(posts::list_published))
                            .route(web::post().to(posts::create)),
                    )
                    .route("/stream", web::get().to(stream::public_feed))
                    .route("/mine", web::get().to(posts::mine))
                    .route("/slug/{slug}", web::get().to(posts::by_slug))
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(posts::by_id))
                            .route(web::put().to(posts::update)),
                    )
                    .route("/{id}/submit", web::post().to(posts::submit)),
            )
            .service(
                web::scope("/uploads")
                    .wrap(RateLimitMiddleware::new(state.limiter.clone()))
                    .app_data(web::PayloadConfig::new(uploads::MAX_COVER_BYTES))
                    .route("/covers", web::post().to(uploads::cover)),
            )
            // Admin routes
            .service(
                web::scope("/admin/posts")
                    .route("", web::get().to(admin::list))
                    .route("/stats", web::get().to(admin::stats))
                    .route("/stream", web::get().to(stream::admin_feed))
                    .route("/{id}", web::delete().to(admin::delete))
                    .route("/{id}/approve", web::post().to(admin::approve))
                    .route("/{id}/reject", web::post().to(admin::reject)),
            ),
    );
}
