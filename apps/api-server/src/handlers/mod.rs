//! HTTP handlers and route configuration.

mod auth;
mod health;
mod media;
mod posts;

#[cfg(test)]
mod tests;

use actix_web::{HttpResponse, error::InternalError, web};
use folio_shared::ErrorResponse;

/// Malformed JSON bodies get the same problem-details shape as other errors.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let detail = ErrorResponse::bad_request(err.to_string());
        InternalError::from_response(err, HttpResponse::BadRequest().json(detail)).into()
    })
}

/// Query strings that fail to parse (e.g. an out-of-range `limit`) as well.
fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        let detail = ErrorResponse::bad_request(err.to_string());
        InternalError::from_response(err, HttpResponse::BadRequest().json(detail)).into()
    })
}

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .service(
            web::scope("/api")
                // Public routes
                .route("/health", web::get().to(health::health_check))
                // Posts
                .service(
                    web::resource("/posts")
                        .route(web::get().to(posts::list_posts))
                        .route(web::post().to(posts::create_post)),
                )
                .service(
                    web::resource("/posts/{slug}")
                        .route(web::get().to(posts::get_post))
                        .route(web::put().to(posts::update_post))
                        .route(web::delete().to(posts::delete_post)),
                )
                // Media
                .route("/upload", web::post().to(media::upload))
                // Auth routes
                .service(
                    web::scope("/auth")
                        .route("/login", web::get().to(auth::login))
                        .route("/callback", web::get().to(auth::callback))
                        .route("/logout", web::get().to(auth::logout))
                        .route("/me", web::get().to(auth::me)),
                ),
        )
        .route("/media/{path:.*}", web::get().to(media::serve));
}
