//! CORS policy - any origin, the blog's methods, JSON bodies.

use actix_cors::Cors;
use actix_web::http::{Method, header};

/// Permissive CORS for the public API.
pub fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .send_wildcard()
        .allowed_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allowed_header(header::CONTENT_TYPE)
}
