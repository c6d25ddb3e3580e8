//! CORS configuration built from the origin registry.

use axum::http::header::{ACCEPT, CONTENT_TYPE, ORIGIN};
use axum::http::{HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Only the listed origins are admitted, with credentials. An empty list admits none.
pub fn create_cors_layer(origins: &[String]) -> CorsLayer {
    let parsed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(value) if value == "*" => {
                tracing::warn!("Skipping wildcard CORS origin; credentials require explicit origins");
                None
            }
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Skipping unparseable CORS origin: {:?}", o);
                None
            }
        })
        .collect();

    if parsed_origins.is_empty() {
        tracing::warn!("No CORS origins registered; cross-origin requests will be refused");
    }

    CorsLayer::new()
        .allow_methods([Method::GET, Method::PUT, Method::POST, Method::DELETE])
        .allow_headers([CONTENT_TYPE, ORIGIN, ACCEPT])
        .allow_credentials(true)
        .allow_origin(AllowOrigin::list(parsed_origins))
}
