//! HTTP route handlers.
//!
//! The liveness probe is the only application route. The OpenAPI document is
//! merged in when enabled. Anything else falls through to axum's defaults:
//! 404 for unknown paths and 405 (with `Allow`) for a wrong method on a known
//! path.

pub mod health;
pub mod openapi;

use axum::{middleware, routing::get, Router};
use http::header::{HeaderValue, CACHE_CONTROL};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::{AppConfig, CACHE_CONTROL_HEALTH, HEALTH_PATH};
use crate::middleware::request_id_layer;

/// Creates the Axum router with all routes.
pub fn create_router(config: &AppConfig) -> Router {
    // Health check - no caching, always fresh for liveness probes
    let health_routes = Router::new()
        .route(HEALTH_PATH, get(health::health))
        .layer(SetResponseHeaderLayer::overriding(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_HEALTH),
        ));

    let mut app = Router::new().merge(health_routes);
    if config.app.openapi {
        app = app.merge(openapi::router(&config.app.title));
    }

    // Request ID middleware - creates root span with request_id for correlation
    app.layer(middleware::from_fn(request_id_layer))
}
