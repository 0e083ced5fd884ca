//! OpenAPI document for the service.
//!
//! The document is generated from the handler annotations at startup, stamped
//! with the configured title and the crate version, and served as JSON.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use super::health;
use crate::config::{OPENAPI_PATH, VERSION};

#[derive(OpenApi)]
#[openapi(
    paths(health::health),
    components(schemas(health::HealthStatus, health::Liveness)),
    tags(
        (name = "health", description = "Liveness probe"),
    )
)]
pub struct ApiDoc;

/// Build the document with the given title.
pub fn document(title: &str) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.info.title = title.to_string();
    doc.info.version = VERSION.to_string();
    doc
}

async fn openapi_json(
    State(doc): State<Arc<utoipa::openapi::OpenApi>>,
) -> Json<utoipa::openapi::OpenApi> {
    Json(doc.as_ref().clone())
}

pub fn router(title: &str) -> Router {
    Router::new()
        .route(OPENAPI_PATH, get(openapi_json))
        .with_state(Arc::new(document(title)))
}
