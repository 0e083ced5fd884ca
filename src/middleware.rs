//! Request ID middleware for correlating logs with requests.
//!
//! Takes the request ID from an incoming `x-request-id` header when the caller
//! supplied a usable one, otherwise generates a UUID v4. A tracing span wraps
//! the whole request lifecycle so every log line carries the `request_id`
//! field, and the ID is echoed back in the response headers.

use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};
use http::HeaderValue;
use tracing::Instrument;
use uuid::Uuid;

use crate::config::{HEALTH_PATH, REQUEST_ID_HEADER, REQUEST_ID_MAX_LEN};

/// Extension type for accessing the request ID in handlers if needed.
#[derive(Clone, Debug)]
pub struct RequestId(pub String);

/// Returns the caller's request ID if it is short, non-empty visible ASCII.
fn incoming_request_id(request: &Request) -> Option<String> {
    let value = request.headers().get(REQUEST_ID_HEADER)?.to_str().ok()?;
    let acceptable = !value.is_empty()
        && value.len() <= REQUEST_ID_MAX_LEN
        && value.bytes().all(|b| b.is_ascii_graphic());
    acceptable.then(|| value.to_string())
}

/// Middleware that assigns a request ID and creates a request span.
///
/// This should be the outermost layer so the span wraps all request
/// processing, including the router's own not-found and method fallbacks.
pub async fn request_id_layer(mut request: Request, next: Next) -> Response {
    let request_id =
        incoming_request_id(&request).unwrap_or_else(|| Uuid::new_v4().to_string());
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let is_probe = path == HEALTH_PATH;

    let span = tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %method,
        path = %path,
        duration_ms = tracing::field::Empty,
    );

    let start = Instant::now();
    request
        .extensions_mut()
        .insert(RequestId(request_id.clone()));

    async move {
        let mut response = next.run(request).await;
        let duration_ms = start.elapsed().as_millis() as u64;
        let status = response.status().as_u16();

        tracing::Span::current().record("duration_ms", duration_ms);
        // Orchestrators poll the probe constantly
        if is_probe {
            tracing::debug!(status, duration_ms, "Request completed");
        } else {
            tracing::info!(status, duration_ms, "Request completed");
        }

        if let Ok(value) = HeaderValue::from_str(&request_id) {
            response.headers_mut().insert(REQUEST_ID_HEADER, value);
        }
        response
    }
    .instrument(span)
    .await
}
