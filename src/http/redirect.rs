//! HTTP to HTTPS redirect server.
//!
//! Spawns a lightweight plain listener that permanently redirects every request
//! to the HTTPS listener.

use std::net::SocketAddr;

use axum::http::Uri;
use axum::response::Redirect;
use axum::routing::any;
use axum::Router;
use axum_extra::extract::Host;

/// Spawn an HTTP server that redirects all requests to HTTPS.
///
/// This runs in the background and does not block.
pub fn spawn_redirect_server(addr: SocketAddr, https_port: u16) {
    tokio::spawn(async move {
        tracing::info!(
            %addr,
            https_port = %https_port,
            "Starting HTTP->HTTPS redirect server"
        );

        let app = Router::new().fallback(any(move |Host(host): Host, uri: Uri| async move {
            let location = https_location(&host, &uri, https_port);
            tracing::debug!(from = %uri, to = %location, "Redirecting HTTP to HTTPS");
            Redirect::permanent(&location)
        }));

        match axum_server::bind(addr)
            .serve(app.into_make_service())
            .await
        {
            Ok(()) => {
                tracing::debug!("HTTP redirect server stopped");
            }
            Err(e) => {
                tracing::error!(error = %e, "HTTP redirect server failed");
            }
        }
    });
}

/// Build the HTTPS URL for a plain-HTTP request.
fn https_location(host: &str, uri: &Uri, https_port: u16) -> String {
    let host_without_port = host.split(':').next().unwrap_or(host);
    let path = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");

    if https_port == 443 {
        format!("https://{}{}", host_without_port, path)
    } else {
        format!("https://{}:{}{}", host_without_port, https_port, path)
    }
}
