//! HTTP/HTTPS server startup logic.
//!
//! Supports two TLS modes:
//! - Manual: User-provided certificate files
//! - None: Plain HTTP

use std::net::{SocketAddr, TcpListener};
use std::time::Duration;

use axum::Router;
use axum_server::tls_rustls::RustlsConfig;
use axum_server::Handle;

use crate::config::{AppConfig, TlsConfig, TlsMode};

use super::redirect;
use super::shutdown;

/// Server startup error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid listen address '{0}'")]
    Address(String),

    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    #[error("Failed to load TLS configuration: {0}")]
    TlsConfig(String),

    #[error("Server error: {0}")]
    Server(String),
}

/// Resolve the configured `host:port` into a socket address.
pub fn listen_addr(config: &AppConfig) -> Result<SocketAddr, ServerError> {
    config
        .socket_addr()
        .ok_or_else(|| ServerError::Address(config.bind_address()))
}

/// Bind the listening socket up front so bind failures surface as `Bind`.
fn bind_listener(addr: SocketAddr) -> Result<TcpListener, ServerError> {
    let listener = TcpListener::bind(addr)?;
    listener.set_nonblocking(true)?;
    Ok(listener)
}

/// Start the HTTP/HTTPS server based on configuration.
///
/// This function blocks until the server shuts down.
pub async fn start_server(app: Router, config: &AppConfig) -> Result<(), ServerError> {
    let addr = listen_addr(config)?;
    let listener = bind_listener(addr)?;
    let grace = Duration::from_secs(config.http.shutdown_grace_seconds);
    let handle = Handle::new();

    match config.http.tls.mode {
        TlsMode::None => {
            tracing::warn!(
                "TLS disabled - server running on plain HTTP (not recommended for production)"
            );
            start_plain_server(app, listener, handle, grace).await
        }
        TlsMode::Manual => {
            start_manual_tls_server(app, listener, &config.http.tls, handle, grace).await
        }
    }
}

/// Start a plain HTTP server (no TLS).
async fn start_plain_server(
    app: Router,
    listener: TcpListener,
    handle: Handle,
    grace: Duration,
) -> Result<(), ServerError> {
    let addr = listener.local_addr()?;
    tracing::info!(%addr, "Starting HTTP server (no TLS)");

    shutdown::setup_shutdown_handler(handle.clone(), grace);

    axum_server::from_tcp(listener)
        .handle(handle)
        .serve(app.into_make_service())
        .await
        .map_err(|e| ServerError::Server(e.to_string()))
}

/// Start HTTPS server with user-provided certificates.
async fn start_manual_tls_server(
    app: Router,
    listener: TcpListener,
    tls_config: &TlsConfig,
    handle: Handle,
    grace: Duration,
) -> Result<(), ServerError> {
    let (Some(cert_path), Some(key_path)) = (&tls_config.cert_path, &tls_config.key_path) else {
        return Err(ServerError::TlsConfig(
            "manual TLS requires cert_path and key_path".to_string(),
        ));
    };

    let addr = listener.local_addr()?;
    tracing::info!(%addr, cert = %cert_path, key = %key_path, "Starting HTTPS server (manual certs)");

    let rustls_config = RustlsConfig::from_pem_file(cert_path, key_path)
        .await
        .map_err(|e| ServerError::TlsConfig(format!("Failed to load certificates: {}", e)))?;

    shutdown::setup_shutdown_handler(handle.clone(), grace);

    // Setup SIGHUP handler for certificate reload
    shutdown::setup_reload_handler(rustls_config.clone(), cert_path.clone(), key_path.clone());

    if tls_config.redirect_http {
        let redirect_addr = SocketAddr::new(addr.ip(), tls_config.redirect_port);
        redirect::spawn_redirect_server(redirect_addr, addr.port());
    }

    axum_server::from_tcp_rustls(listener, rustls_config)
        .handle(handle)
        .serve(app.into_make_service())
        .await
        .map_err(|e| ServerError::Server(e.to_string()))
}
