//! HTTP server module with TLS support.
//!
//! This module provides the listener for the service in two modes:
//! - **Manual**: User-provided certificate and key files
//! - **None**: Plain HTTP (development or behind a TLS-terminating proxy)
//!
//! The server includes:
//! - HTTP to HTTPS redirect (manual TLS only, opt-in)
//! - Graceful shutdown on SIGTERM/SIGINT
//! - Certificate hot-reload via SIGHUP

mod redirect;
mod server;
mod shutdown;

pub use server::{listen_addr, start_server, ServerError};
