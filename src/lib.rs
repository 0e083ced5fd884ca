//! U Can AI pilot backend.
//!
//! A liveness service: `GET /health` answers `{"status":"ok"}`. The remaining
//! modules host that route (configuration, request tracing, TLS listener and
//! graceful shutdown) and publish its OpenAPI description.

pub mod config;
pub mod error;
pub mod http;
pub mod middleware;
pub mod routes;

pub use config::AppConfig;
pub use error::{Error, Result};
pub use routes::create_router;
