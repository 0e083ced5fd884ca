//! Health check endpoint for container orchestration.
//!
//! Provides a liveness probe that returns 200 OK with `{"status":"ok"}` whenever
//! the process can answer HTTP. Used by Kubernetes, ECS, systemd and load
//! balancers to verify the service is alive. The handler takes no input and has
//! no failure path.

use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Liveness value reported by the probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Liveness {
    Ok,
}

/// Fixed-shape payload returned by `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthStatus {
    pub status: Liveness,
}

impl HealthStatus {
    pub const fn ok() -> Self {
        Self {
            status: Liveness::Ok,
        }
    }
}

/// Health check handler.
///
/// This is a liveness probe: it only checks that the process can respond.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Process is alive", body = HealthStatus)
    )
)]
pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus::ok())
}
