//! Liveness probe.

use crate::http::dto::HealthResponse;
use axum::Json;

/// `GET /health`
#[expect(clippy::unused_async, reason = "axum handlers are async")]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
