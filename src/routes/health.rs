//! Health check endpoint
//!
//! `/health`, `/healthz` - liveness probe. Always 200 while the process is
//! serving; the body reports which upstreams are configured so a missing
//! credential is visible without making an authenticated call.

use bytes::Bytes;
use http_body_util::Full;
use hyper::{Response, StatusCode};
use serde::Serialize;

use super::json_response;
use crate::server::AppState;

/// Health response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Overall health status (true if service is running)
    pub healthy: bool,
    /// Service version
    pub version: &'static str,
    /// Current timestamp
    pub timestamp: String,
    /// Whether GITHUB_TOKEN is set
    pub content_store_configured: bool,
    /// Whether OPENAI_API_KEY is set
    pub completion_service_configured: bool,
    /// Whether ADMIN_SECRET is set; without it every editor call is 401
    pub admin_token_configured: bool,
}

fn build_health_response(state: &AppState) -> HealthResponse {
    HealthResponse {
        healthy: true,
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().to_rfc3339(),
        content_store_configured: state.content.is_some(),
        completion_service_configured: state.translator.is_some(),
        admin_token_configured: state.admin.is_configured(),
    }
}

/// Handle liveness probe (/health, /healthz)
pub fn health_check(state: &AppState) -> Response<Full<Bytes>> {
    json_response(StatusCode::OK, &build_health_response(state), "GET, OPTIONS")
}
