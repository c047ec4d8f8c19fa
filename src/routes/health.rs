/**
 * Health Routes
 * Liveness, readiness and upstream checks
 */
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::AppState;

// Track server start time for uptime calculation
lazy_static::lazy_static! {
    static ref SERVER_START: Instant = Instant::now();
}

/// Initialize the server start time
pub fn init_start_time() {
    lazy_static::initialize(&SERVER_START);
}

/// Single service check result
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceCheck {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ServiceCheck {
    fn healthy(millis: u64) -> Self {
        Self {
            status: "healthy".to_string(),
            response_time: Some(millis),
            error: None,
        }
    }

    fn unhealthy(error: String) -> Self {
        Self {
            status: "unhealthy".to_string(),
            response_time: None,
            error: Some(error),
        }
    }
}

/// Detailed health check response
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedHealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uptime: Option<u64>,
    pub checks: HealthChecks,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthChecks {
    pub portfolio_api: ServiceCheck,
    pub registry: ServiceCheck,
}

/// Ready check response
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadyResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uptime: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Simple health response
#[derive(Debug, Serialize, Deserialize)]
pub struct SimpleHealthResponse {
    pub status: String,
}

async fn upstream_check(state: &AppState) -> ServiceCheck {
    match state.source.ping().await {
        Ok(duration) => ServiceCheck::healthy(duration.as_millis() as u64),
        Err(e) => ServiceCheck::unhealthy(e.to_string()),
    }
}

fn registry_check(state: &AppState) -> ServiceCheck {
    if state.registry.entries().next().is_some() {
        ServiceCheck::healthy(0)
    } else {
        ServiceCheck::unhealthy("block registry is empty".to_string())
    }
}

/// GET /health - Simple health ping
pub async fn health_ping() -> impl IntoResponse {
    Json(SimpleHealthResponse {
        status: "ok".to_string(),
    })
}

/// GET /health/detailed - Uptime plus upstream reachability
pub async fn health_detailed(State(state): State<AppState>) -> impl IntoResponse {
    let uptime = SERVER_START.elapsed().as_secs();

    // The renderer keeps serving previews while the API is down, so the
    // overall status stays "ok" and the check reports the outage.
    let response = DetailedHealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now(),
        uptime: Some(uptime),
        checks: HealthChecks {
            portfolio_api: upstream_check(&state).await,
            registry: registry_check(&state),
        },
    };

    (StatusCode::OK, Json(response))
}

/// GET /health/ready - Readiness check
pub async fn health_ready(State(state): State<AppState>) -> impl IntoResponse {
    let uptime = SERVER_START.elapsed().as_secs();
    let registry = registry_check(&state);
    let is_ready = registry.error.is_none();

    let response = ReadyResponse {
        status: if is_ready { "ready" } else { "not ready" }.to_string(),
        timestamp: Utc::now(),
        uptime: Some(uptime),
        reason: registry.error,
    };

    let status = if is_ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(response))
}
