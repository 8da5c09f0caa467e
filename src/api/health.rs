// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::state::AppState;

/// Readiness response with individual component status.
#[derive(Debug, Serialize, ToSchema)]
pub struct ReadyResponse {
    /// Overall status ("ok" or "degraded").
    pub status: String,
    /// Individual checks and their results.
    pub checks: HealthChecks,
}

/// Individual health check results.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthChecks {
    /// Whether the service process is running.
    pub service: String,
    /// Signing key set status ("ok" or "unavailable").
    pub jwks: String,
}

/// Simple health check response for liveness probes.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

/// Whether token verification keys can be served right now.
async fn check_jwks(state: &AppState) -> bool {
    let keys = state.auth.keys();
    if keys.is_cached().await {
        return true;
    }
    match keys.refresh().await {
        Ok(_) => true,
        Err(err) => {
            tracing::warn!(error = %err, "Readiness check could not load signing keys");
            false
        }
    }
}

/// Liveness probe handler.
///
/// Always returns 200 if the process is running.
/// Does not check dependencies - use readiness for that.
#[utoipa::path(
    get,
    path = "/health/live",
    tag = "Health",
    responses(
        (status = 200, description = "Service is alive", body = HealthResponse)
    )
)]
pub async fn liveness() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Readiness probe handler.
///
/// Returns 503 while the signing key set cannot be loaded, since no
/// protected route can succeed until it is.
#[utoipa::path(
    get,
    path = "/health/ready",
    tag = "Health",
    responses(
        (status = 200, description = "Service is ready", body = ReadyResponse),
        (status = 503, description = "Service is not ready", body = ReadyResponse)
    )
)]
pub async fn readiness(State(state): State<AppState>) -> (StatusCode, Json<ReadyResponse>) {
    let jwks_ok = check_jwks(&state).await;

    let response = ReadyResponse {
        status: if jwks_ok { "ok" } else { "degraded" }.to_string(),
        checks: HealthChecks {
            service: "ok".to_string(),
            jwks: if jwks_ok { "ok" } else { "unavailable" }.to_string(),
        },
    };

    let status = if jwks_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::test_support::verifier;
    use crate::auth::{AuthGate, JwksCache};
    use crate::store::InMemoryStore;
    use std::time::Duration;

    #[tokio::test]
    async fn liveness_is_always_ok() {
        let Json(response) = liveness().await;
        assert_eq!(response.status, "ok");
    }

    #[tokio::test]
    async fn ready_with_pinned_keys() {
        let (status, Json(response)) = readiness(State(AppState::for_tests())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(response.status, "ok");
        assert_eq!(response.checks.jwks, "ok");
    }

    #[tokio::test]
    async fn degraded_when_jwks_unreachable() {
        // Bind then drop a listener so the port refuses connections.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let cache = JwksCache::new(
            format!("http://{addr}/.well-known/jwks.json"),
            Duration::from_secs(1),
        )
        .unwrap();
        let state = AppState::new(InMemoryStore::new(), AuthGate::new(cache, verifier()));

        let (status, Json(response)) = readiness(State(state)).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(response.status, "degraded");
        assert_eq!(response.checks.jwks, "unavailable");
    }
}
