// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::error::Error;

use coffee_shop_api::{
    api::router,
    auth::{AuthGate, JwksCache, TokenVerifier},
    config::Settings,
    state::AppState,
    store::InMemoryStore,
    telemetry::init_tracing,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let settings = Settings::from_env()?;
    init_tracing(settings.log_format);

    let auth = &settings.auth;
    let keys = JwksCache::new(auth.jwks_url(), auth.jwks_timeout)?.with_cache_ttl(auth.jwks_cache_ttl);
    let verifier = TokenVerifier::new(auth.issuer(), auth.audience.clone())
        .with_algorithms(auth.algorithms.clone())
        .with_leeway(auth.leeway_secs);
    tracing::info!(
        issuer = auth.issuer(),
        audience = %auth.audience,
        jwks_url = ?keys.jwks_url(),
        "Token verification configured"
    );

    let store = if settings.seed_drinks {
        InMemoryStore::seeded()
    } else {
        InMemoryStore::new()
    };

    let state = AppState::new(store, AuthGate::new(keys, verifier));
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(settings.bind_addr).await?;
    tracing::info!(addr = %settings.bind_addr, "Coffee Shop API listening (docs at /docs)");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down server");
}
