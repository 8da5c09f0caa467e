// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! The auth gate: extractor, verifier and permission check composed into a
//! single guard that runs before a protected operation.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use axum::http::HeaderMap;

use super::claims::Claims;
use super::error::AuthError;
use super::extractor::extract_bearer_token;
use super::jwks::JwksCache;
use super::permissions::check_permission;
use super::verifier::TokenVerifier;

/// Future returned by an operation wrapped with [`requires_auth`].
pub type GuardedFuture<T> = Pin<Box<dyn Future<Output = Result<T, AuthError>> + Send>>;

/// Runs the authorization pipeline for one request.
pub struct AuthGate {
    keys: JwksCache,
    verifier: TokenVerifier,
}

impl AuthGate {
    pub fn new(keys: JwksCache, verifier: TokenVerifier) -> Self {
        Self { keys, verifier }
    }

    pub fn keys(&self) -> &JwksCache {
        &self.keys
    }

    pub fn verifier(&self) -> &TokenVerifier {
        &self.verifier
    }

    /// Authenticate the request and check that it carries `required`.
    ///
    /// Stops at the first failing stage and returns that stage's error.
    pub async fn authorize(&self, headers: &HeaderMap, required: &str) -> Result<Claims, AuthError> {
        let token = extract_bearer_token(headers)?;
        let claims = self.verify(token).await?;
        check_permission(required, &claims)?;
        Ok(claims)
    }

    /// Authorize, then invoke `operation` exactly once with the claims.
    ///
    /// `operation` is dropped without being called if authorization fails.
    pub async fn guard<F, Fut, T>(
        &self,
        headers: &HeaderMap,
        required: &str,
        operation: F,
    ) -> Result<T, AuthError>
    where
        F: FnOnce(Claims) -> Fut,
        Fut: Future<Output = T>,
    {
        let claims = self.authorize(headers, required).await?;
        Ok(operation(claims).await)
    }

    async fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let keys = self.keys.key_set().await?;
        match self.verifier.verify(token, &keys) {
            Err(AuthError::UnknownSigningKey) => {
                // The issuer may have rotated keys since the set was cached.
                let Some(fresh) = self.keys.refresh_for_unknown_key().await? else {
                    return Err(AuthError::UnknownSigningKey);
                };
                self.verifier.verify(token, &fresh)
            }
            result => result,
        }
    }
}

/// Wrap `operation` so that it only runs for requests holding `permission`.
///
/// The returned callable takes the request headers plus the operation's own
/// arguments, and passes the decoded claims as the operation's first argument.
pub fn requires_auth<F, Fut, A, T>(
    gate: Arc<AuthGate>,
    permission: &'static str,
    operation: F,
) -> impl Fn(HeaderMap, A) -> GuardedFuture<T>
where
    F: Fn(Claims, A) -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = T> + Send + 'static,
    A: Send + 'static,
    T: Send + 'static,
{
    move |headers: HeaderMap, args: A| -> GuardedFuture<T> {
        let gate = Arc::clone(&gate);
        let operation = operation.clone();
        Box::pin(async move {
            let claims = gate.authorize(&headers, permission).await?;
            Ok(operation(claims, args).await)
        })
    }
}
