// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! JWKS (JSON Web Key Set) fetching and caching.
//!
//! ## Concurrency
//!
//! - Readers take a cheap `Arc<KeySet>` clone out of the cache
//! - A refresh builds a brand new entry and swaps it in under the write lock,
//!   so a set handed to an in-flight verification is never mutated
//! - The HTTP client carries a bounded timeout; a slow identity provider
//!   surfaces as [`AuthError::KeySetUnavailable`]

use std::sync::Arc;
use std::time::{Duration, Instant};

use jsonwebtoken::DecodingKey;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use super::error::AuthError;

/// Default JWKS cache TTL (5 minutes).
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);

/// Default timeout for the JWKS request.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Minimum age of a cached set before an unknown `kid` may force a refetch.
pub const DEFAULT_MIN_REFRESH_INTERVAL: Duration = Duration::from_secs(10);

/// A public signing key published by the issuer.
///
/// Members the service does not use (`x5c`, `x5t`, `alg`, ...) are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigningKey {
    #[serde(rename = "kid", default, skip_serializing_if = "Option::is_none")]
    pub key_id: Option<String>,
    #[serde(rename = "kty")]
    pub key_type: String,
    #[serde(rename = "use", default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<String>,
    #[serde(rename = "n", default, skip_serializing_if = "Option::is_none")]
    pub modulus: Option<String>,
    #[serde(rename = "e", default, skip_serializing_if = "Option::is_none")]
    pub exponent: Option<String>,
}

impl SigningKey {
    /// Whether the key may be used to verify signatures. Keys without a `use`
    /// member are accepted, as RFC 7517 makes it optional.
    pub fn is_signing_key(&self) -> bool {
        self.usage.as_deref().is_none_or(|usage| usage == "sig")
    }

    /// Build an RSA verification key, or `None` if this is not a usable RSA key.
    pub fn decoding_key(&self) -> Option<DecodingKey> {
        if self.key_type != "RSA" {
            return None;
        }
        let (n, e) = (self.modulus.as_deref()?, self.exponent.as_deref()?);
        DecodingKey::from_rsa_components(n, e).ok()
    }
}

/// The issuer's published key set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeySet {
    pub keys: Vec<SigningKey>,
}

impl KeySet {
    /// Find the signing key with the given key ID. First match wins.
    pub fn find(&self, kid: &str) -> Option<&SigningKey> {
        self.keys
            .iter()
            .filter(|key| key.is_signing_key())
            .find(|key| key.key_id.as_deref() == Some(kid))
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// JWKS cache entry.
struct CacheEntry {
    keys: Arc<KeySet>,
    fetched_at: Instant,
}

enum KeySource {
    /// Keys fetched from the issuer's discovery endpoint.
    Remote {
        jwks_url: String,
        client: reqwest::Client,
    },
    /// Keys supplied up front; never refetched.
    Pinned,
}

/// JWKS cache.
///
/// Owned by the auth gate and shared by reference; there is no process-wide
/// key cache.
pub struct JwksCache {
    source: KeySource,
    /// Cache TTL
    cache_ttl: Duration,
    /// Rate limit for refetches triggered by unknown key IDs
    min_refresh_interval: Duration,
    /// Cached key set
    cache: RwLock<Option<CacheEntry>>,
}

impl JwksCache {
    /// Create a cache backed by the JWKS endpoint.
    ///
    /// # Arguments
    /// - `jwks_url`: e.g. `https://your-tenant.us.auth0.com/.well-known/jwks.json`
    /// - `timeout`: upper bound for one fetch
    pub fn new(jwks_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            source: KeySource::Remote {
                jwks_url: jwks_url.into(),
                client,
            },
            cache_ttl: DEFAULT_CACHE_TTL,
            min_refresh_interval: DEFAULT_MIN_REFRESH_INTERVAL,
            cache: RwLock::new(None),
        })
    }

    /// Create a cache that always serves `keys`.
    pub fn pinned(keys: KeySet) -> Self {
        Self {
            source: KeySource::Pinned,
            cache_ttl: Duration::MAX,
            min_refresh_interval: Duration::MAX,
            cache: RwLock::new(Some(CacheEntry {
                keys: Arc::new(keys),
                fetched_at: Instant::now(),
            })),
        }
    }

    /// Create with custom cache TTL.
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        if matches!(self.source, KeySource::Remote { .. }) {
            self.cache_ttl = ttl;
        }
        self
    }

    /// Set how old a cached set must be before an unknown key ID may trigger
    /// a refetch.
    pub fn with_min_refresh_interval(mut self, interval: Duration) -> Self {
        self.min_refresh_interval = interval;
        self
    }

    /// Get the JWKS URL, if the keys come from one.
    pub fn jwks_url(&self) -> Option<&str> {
        match &self.source {
            KeySource::Remote { jwks_url, .. } => Some(jwks_url),
            KeySource::Pinned => None,
        }
    }

    /// Current key set, fetched if the cache is empty or stale.
    pub async fn key_set(&self) -> Result<Arc<KeySet>, AuthError> {
        {
            let cache = self.cache.read().await;
            if let Some(entry) = &*cache {
                if entry.fetched_at.elapsed() < self.cache_ttl {
                    return Ok(Arc::clone(&entry.keys));
                }
            }
        }

        self.refresh().await
    }

    /// Force refresh the cache and return the new set.
    ///
    /// Pinned caches return their keys unchanged.
    pub async fn refresh(&self) -> Result<Arc<KeySet>, AuthError> {
        let KeySource::Remote { jwks_url, client } = &self.source else {
            return self.cached().await.ok_or_else(|| {
                AuthError::KeySetUnavailable("no pinned key set".to_string())
            });
        };

        let keys = Arc::new(fetch_keys(client, jwks_url).await?);
        let mut cache = self.cache.write().await;
        *cache = Some(CacheEntry {
            keys: Arc::clone(&keys),
            fetched_at: Instant::now(),
        });
        Ok(keys)
    }

    /// Refetch after a token named a key the cached set does not contain.
    ///
    /// Returns `None` when a refetch is not allowed: pinned keys, or a cached
    /// set younger than the minimum refresh interval. This bounds how often
    /// forged `kid` values can make the service call the identity provider.
    pub async fn refresh_for_unknown_key(&self) -> Result<Option<Arc<KeySet>>, AuthError> {
        if matches!(self.source, KeySource::Pinned) {
            return Ok(None);
        }
        {
            let cache = self.cache.read().await;
            if let Some(entry) = &*cache {
                if entry.fetched_at.elapsed() < self.min_refresh_interval {
                    return Ok(None);
                }
            }
        }

        tracing::info!("Signing key not in cached key set, refreshing JWKS");
        self.refresh().await.map(Some)
    }

    /// Check if the key set is currently cached and valid.
    pub async fn is_cached(&self) -> bool {
        let cache = self.cache.read().await;
        if let Some(entry) = &*cache {
            entry.fetched_at.elapsed() < self.cache_ttl
        } else {
            false
        }
    }

    async fn cached(&self) -> Option<Arc<KeySet>> {
        let cache = self.cache.read().await;
        cache.as_ref().map(|entry| Arc::clone(&entry.keys))
    }
}

/// Fetch the key set from the discovery endpoint.
pub async fn fetch_keys(client: &reqwest::Client, jwks_url: &str) -> Result<KeySet, AuthError> {
    tracing::debug!(url = %jwks_url, "Fetching JWKS");

    let response = client
        .get(jwks_url)
        .send()
        .await
        .map_err(|e| AuthError::KeySetUnavailable(e.to_string()))?;

    if !response.status().is_success() {
        return Err(AuthError::KeySetUnavailable(format!(
            "HTTP {} from JWKS endpoint",
            response.status()
        )));
    }

    let keys: KeySet = response
        .json()
        .await
        .map_err(|e| AuthError::KeySetUnavailable(e.to_string()))?;

    tracing::debug!(count = keys.keys.len(), "Fetched JWKS");
    Ok(keys)
}
