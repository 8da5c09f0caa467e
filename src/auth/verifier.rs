// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Token verification against the issuer's key set.
//!
//! ## Order of checks
//!
//! 1. Unverified header must parse and name a `kid`
//! 2. The key set must contain a usable signing key with that `kid`
//! 3. Signature, restricted to the configured RSA algorithms
//! 4. `exp`, then `iss` / `aud`
//!
//! A token whose key cannot be found is always rejected; there is no
//! fallback that decodes without a key.

use jsonwebtoken::errors::{Error as JwtError, ErrorKind};
use jsonwebtoken::{decode, decode_header, Algorithm, Validation};
use serde_json::{Map, Value};

use super::claims::Claims;
use super::error::AuthError;
use super::jwks::KeySet;

/// Claims that must be present for a token to be considered at all.
const REQUIRED_CLAIMS: [&str; 3] = ["exp", "aud", "iss"];

/// Verifies bearer tokens issued by one issuer for one audience.
#[derive(Debug, Clone)]
pub struct TokenVerifier {
    issuer: String,
    audience: String,
    algorithms: Vec<Algorithm>,
    leeway: u64,
}

impl TokenVerifier {
    /// Verifier accepting RS256 with no clock-skew leeway.
    pub fn new(issuer: impl Into<String>, audience: impl Into<String>) -> Self {
        Self {
            issuer: issuer.into(),
            audience: audience.into(),
            algorithms: vec![Algorithm::RS256],
            leeway: 0,
        }
    }

    /// Replace the accepted algorithms. Callers are expected to pass only
    /// RSA algorithms; see [`crate::config::Settings`].
    pub fn with_algorithms(mut self, algorithms: Vec<Algorithm>) -> Self {
        self.algorithms = algorithms;
        self
    }

    /// Clock-skew tolerance in seconds for `exp` and `nbf`.
    pub fn with_leeway(mut self, leeway: u64) -> Self {
        self.leeway = leeway;
        self
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    pub fn audience(&self) -> &str {
        &self.audience
    }

    /// Verify `token` against `keys` and return its claims.
    pub fn verify(&self, token: &str, keys: &KeySet) -> Result<Claims, AuthError> {
        let header = decode_header(token).map_err(|_| AuthError::MalformedToken)?;
        let kid = header.kid.as_deref().ok_or(AuthError::MalformedToken)?;

        let key = keys.find(kid).ok_or(AuthError::UnknownSigningKey)?;
        let decoding_key = key.decoding_key().ok_or_else(|| {
            tracing::warn!(kid, key_type = %key.key_type, "Matched JWKS entry is not a usable RSA key");
            AuthError::UnknownSigningKey
        })?;

        // Decoded as a bare map first: a missing registered claim must reach
        // jsonwebtoken's claim validation instead of failing deserialization.
        let payload = decode::<Map<String, Value>>(token, &decoding_key, &self.validation())
            .map_err(classify)?
            .claims;
        serde_json::from_value(Value::Object(payload)).map_err(|_| AuthError::MalformedToken)
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.algorithms = self.algorithms.clone();
        validation.leeway = self.leeway;
        validation.validate_exp = true;
        // Expired from the `exp` second onward, not only once it has passed.
        validation.reject_tokens_expiring_in_less_than = 1;
        validation.validate_nbf = true;
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);
        validation.set_required_spec_claims(&REQUIRED_CLAIMS);
        validation
    }
}

/// Map a decode failure onto the authorization taxonomy.
fn classify(err: JwtError) -> AuthError {
    match err.kind() {
        ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        ErrorKind::InvalidIssuer
        | ErrorKind::InvalidAudience
        | ErrorKind::ImmatureSignature
        | ErrorKind::MissingRequiredClaim(_) => AuthError::InvalidClaims,
        ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => AuthError::BadSignature,
        ErrorKind::InvalidToken | ErrorKind::Base64(_) | ErrorKind::Json(_) | ErrorKind::Utf8(_) => {
            AuthError::MalformedToken
        }
        // Key material and crypto backend failures. Still a rejection.
        other => {
            tracing::warn!(kind = ?other, "Token rejected by signature verification");
            AuthError::BadSignature
        }
    }
}
