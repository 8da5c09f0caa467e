// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Configuration is loaded from the environment once at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `AUTH0_DOMAIN` | Auth0 tenant domain; issuer is `https://<domain>/` | Required |
//! | `API_AUDIENCE` | Expected JWT audience claim | Required |
//! | `AUTH_ALGORITHMS` | Comma-separated RSA algorithms to accept | `RS256` |
//! | `AUTH_LEEWAY_SECS` | Clock skew tolerance for `exp`/`nbf` | `0` |
//! | `JWKS_CACHE_TTL_SECS` | How long a fetched key set is reused | `300` |
//! | `JWKS_TIMEOUT_SECS` | Timeout for the JWKS request | `10` |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `SEED_DRINKS` | Start with the sample drink on the menu | `true` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use jsonwebtoken::Algorithm;
use url::Url;

use crate::auth::jwks::{DEFAULT_CACHE_TTL, DEFAULT_FETCH_TIMEOUT};

pub const AUTH0_DOMAIN_ENV: &str = "AUTH0_DOMAIN";
pub const API_AUDIENCE_ENV: &str = "API_AUDIENCE";
pub const AUTH_ALGORITHMS_ENV: &str = "AUTH_ALGORITHMS";
pub const AUTH_LEEWAY_ENV: &str = "AUTH_LEEWAY_SECS";
pub const JWKS_CACHE_TTL_ENV: &str = "JWKS_CACHE_TTL_SECS";
pub const JWKS_TIMEOUT_ENV: &str = "JWKS_TIMEOUT_SECS";
pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const SEED_DRINKS_ENV: &str = "SEED_DRINKS";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

/// Default tracing filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

/// Configuration errors, reported once at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{var} has an invalid value {value:?}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
    #[error("algorithm {0:?} is not an RSA signature algorithm")]
    UnsupportedAlgorithm(String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Settings for the token verifier and key set cache.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthSettings {
    /// `https://<domain>/`
    pub issuer: Url,
    pub audience: String,
    pub algorithms: Vec<Algorithm>,
    pub leeway_secs: u64,
    pub jwks_cache_ttl: Duration,
    pub jwks_timeout: Duration,
}

impl AuthSettings {
    /// Issuer claim value, with Auth0's trailing slash.
    pub fn issuer(&self) -> &str {
        self.issuer.as_str()
    }

    /// `https://<domain>/.well-known/jwks.json`
    pub fn jwks_url(&self) -> String {
        // Joining a relative path onto an https base URL cannot fail.
        self.issuer
            .join(".well-known/jwks.json")
            .map(String::from)
            .unwrap_or_else(|_| format!("{}.well-known/jwks.json", self.issuer))
    }
}

/// Full service configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub bind_addr: SocketAddr,
    pub auth: AuthSettings,
    pub seed_drinks: bool,
    pub log_format: LogFormat,
}

impl Settings {
    /// Load settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load settings through `lookup`, which returns a variable's value if set.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let domain = required(&lookup, AUTH0_DOMAIN_ENV)?;
        let audience = required(&lookup, API_AUDIENCE_ENV)?;

        let auth = AuthSettings {
            issuer: issuer_url(&domain)?,
            audience,
            algorithms: parse_algorithms(lookup(AUTH_ALGORITHMS_ENV).as_deref().unwrap_or("RS256"))?,
            leeway_secs: parse_or(&lookup, AUTH_LEEWAY_ENV, 0)?,
            jwks_cache_ttl: parse_or(&lookup, JWKS_CACHE_TTL_ENV, DEFAULT_CACHE_TTL.as_secs())
                .map(Duration::from_secs)?,
            jwks_timeout: parse_or(&lookup, JWKS_TIMEOUT_ENV, DEFAULT_FETCH_TIMEOUT.as_secs())
                .map(Duration::from_secs)?,
        };

        let host: IpAddr = parse_or(&lookup, HOST_ENV, IpAddr::from([0, 0, 0, 0]))?;
        let port: u16 = parse_or(&lookup, PORT_ENV, 8080)?;

        let log_format = match lookup(LOG_FORMAT_ENV).as_deref() {
            None | Some("pretty") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    var: LOG_FORMAT_ENV,
                    value: other.to_string(),
                    reason: "expected `json` or `pretty`".to_string(),
                })
            }
        };

        Ok(Self {
            bind_addr: SocketAddr::new(host, port),
            auth,
            seed_drinks: parse_or(&lookup, SEED_DRINKS_ENV, true)?,
            log_format,
        })
    }
}

fn required(lookup: &impl Fn(&str) -> Option<String>, var: &'static str) -> Result<String, ConfigError> {
    lookup(var)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .ok_or(ConfigError::Missing(var))
}

fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(var) {
        None => Ok(default),
        Some(value) => {
            let parsed = value.trim().parse::<T>();
            parsed.map_err(|e| ConfigError::Invalid {
                var,
                reason: e.to_string(),
                value,
            })
        }
    }
}

/// Accepts a bare domain (`tenant.us.auth0.com`) or one with an `https://`
/// prefix and trailing slash, as copied from the Auth0 dashboard.
fn issuer_url(domain: &str) -> Result<Url, ConfigError> {
    let bare = domain
        .trim_start_matches("https://")
        .trim_end_matches('/');
    let invalid = |reason: String| ConfigError::Invalid {
        var: AUTH0_DOMAIN_ENV,
        value: domain.to_string(),
        reason,
    };

    let url = Url::parse(&format!("https://{bare}/")).map_err(|e| invalid(e.to_string()))?;
    if url.path() != "/" || url.query().is_some() || !url.username().is_empty() {
        return Err(invalid("expected a bare domain".to_string()));
    }
    Ok(url)
}

fn parse_algorithms(value: &str) -> Result<Vec<Algorithm>, ConfigError> {
    let algorithms = value
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| {
            let algorithm = Algorithm::from_str(name)
                .map_err(|_| ConfigError::UnsupportedAlgorithm(name.to_string()))?;
            match algorithm {
                Algorithm::RS256
                | Algorithm::RS384
                | Algorithm::RS512
                | Algorithm::PS256
                | Algorithm::PS384
                | Algorithm::PS512 => Ok(algorithm),
                _ => Err(ConfigError::UnsupportedAlgorithm(name.to_string())),
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    if algorithms.is_empty() {
        return Err(ConfigError::Invalid {
            var: AUTH_ALGORITHMS_ENV,
            value: value.to_string(),
            reason: "no algorithms listed".to_string(),
        });
    }
    Ok(algorithms)
}
