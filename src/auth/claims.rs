// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Decoded JWT claims.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The `aud` claim, which Auth0 emits either as a single string or as a list
/// (the latter when the token also targets the userinfo endpoint).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Audience {
    Single(String),
    Many(Vec<String>),
}

impl Audience {
    pub fn contains(&self, audience: &str) -> bool {
        match self {
            Audience::Single(aud) => aud == audience,
            Audience::Many(auds) => auds.iter().any(|aud| aud == audience),
        }
    }
}

/// Claims decoded from a verified access token.
///
/// Only the registered claims the pipeline relies on are typed; everything
/// else the issuer put in the token is kept in [`Claims::extra`] so the
/// protected operation receives the full payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Issuer (`https://<auth0-domain>/`)
    pub iss: String,

    /// Subject (Auth0 user or client id)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Audience. Optional here so a token lacking it is reported as an
    /// invalid claim set rather than an undecodable payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<Audience>,

    /// Expiration timestamp
    pub exp: i64,

    /// Issued at timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// RBAC permissions granted by Auth0. `None` means the claim is absent,
    /// which is not the same as an empty grant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,

    /// Remaining claims, verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Claims {
    /// Whether the token grants `permission`. Absent and empty grants both
    /// answer `false`; use [`super::permissions::check_permission`] when the
    /// distinction matters.
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions
            .as_deref()
            .is_some_and(|granted| granted.iter().any(|p| p == permission))
    }
}
