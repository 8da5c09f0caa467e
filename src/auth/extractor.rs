// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Bearer token extraction and the Axum extractor for protected routes.
//!
//! Use `RequirePermission` in handlers to require a permission scope:
//!
//! ```rust,ignore
//! async fn delete_drink(
//!     RequirePermission(claims, _): RequirePermission<DeleteDrinks>,
//!     Path(id): Path<u64>,
//! ) -> impl IntoResponse {
//!     // claims is the verified token payload
//! }
//! ```

use std::marker::PhantomData;

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};

use super::claims::Claims;
use super::error::AuthError;
use super::permissions::Permission;
use crate::state::AppState;

/// Pull the token out of an `Authorization: Bearer <token>` header.
///
/// The scheme is matched case-insensitively. The token is returned verbatim;
/// nothing is decoded here.
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingHeader)?
        .to_str()
        .map_err(|_| AuthError::MalformedHeader)?;

    let mut parts = auth_header.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case("bearer") => Ok(token),
        _ => Err(AuthError::MalformedHeader),
    }
}

/// Extractor that requires a verified token granting `P`.
///
/// Rejects with the [`AuthError`] of the first failing stage, unchanged.
pub struct RequirePermission<P: Permission>(pub Claims, pub PhantomData<P>);

impl<P: Permission> FromRequestParts<AppState> for RequirePermission<P> {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        match state.auth.authorize(&parts.headers, P::SCOPE).await {
            Ok(claims) => Ok(RequirePermission(claims, PhantomData)),
            Err(err) => {
                tracing::warn!(
                    code = err.error_code(),
                    permission = P::SCOPE,
                    path = %parts.uri.path(),
                    "Request rejected by auth gate"
                );
                Err(err)
            }
        }
    }
}
