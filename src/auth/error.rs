// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authorization errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Authorization error type.
///
/// Each variant is one terminal rejection of the auth pipeline. Variants are
/// never collapsed: the code and status a client sees identify the stage
/// that refused the request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// No authorization header present
    #[error("Authorization header is expected")]
    MissingHeader,
    /// Header is not of the form `Bearer <token>`
    #[error("Authorization header must be in the format 'Bearer <token>'")]
    MalformedHeader,
    /// Token header is unparseable or carries no key identifier
    #[error("Unable to parse authentication token")]
    MalformedToken,
    /// No usable key in the key set matches the token's `kid`
    #[error("Unable to find the appropriate signing key")]
    UnknownSigningKey,
    /// Signature verification failed
    #[error("Token signature is invalid")]
    BadSignature,
    /// Token has expired
    #[error("Token expired")]
    TokenExpired,
    /// Audience or issuer mismatch
    #[error("The claims are invalid, check the audience and issuer")]
    InvalidClaims,
    /// Token carries no `permissions` claim
    #[error("Permissions not included in token")]
    PermissionsClaimMissing,
    /// Required permission absent from the token
    #[error("Permission not granted for this operation")]
    PermissionDenied,
    /// Key discovery endpoint unreachable or returned garbage
    #[error("Signing keys are unavailable: {0}")]
    KeySetUnavailable(String),
}

#[derive(Serialize)]
struct AuthErrorBody {
    success: bool,
    error: u16,
    code: &'static str,
    description: String,
}

impl AuthError {
    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::MissingHeader => "authorization_header_missing",
            AuthError::MalformedHeader => "invalid_header",
            AuthError::MalformedToken => "malformed_token",
            AuthError::UnknownSigningKey => "unknown_signing_key",
            AuthError::BadSignature => "invalid_signature",
            AuthError::TokenExpired => "token_expired",
            AuthError::InvalidClaims => "invalid_claims",
            AuthError::PermissionsClaimMissing => "permissions_claim_missing",
            AuthError::PermissionDenied => "permission_denied",
            AuthError::KeySetUnavailable(_) => "key_set_unavailable",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingHeader
            | AuthError::MalformedHeader
            | AuthError::MalformedToken
            | AuthError::BadSignature
            | AuthError::TokenExpired
            | AuthError::InvalidClaims => StatusCode::UNAUTHORIZED,
            AuthError::UnknownSigningKey | AuthError::PermissionsClaimMissing => {
                StatusCode::BAD_REQUEST
            }
            AuthError::PermissionDenied => StatusCode::FORBIDDEN,
            AuthError::KeySetUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl AuthError {
    /// Text sent to the client. Key fetch failures carry transport detail
    /// (the JWKS URL among it) that stays in the logs.
    fn public_description(&self) -> String {
        match self {
            AuthError::KeySetUnavailable(detail) => {
                tracing::warn!(detail = %detail, "Signing keys unavailable");
                "Signing keys are unavailable".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(AuthErrorBody {
            success: false,
            error: status.as_u16(),
            code: self.error_code(),
            description: self.public_description(),
        });
        (status, body).into_response()
    }
}
