// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authorization Module
//!
//! This module gates the drink API behind Auth0 access tokens carrying RBAC
//! permission scopes.
//!
//! ## Auth Flow
//!
//! 1. The frontend logs the barista or manager in with Auth0
//! 2. The frontend sends `Authorization: Bearer <access token>`
//! 3. The server:
//!    - Extracts the token from the header (`extractor`)
//!    - Looks up the token's `kid` in the Auth0 JWKS (`jwks`)
//!    - Verifies signature, expiry, issuer, audience (`verifier`)
//!    - Checks the route's permission scope (`permissions`)
//!    - Hands the decoded claims to the handler (`gate`)
//!
//! ## Security
//!
//! - A token whose `kid` is not in the key set is rejected, never decoded
//!   without verification
//! - Only RSA signature algorithms are accepted
//! - The JWKS fetch is bounded by a timeout and cached with a TTL

pub mod claims;
pub mod error;
pub mod extractor;
pub mod gate;
pub mod jwks;
pub mod permissions;
pub mod verifier;

#[cfg(test)]
pub(crate) mod test_support;

pub use claims::{Audience, Claims};
pub use error::AuthError;
pub use extractor::{extract_bearer_token, RequirePermission};
pub use gate::{requires_auth, AuthGate};
pub use jwks::{JwksCache, KeySet, SigningKey};
pub use permissions::{check_permission, DeleteDrinks, GetDrinksDetail, PatchDrinks, Permission, PostDrinks};
pub use verifier::TokenVerifier;
