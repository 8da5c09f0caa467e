// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Permission scopes for authorization.

use super::claims::Claims;
use super::error::AuthError;

/// A permission scope a route requires.
///
/// Implemented by zero-sized marker types so each handler names its scope in
/// its signature:
///
/// ```rust,ignore
/// async fn create_drink(RequirePermission(claims, _): RequirePermission<PostDrinks>) { .. }
/// ```
pub trait Permission: Send + Sync + 'static {
    /// The permission string as configured in the Auth0 API's RBAC settings.
    const SCOPE: &'static str;
}

macro_rules! permission {
    ($(#[$meta:meta])* $name:ident => $scope:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy)]
        pub struct $name;

        impl Permission for $name {
            const SCOPE: &'static str = $scope;
        }
    };
}

permission! {
    /// Read the full recipe of every drink.
    GetDrinksDetail => "get:drinks-detail"
}
permission! {
    /// Add a drink to the menu.
    PostDrinks => "post:drinks"
}
permission! {
    /// Edit an existing drink.
    PatchDrinks => "patch:drinks"
}
permission! {
    /// Remove a drink from the menu.
    DeleteDrinks => "delete:drinks"
}

/// Check that `claims` grant `required`.
pub fn check_permission(required: &str, claims: &Claims) -> Result<(), AuthError> {
    let granted = claims
        .permissions
        .as_deref()
        .ok_or(AuthError::PermissionsClaimMissing)?;

    if granted.iter().any(|permission| permission == required) {
        Ok(())
    } else {
        Err(AuthError::PermissionDenied)
    }
}
