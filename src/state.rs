// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::auth::AuthGate;
use crate::store::InMemoryStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<InMemoryStore>>,
    pub auth: Arc<AuthGate>,
}

impl AppState {
    pub fn new(store: InMemoryStore, auth: AuthGate) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            auth: Arc::new(auth),
        }
    }

    /// Seeded store behind a gate that trusts the embedded test keys.
    #[cfg(test)]
    pub fn for_tests() -> Self {
        use crate::auth::test_support::{key_set, verifier};
        use crate::auth::JwksCache;

        Self::new(
            InMemoryStore::seeded(),
            AuthGate::new(JwksCache::pinned(key_set()), verifier()),
        )
    }
}
