// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Coffee Shop API - Drink menu service behind Auth0 permission scopes
//!
//! The public menu is open; reading full recipes and editing the menu
//! require an RS256 access token carrying the matching permission.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Bearer token verification against the Auth0 JWKS
//! - `config` - Environment configuration
//! - `store` - In-memory drink menu
//! - `telemetry` - Tracing subscriber setup

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod state;
pub mod store;
pub mod telemetry;
