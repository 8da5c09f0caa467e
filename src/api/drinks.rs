// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Drink menu handlers.
//!
//! The public menu is open to everyone; every other route takes a
//! [`RequirePermission`] extractor as its first argument, so authorization
//! completes before the path or body is looked at.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Json,
};

use crate::{
    auth::{DeleteDrinks, GetDrinksDetail, PatchDrinks, PostDrinks, RequirePermission},
    error::{ApiError, ErrorBody},
    models::{
        CreateDrinkRequest, DeleteDrinkResponse, DrinksResponse, MenuResponse,
        UpdateDrinkRequest,
    },
    state::AppState,
};

/// Non-numeric ids name no drink.
fn drink_id(path: Result<Path<u64>, PathRejection>) -> Result<u64, ApiError> {
    path.map(|Path(id)| id)
        .map_err(|_| ApiError::not_found("Drink not found"))
}

#[utoipa::path(
    get,
    path = "/drinks",
    tag = "Drinks",
    responses((status = 200, body = MenuResponse))
)]
pub async fn list_drinks(State(state): State<AppState>) -> Json<MenuResponse> {
    let store = state.store.read().await;
    Json(MenuResponse {
        success: true,
        drinks: store.list_drinks().iter().map(|drink| drink.short()).collect(),
    })
}

#[utoipa::path(
    get,
    path = "/drinks-detail",
    tag = "Drinks",
    security(("bearer_auth" = ["get:drinks-detail"])),
    responses(
        (status = 200, body = DrinksResponse),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Token lacks get:drinks-detail")
    )
)]
pub async fn list_drinks_detail(
    RequirePermission(_claims, _): RequirePermission<GetDrinksDetail>,
    State(state): State<AppState>,
) -> Json<DrinksResponse> {
    let store = state.store.read().await;
    Json(DrinksResponse::new(store.list_drinks()))
}

#[utoipa::path(
    post,
    path = "/drinks",
    request_body = CreateDrinkRequest,
    tag = "Drinks",
    security(("bearer_auth" = ["post:drinks"])),
    responses(
        (status = 200, body = DrinksResponse),
        (status = 400, body = ErrorBody),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Token lacks post:drinks"),
        (status = 422, description = "Title already taken", body = ErrorBody)
    )
)]
pub async fn create_drink(
    RequirePermission(claims, _): RequirePermission<PostDrinks>,
    State(state): State<AppState>,
    payload: Result<Json<CreateDrinkRequest>, JsonRejection>,
) -> Result<Json<DrinksResponse>, ApiError> {
    let Json(request) = payload?;
    let mut store = state.store.write().await;
    let drink = store.create_drink(request)?;
    tracing::info!(drink_id = drink.id, title = %drink.title, sub = ?claims.sub, "Drink created");
    Ok(Json(DrinksResponse::new(vec![drink])))
}

#[utoipa::path(
    patch,
    path = "/drinks/{drink_id}",
    params(
        ("drink_id" = u64, Path, description = "Identifier of the drink to edit")
    ),
    request_body = UpdateDrinkRequest,
    tag = "Drinks",
    security(("bearer_auth" = ["patch:drinks"])),
    responses(
        (status = 200, body = DrinksResponse),
        (status = 400, body = ErrorBody),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Token lacks patch:drinks"),
        (status = 404, body = ErrorBody),
        (status = 422, description = "Title already taken", body = ErrorBody)
    )
)]
pub async fn update_drink(
    RequirePermission(claims, _): RequirePermission<PatchDrinks>,
    path: Result<Path<u64>, PathRejection>,
    State(state): State<AppState>,
    payload: Result<Json<UpdateDrinkRequest>, JsonRejection>,
) -> Result<Json<DrinksResponse>, ApiError> {
    let drink_id = drink_id(path)?;
    let Json(request) = payload?;
    let mut store = state.store.write().await;
    let drink = store.update_drink(drink_id, request)?;
    tracing::info!(drink_id, sub = ?claims.sub, "Drink updated");
    Ok(Json(DrinksResponse::new(vec![drink])))
}

#[utoipa::path(
    delete,
    path = "/drinks/{drink_id}",
    params(
        ("drink_id" = u64, Path, description = "Identifier of the drink to delete")
    ),
    tag = "Drinks",
    security(("bearer_auth" = ["delete:drinks"])),
    responses(
        (status = 200, body = DeleteDrinkResponse),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Token lacks delete:drinks"),
        (status = 404, body = ErrorBody)
    )
)]
pub async fn delete_drink(
    RequirePermission(claims, _): RequirePermission<DeleteDrinks>,
    path: Result<Path<u64>, PathRejection>,
    State(state): State<AppState>,
) -> Result<Json<DeleteDrinkResponse>, ApiError> {
    let drink_id = drink_id(path)?;
    let mut store = state.store.write().await;
    store.delete_drink(drink_id)?;
    tracing::info!(drink_id, sub = ?claims.sub, "Drink deleted");
    Ok(Json(DeleteDrinkResponse {
        success: true,
        delete: drink_id,
    }))
}
