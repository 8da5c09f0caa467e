// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    body::Body,
    http::Request,
    routing::{get, patch},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    error::{ApiError, ErrorBody},
    models::{
        CreateDrinkRequest, DeleteDrinkResponse, Drink, DrinksResponse, Ingredient, MenuResponse,
        RecipeInput, ShortDrink, ShortIngredient, UpdateDrinkRequest,
    },
    state::AppState,
};

pub mod drinks;
pub mod health;

pub fn router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/drinks", get(drinks::list_drinks).post(drinks::create_drink))
        .route("/drinks-detail", get(drinks::list_drinks_detail))
        .route(
            "/drinks/{drink_id}",
            patch(drinks::update_drink).delete(drinks::delete_drink),
        )
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(state);

    Router::new()
        .merge(routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .fallback(not_found)
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
                let request_id = req
                    .headers()
                    .get("x-request-id")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("n/a");
                tracing::info_span!(
                    "http_request",
                    method = %req.method(),
                    uri = %req.uri().path(),
                    request_id = %request_id,
                )
            }),
        )
        // Generate x-request-id if missing, then echo it on the response.
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

async fn not_found() -> ApiError {
    ApiError::not_found("resource not found")
}

async fn method_not_allowed() -> ApiError {
    ApiError::method_not_allowed()
}

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        drinks::list_drinks,
        drinks::list_drinks_detail,
        drinks::create_drink,
        drinks::update_drink,
        drinks::delete_drink,
        health::liveness,
        health::readiness
    ),
    components(
        schemas(
            Drink,
            Ingredient,
            ShortDrink,
            ShortIngredient,
            RecipeInput,
            CreateDrinkRequest,
            UpdateDrinkRequest,
            MenuResponse,
            DrinksResponse,
            DeleteDrinkResponse,
            ErrorBody,
            health::HealthResponse,
            health::ReadyResponse,
            health::HealthChecks
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Drinks", description = "Drink menu and recipe management"),
        (name = "Health", description = "Liveness and readiness probes")
    )
)]
struct ApiDoc;
