use crate::api::meal_plans::resolve_recipes;
use crate::api::{error_response, store_error_response, ErrorResponse};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use weeknight_core::{format_shopping_list, StapleProvider};

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct IngredientsResponse {
    /// Consolidated shopping list, one item per line.
    pub ingredients: String,
}

#[utoipa::path(
    get,
    path = "/api/mealplans/{id}/export/ingredients",
    tag = "meal_plans",
    params(
        ("id" = Uuid, Path, description = "Meal plan ID")
    ),
    responses(
        (status = 200, description = "Consolidated shopping list", body = IngredientsResponse),
        (status = 404, description = "Meal plan not found", body = ErrorResponse)
    )
)]
pub async fn export_ingredients(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let Some(plan) = state.store.get_plan(id).await else {
        return error_response(StatusCode::NOT_FOUND, "Meal plan not found");
    };
    let (_, recipes) = match resolve_recipes(&state.store, &plan).await {
        Ok(resolved) => resolved,
        Err(e) => return store_error_response(e),
    };

    let items = state.consolidator.consolidate(&recipes).await;
    Json(IngredientsResponse {
        ingredients: format_shopping_list(&items),
    })
    .into_response()
}

#[utoipa::path(
    get,
    path = "/api/mealplans/{id}/export/ingredients/with-staples",
    tag = "meal_plans",
    params(
        ("id" = Uuid, Path, description = "Meal plan ID")
    ),
    responses(
        (status = 200, description = "Consolidated shopping list plus staple groceries", body = IngredientsResponse),
        (status = 404, description = "Meal plan not found", body = ErrorResponse)
    )
)]
pub async fn export_ingredients_with_staples(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let Some(plan) = state.store.get_plan(id).await else {
        return error_response(StatusCode::NOT_FOUND, "Meal plan not found");
    };
    let (_, recipes) = match resolve_recipes(&state.store, &plan).await {
        Ok(resolved) => resolved,
        Err(e) => return store_error_response(e),
    };
    let staples = match state.store.staple_groceries().await {
        Ok(staples) => staples,
        Err(e) => return store_error_response(e),
    };

    let items = state
        .consolidator
        .consolidate_with_staples(&recipes, &staples)
        .await;
    Json(IngredientsResponse {
        ingredients: format_shopping_list(&items),
    })
    .into_response()
}
