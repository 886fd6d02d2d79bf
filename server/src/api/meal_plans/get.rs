use crate::api::{error_response, ErrorResponse};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use weeknight_core::MealPlan;

#[utoipa::path(
    get,
    path = "/api/mealplans/{id}",
    tag = "meal_plans",
    params(
        ("id" = Uuid, Path, description = "Meal plan ID")
    ),
    responses(
        (status = 200, description = "Meal plan details", body = MealPlan),
        (status = 404, description = "Meal plan not found", body = ErrorResponse)
    )
)]
pub async fn get_meal_plan(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match state.store.get_plan(id).await {
        Some(plan) => (StatusCode::OK, Json(plan)).into_response(),
        None => error_response(StatusCode::NOT_FOUND, "Meal plan not found"),
    }
}
