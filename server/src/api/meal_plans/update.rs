use crate::api::{error_response, store_error_response, ErrorResponse};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use weeknight_core::{MealPlan, MealPlanEntry, PlannerConstraints};

/// Partial update: absent fields keep their saved values.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateMealPlanRequest {
    pub dinners_per_week: Option<u8>,
    pub constraints: Option<PlannerConstraints>,
    pub entries: Option<Vec<MealPlanEntry>>,
}

#[utoipa::path(
    patch,
    path = "/api/mealplans/{id}",
    tag = "meal_plans",
    params(
        ("id" = Uuid, Path, description = "Meal plan ID")
    ),
    request_body = UpdateMealPlanRequest,
    responses(
        (status = 200, description = "Updated meal plan", body = MealPlan),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Meal plan not found", body = ErrorResponse)
    )
)]
pub async fn update_meal_plan(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateMealPlanRequest>,
) -> impl IntoResponse {
    let Some(mut plan) = state.store.get_plan(id).await else {
        return error_response(StatusCode::NOT_FOUND, "Meal plan not found");
    };

    if let Some(dinners) = request.dinners_per_week {
        if !(4..=5).contains(&dinners) {
            return error_response(StatusCode::BAD_REQUEST, "dinners_per_week must be 4 or 5");
        }
        plan.dinners_per_week = dinners;
    }
    if let Some(constraints) = request.constraints {
        plan.constraints = constraints;
    }
    if let Some(entries) = request.entries {
        plan.entries = entries;
    }
    if plan.entries.len() != usize::from(plan.dinners_per_week) {
        return error_response(
            StatusCode::BAD_REQUEST,
            "entries must contain exactly one entry per dinner",
        );
    }
    plan.updated_at = Utc::now();

    match state.store.update_plan(plan.clone()).await {
        Ok(()) => (StatusCode::OK, Json(plan)).into_response(),
        Err(e) => store_error_response(e),
    }
}
