use crate::api::{error_response, store_error_response, ErrorResponse};
use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use weeknight_core::{MealPlan, MealPlanEntry, PlannerConstraints};

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateMealPlanRequest {
    pub week_start_date: NaiveDate,
    pub dinners_per_week: u8,
    #[serde(default)]
    pub constraints: PlannerConstraints,
    pub entries: Vec<MealPlanEntry>,
}

#[utoipa::path(
    post,
    path = "/api/mealplans",
    tag = "meal_plans",
    request_body = CreateMealPlanRequest,
    responses(
        (status = 201, description = "Saved meal plan", body = MealPlan),
        (status = 400, description = "Invalid request", body = ErrorResponse)
    )
)]
pub async fn create_meal_plan(
    State(state): State<AppState>,
    Json(request): Json<CreateMealPlanRequest>,
) -> impl IntoResponse {
    if !(4..=5).contains(&request.dinners_per_week) {
        return error_response(StatusCode::BAD_REQUEST, "dinners_per_week must be 4 or 5");
    }
    if request.entries.len() != usize::from(request.dinners_per_week) {
        return error_response(
            StatusCode::BAD_REQUEST,
            "entries must contain exactly one entry per dinner",
        );
    }

    let now = Utc::now();
    let plan = MealPlan {
        id: Uuid::new_v4(),
        week_start_date: request.week_start_date,
        dinners_per_week: request.dinners_per_week,
        constraints: request.constraints,
        entries: request.entries,
        created_at: now,
        updated_at: now,
    };

    match state.store.save_plan(plan.clone()).await {
        Ok(()) => (StatusCode::CREATED, Json(plan)).into_response(),
        Err(e) => store_error_response(e),
    }
}
