use crate::api::{error_response, store_error_response, ErrorResponse};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use weeknight_core::MealPlan;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LockEntriesRequest {
    /// Entry dates to change.
    pub dates: Vec<NaiveDate>,
    /// true to lock, false to unlock.
    pub locked: bool,
}

#[utoipa::path(
    post,
    path = "/api/mealplans/{id}/lock",
    tag = "meal_plans",
    params(
        ("id" = Uuid, Path, description = "Meal plan ID")
    ),
    request_body = LockEntriesRequest,
    responses(
        (status = 200, description = "Updated meal plan", body = MealPlan),
        (status = 400, description = "A date is not in the plan", body = ErrorResponse),
        (status = 404, description = "Meal plan not found", body = ErrorResponse)
    )
)]
pub async fn lock_entries(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<LockEntriesRequest>,
) -> impl IntoResponse {
    let Some(mut plan) = state.store.get_plan(id).await else {
        return error_response(StatusCode::NOT_FOUND, "Meal plan not found");
    };

    for date in &request.dates {
        match plan.entries.iter_mut().find(|e| e.date == *date) {
            Some(entry) => entry.locked = request.locked,
            None => {
                return error_response(
                    StatusCode::BAD_REQUEST,
                    format!("No entry for date {date}"),
                )
            }
        }
    }
    plan.updated_at = Utc::now();

    match state.store.update_plan(plan.clone()).await {
        Ok(()) => (StatusCode::OK, Json(plan)).into_response(),
        Err(e) => store_error_response(e),
    }
}
