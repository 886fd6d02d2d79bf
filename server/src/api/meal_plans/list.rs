use crate::api::{store_error_response, ErrorResponse};
use crate::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use weeknight_core::{MealPlan, PlanStore};

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListMealPlansParams {
    /// Earliest week_start_date (inclusive), format: YYYY-MM-DD.
    pub from_date: Option<NaiveDate>,
    /// Latest week_start_date (inclusive), format: YYYY-MM-DD.
    pub to_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MealPlanListResponse {
    pub meal_plans: Vec<MealPlan>,
}

#[utoipa::path(
    get,
    path = "/api/mealplans",
    tag = "meal_plans",
    params(ListMealPlansParams),
    responses(
        (status = 200, description = "Meal plans in the date range, oldest first", body = MealPlanListResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn list_meal_plans(
    State(state): State<AppState>,
    Query(params): Query<ListMealPlansParams>,
) -> impl IntoResponse {
    let from = params.from_date.unwrap_or(NaiveDate::MIN);
    let to = params.to_date.unwrap_or(NaiveDate::MAX);

    match state.store.plans_in_range(from, to).await {
        Ok(meal_plans) => {
            (StatusCode::OK, Json(MealPlanListResponse { meal_plans })).into_response()
        }
        Err(e) => store_error_response(e),
    }
}
