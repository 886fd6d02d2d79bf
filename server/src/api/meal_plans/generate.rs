use crate::api::{error_response, store_error_response, ErrorResponse};
use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use weeknight_core::planner::GenerateRequest;
use weeknight_core::{MealPlanEntry, PlanError, PlannerConstraints, Recipe};

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct GeneratePlanRequest {
    pub week_start_date: NaiveDate,
    /// Defaults to the profile's preference.
    pub dinners_per_week: Option<u8>,
    #[serde(default)]
    pub constraints: Option<PlannerConstraints>,
    /// Current entries for this week; locked ones are kept verbatim.
    pub existing_entries: Option<Vec<MealPlanEntry>>,
    /// Extra entropy for "give me a different plan" regeneration.
    pub seed: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GeneratePlanResponse {
    pub entries: Vec<MealPlanEntry>,
    /// Distinct recipes referenced by the entries, in first-use order.
    pub recipes: Vec<Recipe>,
    pub message: String,
}

#[utoipa::path(
    post,
    path = "/api/mealplans/generate",
    tag = "meal_plans",
    request_body = GeneratePlanRequest,
    responses(
        (status = 200, description = "Generated plan (not persisted)", body = GeneratePlanResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse)
    )
)]
pub async fn generate_meal_plan(
    State(state): State<AppState>,
    Json(request): Json<GeneratePlanRequest>,
) -> impl IntoResponse {
    let profile = state.store.profile().await;
    let dinners_per_week = request
        .dinners_per_week
        .unwrap_or(profile.default_dinners_per_week);
    if !(4..=5).contains(&dinners_per_week) {
        return error_response(StatusCode::BAD_REQUEST, "dinners_per_week must be 4 or 5");
    }

    let constraints = request.constraints.unwrap_or_else(|| PlannerConstraints {
        start_week_on: profile.start_week_on,
        ..PlannerConstraints::default()
    });

    let generated = state
        .planner
        .generate(GenerateRequest {
            week_start_date: request.week_start_date,
            dinners_per_week,
            constraints,
            existing_entries: request.existing_entries,
            seed: request.seed,
        })
        .await;

    match generated {
        Ok(plan) => (
            StatusCode::OK,
            Json(GeneratePlanResponse {
                entries: plan.entries,
                recipes: plan.recipes,
                message: plan.message,
            }),
        )
            .into_response(),
        Err(PlanError::Store(e)) => store_error_response(e),
    }
}
