use crate::api::meal_plans::resolve_recipes;
use crate::api::{error_response, store_error_response, ErrorResponse};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use weeknight_core::{export_csv, export_ics, export_json, export_text, MealPlan, RecipeMap};

/// Fetch the plan and resolve its recipes, or produce the error response.
async fn load_plan(state: &AppState, id: Uuid) -> Result<(MealPlan, RecipeMap), Response> {
    let Some(plan) = state.store.get_plan(id).await else {
        return Err(error_response(StatusCode::NOT_FOUND, "Meal plan not found"));
    };
    let (recipes, _) = resolve_recipes(&state.store, &plan)
        .await
        .map_err(store_error_response)?;
    Ok((plan, recipes))
}

fn attachment(content_type: &str, filename: String, body: String) -> Response {
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        body,
    )
        .into_response()
}

#[utoipa::path(
    get,
    path = "/api/mealplans/{id}/export.csv",
    tag = "meal_plans",
    params(
        ("id" = Uuid, Path, description = "Meal plan ID")
    ),
    responses(
        (status = 200, description = "Plan as CSV attachment", content_type = "text/csv"),
        (status = 404, description = "Meal plan not found", body = ErrorResponse)
    )
)]
pub async fn export_csv_file(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let (plan, recipes) = match load_plan(&state, id).await {
        Ok(loaded) => loaded,
        Err(response) => return response,
    };

    match export_csv(&plan, &recipes) {
        Ok(body) => attachment(
            "text/csv; charset=utf-8",
            format!("meal-plan-{}.csv", plan.week_start_date),
            body,
        ),
        Err(e) => {
            tracing::error!(error = %e, "CSV export failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Export failed")
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/mealplans/{id}/export.json",
    tag = "meal_plans",
    params(
        ("id" = Uuid, Path, description = "Meal plan ID")
    ),
    responses(
        (status = 200, description = "Plan as JSON attachment", content_type = "application/json"),
        (status = 404, description = "Meal plan not found", body = ErrorResponse)
    )
)]
pub async fn export_json_file(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let (plan, recipes) = match load_plan(&state, id).await {
        Ok(loaded) => loaded,
        Err(response) => return response,
    };

    match export_json(&plan, &recipes) {
        Ok(body) => attachment(
            "application/json",
            format!("meal-plan-{}.json", plan.week_start_date),
            body,
        ),
        Err(e) => {
            tracing::error!(error = %e, "JSON export failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Export failed")
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/mealplans/{id}/export.txt",
    tag = "meal_plans",
    params(
        ("id" = Uuid, Path, description = "Meal plan ID")
    ),
    responses(
        (status = 200, description = "Plan as plain-text attachment", content_type = "text/plain"),
        (status = 404, description = "Meal plan not found", body = ErrorResponse)
    )
)]
pub async fn export_txt_file(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let (plan, recipes) = match load_plan(&state, id).await {
        Ok(loaded) => loaded,
        Err(response) => return response,
    };

    attachment(
        "text/plain; charset=utf-8",
        format!("meal-plan-{}.txt", plan.week_start_date),
        export_text(&plan, &recipes),
    )
}

#[utoipa::path(
    get,
    path = "/api/mealplans/{id}/export.ics",
    tag = "meal_plans",
    params(
        ("id" = Uuid, Path, description = "Meal plan ID")
    ),
    responses(
        (status = 200, description = "Plan as iCalendar attachment", content_type = "text/calendar"),
        (status = 404, description = "Meal plan not found", body = ErrorResponse)
    )
)]
pub async fn export_ics_file(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let (plan, recipes) = match load_plan(&state, id).await {
        Ok(loaded) => loaded,
        Err(response) => return response,
    };

    attachment(
        "text/calendar; charset=utf-8",
        format!("meal-plan-{}.ics", plan.week_start_date),
        export_ics(&plan, &recipes, &state.ics),
    )
}
