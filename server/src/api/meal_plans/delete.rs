use crate::api::{store_error_response, ErrorResponse};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

#[utoipa::path(
    delete,
    path = "/api/mealplans/{id}",
    tag = "meal_plans",
    params(
        ("id" = Uuid, Path, description = "Meal plan ID")
    ),
    responses(
        (status = 204, description = "Meal plan deleted"),
        (status = 404, description = "Meal plan not found", body = ErrorResponse)
    )
)]
pub async fn delete_meal_plan(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match state.store.delete_plan(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => store_error_response(e),
    }
}
