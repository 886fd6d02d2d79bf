use crate::api::recipes::create::RecipeBody;
use crate::api::{error_response, store_error_response, ErrorResponse};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use uuid::Uuid;

use weeknight_core::{Recipe, RecipeStore};

#[utoipa::path(
    put,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = Uuid, Path, description = "Recipe ID")
    ),
    request_body = RecipeBody,
    responses(
        (status = 200, description = "Updated recipe", body = Recipe),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse),
        (status = 409, description = "Duplicate title", body = ErrorResponse)
    )
)]
pub async fn update_recipe(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<RecipeBody>,
) -> impl IntoResponse {
    if let Err(message) = request.validate() {
        return error_response(StatusCode::BAD_REQUEST, message);
    }

    let existing = match state.store.get_recipe(id).await {
        Ok(Some(recipe)) => recipe,
        Ok(None) => return error_response(StatusCode::NOT_FOUND, "Recipe not found"),
        Err(e) => return store_error_response(e),
    };

    // Full replace; id, created_at, and cook history are server-owned.
    let updated = Recipe {
        id,
        title: request.title.trim().to_string(),
        description: request.description,
        ingredients: request.ingredients,
        steps: request.steps,
        tags: request.tags,
        protein_type: request.protein_type,
        meal_type: request.meal_type,
        prep_time_min: request.prep_time_min,
        cook_time_min: request.cook_time_min,
        total_time_min: request.total_time_min,
        servings: request.servings,
        rating: request.rating,
        source_url: request.source_url,
        notes: request.notes,
        last_cooked_at: existing.last_cooked_at,
        image_url: request.image_url,
        thumbnail_url: request.thumbnail_url,
        created_at: existing.created_at,
        updated_at: Utc::now(),
    };

    match state.store.update_recipe(updated.clone()).await {
        Ok(()) => (StatusCode::OK, Json(updated)).into_response(),
        Err(e) => store_error_response(e),
    }
}
