use crate::api::{error_response, store_error_response, ErrorResponse};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use weeknight_core::{Recipe, RecipeStore};

#[utoipa::path(
    get,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = Uuid, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Recipe details", body = Recipe),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    )
)]
pub async fn get_recipe(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    match state.store.get_recipe(id).await {
        Ok(Some(recipe)) => (StatusCode::OK, Json(recipe)).into_response(),
        Ok(None) => error_response(StatusCode::NOT_FOUND, "Recipe not found"),
        Err(e) => store_error_response(e),
    }
}
