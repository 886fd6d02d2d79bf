use crate::api::{error_response, store_error_response, ErrorResponse};
use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use weeknight_core::{Ingredient, MealType, ProteinType, Recipe};

/// Request body shared by create and update.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RecipeBody {
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub steps: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub protein_type: Option<ProteinType>,
    #[serde(default)]
    pub meal_type: MealType,
    pub prep_time_min: Option<u32>,
    pub cook_time_min: Option<u32>,
    pub total_time_min: Option<u32>,
    pub servings: Option<u32>,
    pub rating: Option<u8>,
    pub source_url: Option<String>,
    pub notes: Option<String>,
    pub image_url: Option<String>,
    pub thumbnail_url: Option<String>,
}

impl RecipeBody {
    /// Title must be non-blank; rating, when present, is 1-5 stars.
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Title cannot be empty".to_string());
        }
        if let Some(rating) = self.rating {
            if !(1..=5).contains(&rating) {
                return Err("Rating must be between 1 and 5".to_string());
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CreateRecipeResponse {
    pub id: Uuid,
}

#[utoipa::path(
    post,
    path = "/api/recipes",
    tag = "recipes",
    request_body = RecipeBody,
    responses(
        (status = 201, description = "Recipe created successfully", body = CreateRecipeResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 409, description = "Duplicate title", body = ErrorResponse)
    )
)]
pub async fn create_recipe(
    State(state): State<AppState>,
    Json(request): Json<RecipeBody>,
) -> impl IntoResponse {
    if let Err(message) = request.validate() {
        return error_response(StatusCode::BAD_REQUEST, message);
    }

    let now = Utc::now();
    let recipe = Recipe {
        id: Uuid::new_v4(),
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
        last_cooked_at: None,
        image_url: request.image_url,
        thumbnail_url: request.thumbnail_url,
        created_at: now,
        updated_at: now,
    };
    let id = recipe.id;

    match state.store.insert_recipe(recipe).await {
        Ok(()) => (StatusCode::CREATED, Json(CreateRecipeResponse { id })).into_response(),
        Err(e) => store_error_response(e),
    }
}
