use crate::api::{store_error_response, ErrorResponse};
use crate::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use weeknight_core::{MealType, ProteinType, Recipe, RecipeStore};

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListRecipesParams {
    /// Only recipes carrying this tag.
    pub tag: Option<String>,
    /// Only recipes of this meal type.
    pub meal_type: Option<MealType>,
    /// Case-insensitive substring match against title and description.
    pub q: Option<String>,
    /// Page size. Defaults to 100.
    pub limit: Option<usize>,
    /// Offset into the (title-sorted) result set.
    pub offset: Option<usize>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecipeSummary {
    pub id: Uuid,
    pub title: String,
    pub tags: Vec<String>,
    pub protein_type: Option<ProteinType>,
    pub meal_type: MealType,
    pub total_time_min: Option<u32>,
    pub rating: Option<u8>,
    pub last_cooked_at: Option<DateTime<Utc>>,
    pub thumbnail_url: Option<String>,
}

impl From<&Recipe> for RecipeSummary {
    fn from(recipe: &Recipe) -> Self {
        Self {
            id: recipe.id,
            title: recipe.title.clone(),
            tags: recipe.tags.clone(),
            protein_type: recipe.protein_type,
            meal_type: recipe.meal_type,
            total_time_min: recipe.total_time_min(),
            rating: recipe.rating,
            last_cooked_at: recipe.last_cooked_at,
            thumbnail_url: recipe.thumbnail_url.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ListRecipesResponse {
    pub recipes: Vec<RecipeSummary>,
    /// Count after filtering, before paging.
    pub total: usize,
}

#[utoipa::path(
    get,
    path = "/api/recipes",
    tag = "recipes",
    params(ListRecipesParams),
    responses(
        (status = 200, description = "Filtered recipe summaries", body = ListRecipesResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn list_recipes(
    State(state): State<AppState>,
    Query(params): Query<ListRecipesParams>,
) -> impl IntoResponse {
    let mut recipes = match state.store.list_recipes().await {
        Ok(recipes) => recipes,
        Err(e) => return store_error_response(e),
    };

    if let Some(tag) = &params.tag {
        recipes.retain(|r| r.tags.iter().any(|t| t.eq_ignore_ascii_case(tag)));
    }
    if let Some(meal_type) = params.meal_type {
        recipes.retain(|r| r.meal_type == meal_type);
    }
    if let Some(q) = &params.q {
        let needle = q.to_lowercase();
        recipes.retain(|r| {
            r.title.to_lowercase().contains(&needle)
                || r.description
                    .as_deref()
                    .is_some_and(|d| d.to_lowercase().contains(&needle))
        });
    }

    recipes.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()));

    let total = recipes.len();
    let offset = params.offset.unwrap_or(0);
    let limit = params.limit.unwrap_or(100);

    let recipes: Vec<RecipeSummary> = recipes
        .iter()
        .skip(offset)
        .take(limit)
        .map(RecipeSummary::from)
        .collect();

    (StatusCode::OK, Json(ListRecipesResponse { recipes, total })).into_response()
}
