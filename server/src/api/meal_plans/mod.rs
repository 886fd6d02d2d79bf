pub mod create;
pub mod delete;
pub mod export;
pub mod generate;
pub mod get;
pub mod ingredients;
pub mod list;
pub mod lock;
pub mod update;

use crate::store::MemoryStore;
use crate::AppState;
use axum::routing::{get, post};
use axum::Router;
use utoipa::OpenApi;

use weeknight_core::{MealPlan, Recipe, RecipeMap, RecipeStore, StoreError};

/// Returns the router for /api/mealplans endpoints (mounted at /api/mealplans)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list::list_meal_plans).post(create::create_meal_plan))
        .route("/generate", post(generate::generate_meal_plan))
        .route(
            "/{id}",
            get(get::get_meal_plan)
                .patch(update::update_meal_plan)
                .delete(delete::delete_meal_plan),
        )
        .route("/{id}/lock", post(lock::lock_entries))
        .route("/{id}/export.csv", get(export::export_csv_file))
        .route("/{id}/export.json", get(export::export_json_file))
        .route("/{id}/export.txt", get(export::export_txt_file))
        .route("/{id}/export.ics", get(export::export_ics_file))
        .route(
            "/{id}/export/ingredients",
            get(ingredients::export_ingredients),
        )
        .route(
            "/{id}/export/ingredients/with-staples",
            get(ingredients::export_ingredients_with_staples),
        )
}

/// Resolve the plan's recipe ids against the catalog. Ids that no longer
/// resolve are silently skipped; exports render those days without a recipe.
pub(crate) async fn resolve_recipes(
    store: &MemoryStore,
    plan: &MealPlan,
) -> Result<(RecipeMap, Vec<Recipe>), StoreError> {
    let mut map = RecipeMap::new();
    // Distinct recipes in first-use order, for recipe-ordered output.
    let mut ordered: Vec<Recipe> = Vec::new();

    for entry in &plan.entries {
        let Some(id) = entry.recipe_id else { continue };
        if map.contains_key(&id) {
            continue;
        }
        if let Some(recipe) = store.get_recipe(id).await? {
            map.insert(id, recipe.clone());
            ordered.push(recipe);
        }
    }

    Ok((map, ordered))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        generate::generate_meal_plan,
        create::create_meal_plan,
        list::list_meal_plans,
        get::get_meal_plan,
        update::update_meal_plan,
        delete::delete_meal_plan,
        lock::lock_entries,
        export::export_csv_file,
        export::export_json_file,
        export::export_txt_file,
        export::export_ics_file,
        ingredients::export_ingredients,
        ingredients::export_ingredients_with_staples,
    ),
    components(schemas(
        generate::GeneratePlanRequest,
        generate::GeneratePlanResponse,
        create::CreateMealPlanRequest,
        list::MealPlanListResponse,
        update::UpdateMealPlanRequest,
        lock::LockEntriesRequest,
        ingredients::IngredientsResponse,
        weeknight_core::MealPlan,
        weeknight_core::MealPlanEntry,
        weeknight_core::PlannerConstraints,
        weeknight_core::WeekStartDay,
        weeknight_core::ProteinType,
        weeknight_core::MealType,
    ))
)]
pub struct ApiDoc;
