//! Shared fakes and builders for integration tests.

use async_trait::async_trait;
use chrono::{NaiveDate, TimeZone, Utc};
use uuid::Uuid;

use weeknight_core::error::StoreError;
use weeknight_core::store::{PlanStore, RecipeStore};
use weeknight_core::types::{
    Ingredient, MealPlan, MealPlanEntry, MealType, PlannerConstraints, ProteinType, Recipe,
};

/// In-memory catalog + history fake. Clones out snapshots like a real store.
#[derive(Default)]
pub struct FakeStore {
    pub recipes: Vec<Recipe>,
    pub plans: Vec<MealPlan>,
}

#[async_trait]
impl RecipeStore for FakeStore {
    async fn list_recipes(&self) -> Result<Vec<Recipe>, StoreError> {
        Ok(self.recipes.clone())
    }

    async fn get_recipe(&self, id: Uuid) -> Result<Option<Recipe>, StoreError> {
        Ok(self.recipes.iter().find(|r| r.id == id).cloned())
    }
}

#[async_trait]
impl PlanStore for FakeStore {
    async fn plans_in_range(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<MealPlan>, StoreError> {
        Ok(self
            .plans
            .iter()
            .filter(|p| p.week_start_date >= from && p.week_start_date <= to)
            .cloned()
            .collect())
    }
}

pub fn dinner_recipe(title: &str) -> Recipe {
    Recipe {
        id: Uuid::new_v4(),
        title: title.to_string(),
        description: None,
        ingredients: vec![Ingredient::new(format!("1 serving {}", title.to_lowercase()))],
        steps: vec!["Cook it".to_string()],
        tags: vec![],
        protein_type: None,
        meal_type: MealType::Dinner,
        prep_time_min: None,
        cook_time_min: None,
        total_time_min: None,
        servings: None,
        rating: None,
        source_url: None,
        notes: None,
        last_cooked_at: None,
        image_url: None,
        thumbnail_url: None,
        created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        updated_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
    }
}

pub fn with_protein(mut recipe: Recipe, protein: ProteinType) -> Recipe {
    recipe.protein_type = Some(protein);
    recipe
}

pub fn with_tags(mut recipe: Recipe, tags: &[&str]) -> Recipe {
    recipe.tags = tags.iter().map(|t| t.to_string()).collect();
    recipe
}

pub fn with_ingredients(mut recipe: Recipe, ingredients: &[&str]) -> Recipe {
    recipe.ingredients = ingredients.iter().map(|i| Ingredient::new(*i)).collect();
    recipe
}

/// A saved plan whose entries reference the given recipes on consecutive
/// days starting at `week_start`.
pub fn saved_plan(week_start: NaiveDate, recipe_ids: &[Uuid]) -> MealPlan {
    let entries: Vec<MealPlanEntry> = recipe_ids
        .iter()
        .enumerate()
        .map(|(i, id)| MealPlanEntry {
            date: week_start + chrono::Duration::days(i as i64),
            recipe_id: Some(*id),
            notes: String::new(),
            locked: false,
        })
        .collect();

    MealPlan {
        id: Uuid::new_v4(),
        week_start_date: week_start,
        dinners_per_week: entries.len().max(4) as u8,
        constraints: PlannerConstraints::default(),
        entries,
        created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        updated_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
    }
}

pub fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}
