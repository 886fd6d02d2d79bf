//! In-memory storage backing the HTTP API.
//!
//! A single-user store over `RwLock`ed maps. The core crate only sees the
//! collaborator traits, so swapping this for a database later means touching
//! this file and nothing in `weeknight-core`.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use utoipa::ToSchema;
use uuid::Uuid;

use weeknight_core::{
    MealPlan, PlanStore, Recipe, RecipeStore, StapleProvider, StoreError, WeekStartDay,
};

/// Per-user planning preferences.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct UserProfile {
    pub likes: Vec<String>,
    pub dislikes: Vec<String>,
    pub default_dinners_per_week: u8,
    pub start_week_on: WeekStartDay,
    /// Grocery strings appended to every shopping list.
    pub staple_groceries: Vec<String>,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            likes: Vec::new(),
            dislikes: Vec::new(),
            default_dinners_per_week: 5,
            start_week_on: WeekStartDay::Monday,
            staple_groceries: Vec::new(),
        }
    }
}

#[derive(Default)]
pub struct MemoryStore {
    recipes: RwLock<HashMap<Uuid, Recipe>>,
    plans: RwLock<HashMap<Uuid, MealPlan>>,
    profile: RwLock<UserProfile>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new recipe. Titles are unique (case-insensitive).
    pub async fn insert_recipe(&self, recipe: Recipe) -> Result<(), StoreError> {
        let mut recipes = self.recipes.write().await;
        if title_taken(&recipes, &recipe.title, recipe.id) {
            return Err(StoreError::DuplicateTitle(recipe.title));
        }
        recipes.insert(recipe.id, recipe);
        Ok(())
    }

    /// Replace an existing recipe, keeping the title-uniqueness invariant.
    pub async fn update_recipe(&self, recipe: Recipe) -> Result<(), StoreError> {
        let mut recipes = self.recipes.write().await;
        if !recipes.contains_key(&recipe.id) {
            return Err(StoreError::NotFound);
        }
        if title_taken(&recipes, &recipe.title, recipe.id) {
            return Err(StoreError::DuplicateTitle(recipe.title));
        }
        recipes.insert(recipe.id, recipe);
        Ok(())
    }

    pub async fn delete_recipe(&self, id: Uuid) -> Result<(), StoreError> {
        match self.recipes.write().await.remove(&id) {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound),
        }
    }

    /// Distinct tags across the catalog with usage counts, alphabetical.
    pub async fn tag_counts(&self) -> Vec<(String, usize)> {
        let recipes = self.recipes.read().await;
        let mut counts: HashMap<String, usize> = HashMap::new();
        for recipe in recipes.values() {
            for tag in &recipe.tags {
                *counts.entry(tag.clone()).or_default() += 1;
            }
        }
        let mut tags: Vec<(String, usize)> = counts.into_iter().collect();
        tags.sort_by(|a, b| a.0.cmp(&b.0));
        tags
    }

    /// Save a plan and set `last_cooked_at` on each referenced recipe to the
    /// entry's date, even when that moves it backwards (re-saving an old week
    /// rewrites the cook date). The two writes are not atomic; a crash
    /// between them leaves a saved plan with stale cook dates, which the
    /// next save fixes.
    pub async fn save_plan(&self, plan: MealPlan) -> Result<(), StoreError> {
        let touches: Vec<(Uuid, DateTime<Utc>)> = plan
            .entries
            .iter()
            .filter_map(|e| Some((e.recipe_id?, start_of_day(e.date))))
            .collect();

        self.plans.write().await.insert(plan.id, plan);

        let mut recipes = self.recipes.write().await;
        for (recipe_id, cooked_at) in touches {
            if let Some(recipe) = recipes.get_mut(&recipe_id) {
                recipe.last_cooked_at = Some(cooked_at);
            }
        }
        Ok(())
    }

    pub async fn get_plan(&self, id: Uuid) -> Option<MealPlan> {
        self.plans.read().await.get(&id).cloned()
    }

    pub async fn update_plan(&self, plan: MealPlan) -> Result<(), StoreError> {
        let mut plans = self.plans.write().await;
        if !plans.contains_key(&plan.id) {
            return Err(StoreError::NotFound);
        }
        plans.insert(plan.id, plan);
        Ok(())
    }

    pub async fn delete_plan(&self, id: Uuid) -> Result<(), StoreError> {
        match self.plans.write().await.remove(&id) {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound),
        }
    }

    pub async fn profile(&self) -> UserProfile {
        self.profile.read().await.clone()
    }

    pub async fn set_profile(&self, profile: UserProfile) {
        *self.profile.write().await = profile;
    }
}

fn title_taken(recipes: &HashMap<Uuid, Recipe>, title: &str, own_id: Uuid) -> bool {
    let wanted = title.to_lowercase();
    recipes
        .values()
        .any(|r| r.id != own_id && r.title.to_lowercase() == wanted)
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0).unwrap_or_default())
}

#[async_trait]
impl RecipeStore for MemoryStore {
    async fn list_recipes(&self) -> Result<Vec<Recipe>, StoreError> {
        Ok(self.recipes.read().await.values().cloned().collect())
    }

    async fn get_recipe(&self, id: Uuid) -> Result<Option<Recipe>, StoreError> {
        Ok(self.recipes.read().await.get(&id).cloned())
    }
}

#[async_trait]
impl PlanStore for MemoryStore {
    async fn plans_in_range(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<MealPlan>, StoreError> {
        let mut plans: Vec<MealPlan> = self
            .plans
            .read()
            .await
            .values()
            .filter(|p| p.week_start_date >= from && p.week_start_date <= to)
            .cloned()
            .collect();
        plans.sort_by_key(|p| p.week_start_date);
        Ok(plans)
    }
}

#[async_trait]
impl StapleProvider for MemoryStore {
    async fn staple_groceries(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.profile.read().await.staple_groceries.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use weeknight_core::types::{MealPlanEntry, MealType, PlannerConstraints};

    fn recipe(title: &str) -> Recipe {
        Recipe {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: None,
            ingredients: vec![],
            steps: vec![],
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
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn duplicate_titles_are_rejected_case_insensitively() {
        let store = MemoryStore::new();
        store.insert_recipe(recipe("Chili")).await.unwrap();

        let err = store.insert_recipe(recipe("CHILI")).await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateTitle(_)));
    }

    #[tokio::test]
    async fn updating_a_recipe_keeps_its_own_title() {
        let store = MemoryStore::new();
        let mut r = recipe("Chili");
        store.insert_recipe(r.clone()).await.unwrap();

        r.notes = Some("extra beans".to_string());
        store.update_recipe(r).await.unwrap();
    }

    #[tokio::test]
    async fn resaving_an_older_week_rewrites_last_cooked_at() {
        let store = MemoryStore::new();
        let mut r = recipe("Chili");
        r.last_cooked_at = Some(Utc::now());
        let recipe_id = r.id;
        store.insert_recipe(r).await.unwrap();

        // An old week's plan still rewrites the cook date, backwards.
        let date: NaiveDate = "2024-06-03".parse().unwrap();
        let plan = MealPlan {
            id: Uuid::new_v4(),
            week_start_date: date,
            dinners_per_week: 4,
            constraints: PlannerConstraints::default(),
            entries: vec![MealPlanEntry {
                date,
                recipe_id: Some(recipe_id),
                notes: String::new(),
                locked: false,
            }],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        store.save_plan(plan).await.unwrap();

        let cooked = store
            .get_recipe(recipe_id)
            .await
            .unwrap()
            .unwrap()
            .last_cooked_at
            .unwrap();
        assert_eq!(cooked.date_naive(), date);
    }

    #[tokio::test]
    async fn saving_a_plan_sets_last_cooked_at() {
        let store = MemoryStore::new();
        let r = recipe("Chili");
        let recipe_id = r.id;
        store.insert_recipe(r).await.unwrap();

        let date: NaiveDate = "2025-01-06".parse().unwrap();
        let plan = MealPlan {
            id: Uuid::new_v4(),
            week_start_date: date,
            dinners_per_week: 4,
            constraints: PlannerConstraints::default(),
            entries: vec![MealPlanEntry {
                date,
                recipe_id: Some(recipe_id),
                notes: String::new(),
                locked: false,
            }],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        store.save_plan(plan).await.unwrap();

        let cooked = store
            .get_recipe(recipe_id)
            .await
            .unwrap()
            .unwrap()
            .last_cooked_at
            .unwrap();
        assert_eq!(cooked.date_naive(), date);
    }

    #[tokio::test]
    async fn plans_in_range_is_inclusive_and_sorted() {
        let store = MemoryStore::new();
        for week in ["2025-01-13", "2025-01-06", "2025-01-20"] {
            let date: NaiveDate = week.parse().unwrap();
            store
                .save_plan(MealPlan {
                    id: Uuid::new_v4(),
                    week_start_date: date,
                    dinners_per_week: 4,
                    constraints: PlannerConstraints::default(),
                    entries: vec![],
                    created_at: Utc::now(),
                    updated_at: Utc::now(),
                })
                .await
                .unwrap();
        }

        let plans = store
            .plans_in_range("2025-01-06".parse().unwrap(), "2025-01-13".parse().unwrap())
            .await
            .unwrap();
        let weeks: Vec<String> = plans
            .iter()
            .map(|p| p.week_start_date.to_string())
            .collect();
        assert_eq!(weeks, vec!["2025-01-06", "2025-01-13"]);
    }
}
