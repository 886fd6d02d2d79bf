//! Storage collaborator traits.
//!
//! The planner and consolidator never talk to a database directly; they are
//! handed trait objects at construction time. The server crate provides the
//! real implementations.

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::StoreError;
use crate::types::{MealPlan, Recipe};

/// Read access to the recipe catalog.
#[async_trait]
pub trait RecipeStore: Send + Sync {
    /// All recipes for the (single) user. The planner filters in memory.
    async fn list_recipes(&self) -> Result<Vec<Recipe>, StoreError>;

    async fn get_recipe(&self, id: Uuid) -> Result<Option<Recipe>, StoreError>;
}

/// Read access to previously saved meal plans.
#[async_trait]
pub trait PlanStore: Send + Sync {
    /// Plans whose week_start_date falls in the inclusive range.
    async fn plans_in_range(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<MealPlan>, StoreError>;
}

/// The user's configured staple grocery strings.
#[async_trait]
pub trait StapleProvider: Send + Sync {
    async fn staple_groceries(&self) -> Result<Vec<String>, StoreError>;
}
