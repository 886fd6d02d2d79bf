//! Core data model: recipes, meal plans, and planner constraints.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Primary protein of a recipe, used for balancing within a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ProteinType {
    Beef,
    Chicken,
    Pork,
    Fish,
    Seafood,
    Vegetarian,
    Vegan,
    Other,
}

impl ProteinType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProteinType::Beef => "beef",
            ProteinType::Chicken => "chicken",
            ProteinType::Pork => "pork",
            ProteinType::Fish => "fish",
            ProteinType::Seafood => "seafood",
            ProteinType::Vegetarian => "vegetarian",
            ProteinType::Vegan => "vegan",
            ProteinType::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    #[default]
    Dinner,
    Lunch,
    Breakfast,
    Snack,
    Misc,
}

impl MealType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Dinner => "dinner",
            MealType::Lunch => "lunch",
            MealType::Breakfast => "breakfast",
            MealType::Snack => "snack",
            MealType::Misc => "misc",
        }
    }

    /// Whether recipes of this meal type can be planned for a dinner slot.
    /// Snacks and misc entries never enter the rotation.
    pub fn is_plannable(&self) -> bool {
        matches!(
            self,
            MealType::Breakfast | MealType::Lunch | MealType::Dinner
        )
    }
}

/// A single ingredient line.
///
/// Older data stored ingredients as bare strings; those deserialize with
/// `include_in_shopping_list` defaulting to true, so downstream code only
/// ever sees the structured form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(from = "IngredientRepr")]
pub struct Ingredient {
    pub text: String,
    pub include_in_shopping_list: bool,
}

impl Ingredient {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            include_in_shopping_list: true,
        }
    }
}

/// Wire representation of an ingredient: legacy bare string or structured.
#[derive(Deserialize)]
#[serde(untagged)]
enum IngredientRepr {
    Text(String),
    Structured {
        text: String,
        #[serde(default = "default_true")]
        include_in_shopping_list: bool,
    },
}

impl From<IngredientRepr> for Ingredient {
    fn from(repr: IngredientRepr) -> Self {
        match repr {
            IngredientRepr::Text(text) => Ingredient {
                text,
                include_in_shopping_list: true,
            },
            IngredientRepr::Structured {
                text,
                include_in_shopping_list,
            } => Ingredient {
                text,
                include_in_shopping_list,
            },
        }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Recipe {
    pub id: Uuid,
    /// Unique per user; enforced by the recipe store.
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub steps: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub protein_type: Option<ProteinType>,
    #[serde(default)]
    pub meal_type: MealType,
    #[serde(default)]
    pub prep_time_min: Option<u32>,
    #[serde(default)]
    pub cook_time_min: Option<u32>,
    #[serde(default)]
    pub total_time_min: Option<u32>,
    #[serde(default)]
    pub servings: Option<u32>,
    /// 1-5 stars, validated at the API boundary.
    #[serde(default)]
    pub rating: Option<u8>,
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub last_cooked_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Recipe {
    /// Total time, falling back to prep + cook when both are present.
    pub fn total_time_min(&self) -> Option<u32> {
        self.total_time_min
            .or_else(|| match (self.prep_time_min, self.cook_time_min) {
                (Some(prep), Some(cook)) => Some(prep + cook),
                _ => None,
            })
    }

    /// Ingredient texts flagged for the shopping list.
    pub fn shopping_list_ingredients(&self) -> impl Iterator<Item = &str> {
        self.ingredients
            .iter()
            .filter(|i| i.include_in_shopping_list)
            .map(|i| i.text.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum WeekStartDay {
    #[default]
    Monday,
    Sunday,
}

/// Constraints applied during plan generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct PlannerConstraints {
    /// Substrings matched case-insensitively against ingredient text.
    pub exclude_ingredients: Vec<String>,
    /// When non-empty, a recipe must carry at least one of these tags.
    pub include_tags: Vec<String>,
    /// A recipe must carry none of these tags.
    pub exclude_tags: Vec<String>,
    /// How many prior weeks' recipes to deprioritize (not exclude).
    pub avoid_repeat_weeks: u32,
    pub balance_protein_types: bool,
    pub max_cook_time_min: Option<u32>,
    /// Forced into eligibility regardless of tag/ingredient filters.
    pub required_recipes: Vec<Uuid>,
    pub start_week_on: WeekStartDay,
}

impl Default for PlannerConstraints {
    fn default() -> Self {
        Self {
            exclude_ingredients: Vec::new(),
            include_tags: Vec::new(),
            exclude_tags: Vec::new(),
            avoid_repeat_weeks: 4,
            balance_protein_types: true,
            max_cook_time_min: None,
            required_recipes: Vec::new(),
            start_week_on: WeekStartDay::Monday,
        }
    }
}

/// One planned day within a meal plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MealPlanEntry {
    pub date: NaiveDate,
    #[serde(default)]
    pub recipe_id: Option<Uuid>,
    #[serde(default)]
    pub notes: String,
    /// Locked entries survive regeneration unchanged.
    #[serde(default)]
    pub locked: bool,
}

/// A saved week of dinner assignments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MealPlan {
    pub id: Uuid,
    pub week_start_date: NaiveDate,
    /// 4 or 5, validated at the API boundary.
    pub dinners_per_week: u8,
    #[serde(default)]
    pub constraints: PlannerConstraints,
    #[serde(default)]
    pub entries: Vec<MealPlanEntry>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_string_ingredient_defaults_to_included() {
        let ingredient: Ingredient = serde_json::from_str(r#""2 cups flour""#).unwrap();
        assert_eq!(ingredient.text, "2 cups flour");
        assert!(ingredient.include_in_shopping_list);
    }

    #[test]
    fn structured_ingredient_keeps_flag() {
        let ingredient: Ingredient =
            serde_json::from_str(r#"{"text": "water", "include_in_shopping_list": false}"#)
                .unwrap();
        assert_eq!(ingredient.text, "water");
        assert!(!ingredient.include_in_shopping_list);
    }

    #[test]
    fn structured_ingredient_flag_defaults_to_true() {
        let ingredient: Ingredient = serde_json::from_str(r#"{"text": "salt"}"#).unwrap();
        assert!(ingredient.include_in_shopping_list);
    }

    #[test]
    fn total_time_falls_back_to_prep_plus_cook() {
        let mut recipe = test_recipe("Test");
        recipe.prep_time_min = Some(10);
        recipe.cook_time_min = Some(25);
        assert_eq!(recipe.total_time_min(), Some(35));

        recipe.total_time_min = Some(40);
        assert_eq!(recipe.total_time_min(), Some(40));

        recipe.total_time_min = None;
        recipe.cook_time_min = None;
        assert_eq!(recipe.total_time_min(), None);
    }

    #[test]
    fn constraint_defaults_match_profile_defaults() {
        let constraints = PlannerConstraints::default();
        assert_eq!(constraints.avoid_repeat_weeks, 4);
        assert!(constraints.balance_protein_types);
        assert_eq!(constraints.start_week_on, WeekStartDay::Monday);
    }

    fn test_recipe(title: &str) -> Recipe {
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
}
