pub mod consolidate;
pub mod error;
pub mod export;
pub mod llm;
pub mod planner;
pub mod store;
pub mod types;

pub use consolidate::{format_shopping_list, ConsolidatedIngredient, Consolidator};
pub use error::{ExportError, PlanError, StoreError};
pub use export::{export_csv, export_ics, export_json, export_text, IcsOptions, RecipeMap};
pub use planner::{GenerateRequest, GeneratedPlan, MealPlanner};
pub use store::{PlanStore, RecipeStore, StapleProvider};
pub use types::{
    Ingredient, MealPlan, MealPlanEntry, MealType, PlannerConstraints, ProteinType, Recipe,
    WeekStartDay,
};
