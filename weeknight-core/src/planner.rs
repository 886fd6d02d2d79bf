//! Weekly meal plan generation.
//!
//! Given the recipe catalog, a target week, and a constraint set, the planner
//! deterministically assigns a recipe to each unlocked dinner date. The same
//! (week, seed, catalog, constraints) inputs always produce the same plan.

use std::collections::HashSet;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::sync::Arc;

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use uuid::Uuid;

use crate::error::PlanError;
use crate::store::{PlanStore, RecipeStore};
use crate::types::{MealPlanEntry, PlannerConstraints, Recipe, WeekStartDay};

/// Inputs to one generation call.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub week_start_date: NaiveDate,
    /// 4 or 5, validated before reaching the planner.
    pub dinners_per_week: u8,
    pub constraints: PlannerConstraints,
    /// Previous entries for this week; locked ones are preserved verbatim.
    pub existing_entries: Option<Vec<MealPlanEntry>>,
    /// Extra entropy mixed into the week-derived RNG seed.
    pub seed: Option<String>,
}

/// A generated plan. This is a dry run: nothing is persisted until the
/// caller saves it through the plan writer.
#[derive(Debug, Clone)]
pub struct GeneratedPlan {
    pub entries: Vec<MealPlanEntry>,
    /// Distinct recipes referenced by the entries, in first-use order.
    pub recipes: Vec<Recipe>,
    pub message: String,
}

pub struct MealPlanner {
    recipes: Arc<dyn RecipeStore>,
    plans: Arc<dyn PlanStore>,
}

impl MealPlanner {
    pub fn new(recipes: Arc<dyn RecipeStore>, plans: Arc<dyn PlanStore>) -> Self {
        Self { recipes, plans }
    }

    /// Generate a meal plan for one week.
    ///
    /// Never fails on an over-constrained catalog: when no recipe is
    /// eligible, every unlocked entry comes back with `recipe_id: None` and
    /// the message explains why.
    pub async fn generate(&self, request: GenerateRequest) -> Result<GeneratedPlan, PlanError> {
        let mut rng = seeded_rng(request.week_start_date, request.seed.as_deref());

        let catalog = self.recipes.list_recipes().await?;
        let eligible: Vec<Recipe> = catalog
            .into_iter()
            .filter(|r| is_eligible(r, &request.constraints))
            .collect();

        let dinner_dates = dinner_dates(
            request.week_start_date,
            request.dinners_per_week,
            request.constraints.start_week_on,
        );

        // Locked entries for dates in this week are kept verbatim.
        let locked: Vec<MealPlanEntry> = request
            .existing_entries
            .unwrap_or_default()
            .into_iter()
            .filter(|e| e.locked && dinner_dates.contains(&e.date))
            .collect();

        let recently_used = self
            .recently_used(
                request.week_start_date,
                request.constraints.avoid_repeat_weeks,
            )
            .await?;

        let mut entries: Vec<MealPlanEntry> = Vec::with_capacity(dinner_dates.len());
        let mut used_ids: HashSet<Uuid> = HashSet::new();
        // Rotating pool: recipes not yet assigned in this plan.
        let mut pool: Vec<Recipe> = eligible.clone();

        for date in &dinner_dates {
            if let Some(entry) = locked.iter().find(|e| e.date == *date) {
                if let Some(recipe_id) = entry.recipe_id {
                    used_ids.insert(recipe_id);
                    pool.retain(|r| r.id != recipe_id);
                }
                entries.push(entry.clone());
                continue;
            }

            let chosen = select_recipe(
                &eligible,
                &used_ids,
                &recently_used,
                &request.constraints,
                &pool,
                &mut rng,
            );

            entries.push(MealPlanEntry {
                date: *date,
                recipe_id: chosen.as_ref().map(|r| r.id),
                notes: String::new(),
                locked: false,
            });

            if let Some(recipe) = chosen {
                used_ids.insert(recipe.id);
                pool.retain(|r| r.id != recipe.id);

                // Pool exhausted with dates left to fill: refill from the
                // eligible set, minus everything already used in this plan.
                if pool.is_empty() && entries.len() < dinner_dates.len() {
                    pool = eligible
                        .iter()
                        .filter(|r| !used_ids.contains(&r.id))
                        .cloned()
                        .collect();
                }
            }
        }

        let mut seen = HashSet::new();
        let recipes: Vec<Recipe> = entries
            .iter()
            .filter_map(|e| e.recipe_id)
            .filter(|id| seen.insert(*id))
            .filter_map(|id| eligible.iter().find(|r| r.id == id).cloned())
            .collect();

        let message = if eligible.is_empty() {
            "No recipes found matching the constraints".to_string()
        } else {
            format!("Generated meal plan with {} recipes", recipes.len())
        };

        tracing::debug!(
            week_start = %request.week_start_date,
            eligible = eligible.len(),
            selected = recipes.len(),
            "generated meal plan"
        );

        Ok(GeneratedPlan {
            entries,
            recipes,
            message,
        })
    }

    /// Recipe ids used in plans within the avoid-repeat window.
    async fn recently_used(
        &self,
        week_start: NaiveDate,
        avoid_weeks: u32,
    ) -> Result<HashSet<Uuid>, PlanError> {
        if avoid_weeks == 0 {
            return Ok(HashSet::new());
        }

        let from = week_start - Duration::weeks(i64::from(avoid_weeks));
        let to = week_start - Duration::days(1);
        let plans = self.plans.plans_in_range(from, to).await?;

        Ok(plans
            .iter()
            .flat_map(|p| p.entries.iter())
            .filter_map(|e| e.recipe_id)
            .collect())
    }
}

/// Build the per-call RNG from the week start date and optional seed string.
/// Identical inputs must yield an identical selection sequence.
fn seeded_rng(week_start: NaiveDate, seed: Option<&str>) -> ChaCha8Rng {
    let seed_text = match seed {
        Some(seed) => format!("{week_start}-{seed}"),
        None => week_start.to_string(),
    };

    let mut hasher = DefaultHasher::new();
    seed_text.hash(&mut hasher);
    ChaCha8Rng::seed_from_u64(hasher.finish())
}

/// The consecutive dinner dates for a week, normalized to the user's
/// week-start convention. A Monday week start shifts back a day when the
/// user's weeks begin on Sunday, and vice versa.
fn dinner_dates(
    week_start: NaiveDate,
    dinners_per_week: u8,
    start_week_on: WeekStartDay,
) -> Vec<NaiveDate> {
    let start = match (start_week_on, week_start.weekday()) {
        (WeekStartDay::Sunday, Weekday::Mon) => week_start - Duration::days(1),
        (WeekStartDay::Monday, Weekday::Sun) => week_start + Duration::days(1),
        _ => week_start,
    };

    (0..i64::from(dinners_per_week))
        .map(|i| start + Duration::days(i))
        .collect()
}

/// Whether a recipe can enter the rotation for this generation call.
fn is_eligible(recipe: &Recipe, constraints: &PlannerConstraints) -> bool {
    if !recipe.meal_type.is_plannable() {
        return false;
    }

    // Required recipes bypass tag and ingredient filters.
    if constraints.required_recipes.contains(&recipe.id) {
        return true;
    }

    if recipe
        .tags
        .iter()
        .any(|tag| constraints.exclude_tags.contains(tag))
    {
        return false;
    }

    if !constraints.exclude_ingredients.is_empty() {
        let ingredient_text = recipe
            .ingredients
            .iter()
            .map(|i| i.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();
        if constraints
            .exclude_ingredients
            .iter()
            .any(|excluded| ingredient_text.contains(&excluded.to_lowercase()))
        {
            return false;
        }
    }

    if let (Some(max), Some(cook)) = (constraints.max_cook_time_min, recipe.cook_time_min) {
        if cook > max {
            return false;
        }
    }

    if !constraints.include_tags.is_empty()
        && !recipe
            .tags
            .iter()
            .any(|tag| constraints.include_tags.contains(tag))
    {
        return false;
    }

    true
}

/// Pick one recipe for an unlocked date.
///
/// Narrowing order: pool members not yet used in this plan, then prefer
/// recipes outside the recency set, then (when balancing) recipes whose
/// protein differs from everything already chosen. Each narrowing step falls
/// back rather than emptying the candidate list.
fn select_recipe(
    eligible: &[Recipe],
    used_ids: &HashSet<Uuid>,
    recently_used: &HashSet<Uuid>,
    constraints: &PlannerConstraints,
    pool: &[Recipe],
    rng: &mut ChaCha8Rng,
) -> Option<Recipe> {
    let mut available: Vec<&Recipe> = pool.iter().filter(|r| !used_ids.contains(&r.id)).collect();

    if available.is_empty() {
        available = eligible
            .iter()
            .filter(|r| !used_ids.contains(&r.id))
            .collect();
    }
    if available.is_empty() {
        // Every eligible recipe is already in the plan: repeats are allowed
        // once the rotation is exhausted.
        available = eligible.iter().collect();
    }
    if available.is_empty() {
        return None;
    }

    let preferred: Vec<&Recipe> = available
        .iter()
        .copied()
        .filter(|r| !recently_used.contains(&r.id))
        .collect();
    let mut candidates = if preferred.is_empty() {
        available
    } else {
        preferred
    };

    if constraints.balance_protein_types && !used_ids.is_empty() {
        let used_proteins: HashSet<_> = eligible
            .iter()
            .filter(|r| used_ids.contains(&r.id))
            .filter_map(|r| r.protein_type)
            .collect();

        let different: Vec<&Recipe> = candidates
            .iter()
            .copied()
            .filter(|r| {
                r.protein_type
                    .map_or(true, |protein| !used_proteins.contains(&protein))
            })
            .collect();

        if !different.is_empty() {
            candidates = different;
        }
    }

    candidates.choose(rng).map(|r| (*r).clone())
}
