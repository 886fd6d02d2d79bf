//! Plain-text export: the week at a glance plus a per-recipe shopping list.

use crate::export::RecipeMap;
use crate::types::MealPlan;

const RULER: &str = "============================================================";

pub fn export_text(plan: &MealPlan, recipes: &RecipeMap) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!(
        "MEAL PLAN - Week of {}",
        plan.week_start_date.format("%B %d, %Y")
    ));
    lines.push(RULER.to_string());
    lines.push(String::new());

    for entry in &plan.entries {
        let recipe = entry.recipe_id.and_then(|id| recipes.get(&id));

        lines.push(format!("{}:", entry.date.format("%A, %B %d")));
        match recipe {
            Some(recipe) => lines.push(format!("  {}", recipe.title)),
            None => lines.push("  No recipe planned".to_string()),
        }
        if !entry.notes.is_empty() {
            lines.push(format!("  Notes: {}", entry.notes));
        }
        lines.push(String::new());
    }

    lines.push("SHOPPING LIST".to_string());
    lines.push(RULER.to_string());
    lines.push(String::new());

    for entry in &plan.entries {
        let Some(recipe) = entry.recipe_id.and_then(|id| recipes.get(&id)) else {
            continue;
        };
        if recipe.ingredients.is_empty() {
            continue;
        }

        lines.push(format!("{}:", recipe.title));
        for ingredient in &recipe.ingredients {
            lines.push(format!("  \u{2022} {}", ingredient.text));
        }
        lines.push(String::new());
    }

    lines.join("\n")
}
