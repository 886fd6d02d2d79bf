//! JSON export: plan metadata plus entries with embedded recipe summaries.

use serde_json::json;

use crate::error::ExportError;
use crate::export::RecipeMap;
use crate::types::MealPlan;

pub fn export_json(plan: &MealPlan, recipes: &RecipeMap) -> Result<String, ExportError> {
    let entries: Vec<serde_json::Value> = plan
        .entries
        .iter()
        .map(|entry| {
            let recipe = entry
                .recipe_id
                .and_then(|id| recipes.get(&id))
                .map(|r| {
                    json!({
                        "id": r.id,
                        "title": r.title,
                        "description": r.description,
                        "ingredients": r.ingredients.iter().map(|i| i.text.as_str()).collect::<Vec<_>>(),
                        "steps": r.steps,
                        "tags": r.tags,
                        "protein_type": r.protein_type,
                        "prep_time_min": r.prep_time_min,
                        "cook_time_min": r.cook_time_min,
                        "servings": r.servings,
                        "rating": r.rating,
                    })
                })
                .unwrap_or(serde_json::Value::Null);

            json!({
                "date": entry.date,
                "notes": entry.notes,
                "locked": entry.locked,
                "recipe": recipe,
            })
        })
        .collect();

    let export = json!({
        "meal_plan": {
            "id": plan.id,
            "week_start_date": plan.week_start_date,
            "dinners_per_week": plan.dinners_per_week,
            "created_at": plan.created_at,
        },
        "entries": entries,
    });

    Ok(serde_json::to_string_pretty(&export)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::test_fixtures::{plan_with, recipe_named};

    #[test]
    fn embeds_recipe_summaries() {
        let recipe = recipe_named("Chili", &["1 lb beef", "1 can beans"]);
        let (plan, map) = plan_with(&[("2025-01-06", Some(&recipe), "double batch")]);

        let out = export_json(&plan, &map).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(parsed["meal_plan"]["week_start_date"], "2025-01-06");
        assert_eq!(parsed["entries"][0]["recipe"]["title"], "Chili");
        assert_eq!(parsed["entries"][0]["recipe"]["ingredients"][1], "1 can beans");
        assert_eq!(parsed["entries"][0]["notes"], "double batch");
    }

    #[test]
    fn missing_recipe_serializes_as_null() {
        let (plan, map) = plan_with(&[("2025-01-06", None, "")]);
        let parsed: serde_json::Value =
            serde_json::from_str(&export_json(&plan, &map).unwrap()).unwrap();
        assert!(parsed["entries"][0]["recipe"].is_null());
    }
}
