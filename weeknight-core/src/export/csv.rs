//! CSV export: one row per planned day.

use crate::error::ExportError;
use crate::export::RecipeMap;
use crate::types::MealPlan;

/// Render the plan as CSV with header `Date,Recipe,Ingredients,Notes`.
/// Dates are formatted `YYYY-MM-DD (Weekday)`; ingredients joined with `; `.
pub fn export_csv(plan: &MealPlan, recipes: &RecipeMap) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["Date", "Recipe", "Ingredients", "Notes"])?;

    for entry in &plan.entries {
        let recipe = entry.recipe_id.and_then(|id| recipes.get(&id));

        let date = entry.date.format("%Y-%m-%d (%A)").to_string();
        let title = recipe.map_or("No recipe", |r| r.title.as_str());
        let ingredients = recipe.map_or_else(String::new, |r| {
            r.ingredients
                .iter()
                .map(|i| i.text.as_str())
                .collect::<Vec<_>>()
                .join("; ")
        });

        writer.write_record([&date, title, &ingredients, &entry.notes])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Io(e.into_error()))?;
    Ok(String::from_utf8(bytes)?)
}
