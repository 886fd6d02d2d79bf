//! Shopping-list consolidation.
//!
//! Merges the ingredient lists of a plan's recipes (optionally plus the
//! household staples) into one deduplicated list. Two strategies share the
//! same output shape: the heuristic grouping in [`normalize`], always
//! available, and an optional AI pass that combines quantities. AI failures
//! never reach the caller - the heuristic result is returned instead.

mod ai;
pub mod normalize;

use std::collections::BTreeMap;

use serde::Serialize;
use utoipa::ToSchema;

use crate::llm::LlmProvider;
use crate::types::Recipe;

/// One line of the consolidated shopping list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ConsolidatedIngredient {
    /// Display text: the first-seen surface form, not the grouping key.
    pub text: String,
    /// Usage annotation, e.g. "needed for 3 recipes".
    pub annotation: Option<String>,
}

impl ConsolidatedIngredient {
    /// Render as a shopping-list line.
    pub fn display_line(&self) -> String {
        match &self.annotation {
            Some(annotation) => format!("{} ({})", self.text, annotation),
            None => self.text.clone(),
        }
    }
}

/// Render consolidated items as plain text, one item per line, no header.
pub fn format_shopping_list(items: &[ConsolidatedIngredient]) -> String {
    items
        .iter()
        .map(ConsolidatedIngredient::display_line)
        .collect::<Vec<_>>()
        .join("\n")
}

pub struct Consolidator {
    provider: Option<Box<dyn LlmProvider>>,
}

impl Default for Consolidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Consolidator {
    /// Heuristic-only consolidator.
    pub fn new() -> Self {
        Self { provider: None }
    }

    /// Consolidator that tries the AI strategy first and falls back to the
    /// heuristic on any failure.
    pub fn with_ai(provider: Box<dyn LlmProvider>) -> Self {
        Self {
            provider: Some(provider),
        }
    }

    /// Consolidate the shopping-list ingredients of the given recipes,
    /// in recipe order.
    pub async fn consolidate(&self, recipes: &[Recipe]) -> Vec<ConsolidatedIngredient> {
        let raw: Vec<String> = recipes
            .iter()
            .flat_map(|r| r.shopping_list_ingredients())
            .map(str::to_string)
            .collect();

        if raw.is_empty() {
            return Vec::new();
        }

        if let Some(provider) = &self.provider {
            match ai::consolidate_with_ai(provider.as_ref(), &raw).await {
                Ok(items) if !items.is_empty() => return items,
                Ok(_) => {
                    tracing::warn!("AI consolidation returned no items, using heuristic");
                }
                Err(e) => {
                    tracing::warn!(error = %e, "AI consolidation failed, using heuristic");
                }
            }
        }

        heuristic_consolidate(&raw)
    }

    /// Consolidate and append the user's staple groceries, skipping staples
    /// that already group into a recipe-derived line.
    pub async fn consolidate_with_staples(
        &self,
        recipes: &[Recipe],
        staples: &[String],
    ) -> Vec<ConsolidatedIngredient> {
        let mut items = self.consolidate(recipes).await;

        let recipe_keys: Vec<String> = items
            .iter()
            .map(|item| normalize::grouping_key(&item.text))
            .collect();

        let mut staple_items: Vec<&String> = staples
            .iter()
            .filter(|s| !s.trim().is_empty())
            .filter(|s| !recipe_keys.contains(&normalize::grouping_key(s)))
            .collect();
        staple_items.sort_by_key(|s| s.to_lowercase());

        items.extend(staple_items.into_iter().map(|s| ConsolidatedIngredient {
            text: s.clone(),
            annotation: None,
        }));

        items
    }
}

/// Group by normalized key, count mentions, and keep the first-seen surface
/// text for display. Output is sorted by grouping key.
fn heuristic_consolidate(raw: &[String]) -> Vec<ConsolidatedIngredient> {
    // BTreeMap keeps the output alphabetical by grouping key.
    let mut groups: BTreeMap<String, (String, usize)> = BTreeMap::new();

    for ingredient in raw {
        let key = normalize::grouping_key(ingredient);
        groups
            .entry(key)
            .and_modify(|(_, count)| *count += 1)
            .or_insert_with(|| (ingredient.clone(), 1));
    }

    groups
        .into_values()
        .map(|(text, count)| ConsolidatedIngredient {
            text,
            annotation: (count > 1).then(|| format!("needed for {count} recipes")),
        })
        .collect()
}
