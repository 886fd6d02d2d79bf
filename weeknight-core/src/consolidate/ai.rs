//! AI consolidation strategy.
//!
//! Sends the raw ingredient list to the configured LLM provider and parses
//! the structured response. Callers treat any error as "AI unavailable" and
//! fall back to the heuristic strategy.

use serde::Deserialize;

use super::ConsolidatedIngredient;
use crate::llm::{LlmError, LlmProvider};

const CONSOLIDATE_PROMPT: &str = "You are an expert grocery shopper. Consolidate the ingredient list \
below into a smart shopping list.

Rules:
- Group ingredients that would be purchased as the same item at a grocery \
store (e.g. \"minced garlic\" and \"garlic cloves\" are both \"garlic\").
- Keep fresh and dried forms of herbs separate.
- Combine quantities when the units allow it (\"1 cup flour\" + \"2 cups \
flour\" = \"3 cups flour\"); when they don't, describe the total practically \
(e.g. \"needed for 3 recipes\").

Respond with JSON only, in this shape:
{\"consolidated_ingredients\": [{\"ingredient\": \"...\", \"quantity\": \"...\"}]}

Ingredients:
";

#[derive(Debug, Deserialize)]
struct AiConsolidationResponse {
    consolidated_ingredients: Vec<AiConsolidatedItem>,
}

#[derive(Debug, Deserialize)]
struct AiConsolidatedItem {
    ingredient: String,
    quantity: String,
}

/// Ask the provider to consolidate the raw ingredient list.
pub(crate) async fn consolidate_with_ai(
    provider: &dyn LlmProvider,
    ingredients: &[String],
) -> Result<Vec<ConsolidatedIngredient>, LlmError> {
    let mut prompt = String::from(CONSOLIDATE_PROMPT);
    for ingredient in ingredients {
        prompt.push_str("- ");
        prompt.push_str(ingredient);
        prompt.push('\n');
    }

    let response = provider.complete(&prompt).await?;

    let parsed: AiConsolidationResponse = serde_json::from_str(response.trim())
        .map_err(|e| LlmError::ParseError(format!("Bad consolidation response: {e}")))?;

    let mut items: Vec<AiConsolidatedItem> = parsed
        .consolidated_ingredients
        .into_iter()
        .filter(|item| !item.ingredient.trim().is_empty())
        .collect();
    // Same ordering convention as the heuristic path.
    items.sort_by_key(|item| item.ingredient.to_lowercase());

    Ok(items
        .into_iter()
        .map(|item| {
            let quantity = item.quantity.trim().to_string();
            ConsolidatedIngredient {
                text: item.ingredient.trim().to_string(),
                annotation: (!quantity.is_empty()).then_some(quantity),
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::FakeProvider;

    #[tokio::test]
    async fn parses_structured_response() {
        let provider = FakeProvider::with_response(
            "shopping list",
            r#"{"consolidated_ingredients": [
                {"ingredient": "onions", "quantity": "2"},
                {"ingredient": "flour", "quantity": "3 cups"}
            ]}"#,
        );

        let items = consolidate_with_ai(&provider, &["1 onion".to_string()])
            .await
            .unwrap();
        assert_eq!(items.len(), 2);
        // Sorted by ingredient name
        assert_eq!(items[0].text, "flour");
        assert_eq!(items[0].annotation.as_deref(), Some("3 cups"));
        assert_eq!(items[1].text, "onions");
    }

    #[tokio::test]
    async fn empty_quantity_becomes_bare_line() {
        let provider = FakeProvider::with_response(
            "shopping list",
            r#"{"consolidated_ingredients": [{"ingredient": "salt", "quantity": ""}]}"#,
        );

        let items = consolidate_with_ai(&provider, &["salt".to_string()])
            .await
            .unwrap();
        assert_eq!(items[0].display_line(), "salt");
    }

    #[tokio::test]
    async fn malformed_json_is_a_parse_error() {
        let provider = FakeProvider::new().with_default_response("no json here");
        let result = consolidate_with_ai(&provider, &["salt".to_string()]).await;
        assert!(matches!(result, Err(LlmError::ParseError(_))));
    }

    #[tokio::test]
    async fn prompt_includes_every_ingredient() {
        let provider = FakeProvider::with_response(
            "2 cups flour",
            r#"{"consolidated_ingredients": [{"ingredient": "flour", "quantity": "2 cups"}]}"#,
        );

        let items = consolidate_with_ai(&provider, &["2 cups flour".to_string()])
            .await
            .unwrap();
        assert_eq!(items[0].text, "flour");
    }
}
