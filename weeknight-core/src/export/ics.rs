//! ICS calendar export (RFC 5545).
//!
//! One all-day VEVENT per planned day with a recipe. Calendar apps that
//! imported a plan before re-import it by UID, so the UID scheme
//! `meal-<planId>-<date>-<recipeId>@<domain>` must stay stable.

use chrono::Duration;

use crate::export::RecipeMap;
use crate::types::{MealPlan, Recipe};

const MAX_LINE_OCTETS: usize = 75;

#[derive(Debug, Clone)]
pub struct IcsOptions {
    /// Domain part of event UIDs.
    pub domain: String,
}

impl Default for IcsOptions {
    fn default() -> Self {
        Self {
            domain: "weeknight.app".to_string(),
        }
    }
}

pub fn export_ics(plan: &MealPlan, recipes: &RecipeMap, options: &IcsOptions) -> String {
    let mut out = String::new();

    push_line(&mut out, "BEGIN:VCALENDAR");
    push_line(&mut out, "VERSION:2.0");
    push_line(&mut out, "PRODID:-//weeknight//meal planner//EN");
    push_line(&mut out, "CALSCALE:GREGORIAN");

    for entry in &plan.entries {
        let Some(recipe) = entry.recipe_id.and_then(|id| recipes.get(&id)) else {
            continue;
        };

        push_line(&mut out, "BEGIN:VEVENT");
        push_line(
            &mut out,
            &format!(
                "UID:meal-{}-{}-{}@{}",
                plan.id, entry.date, recipe.id, options.domain
            ),
        );
        push_line(
            &mut out,
            &format!("DTSTAMP:{}", plan.updated_at.format("%Y%m%dT%H%M%SZ")),
        );
        push_line(
            &mut out,
            &format!("DTSTART;VALUE=DATE:{}", entry.date.format("%Y%m%d")),
        );
        push_line(
            &mut out,
            &format!(
                "DTEND;VALUE=DATE:{}",
                (entry.date + Duration::days(1)).format("%Y%m%d")
            ),
        );
        push_line(&mut out, &format!("SUMMARY:{}", escape_text(&recipe.title)));
        push_line(
            &mut out,
            &format!(
                "DESCRIPTION:{}",
                escape_text(&event_description(recipe, &entry.notes))
            ),
        );
        push_line(&mut out, "END:VEVENT");
    }

    push_line(&mut out, "END:VCALENDAR");
    out
}

/// Event body: plan notes, ingredients, numbered steps, source URL.
fn event_description(recipe: &Recipe, notes: &str) -> String {
    let mut parts: Vec<String> = Vec::new();

    if !notes.is_empty() {
        parts.push(format!("Notes: {notes}"));
        parts.push(String::new());
    }

    if !recipe.ingredients.is_empty() {
        parts.push("INGREDIENTS:".to_string());
        for ingredient in &recipe.ingredients {
            parts.push(format!("\u{2022} {}", ingredient.text));
        }
        parts.push(String::new());
    }

    if !recipe.steps.is_empty() {
        parts.push("INSTRUCTIONS:".to_string());
        for (i, step) in recipe.steps.iter().enumerate() {
            parts.push(format!("{}. {}", i + 1, step));
        }
        parts.push(String::new());
    }

    if let Some(url) = &recipe.source_url {
        parts.push(format!("Recipe URL: {url}"));
    }

    parts.join("\n")
}

/// RFC 5545 TEXT escaping: backslash, semicolon, comma, newline.
fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            ';' => out.push_str("\\;"),
            ',' => out.push_str("\\,"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            _ => out.push(c),
        }
    }
    out
}

/// Write a content line, folding at 75 octets with CRLF + space
/// continuations, never splitting inside a UTF-8 sequence.
fn push_line(out: &mut String, line: &str) {
    let mut budget = MAX_LINE_OCTETS;
    let mut segment_len = 0;

    for c in line.chars() {
        let char_len = c.len_utf8();
        if segment_len + char_len > budget {
            out.push_str("\r\n ");
            segment_len = 0;
            // Continuation lines spend one octet on the leading space.
            budget = MAX_LINE_OCTETS - 1;
        }
        out.push(c);
        segment_len += char_len;
    }

    out.push_str("\r\n");
}
