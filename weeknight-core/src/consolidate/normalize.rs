//! Ingredient normalization for shopping-list grouping.
//!
//! Reduces an ingredient line (e.g., "2 cups flour, sifted") to a grouping
//! key ("flour") so that textually similar mentions from different recipes
//! merge into one shopping-list line. The key is transient - it is never
//! shown to the user or persisted.
//!
//! The word lists here are deliberately heuristic. Changing them changes how
//! shopping lists group, so additions should be conservative.

/// Units that can follow a leading quantity. A quantity is only stripped
/// when one of these follows it, so "3 eggs" keeps its count.
const UNITS: &[&str] = &[
    "cup",
    "cups",
    "tbsp",
    "tsp",
    "teaspoon",
    "teaspoons",
    "tablespoon",
    "tablespoons",
    "lb",
    "lbs",
    "pound",
    "pounds",
    "oz",
    "ounce",
    "ounces",
    "clove",
    "cloves",
    "can",
    "cans",
    "package",
    "packages",
    "rib",
    "ribs",
];

/// Size and prep words dropped wherever they appear.
const DESCRIPTORS: &[&str] = &[
    "large", "small", "medium", "extra", "chopped", "diced", "sliced", "minced", "peeled",
];

/// Spices and herbs whose qualifiers are meaningful: "dried thyme" and
/// "fresh thyme" are different grocery purchases.
const SPICES: &[&str] = &[
    "thyme", "rosemary", "basil", "oregano", "parsley", "cilantro", "sage", "salt", "pepper",
];

/// Qualifier words retained alongside a spice name.
const SPICE_QUALIFIERS: &[&str] = &["fresh", "dried", "kosher", "black", "white", "ground"];

/// Generic third words that add nothing to a grouping decision.
const GENERIC_SUFFIXES: &[&str] = &["leaves", "powder", "flakes", "bits"];

/// Compute the grouping key for one ingredient line.
pub fn grouping_key(raw: &str) -> String {
    let original = raw.trim().to_lowercase();

    let stripped = strip_parentheticals(&original);
    let stripped = strip_leading_quantity(&stripped);

    let words: Vec<&str> = stripped
        .split_whitespace()
        .filter(|w| !DESCRIPTORS.contains(w))
        .collect();

    let key = if words.iter().any(|w| SPICES.contains(w)) {
        // Keep qualifiers next to the spice so forms group separately.
        words
            .iter()
            .filter(|w| SPICE_QUALIFIERS.contains(*w) || SPICES.contains(*w))
            .copied()
            .collect::<Vec<_>>()
            .join(" ")
    } else {
        match words.len() {
            0..=2 => words.join(" "),
            3 if GENERIC_SUFFIXES.contains(&words[2]) => words[..2].join(" "),
            3 => words.join(" "),
            _ => words[..2].join(" "),
        }
    };

    // Over-stripped short inputs fall back to the raw text.
    if key.len() < 3 {
        original
    } else {
        key
    }
}

/// Drop parenthetical asides: "1 can (15 oz) beans" -> "1 can beans".
fn strip_parentheticals(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut depth = 0usize;
    for c in s.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            _ if depth == 0 => out.push(c),
            _ => {}
        }
    }
    out
}

/// Strip a leading quantity followed by a unit word. Mixed numbers
/// ("2 1/2 cups") and unicode fractions ("½ cup") both count as quantities.
fn strip_leading_quantity(s: &str) -> String {
    let tokens: Vec<&str> = s.split_whitespace().collect();

    let mut idx = 0;
    while idx < tokens.len() && is_quantity_token(tokens[idx]) {
        idx += 1;
    }

    if idx == 0 {
        return s.to_string();
    }

    // A bare number with no unit is part of the ingredient ("3 eggs").
    match tokens.get(idx) {
        Some(token) if UNITS.contains(&token.trim_end_matches('.')) => {
            tokens[idx + 1..].join(" ")
        }
        _ => s.to_string(),
    }
}

fn is_quantity_token(token: &str) -> bool {
    !token.is_empty()
        && token.chars().all(|c| {
            c.is_ascii_digit()
                || c == '.'
                || c == '/'
                || matches!(c, '¼' | '½' | '¾' | '⅓' | '⅔' | '⅛' | '⅜' | '⅝' | '⅞')
        })
}
