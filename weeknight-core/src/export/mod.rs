//! Meal plan export formatters.
//!
//! Each formatter is a pure function over a plan plus the recipes its
//! entries reference, resolved by the caller. Output formats are a
//! compatibility surface - existing calendar/todo imports depend on them -
//! so changes here need matching test updates.

mod csv;
mod ics;
mod json;
mod text;

pub use csv::export_csv;
pub use ics::{export_ics, IcsOptions};
pub use json::export_json;
pub use text::export_text;

use std::collections::HashMap;

use uuid::Uuid;

use crate::types::Recipe;

/// Map of recipe id to recipe for a plan's entries. Ids that did not resolve
/// (deleted recipes) are simply absent; formatters render those entries
/// without a recipe.
pub type RecipeMap = HashMap<Uuid, Recipe>;
