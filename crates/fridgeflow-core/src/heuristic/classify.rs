//! Dish classification by keyword rules.
//!
//! Rules are an ordered table of `(predicate, dish)` pairs; the first
//! predicate that holds decides the dish, and [`FALLBACK_DISH`] covers the
//! rest.

use super::ingredients::Pantry;

const PASTA_KEYWORDS: &[&str] = &["pasta", "spaghetti", "noodle", "penne", "macaroni"];

/// Dish returned when no rule matches.
pub const FALLBACK_DISH: &str = "Simple Weeknight Skillet";

/// A single classification rule.
pub struct DishRule {
    pub dish: &'static str,
    pub matches: fn(&Pantry) -> bool,
}

/// Classification rules in priority order.
pub const DISH_RULES: &[DishRule] = &[
    DishRule {
        dish: "Quick Egg Wraps",
        matches: |p| p.has("egg") && p.has("tortilla"),
    },
    DishRule {
        dish: "Spinach & Egg Skillet",
        matches: |p| p.has("egg") && p.has("spinach"),
    },
    DishRule {
        dish: "Weeknight Pasta",
        matches: |p| p.has_any(PASTA_KEYWORDS),
    },
    DishRule {
        dish: "One-Pan Chicken & Rice",
        matches: |p| p.has("chicken") && p.has("rice"),
    },
    DishRule {
        dish: "Pan-Seared Chicken Plate",
        matches: |p| p.has("chicken"),
    },
    DishRule {
        dish: "Fried Rice Remix",
        matches: |p| p.has("rice"),
    },
];

/// Pick the dish name for a pantry.
pub fn classify_dish(pantry: &Pantry) -> &'static str {
    DISH_RULES
        .iter()
        .find(|rule| (rule.matches)(pantry))
        .map_or(FALLBACK_DISH, |rule| rule.dish)
}
