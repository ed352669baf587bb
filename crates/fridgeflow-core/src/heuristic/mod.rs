//! Deterministic planner: keyword classification plus a fixed schedule.
//!
//! Never fails. Any text, including an empty string, yields the fallback
//! dish and the standard six-step layout.

pub mod classify;
pub mod ingredients;
pub mod schedule;
pub mod substitutions;

pub use classify::{DISH_RULES, DishRule, FALLBACK_DISH, classify_dish};
pub use ingredients::{Pantry, parse_ingredients};
pub use schedule::{TimeBudget, clamp_minutes};
pub use substitutions::suggest_substitutions;

use crate::model::Plan;

/// Build a plan from free-text ingredients and a time limit in minutes.
pub fn plan(ingredients: &str, time_limit_minutes: i64) -> Plan {
    let pantry = Pantry::parse(ingredients);
    let budget = TimeBudget::allocate(time_limit_minutes);

    let plan = Plan {
        dish: classify_dish(&pantry).to_string(),
        steps: budget.steps(),
        substitutions: suggest_substitutions(&pantry),
    };

    tracing::debug!(
        ingredients = pantry.items().len(),
        total_sec = budget.total,
        dish = %plan.dish,
        "heuristic plan built"
    );
    plan
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn worked_example() {
        let plan = plan("2 eggs, spinach, tortillas", 20);
        assert_eq!(plan.dish, "Quick Egg Wraps");
        assert_eq!(plan.steps.len(), 6);
        assert_eq!(plan.steps[0].duration_seconds, 120);
        assert_eq!(plan.steps[1].duration_seconds, 360);
        assert_eq!(plan.steps[2].duration_seconds, 420);
        assert_eq!(plan.steps[3].duration_seconds, 240);
        assert_eq!(plan.steps[4].duration_seconds, 120);
        assert_eq!(plan.steps[5].start_offset_seconds, 1140);
        assert_eq!(
            plan.substitutions,
            vec![
                "No onion? Use shallots or leeks.",
                "No garlic? Use garlic powder or extra herbs.",
                "Spinach pairs nicely with feta or parmesan.",
            ]
        );
    }

    #[test]
    fn empty_input_still_produces_full_plan() {
        let plan = plan("", 30);
        assert_eq!(plan.dish, FALLBACK_DISH);
        assert_eq!(plan.steps.len(), 6);
        assert_eq!(plan.steps[5].start_offset_seconds, 30 * 60 - 60);
    }

    #[test]
    fn serve_offset_tracks_clamped_total() {
        for minutes in [-5, 0, 10, 15, 37, 90, 240] {
            let plan = plan("chicken, rice", minutes);
            let total = clamp_minutes(minutes) as u32 * 60;
            assert_eq!(plan.steps.len(), 6);
            assert_eq!(plan.steps[5].start_offset_seconds, total - 60);
            assert!(plan.steps.iter().all(|s| s.duration_seconds > 0));
        }
    }
}
