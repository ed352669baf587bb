//! Substitution tips derived from what is (and is not) on hand.

use super::ingredients::Pantry;

pub const TIP_ONION: &str = "No onion? Use shallots or leeks.";
pub const TIP_GARLIC: &str = "No garlic? Use garlic powder or extra herbs.";
pub const TIP_SPINACH_FETA: &str = "Spinach pairs nicely with feta or parmesan.";
pub const TIP_RICE_EGG: &str = "Fried-rice tip: scramble an egg for protein.";

/// Rules in output order; each is checked independently.
const TIP_RULES: &[(fn(&Pantry) -> bool, &str)] = &[
    (|p| !p.has("onion"), TIP_ONION),
    (|p| !p.has("garlic"), TIP_GARLIC),
    (|p| p.has("spinach") && !p.has("feta"), TIP_SPINACH_FETA),
    (|p| p.has("rice") && !p.has("egg"), TIP_RICE_EGG),
];

/// Every tip whose rule applies, in fixed rule order.
pub fn suggest_substitutions(pantry: &Pantry) -> Vec<String> {
    TIP_RULES
        .iter()
        .filter(|(applies, _)| applies(pantry))
        .map(|(_, tip)| (*tip).to_string())
        .collect()
}
