//! Ingredient text normalization and keyword predicates.

/// Split free text into normalized ingredient phrases.
///
/// Splits on newlines and commas, trims, collapses whitespace runs to a
/// single space and lower-cases. Empty tokens are dropped; order and
/// duplicates are kept.
pub fn parse_ingredients(text: &str) -> Vec<String> {
    text.split(['\n', ','])
        .map(|token| {
            token
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
                .to_lowercase()
        })
        .filter(|token| !token.is_empty())
        .collect()
}

/// Parsed ingredient list with substring lookups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pantry {
    items: Vec<String>,
}

impl Pantry {
    pub fn parse(text: &str) -> Self {
        Self {
            items: parse_ingredients(text),
        }
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// True when any phrase contains `keyword` as a substring.
    pub fn has(&self, keyword: &str) -> bool {
        self.items.iter().any(|item| item.contains(keyword))
    }

    /// True when any phrase contains any of `keywords`.
    pub fn has_any(&self, keywords: &[&str]) -> bool {
        keywords.iter().any(|k| self.has(k))
    }
}
