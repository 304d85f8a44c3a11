use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Категория товара, выведенная из тегов.
///
/// Precedence is fixed: "bracelet" is checked before "collier", so a
/// product carrying both tags resolves to Bracelet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Bracelet,
    Collier,
}

impl Category {
    /// Key used in the surcharge table and in product tags.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Bracelet => "bracelet",
            Category::Collier => "collier",
        }
    }

    /// Resolve a category from product tags, bracelet before collier.
    pub fn from_tags(tags: &[String]) -> Option<Category> {
        if tags.iter().any(|t| t == "bracelet") {
            Some(Category::Bracelet)
        } else if tags.iter().any(|t| t == "collier") {
            Some(Category::Collier)
        } else {
            None
        }
    }
}

/// Таблица надбавок: категория → название варианта → надбавка к базовой цене.
///
/// Loaded once per run and shared read-only; the engine never mutates it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SurchargeTable(pub HashMap<String, HashMap<String, f64>>);

impl SurchargeTable {
    /// Surcharge for a variant title within a category.
    ///
    /// A missing variant title is a normal case and defaults to 0.0.
    /// A missing category only happens on caller error (categories come
    /// from recognized tags) and also yields 0.0 rather than panicking.
    pub fn surcharge_for(&self, category: Category, variant_title: &str) -> f64 {
        self.0
            .get(category.as_str())
            .and_then(|by_title| by_title.get(variant_title))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> SurchargeTable {
        serde_json::from_str(r#"{"bracelet":{"Small":2.5,"Large":4.0},"collier":{"45cm":3.0}}"#)
            .unwrap()
    }

    #[test]
    fn test_category_precedence_bracelet_wins() {
        let tags = vec!["collier".to_string(), "bracelet".to_string()];
        assert_eq!(Category::from_tags(&tags), Some(Category::Bracelet));
    }

    #[test]
    fn test_category_unrecognized_tags() {
        let tags = vec!["necklace".to_string()];
        assert_eq!(Category::from_tags(&tags), None);
    }

    #[test]
    fn test_surcharge_lookup() {
        let t = table();
        assert_eq!(t.surcharge_for(Category::Bracelet, "Small"), 2.5);
        assert_eq!(t.surcharge_for(Category::Collier, "45cm"), 3.0);
    }

    #[test]
    fn test_missing_variant_title_defaults_to_zero() {
        let t = table();
        assert_eq!(t.surcharge_for(Category::Bracelet, "Unknown"), 0.0);
    }

    #[test]
    fn test_missing_category_defaults_to_zero() {
        let t: SurchargeTable = serde_json::from_str(r#"{"bracelet":{}}"#).unwrap();
        assert_eq!(t.surcharge_for(Category::Collier, "45cm"), 0.0);
    }

    #[test]
    fn test_never_mixes_categories() {
        let t = table();
        // "Small" exists only under bracelet
        assert_eq!(t.surcharge_for(Category::Collier, "Small"), 0.0);
    }
}
