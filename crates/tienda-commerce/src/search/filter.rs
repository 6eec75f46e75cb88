//! Search filter types.

use crate::catalog::Product;
use crate::ids::CategoryId;
use serde::{Deserialize, Serialize};

/// Category keyword meaning "no category restriction".
pub const ALL_CATEGORIES: &str = "todas";

/// Normalize text for matching: trimmed and lowercased.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Which category a product must belong to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CategoryFilter {
    /// Every category.
    #[default]
    All,
    /// A single category.
    Only(CategoryId),
}

impl CategoryFilter {
    /// Create a single-category filter.
    pub fn only(category: impl Into<CategoryId>) -> Self {
        CategoryFilter::Only(category.into())
    }

    /// Parse a category selector; `"todas"` (any case) selects everything.
    pub fn parse(s: &str) -> Self {
        if normalize(s) == ALL_CATEGORIES {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(CategoryId::new(s.trim()))
        }
    }

    /// Check if a category passes this filter.
    pub fn allows(&self, category: &CategoryId) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => wanted == category,
        }
    }
}

impl std::fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CategoryFilter::All => f.write_str(ALL_CATEGORIES),
            CategoryFilter::Only(category) => write!(f, "{category}"),
        }
    }
}

/// Combined category and text filter for the catalog page.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProductFilter {
    category: CategoryFilter,
    text: String,
}

impl ProductFilter {
    /// A filter that matches every product.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to a category.
    pub fn with_category(mut self, category: CategoryFilter) -> Self {
        self.category = category;
        self
    }

    /// Require the text to appear in the product's name, artist or description.
    pub fn with_text(mut self, text: &str) -> Self {
        self.text = normalize(text);
        self
    }

    /// The active category filter.
    pub fn category(&self) -> &CategoryFilter {
        &self.category
    }

    /// The normalized search text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Check if a product passes both the category and the text filter.
    pub fn matches(&self, product: &Product) -> bool {
        if !self.category.allows(&product.category) {
            return false;
        }
        if self.text.is_empty() {
            return true;
        }

        let haystack = normalize(&format!(
            "{} {} {}",
            product.name,
            product.artist.as_deref().unwrap_or_default(),
            product.description.as_deref().unwrap_or_default(),
        ));
        haystack.contains(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Clp;

    fn tape() -> Product {
        Product::new("a", "Kind of Blue", "cassette", Clp::new(3000))
            .with_artist("Miles Davis")
            .with_description("Edición original de 1959")
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        assert!(ProductFilter::new().matches(&tape()));
    }

    #[test]
    fn test_text_is_case_and_space_insensitive() {
        assert!(ProductFilter::new().with_text("  KIND of ").matches(&tape()));
        assert!(ProductFilter::new().with_text("miles").matches(&tape()));
        assert!(ProductFilter::new().with_text("EDICIÓN").matches(&tape()));
        assert!(!ProductFilter::new().with_text("coltrane").matches(&tape()));
    }

    #[test]
    fn test_category_and_text_combine() {
        let filter = ProductFilter::new()
            .with_category(CategoryFilter::only("vinilo"))
            .with_text("blue");
        assert!(!filter.matches(&tape()));

        let filter = filter.with_category(CategoryFilter::only("cassette"));
        assert!(filter.matches(&tape()));
    }

    #[test]
    fn test_parse_all_keyword() {
        assert_eq!(CategoryFilter::parse("todas"), CategoryFilter::All);
        assert_eq!(CategoryFilter::parse(" Todas "), CategoryFilter::All);
        assert_eq!(CategoryFilter::parse("vinilo"), CategoryFilter::only("vinilo"));
        assert_eq!(CategoryFilter::parse("vinilo").to_string(), "vinilo");
        assert_eq!(CategoryFilter::All.to_string(), "todas");
    }
}
