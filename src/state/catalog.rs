//! Product catalog and search filtering

use serde::{Deserialize, Serialize};

/// A product card shown in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    /// Text matched by the search bar; falls back to `name`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub searchable_name: Option<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
}

impl Product {
    pub fn new(name: &str, category: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            searchable_name: None,
            category: category.to_string(),
            description: description.to_string(),
        }
    }

    pub fn search_key(&self) -> &str {
        self.searchable_name.as_deref().unwrap_or(&self.name)
    }

    /// Case-insensitive substring match; the empty query matches everything
    pub fn matches(&self, query: &str) -> bool {
        self.search_key()
            .to_lowercase()
            .contains(&query.to_lowercase())
    }
}

/// Indices of the products visible for `query`, in catalog order
pub fn visible_indices(products: &[Product], query: &str) -> Vec<usize> {
    products
        .iter()
        .enumerate()
        .filter(|(_, p)| p.matches(query))
        .map(|(idx, _)| idx)
        .collect()
}

/// The "no results" indicator is shown only for a non-empty query with no hits
pub fn show_no_results(visible_count: usize, query: &str) -> bool {
    visible_count == 0 && !query.is_empty()
}

/// Catalog shipped with the binary
pub fn builtin_catalog() -> Vec<Product> {
    vec![
        Product::new(
            "BPC-157 5mg",
            "Recovery",
            "Lyophilized research peptide, 5mg vial.",
        ),
        Product::new(
            "TB-500 5mg",
            "Recovery",
            "Thymosin beta-4 fragment, 5mg vial.",
        ),
        Product {
            searchable_name: Some("BPC-157 TB-500 Blend Wolverine".to_string()),
            ..Product::new(
                "BPC-157 + TB-500 Blend",
                "Recovery",
                "Combined 10mg vial, 5mg of each.",
            )
        },
        Product::new(
            "Semaglutide 5mg",
            "Metabolic",
            "GLP-1 receptor agonist, 5mg vial.",
        ),
        Product::new(
            "Tirzepatide 10mg",
            "Metabolic",
            "Dual GIP/GLP-1 receptor agonist, 10mg vial.",
        ),
        Product {
            searchable_name: Some("CJC-1295 Ipamorelin".to_string()),
            ..Product::new(
                "CJC-1295 / Ipamorelin",
                "Growth",
                "Combined 10mg vial.",
            )
        },
        Product::new(
            "GHK-Cu 50mg",
            "Cosmetic",
            "Copper peptide, 50mg vial.",
        ),
        Product::new(
            "Bacteriostatic Water 10ml",
            "Supplies",
            "0.9% benzyl alcohol, 10ml vial.",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn names(products: &[Product], indices: &[usize]) -> Vec<String> {
        indices.iter().map(|&i| products[i].name.clone()).collect()
    }

    #[test]
    fn test_empty_query_shows_everything() {
        let products = builtin_catalog();
        let visible = visible_indices(&products, "");
        assert_eq!(visible.len(), products.len());
        assert!(!show_no_results(visible.len(), ""));
    }

    #[test]
    fn test_query_is_case_insensitive() {
        let products = builtin_catalog();
        let visible = visible_indices(&products, "bpc");
        assert_eq!(
            names(&products, &visible),
            vec!["BPC-157 5mg", "BPC-157 + TB-500 Blend"]
        );
        assert_eq!(visible_indices(&products, "BpC"), visible);
    }

    #[test]
    fn test_searchable_name_is_used_over_display_name() {
        let products = builtin_catalog();
        let visible = visible_indices(&products, "wolverine");
        assert_eq!(names(&products, &visible), vec!["BPC-157 + TB-500 Blend"]);
    }

    #[test]
    fn test_visible_subset_matches_definition() {
        let products = builtin_catalog();
        for query in ["", "5", "mg", "TIDE", "water", "x", "-", "zzz"] {
            let visible = visible_indices(&products, query);
            let expected: Vec<usize> = (0..products.len())
                .filter(|&i| {
                    products[i]
                        .search_key()
                        .to_lowercase()
                        .contains(&query.to_lowercase())
                })
                .collect();
            assert_eq!(visible, expected, "query {query:?}");
        }
    }

    #[test]
    fn test_no_results_only_for_non_empty_query() {
        let products = builtin_catalog();
        let visible = visible_indices(&products, "zzz");
        assert!(visible.is_empty());
        assert!(show_no_results(visible.len(), "zzz"));
        assert!(!show_no_results(0, ""));
    }

    #[test]
    fn test_product_deserializes_without_optional_fields() {
        let product: Product = serde_json::from_str(r#"{"name": "Kisspeptin"}"#).unwrap();
        assert_eq!(product.search_key(), "Kisspeptin");
        assert!(product.category.is_empty());
    }
}
