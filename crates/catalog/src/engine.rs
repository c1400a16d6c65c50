//! Stateful filter engine behind the product listing view.
//!
//! The engine owns the source list and the criteria. Every mutation
//! recomputes the derived listing synchronously, so `filtered()` is never
//! stale. It has no knowledge of how the source list was fetched or how the
//! result is rendered.

use storefront_core::{DomainResult, Price};

use crate::filter::{ALL_CATEGORIES, FilterCriteria, SortOrder, eq_ignore_case, recompute};
use crate::product::ProductSummary;

#[derive(Debug, Clone)]
pub struct CatalogFilterEngine {
    source: Vec<ProductSummary>,
    criteria: FilterCriteria,
    categories: Vec<String>,
    filtered: Vec<ProductSummary>,
}

impl Default for CatalogFilterEngine {
    fn default() -> Self {
        Self::with_criteria(FilterCriteria::default())
    }
}

impl CatalogFilterEngine {
    /// Empty engine with default criteria ("All", no bounds, ascending).
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty engine with the given criteria. The category set already
    /// holds "All".
    pub fn with_criteria(criteria: FilterCriteria) -> Self {
        Self {
            source: Vec::new(),
            criteria,
            categories: distinct_categories(&[]),
            filtered: Vec::new(),
        }
    }

    /// Replace the source list wholesale (one call per settled fetch).
    ///
    /// Criteria are kept; the category set and the listing are rebuilt.
    pub fn load(&mut self, source: Vec<ProductSummary>) {
        tracing::info!(products = source.len(), "catalog source loaded");
        self.categories = distinct_categories(&source);
        self.source = source;
        self.refresh();
    }

    /// Any label is accepted; one matching no product yields an empty listing.
    pub fn set_category(&mut self, label: impl Into<String>) {
        self.criteria.category = label.into();
        self.refresh();
    }

    /// Set or clear the inclusive price bounds. Their relative order is not
    /// checked.
    pub fn set_price_bounds(&mut self, min: Option<Price>, max: Option<Price>) {
        self.criteria.min_price = min;
        self.criteria.max_price = max;
        self.refresh();
    }

    pub fn set_sort_order(&mut self, order: SortOrder) {
        self.criteria.sort_order = order;
        self.refresh();
    }

    /// String entry point for sort controls. Unknown values fail with
    /// `InvalidArgument` and leave the criteria untouched.
    pub fn set_sort_order_str(&mut self, order: &str) -> DomainResult<()> {
        let order = order.parse::<SortOrder>().inspect_err(|err| {
            tracing::warn!(error = %err, "rejected sort order");
        })?;
        self.set_sort_order(order);
        Ok(())
    }

    /// Restore default criteria without touching the source list.
    pub fn reset_criteria(&mut self) {
        self.criteria = FilterCriteria::with_sort_order(self.criteria.sort_order);
        self.refresh();
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn source(&self) -> &[ProductSummary] {
        &self.source
    }

    /// Current derived listing.
    pub fn filtered(&self) -> &[ProductSummary] {
        &self.filtered
    }

    /// Labels for the category control: "All" first, then each distinct
    /// source category in first-seen order.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Category labels containing `query`, case-insensitively. Surrounding
    /// whitespace in the query is ignored, so a blank query returns every
    /// label.
    pub fn search_categories(&self, query: &str) -> Vec<&str> {
        let needle = query.trim().to_lowercase();
        self.categories
            .iter()
            .map(String::as_str)
            .filter(|label| needle.is_empty() || label.to_lowercase().contains(&needle))
            .collect()
    }

    /// Whether `label` would select something other than an empty listing.
    pub fn has_category(&self, label: &str) -> bool {
        self.categories.iter().any(|c| eq_ignore_case(c, label))
    }

    fn refresh(&mut self) {
        self.filtered = recompute(&self.source, &self.criteria);
    }
}

/// Exact-match de-duplication: labels differing only in case stay distinct.
fn distinct_categories(source: &[ProductSummary]) -> Vec<String> {
    let mut categories = vec![ALL_CATEGORIES.to_string()];
    for product in source {
        if !categories.iter().any(|c| c == &product.category) {
            categories.push(product.category.clone());
        }
    }
    categories
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::DomainError;

    fn product(id: &str, price: f64, category: &str) -> ProductSummary {
        ProductSummary::new(id, format!("Product {id}"), Price::new(price).unwrap(), category)
    }

    fn price(v: f64) -> Option<Price> {
        Some(Price::new(v).unwrap())
    }

    fn ids(engine: &CatalogFilterEngine) -> Vec<&str> {
        engine.filtered().iter().map(|p| p.id.as_str()).collect()
    }

    fn loaded() -> CatalogFilterEngine {
        let mut engine = CatalogFilterEngine::new();
        engine.load(vec![
            product("1", 30.0, "A"),
            product("2", 10.0, "B"),
            product("3", 20.0, "A"),
            product("4", 10.0, "b"),
        ]);
        engine
    }

    #[test]
    fn new_engine_is_empty() {
        let engine = CatalogFilterEngine::new();
        assert!(engine.filtered().is_empty());
        assert_eq!(engine.categories(), ["All"]);
        assert_eq!(engine.criteria(), &FilterCriteria::default());
    }

    #[test]
    fn engine_with_criteria_offers_all_before_load() {
        let criteria = FilterCriteria {
            category: "A".to_string(),
            ..FilterCriteria::with_sort_order(SortOrder::Desc)
        };
        let mut engine = CatalogFilterEngine::with_criteria(criteria.clone());
        assert_eq!(engine.categories(), ["All"]);
        assert_eq!(engine.search_categories("al"), vec!["All"]);
        assert_eq!(engine.criteria(), &criteria);

        engine.load(vec![product("1", 1.0, "A"), product("2", 2.0, "A")]);
        assert_eq!(ids(&engine), vec!["2", "1"]);
    }

    #[test]
    fn search_ignores_surrounding_whitespace_in_query() {
        let engine = loaded();
        assert_eq!(engine.search_categories("  b "), vec!["B", "b"]);
    }

    #[test]
    fn load_shows_everything_sorted_ascending() {
        let engine = loaded();
        assert_eq!(ids(&engine), vec!["2", "4", "3", "1"]);
    }

    #[test]
    fn set_category_recomputes() {
        let mut engine = loaded();
        engine.set_category("A");
        assert_eq!(ids(&engine), vec!["3", "1"]);

        engine.set_category("b");
        assert_eq!(ids(&engine), vec!["2", "4"]);

        engine.set_category("ALL");
        assert_eq!(engine.filtered().len(), 4);
    }

    #[test]
    fn set_price_bounds_recomputes() {
        let mut engine = loaded();
        engine.set_price_bounds(price(10.0), price(10.0));
        assert_eq!(ids(&engine), vec!["2", "4"]);

        engine.set_price_bounds(price(50.0), price(10.0));
        assert!(engine.filtered().is_empty());

        engine.set_price_bounds(None, None);
        assert_eq!(engine.filtered().len(), 4);
    }

    #[test]
    fn set_sort_order_recomputes() {
        let mut engine = loaded();
        engine.set_sort_order(SortOrder::Desc);
        assert_eq!(ids(&engine), vec!["1", "3", "2", "4"]);
    }

    #[test]
    fn invalid_sort_order_leaves_criteria_unchanged() {
        let mut engine = loaded();
        engine.set_category("A");
        engine.set_sort_order(SortOrder::Desc);
        let before = engine.criteria().clone();
        let listing_before = engine.filtered().to_vec();

        let err = engine.set_sort_order_str("sideways").unwrap_err();
        assert!(matches!(err, DomainError::InvalidArgument(_)));
        assert_eq!(engine.criteria(), &before);
        assert_eq!(engine.filtered(), listing_before.as_slice());

        engine.set_sort_order_str("asc").unwrap();
        assert_eq!(ids(&engine), vec!["3", "1"]);
    }

    #[test]
    fn reload_keeps_criteria_and_replaces_source() {
        let mut engine = loaded();
        engine.set_category("A");
        engine.load(vec![product("9", 1.0, "A"), product("8", 2.0, "C")]);
        assert_eq!(ids(&engine), vec!["9"]);
        assert_eq!(engine.source().len(), 2);
        assert_eq!(engine.categories(), ["All", "A", "C"]);
    }

    #[test]
    fn reset_criteria_keeps_sort_order() {
        let mut engine = loaded();
        engine.set_category("A");
        engine.set_price_bounds(price(25.0), None);
        engine.set_sort_order(SortOrder::Desc);
        engine.reset_criteria();
        assert_eq!(engine.criteria().category, ALL_CATEGORIES);
        assert_eq!(engine.criteria().min_price, None);
        assert_eq!(ids(&engine), vec!["1", "3", "2", "4"]);
    }

    #[test]
    fn categories_are_deduplicated_case_sensitively() {
        let engine = loaded();
        assert_eq!(engine.categories(), ["All", "A", "B", "b"]);
        assert!(engine.has_category("a"));
        assert!(!engine.has_category("Z"));
    }

    #[test]
    fn categories_come_from_source_not_listing() {
        let mut engine = loaded();
        engine.set_category("A");
        assert_eq!(engine.categories().len(), 4);
    }

    #[test]
    fn search_categories_matches_substrings_ignoring_case() {
        let mut engine = CatalogFilterEngine::new();
        engine.load(vec![
            product("1", 1.0, "Kitchen"),
            product("2", 1.0, "Garden"),
            product("3", 1.0, "Kitchenware"),
        ]);
        assert_eq!(engine.search_categories("KITCH"), vec!["Kitchen", "Kitchenware"]);
        assert_eq!(engine.search_categories("al"), vec!["All"]);
        assert_eq!(engine.search_categories("  ").len(), 4);
        assert!(engine.search_categories("zzz").is_empty());
    }
}
