//! Filter criteria and the pure filter/sort pipeline.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, Price};

use crate::product::ProductSummary;

/// Category value meaning "no category restriction". Compared case-insensitively.
pub const ALL_CATEGORIES: &str = "All";

/// Price sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    #[serde(alias = "ascending")]
    Asc,
    #[serde(alias = "descending")]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl core::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = DomainError;

    /// Unknown values are a contract violation; there is no fallback order.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortOrder::Asc),
            "desc" | "descending" => Ok(SortOrder::Desc),
            _ => Err(DomainError::invalid_argument(format!(
                "unknown sort order {s:?} (expected asc or desc)"
            ))),
        }
    }
}

/// User-selected listing criteria.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    pub category: String,
    pub min_price: Option<Price>,
    pub max_price: Option<Price>,
    pub sort_order: SortOrder,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            category: ALL_CATEGORIES.to_string(),
            min_price: None,
            max_price: None,
            sort_order: SortOrder::default(),
        }
    }
}

impl FilterCriteria {
    pub fn with_sort_order(sort_order: SortOrder) -> Self {
        Self {
            sort_order,
            ..Self::default()
        }
    }

    /// True when the category criterion is the "All" sentinel (any case).
    pub fn is_all_categories(&self) -> bool {
        is_all_sentinel(&self.category)
    }

    pub fn matches_category(&self, product: &ProductSummary) -> bool {
        self.is_all_categories() || eq_ignore_case(&product.category, &self.category)
    }

    /// Both bounds are inclusive and applied independently, so inverted
    /// bounds match nothing.
    pub fn matches_price(&self, product: &ProductSummary) -> bool {
        self.min_price.is_none_or(|min| product.price >= min)
            && self.max_price.is_none_or(|max| product.price <= max)
    }

    pub fn matches(&self, product: &ProductSummary) -> bool {
        self.matches_category(product) && self.matches_price(product)
    }
}

pub(crate) fn is_all_sentinel(label: &str) -> bool {
    eq_ignore_case(label, ALL_CATEGORIES)
}

/// Unicode-aware case-insensitive equality.
pub(crate) fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

/// Derive the listing from `source` under `criteria`.
///
/// Keeps source order through filtering, then stable-sorts by price, so
/// equal prices keep their relative order in both directions. The result is
/// an owned snapshot.
pub fn recompute(source: &[ProductSummary], criteria: &FilterCriteria) -> Vec<ProductSummary> {
    let mut filtered: Vec<ProductSummary> = source
        .iter()
        .filter(|product| criteria.matches(product))
        .cloned()
        .collect();

    match criteria.sort_order {
        SortOrder::Asc => filtered.sort_by(|a, b| a.price.cmp(&b.price)),
        SortOrder::Desc => filtered.sort_by(|a, b| b.price.cmp(&a.price)),
    }

    tracing::debug!(
        source = source.len(),
        matched = filtered.len(),
        category = %criteria.category,
        sort = %criteria.sort_order,
        "catalog listing recomputed"
    );

    filtered
}
