//! Product create/update form input.
//!
//! A [`ProductDraft`] holds what the user typed, verbatim. Turning it into a
//! [`ProductPayload`] is the only place numeric text is parsed; nothing is
//! coerced silently, the first bad field is reported instead.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, DomainResult, Price};

use crate::product::ProductDetail;

/// Raw form state for adding or editing a product.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: String,
    pub category: String,
    pub tags: Vec<String>,
    pub usage: String,
    pub minimum_quantity: String,
    pub selling_price: String,
    pub added_by: String,
    pub expires_at: String,
    pub quantity_on_hand: String,
    pub reserved_quantity: String,
    pub discount: String,
    pub image_urls: Vec<String>,
}

/// Validated body for `POST /products` and `PATCH /products/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    pub name: String,
    pub description: String,
    pub price: Price,
    pub category: String,
    pub tags: Vec<String>,
    #[serde(rename = "use")]
    pub usage: String,
    pub minimum_quantity: u64,
    pub selling_price: Price,
    pub added_by: String,
    pub expires_at: DateTime<Utc>,
    pub quantity_on_hand: u64,
    pub reserved_quantity: u64,
    pub discount: u8,
    pub image_urls: Vec<String>,
}

impl ProductDraft {
    /// Seed the update form from an existing product.
    pub fn from_detail(detail: &ProductDetail) -> Self {
        fn count(v: Option<u64>) -> String {
            v.map(|n| n.to_string()).unwrap_or_default()
        }

        Self {
            name: detail.name.clone(),
            description: detail.description.clone(),
            price: detail.price.amount().to_string(),
            category: detail.category.clone(),
            tags: detail.tags.clone(),
            usage: detail.usage.clone(),
            minimum_quantity: count(detail.minimum_quantity),
            selling_price: detail
                .selling_price
                .map(|p| p.amount().to_string())
                .unwrap_or_default(),
            added_by: detail.added_by.clone(),
            expires_at: detail
                .expires_at
                .map(|at| at.to_rfc3339())
                .unwrap_or_default(),
            quantity_on_hand: count(detail.quantity_on_hand),
            reserved_quantity: count(detail.reserved_quantity),
            discount: count(detail.discount),
            image_urls: detail.image_urls.clone(),
        }
    }

    /// Append a tag. Blank input is ignored; returns whether a tag was added.
    pub fn add_tag(&mut self, tag: &str) -> bool {
        push_trimmed(&mut self.tags, tag)
    }

    /// Append an image URL. Blank input is ignored; returns whether one was added.
    pub fn add_image_url(&mut self, url: &str) -> bool {
        push_trimmed(&mut self.image_urls, url)
    }

    pub fn remove_tag(&mut self, index: usize) -> Option<String> {
        (index < self.tags.len()).then(|| self.tags.remove(index))
    }

    pub fn remove_image_url(&mut self, index: usize) -> Option<String> {
        (index < self.image_urls.len()).then(|| self.image_urls.remove(index))
    }

    /// Validate every field and build the request body.
    pub fn to_payload(&self) -> DomainResult<ProductPayload> {
        let name = required(&self.name, "Name")?;
        let category = required(&self.category, "Category")?;
        let price = parse_price(&self.price, "Price")?;
        let selling_price = parse_price(&self.selling_price, "Selling price")?;
        let minimum_quantity = parse_count(&self.minimum_quantity, "Minimum quantity")?;
        let quantity_on_hand = parse_count(&self.quantity_on_hand, "Quantity on hand")?;
        let reserved_quantity = parse_count(&self.reserved_quantity, "Reserved quantity")?;
        let discount = parse_discount(&self.discount)?;
        let expires_at = parse_expiry(&self.expires_at)?;

        Ok(ProductPayload {
            name,
            description: self.description.trim().to_string(),
            price,
            category,
            tags: self.tags.clone(),
            usage: self.usage.trim().to_string(),
            minimum_quantity,
            selling_price,
            added_by: self.added_by.trim().to_string(),
            expires_at,
            quantity_on_hand,
            reserved_quantity,
            discount,
            image_urls: self.image_urls.clone(),
        })
    }
}

fn push_trimmed(list: &mut Vec<String>, value: &str) -> bool {
    let value = value.trim();
    if value.is_empty() {
        return false;
    }
    list.push(value.to_string());
    true
}

fn required(value: &str, field: &str) -> DomainResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(DomainError::validation(format!("{field} is required.")));
    }
    Ok(value.to_string())
}

fn parse_price(value: &str, field: &str) -> DomainResult<Price> {
    value
        .parse()
        .map_err(|_| DomainError::validation(format!("{field} must be a non-negative number.")))
}

fn parse_count(value: &str, field: &str) -> DomainResult<u64> {
    value
        .trim()
        .parse()
        .map_err(|_| DomainError::validation(format!("{field} must be a whole number of 0 or more.")))
}

fn parse_discount(value: &str) -> DomainResult<u8> {
    value
        .trim()
        .parse::<u8>()
        .ok()
        .filter(|pct| *pct <= 100)
        .ok_or_else(|| DomainError::validation("Discount must be a whole percentage between 0 and 100."))
}

/// Accepts RFC 3339, the `datetime-local` input format (taken as UTC), or a
/// bare date (midnight UTC).
fn parse_expiry(value: &str) -> DomainResult<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(at) = DateTime::parse_from_rfc3339(value) {
        return Ok(at.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(at) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(at.and_utc());
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|at| at.and_utc())
        .ok_or_else(|| DomainError::validation("Expiry date must be a valid date."))
}
