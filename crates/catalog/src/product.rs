use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use storefront_core::{Entity, Price, ProductId};

use crate::draft::ProductPayload;
use crate::lenient;

/// Listing entry, as delivered by `GET /products`.
///
/// Read-only: the filter engine never mutates or fabricates these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub id: ProductId,
    pub name: String,
    #[serde(deserialize_with = "lenient::price")]
    pub price: Price,
    pub category: String,
    #[serde(
        rename = "imageUrls",
        alias = "imageUrl",
        default,
        deserialize_with = "lenient::first_image",
        skip_serializing_if = "Option::is_none"
    )]
    pub image_url: Option<String>,
}

impl ProductSummary {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: Price,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: ProductId::new(id),
            name: name.into(),
            price,
            category: category.into(),
            image_url: None,
        }
    }

    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }
}

impl Entity for ProductSummary {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Envelope of the listing endpoint: `{"data": [...]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductListResponse {
    pub data: Vec<ProductSummary>,
}

/// Full product record used by the detail page and the update form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(deserialize_with = "lenient::price")]
    pub price: Price,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, rename = "use")]
    pub usage: String,
    #[serde(default, deserialize_with = "lenient::opt_count")]
    pub minimum_quantity: Option<u64>,
    #[serde(default, deserialize_with = "lenient::opt_price")]
    pub selling_price: Option<Price>,
    #[serde(default)]
    pub added_by: String,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient::opt_count")]
    pub quantity_on_hand: Option<u64>,
    #[serde(default, deserialize_with = "lenient::opt_count")]
    pub reserved_quantity: Option<u64>,
    #[serde(default, deserialize_with = "lenient::opt_count")]
    pub discount: Option<u64>,
    #[serde(default, deserialize_with = "lenient::image_list")]
    pub image_urls: Vec<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ProductDetail {
    /// Record stored for `payload` under `id`. Timestamps are left to the
    /// store.
    pub fn from_payload(id: ProductId, payload: &ProductPayload) -> Self {
        Self {
            id,
            name: payload.name.clone(),
            description: payload.description.clone(),
            price: payload.price,
            category: payload.category.clone(),
            tags: payload.tags.clone(),
            usage: payload.usage.clone(),
            minimum_quantity: Some(payload.minimum_quantity),
            selling_price: Some(payload.selling_price),
            added_by: payload.added_by.clone(),
            expires_at: Some(payload.expires_at),
            quantity_on_hand: Some(payload.quantity_on_hand),
            reserved_quantity: Some(payload.reserved_quantity),
            discount: Some(u64::from(payload.discount)),
            image_urls: payload.image_urls.clone(),
            created_at: None,
            updated_at: None,
        }
    }

    /// Listing view of this record.
    pub fn summary(&self) -> ProductSummary {
        ProductSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            price: self.price,
            category: self.category.clone(),
            image_url: self.image_urls.first().cloned(),
        }
    }

    /// Units that can still be sold (on hand minus reserved, floored at zero).
    pub fn available_quantity(&self) -> u64 {
        self.quantity_on_hand
            .unwrap_or(0)
            .saturating_sub(self.reserved_quantity.unwrap_or(0))
    }

    /// Whether the product has expired at `now`. Products without an
    /// expiry date never expire.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }

    /// Price after the percentage discount, if any.
    pub fn discounted_price(&self) -> Price {
        let pct = self.discount.unwrap_or(0).min(100) as f64;
        Price::new(self.price.amount() * (100.0 - pct) / 100.0).unwrap_or(Price::ZERO)
    }
}

impl Entity for ProductDetail {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn price(amount: f64) -> Price {
        Price::new(amount).unwrap()
    }

    #[test]
    fn summary_accepts_single_image_string() {
        let json = r#"{"id":"p1","name":"Mug","price":12,"category":"Kitchen","imageUrls":"https://cdn/mug.png"}"#;
        let p: ProductSummary = serde_json::from_str(json).unwrap();
        assert_eq!(p.id.as_str(), "p1");
        assert_eq!(p.price, price(12.0));
        assert_eq!(p.image_url.as_deref(), Some("https://cdn/mug.png"));
    }

    #[test]
    fn summary_takes_first_image_of_array() {
        let json = r#"{"id":1,"name":"Mug","price":"4.5","category":"Kitchen","imageUrls":["","a.png","b.png"]}"#;
        let p: ProductSummary = serde_json::from_str(json).unwrap();
        assert_eq!(p.id.as_str(), "1");
        assert_eq!(p.price, price(4.5));
        assert_eq!(p.image_url.as_deref(), Some("a.png"));
    }

    #[test]
    fn summary_without_image_is_accepted() {
        let json = r#"{"id":"p1","name":"Mug","price":1,"category":"Kitchen"}"#;
        let p: ProductSummary = serde_json::from_str(json).unwrap();
        assert_eq!(p.image_url, None);
    }

    #[test]
    fn summary_rejects_negative_price() {
        let json = r#"{"id":"p1","name":"Mug","price":-1,"category":"Kitchen"}"#;
        assert!(serde_json::from_str::<ProductSummary>(json).is_err());
    }

    #[test]
    fn list_response_unwraps_data_envelope() {
        let json = r#"{"data":[{"id":"a","name":"A","price":1,"category":"X"},{"id":"b","name":"B","price":2,"category":"Y"}]}"#;
        let resp: ProductListResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.data.len(), 2);
        assert_eq!(resp.data[1].category, "Y");
    }

    #[test]
    fn detail_parses_string_numbers_and_dates() {
        let json = r#"{
            "id": "p9",
            "name": "Honey",
            "description": "Raw honey",
            "price": "250.00",
            "category": "Food",
            "tags": ["organic"],
            "use": "Eat",
            "minimumQuantity": "2",
            "sellingPrice": "275",
            "addedBy": "admin",
            "expiresAt": "2027-01-01T00:00:00Z",
            "quantityOnHand": "10",
            "reservedQuantity": 3,
            "discount": "10",
            "imageUrls": ["h.png"],
            "createdAt": "2026-01-01T10:00:00Z",
            "updatedAt": null
        }"#;
        let d: ProductDetail = serde_json::from_str(json).unwrap();
        assert_eq!(d.price, price(250.0));
        assert_eq!(d.minimum_quantity, Some(2));
        assert_eq!(d.selling_price, Some(price(275.0)));
        assert_eq!(d.usage, "Eat");
        assert_eq!(d.available_quantity(), 7);
        assert_eq!(d.discounted_price(), price(225.0));
        assert_eq!(d.expires_at, Some(Utc.with_ymd_and_hms(2027, 1, 1, 0, 0, 0).unwrap()));
        assert_eq!(d.updated_at, None);
        assert_eq!(d.summary().image_url.as_deref(), Some("h.png"));
    }

    #[test]
    fn detail_treats_blank_numeric_strings_as_unset() {
        let json = r#"{"id":"p","name":"N","price":1,"category":"C","discount":"","sellingPrice":""}"#;
        let d: ProductDetail = serde_json::from_str(json).unwrap();
        assert_eq!(d.discount, None);
        assert_eq!(d.selling_price, None);
        assert_eq!(d.discounted_price(), price(1.0));
    }

    #[test]
    fn detail_rejects_fractional_quantity() {
        let json = r#"{"id":"p","name":"N","price":1,"category":"C","quantityOnHand":1.5}"#;
        assert!(serde_json::from_str::<ProductDetail>(json).is_err());
    }

    #[test]
    fn expiry_is_inclusive_of_now() {
        let at = Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap();
        let json = r#"{"id":"p","name":"N","price":1,"category":"C","expiresAt":"2026-06-01T00:00:00Z"}"#;
        let d: ProductDetail = serde_json::from_str(json).unwrap();
        assert!(d.is_expired(at));
        assert!(!d.is_expired(at - chrono::Duration::seconds(1)));
    }

    #[test]
    fn detail_from_payload_carries_every_field() {
        let payload = ProductPayload {
            name: "Honey".to_string(),
            description: "Raw".to_string(),
            price: price(20.0),
            category: "Food".to_string(),
            tags: vec!["organic".to_string()],
            usage: "Eat".to_string(),
            minimum_quantity: 1,
            selling_price: price(25.0),
            added_by: "admin".to_string(),
            expires_at: Utc.with_ymd_and_hms(2027, 1, 1, 0, 0, 0).unwrap(),
            quantity_on_hand: 8,
            reserved_quantity: 3,
            discount: 50,
            image_urls: vec!["h.png".to_string()],
        };
        let d = ProductDetail::from_payload(ProductId::new("p3"), &payload);
        assert_eq!(d.id.as_str(), "p3");
        assert_eq!(d.discount, Some(50));
        assert_eq!(d.discounted_price(), price(10.0));
        assert_eq!(d.available_quantity(), 5);
        assert_eq!(d.summary().image_url.as_deref(), Some("h.png"));
        assert_eq!(d.created_at, None);
    }
}
