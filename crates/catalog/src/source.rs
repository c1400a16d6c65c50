//! Seams to the fetch and write collaborators.
//!
//! The real implementation talks HTTP and lives outside this crate; the
//! engine only ever sees a settled `Vec<ProductSummary>`.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use chrono::Utc;

use storefront_core::{DomainError, DomainResult, Entity, ProductId};

use crate::draft::ProductPayload;
use crate::product::{ProductDetail, ProductListResponse, ProductSummary};

/// Read access to the remote catalog.
pub trait CatalogSource {
    /// `GET /products`.
    fn fetch_products(&self) -> DomainResult<Vec<ProductSummary>>;

    /// `GET /products/{id}`.
    fn fetch_product(&self, id: &ProductId) -> DomainResult<ProductDetail>;
}

/// Write access to the remote catalog. Each call returns once the server
/// has committed (or rejected) the change.
pub trait ProductStore {
    /// `POST /products`; returns the stored record with its assigned id.
    fn create_product(&self, payload: &ProductPayload) -> DomainResult<ProductDetail>;

    /// `PATCH /products/{id}`; returns the stored record.
    fn update_product(&self, id: &ProductId, payload: &ProductPayload) -> DomainResult<ProductDetail>;

    /// `DELETE /products/{id}`.
    fn delete_product(&self, id: &ProductId) -> DomainResult<()>;
}

impl<S> CatalogSource for Rc<S>
where
    S: CatalogSource + ?Sized,
{
    fn fetch_products(&self) -> DomainResult<Vec<ProductSummary>> {
        (**self).fetch_products()
    }

    fn fetch_product(&self, id: &ProductId) -> DomainResult<ProductDetail> {
        (**self).fetch_product(id)
    }
}

impl<S> ProductStore for Rc<S>
where
    S: ProductStore + ?Sized,
{
    fn create_product(&self, payload: &ProductPayload) -> DomainResult<ProductDetail> {
        (**self).create_product(payload)
    }

    fn update_product(&self, id: &ProductId, payload: &ProductPayload) -> DomainResult<ProductDetail> {
        (**self).update_product(id, payload)
    }

    fn delete_product(&self, id: &ProductId) -> DomainResult<()> {
        (**self).delete_product(id)
    }
}

/// Catalog held in memory, for tests, captured API responses and local
/// development.
///
/// Created products get sequential numeric ids that skip ids already present.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    products: RefCell<Vec<ProductSummary>>,
    details: RefCell<HashMap<ProductId, ProductDetail>>,
    next_id: Cell<u64>,
}

impl InMemoryCatalog {
    pub fn new(products: Vec<ProductSummary>) -> Self {
        Self {
            products: RefCell::new(products),
            ..Self::default()
        }
    }

    /// Build from a listing body (`{"data": [...]}`).
    pub fn from_json(body: &str) -> DomainResult<Self> {
        let response: ProductListResponse = serde_json::from_str(body)
            .map_err(|e| DomainError::source_failed(format!("malformed product listing: {e}")))?;
        Ok(Self::new(response.data))
    }

    /// Register a detail record. Its summary replaces a listed entry with the
    /// same id, or is appended.
    pub fn with_detail(self, detail: ProductDetail) -> Self {
        self.put(detail);
        self
    }

    pub fn len(&self) -> usize {
        self.products.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.borrow().is_empty()
    }

    fn contains(&self, id: &ProductId) -> bool {
        self.details.borrow().contains_key(id) || self.products.borrow().iter().any(|p| p.id() == id)
    }

    fn fresh_id(&self) -> ProductId {
        let mut n = self.next_id.get().max(1);
        loop {
            let id = ProductId::new(n.to_string());
            n += 1;
            if !self.contains(&id) {
                self.next_id.set(n);
                return id;
            }
        }
    }

    fn put(&self, detail: ProductDetail) {
        let summary = detail.summary();
        {
            let mut products = self.products.borrow_mut();
            match products.iter_mut().find(|p| p.id() == detail.id()) {
                Some(listed) => *listed = summary,
                None => products.push(summary),
            }
        }
        self.details.borrow_mut().insert(detail.id.clone(), detail);
    }
}

impl CatalogSource for InMemoryCatalog {
    fn fetch_products(&self) -> DomainResult<Vec<ProductSummary>> {
        Ok(self.products.borrow().clone())
    }

    fn fetch_product(&self, id: &ProductId) -> DomainResult<ProductDetail> {
        self.details.borrow().get(id).cloned().ok_or_else(DomainError::not_found)
    }
}

impl ProductStore for InMemoryCatalog {
    fn create_product(&self, payload: &ProductPayload) -> DomainResult<ProductDetail> {
        let now = Utc::now();
        let mut detail = ProductDetail::from_payload(self.fresh_id(), payload);
        detail.created_at = Some(now);
        detail.updated_at = Some(now);
        self.put(detail.clone());
        Ok(detail)
    }

    fn update_product(&self, id: &ProductId, payload: &ProductPayload) -> DomainResult<ProductDetail> {
        if !self.contains(id) {
            return Err(DomainError::not_found());
        }
        let created_at = self.details.borrow().get(id).and_then(|d| d.created_at);
        let mut detail = ProductDetail::from_payload(id.clone(), payload);
        detail.created_at = created_at;
        detail.updated_at = Some(Utc::now());
        self.put(detail.clone());
        Ok(detail)
    }

    fn delete_product(&self, id: &ProductId) -> DomainResult<()> {
        let had_detail = self.details.borrow_mut().remove(id).is_some();
        let mut products = self.products.borrow_mut();
        let listed = products.len();
        products.retain(|p| p.id() != id);
        if !had_detail && products.len() == listed {
            return Err(DomainError::not_found());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::ProductDraft;
    use storefront_core::Price;

    fn detail(id: &str) -> ProductDetail {
        let json = format!(r#"{{"id":"{id}","name":"Item {id}","price":3,"category":"Misc","imageUrls":["x.png"]}}"#);
        serde_json::from_str(&json).unwrap()
    }

    fn payload(name: &str, price: &str) -> ProductPayload {
        ProductDraft {
            name: name.to_string(),
            price: price.to_string(),
            category: "Misc".to_string(),
            selling_price: price.to_string(),
            minimum_quantity: "1".to_string(),
            quantity_on_hand: "5".to_string(),
            reserved_quantity: "0".to_string(),
            discount: "0".to_string(),
            expires_at: "2027-01-01".to_string(),
            ..ProductDraft::default()
        }
        .to_payload()
        .unwrap()
    }

    #[test]
    fn from_json_reads_listing_envelope() {
        let body = r#"{"data":[{"id":"1","name":"A","price":5,"category":"X","imageUrls":"a.png"}]}"#;
        let catalog = InMemoryCatalog::from_json(body).unwrap();
        let products = catalog.fetch_products().unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].price, Price::new(5.0).unwrap());
    }

    #[test]
    fn from_json_reports_malformed_body_as_source_error() {
        let err = InMemoryCatalog::from_json(r#"{"items":[]}"#).unwrap_err();
        assert!(matches!(err, DomainError::Source(_)));
    }

    #[test]
    fn fetch_product_finds_registered_detail() {
        let catalog = InMemoryCatalog::default().with_detail(detail("p1"));
        assert_eq!(catalog.len(), 1);
        let found = catalog.fetch_product(&ProductId::new("p1")).unwrap();
        assert_eq!(found.name, "Item p1");
        assert_eq!(catalog.fetch_products().unwrap()[0].image_url.as_deref(), Some("x.png"));
    }

    #[test]
    fn fetch_product_reports_missing_id() {
        let catalog = InMemoryCatalog::default();
        assert!(catalog.is_empty());
        assert_eq!(
            catalog.fetch_product(&ProductId::new("nope")).unwrap_err(),
            DomainError::NotFound
        );
    }

    #[test]
    fn shared_source_delegates() {
        let catalog = Rc::new(InMemoryCatalog::default().with_detail(detail("p2")));
        let shared: Rc<InMemoryCatalog> = Rc::clone(&catalog);
        assert_eq!(shared.fetch_products().unwrap().len(), 1);
        shared.delete_product(&ProductId::new("p2")).unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn create_assigns_ids_that_skip_listed_ones() {
        let body = r#"{"data":[{"id":"1","name":"A","price":5,"category":"X"}]}"#;
        let catalog = InMemoryCatalog::from_json(body).unwrap();

        let created = catalog.create_product(&payload("Kettle", "40")).unwrap();
        assert_eq!(created.id.as_str(), "2");
        assert!(created.created_at.is_some());
        assert_eq!(catalog.create_product(&payload("Pot", "9")).unwrap().id.as_str(), "3");

        let listing = catalog.fetch_products().unwrap();
        let ids: Vec<&str> = listing.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
        assert_eq!(catalog.fetch_product(&created.id).unwrap().name, "Kettle");
    }

    #[test]
    fn update_replaces_listing_entry_and_keeps_created_at() {
        let catalog = InMemoryCatalog::default();
        let created = catalog.create_product(&payload("Kettle", "40")).unwrap();

        let updated = catalog.update_product(&created.id, &payload("Kettle XL", "55")).unwrap();
        assert_eq!(updated.created_at, created.created_at);

        let listing = catalog.fetch_products().unwrap();
        assert_eq!(listing.len(), 1);
        assert_eq!(listing[0].name, "Kettle XL");
        assert_eq!(listing[0].price, Price::new(55.0).unwrap());
    }

    #[test]
    fn update_of_listed_product_without_detail_is_accepted() {
        let body = r#"{"data":[{"id":"7","name":"A","price":5,"category":"X"}]}"#;
        let catalog = InMemoryCatalog::from_json(body).unwrap();
        let updated = catalog.update_product(&ProductId::new("7"), &payload("B", "6")).unwrap();
        assert_eq!(updated.created_at, None);
        assert_eq!(catalog.fetch_products().unwrap()[0].name, "B");
    }

    #[test]
    fn writes_to_unknown_ids_are_not_found() {
        let catalog = InMemoryCatalog::default();
        let id = ProductId::new("ghost");
        assert_eq!(catalog.update_product(&id, &payload("A", "1")).unwrap_err(), DomainError::NotFound);
        assert_eq!(catalog.delete_product(&id).unwrap_err(), DomainError::NotFound);
        assert!(catalog.is_empty());
    }

    #[test]
    fn delete_removes_listing_and_detail() {
        let catalog = InMemoryCatalog::default().with_detail(detail("p1")).with_detail(detail("p2"));
        catalog.delete_product(&ProductId::new("p1")).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(
            catalog.fetch_product(&ProductId::new("p1")).unwrap_err(),
            DomainError::NotFound
        );
    }
}
