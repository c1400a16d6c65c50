//! Listing and detail sessions.
//!
//! A session performs the two-phase initialization the listing view needs:
//! it starts with an empty engine and only calls `load` once a fetch has
//! settled successfully. Fetch failures are reported to the caller and leave
//! the engine as it was.
//!
//! Product writes go through the same session. A write the server committed
//! is reported as a success even when the listing refetch after it fails;
//! the listing then stays stale until the next `refresh`.

use storefront_catalog::{
    CatalogFilterEngine, CatalogSource, FilterCriteria, ProductDetail, ProductDraft, ProductStore,
};
use storefront_core::{DomainResult, ProductId};
use storefront_reviews::{ReviewService, ReviewThread};

use crate::config::StorefrontConfig;

pub struct ListingSession<S> {
    source: S,
    engine: CatalogFilterEngine,
    loaded: bool,
}

impl<S: CatalogSource> ListingSession<S> {
    pub fn new(source: S, config: &StorefrontConfig) -> Self {
        Self {
            source,
            engine: CatalogFilterEngine::with_criteria(FilterCriteria::with_sort_order(config.default_sort)),
            loaded: false,
        }
    }

    /// Fetch the listing and replace the engine's source list.
    /// Returns the number of products loaded.
    pub fn refresh(&mut self) -> DomainResult<usize> {
        let products = self.source.fetch_products().inspect_err(|err| {
            tracing::error!(error = %err, "failed to fetch products");
        })?;
        let count = products.len();
        self.engine.load(products);
        self.loaded = true;
        Ok(count)
    }

    /// False until the first successful `refresh`.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn engine(&self) -> &CatalogFilterEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut CatalogFilterEngine {
        &mut self.engine
    }

    /// Fetch a product and its reviews for the detail page.
    pub fn open_product(&self, id: &ProductId, reviews: &impl ReviewService) -> DomainResult<ProductPage> {
        let detail = self.source.fetch_product(id).inspect_err(|err| {
            tracing::error!(product_id = %id, error = %err, "failed to fetch product");
        })?;
        let mut thread = ReviewThread::new(detail.id.clone());
        thread.refresh(reviews)?;
        Ok(ProductPage { detail, reviews: thread })
    }
}

impl<S: CatalogSource + ProductStore> ListingSession<S> {
    /// Validate `draft`, create the product, and refetch the listing.
    pub fn create_product(&mut self, draft: &ProductDraft) -> DomainResult<ProductDetail> {
        let payload = draft.to_payload()?;
        let created = self.source.create_product(&payload).inspect_err(|err| {
            tracing::error!(error = %err, "failed to create product");
        })?;
        tracing::info!(product_id = %created.id, "product created");
        self.refresh_after_write();
        Ok(created)
    }

    /// Validate `draft`, update the product shown on `page`, and refetch the
    /// listing. `page` keeps its old record if the update fails.
    pub fn update_product(&mut self, page: &mut ProductPage, draft: &ProductDraft) -> DomainResult<()> {
        let payload = draft.to_payload()?;
        let updated = self
            .source
            .update_product(&page.detail.id, &payload)
            .inspect_err(|err| {
                tracing::error!(product_id = %page.detail.id, error = %err, "failed to update product");
            })?;
        tracing::info!(product_id = %updated.id, "product updated");
        page.detail = updated;
        self.refresh_after_write();
        Ok(())
    }

    /// Delete the product and refetch the listing.
    pub fn delete_product(&mut self, id: &ProductId) -> DomainResult<()> {
        self.source.delete_product(id).inspect_err(|err| {
            tracing::error!(product_id = %id, error = %err, "failed to delete product");
        })?;
        tracing::info!(product_id = %id, "product deleted");
        self.refresh_after_write();
        Ok(())
    }

    fn refresh_after_write(&mut self) {
        if self.refresh().is_err() {
            tracing::warn!("listing is stale after a committed product write");
        }
    }
}

/// Everything the product detail page shows.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductPage {
    pub detail: ProductDetail,
    pub reviews: ReviewThread,
}

impl ProductPage {
    /// Update form pre-filled with this product.
    pub fn edit_form(&self) -> ProductDraft {
        ProductDraft::from_detail(&self.detail)
    }
}
