//! Review thread of a single product.

use storefront_core::{DomainError, DomainResult, Entity, ProductId, ReviewId};

use crate::review::{Review, ReviewDraft};
use crate::service::ReviewService;

/// Reviews shown under one product, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewThread {
    product_id: ProductId,
    reviews: Vec<Review>,
}

impl ReviewThread {
    pub fn new(product_id: ProductId) -> Self {
        Self {
            product_id,
            reviews: Vec::new(),
        }
    }

    pub fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    pub fn len(&self) -> usize {
        self.reviews.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reviews.is_empty()
    }

    /// Replace the thread wholesale with reviews of this product.
    /// Reviews of other products are dropped.
    pub fn load(&mut self, reviews: Vec<Review>) {
        let total = reviews.len();
        self.reviews = reviews
            .into_iter()
            .filter(|r| r.product_id == self.product_id)
            .collect();
        if self.reviews.len() != total {
            tracing::warn!(
                product_id = %self.product_id,
                dropped = total - self.reviews.len(),
                "ignored reviews of another product"
            );
        }
    }

    /// Append a review the server has confirmed.
    pub fn push(&mut self, review: Review) -> DomainResult<()> {
        if review.product_id != self.product_id {
            return Err(DomainError::invalid_argument(format!(
                "review {} belongs to product {}, not {}",
                review.id, review.product_id, self.product_id
            )));
        }
        self.reviews.push(review);
        Ok(())
    }

    /// Drop a review by id.
    pub fn remove(&mut self, id: &ReviewId) -> DomainResult<Review> {
        let index = self
            .reviews
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(DomainError::not_found)?;
        Ok(self.reviews.remove(index))
    }

    /// Mean rating, or `None` for an empty thread.
    pub fn average_rating(&self) -> Option<f64> {
        if self.reviews.is_empty() {
            return None;
        }
        let sum: f64 = self.reviews.iter().map(|r| r.rating).sum();
        Some(sum / self.reviews.len() as f64)
    }

    /// Fetch this product's reviews through `service` and load them.
    pub fn refresh(&mut self, service: &impl ReviewService) -> DomainResult<()> {
        let reviews = service.fetch_reviews(&self.product_id).inspect_err(|err| {
            tracing::error!(product_id = %self.product_id, error = %err, "failed to fetch reviews");
        })?;
        self.load(reviews);
        Ok(())
    }

    /// Validate `draft`, submit it, and append the stored review.
    ///
    /// The draft is kept when validation or the service call fails so the
    /// user can retry. Once the service has stored the review the draft is
    /// cleared, even if the returned review names another product and is
    /// therefore not appended.
    pub fn submit(&mut self, draft: &mut ReviewDraft, service: &impl ReviewService) -> DomainResult<&Review> {
        let new_review = draft.validate(&self.product_id)?;
        let stored = service.submit_review(&new_review).inspect_err(|err| {
            tracing::error!(product_id = %self.product_id, error = %err, "failed to submit review");
        })?;
        draft.clear();
        tracing::info!(product_id = %self.product_id, review_id = %stored.id, "review submitted");
        self.push(stored).inspect_err(|err| {
            tracing::error!(product_id = %self.product_id, error = %err, "stored review not appended");
        })?;
        Ok(&self.reviews[self.reviews.len() - 1])
    }

    /// Delete through `service`, then drop the review locally.
    pub fn delete(&mut self, id: &ReviewId, service: &impl ReviewService) -> DomainResult<Review> {
        service.delete_review(id).inspect_err(|err| {
            tracing::error!(review_id = %id, error = %err, "failed to delete review");
        })?;
        tracing::info!(review_id = %id, "review deleted");
        self.remove(id)
    }
}
