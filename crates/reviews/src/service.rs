//! Seam to the review endpoints.

use std::cell::{Cell, RefCell};

use chrono::{DateTime, Utc};

use storefront_core::{DomainError, DomainResult, ProductId, ReviewId};

use crate::review::{NewReview, Review};

/// Review CRUD as exposed by the remote API.
pub trait ReviewService {
    /// `GET /reviews/{productId}`.
    fn fetch_reviews(&self, product_id: &ProductId) -> DomainResult<Vec<Review>>;

    /// `POST /reviews`; returns the stored review.
    fn submit_review(&self, review: &NewReview) -> DomainResult<Review>;

    /// `DELETE /reviews/{id}`.
    fn delete_review(&self, id: &ReviewId) -> DomainResult<()>;
}

/// In-memory review store for tests and local development.
///
/// Ids are sequential, timestamps come from the clock passed to `with_clock`
/// (wall clock by default).
#[derive(Debug)]
pub struct InMemoryReviewService {
    reviews: RefCell<Vec<Review>>,
    next_id: Cell<u64>,
    clock: fn() -> DateTime<Utc>,
}

impl Default for InMemoryReviewService {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryReviewService {
    pub fn new() -> Self {
        Self::with_clock(Utc::now)
    }

    pub fn with_clock(clock: fn() -> DateTime<Utc>) -> Self {
        Self {
            reviews: RefCell::new(Vec::new()),
            next_id: Cell::new(1),
            clock,
        }
    }

    pub fn len(&self) -> usize {
        self.reviews.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.reviews.borrow().is_empty()
    }
}

impl ReviewService for InMemoryReviewService {
    fn fetch_reviews(&self, product_id: &ProductId) -> DomainResult<Vec<Review>> {
        Ok(self
            .reviews
            .borrow()
            .iter()
            .filter(|r| &r.product_id == product_id)
            .cloned()
            .collect())
    }

    fn submit_review(&self, review: &NewReview) -> DomainResult<Review> {
        let id = self.next_id.get();
        self.next_id.set(id + 1);

        let stored = Review {
            id: ReviewId::new(id.to_string()),
            product_id: review.product_id.clone(),
            reviewer_name: Some(review.reviewer_name.clone()),
            rating: f64::from(review.rating),
            comment: review.comment.clone(),
            created_at: Some((self.clock)()),
        };
        self.reviews.borrow_mut().push(stored.clone());
        Ok(stored)
    }

    fn delete_review(&self, id: &ReviewId) -> DomainResult<()> {
        let mut reviews = self.reviews.borrow_mut();
        let index = reviews
            .iter()
            .position(|r| &r.id == id)
            .ok_or_else(DomainError::not_found)?;
        reviews.remove(index);
        Ok(())
    }
}
