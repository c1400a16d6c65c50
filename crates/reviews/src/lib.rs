//! Product reviews module.
//!
//! Review form validation and the per-product review thread shown on the
//! product detail page. Submitting and deleting go through [`ReviewService`];
//! the thread only changes after the service confirms.

pub mod review;
pub mod service;
pub mod thread;

pub use review::{ANONYMOUS, NewReview, Review, ReviewDraft};
pub use service::{InMemoryReviewService, ReviewService};
pub use thread::ReviewThread;
