use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, DomainResult, Entity, ProductId, ReviewId};

/// Display name used when a reviewer leaves the name blank.
pub const ANONYMOUS: &str = "Anonymous";

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

/// A stored review, as returned by `GET /reviews/{productId}`.
///
/// Reviews written through this crate carry whole stars, but stored ratings
/// are read as-is so fractional values from other clients still average.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: ReviewId,
    pub product_id: ProductId,
    #[serde(default)]
    pub reviewer_name: Option<String>,
    pub rating: f64,
    pub comment: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Review {
    pub fn display_name(&self) -> &str {
        self.reviewer_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(ANONYMOUS)
    }
}

impl Entity for Review {
    type Id = ReviewId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Raw review form input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewDraft {
    pub rating: String,
    pub comment: String,
    pub reviewer_name: String,
}

/// Validated body for `POST /reviews`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReview {
    pub product_id: ProductId,
    pub rating: u8,
    pub reviewer_name: String,
    pub comment: String,
}

impl ReviewDraft {
    pub fn new(rating: impl Into<String>, comment: impl Into<String>, reviewer_name: impl Into<String>) -> Self {
        Self {
            rating: rating.into(),
            comment: comment.into(),
            reviewer_name: reviewer_name.into(),
        }
    }

    /// Rating is checked before the comment; the first failure is returned.
    pub fn validate(&self, product_id: &ProductId) -> DomainResult<NewReview> {
        let rating = parse_rating(&self.rating)?;

        let comment = self.comment.trim();
        if comment.is_empty() {
            return Err(DomainError::validation("Comment cannot be empty."));
        }

        let reviewer_name = match self.reviewer_name.trim() {
            "" => ANONYMOUS,
            name => name,
        };

        Ok(NewReview {
            product_id: product_id.clone(),
            rating,
            reviewer_name: reviewer_name.to_string(),
            comment: comment.to_string(),
        })
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

fn parse_rating(raw: &str) -> DomainResult<u8> {
    raw.trim()
        .parse::<u8>()
        .ok()
        .filter(|r| (MIN_RATING..=MAX_RATING).contains(r))
        .ok_or_else(|| DomainError::validation("Rating must be a number between 1 and 5."))
}
