//! REST endpoints of the catalog API.

use storefront_core::{ProductId, ReviewId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    ListProducts,
    GetProduct(ProductId),
    CreateProduct,
    UpdateProduct(ProductId),
    DeleteProduct(ProductId),
    ListReviews(ProductId),
    CreateReview,
    DeleteReview(ReviewId),
}

impl Endpoint {
    pub fn method(&self) -> Method {
        match self {
            Endpoint::ListProducts | Endpoint::GetProduct(_) | Endpoint::ListReviews(_) => Method::Get,
            Endpoint::CreateProduct | Endpoint::CreateReview => Method::Post,
            Endpoint::UpdateProduct(_) => Method::Patch,
            Endpoint::DeleteProduct(_) | Endpoint::DeleteReview(_) => Method::Delete,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Endpoint::ListProducts | Endpoint::CreateProduct => "/products".to_string(),
            Endpoint::GetProduct(id) | Endpoint::UpdateProduct(id) | Endpoint::DeleteProduct(id) => {
                format!("/products/{}", segment(id.as_str()))
            }
            Endpoint::ListReviews(id) => format!("/reviews/{}", segment(id.as_str())),
            Endpoint::CreateReview => "/reviews".to_string(),
            Endpoint::DeleteReview(id) => format!("/reviews/{}", segment(id.as_str())),
        }
    }

    /// Absolute URL under `base_url` (no trailing slash expected).
    pub fn url(&self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.path())
    }
}

/// Percent-encoded path segment; only RFC 3986 unreserved bytes pass through.
fn segment(raw: &str) -> String {
    urlencoding::encode(raw).into_owned()
}
