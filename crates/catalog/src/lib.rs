//! Product catalog module.
//!
//! This crate holds the listing-side logic of the storefront, implemented
//! purely as deterministic in-process code (no HTTP, no rendering):
//!
//! - [`product`]: catalog records as the API delivers them
//! - [`draft`]: create/update form input and its validated payload
//! - [`filter`]: criteria and the pure filter/sort pipeline
//! - [`engine`]: the stateful filter engine a listing view talks to
//! - [`source`]: the seams to whatever fetches and writes the catalog

pub mod draft;
pub mod engine;
pub mod filter;
pub mod product;
pub mod source;

mod lenient;

pub use draft::{ProductDraft, ProductPayload};
pub use engine::CatalogFilterEngine;
pub use filter::{ALL_CATEGORIES, FilterCriteria, SortOrder, recompute};
pub use product::{ProductDetail, ProductListResponse, ProductSummary};
pub use source::{CatalogSource, InMemoryCatalog, ProductStore};
