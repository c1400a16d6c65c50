//! `storefront-app`: wiring for the storefront views.
//!
//! Configuration, the REST endpoint map the transport collaborator uses, and
//! the listing session that ties a [`CatalogSource`] to the filter engine.
//!
//! [`CatalogSource`]: storefront_catalog::CatalogSource

pub mod config;
pub mod endpoints;
pub mod session;

pub use config::StorefrontConfig;
pub use endpoints::{Endpoint, Method};
pub use session::{ListingSession, ProductPage};

/// Initialize logging and load configuration from the environment.
pub fn bootstrap() -> StorefrontConfig {
    storefront_observability::init();
    StorefrontConfig::from_env()
}
