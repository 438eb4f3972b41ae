//! Catalog
//!
//! Read-only resolution of audiobook identifiers to their current title,
//! price and availability.

pub mod errors;
pub mod http;
pub mod lookup;
pub mod models;
mod repository;

pub use errors::CatalogError;
pub use http::HttpCatalogClient;
pub use lookup::*;
pub use repository::PgCatalogLookup;
