//! Catalog lookup seam.

use async_trait::async_trait;
use mockall::automock;
use rustc_hash::FxHashMap;

use crate::domain::catalog::{
    errors::CatalogError,
    models::{AudiobookId, CatalogEntry},
};

/// Resolved catalog entries keyed by identifier.
pub type CatalogEntries = FxHashMap<AudiobookId, CatalogEntry>;

#[automock]
#[async_trait]
pub trait CatalogLookup: Send + Sync {
    /// Resolve a batch of identifiers.
    ///
    /// Unknown identifiers are left out of the result. An empty batch returns
    /// an empty map without performing any I/O.
    async fn resolve(&self, ids: &[AudiobookId]) -> Result<CatalogEntries, CatalogError>;
}
