//! Catalog Config

use std::time::Duration;

use audioshelf_app::{context::CatalogBackend, domain::catalog::http::HttpCatalogConfig};
use clap::Args;

/// Catalog lookup settings.
#[derive(Debug, Args)]
pub struct CatalogConfig {
    /// Base URL of the catalog service; the local `audiobooks` table is used when unset
    #[arg(long, env = "CATALOG_URL")]
    pub catalog_url: Option<String>,

    /// Upper bound on one item request, in seconds
    #[arg(
        long,
        env = "CATALOG_TIMEOUT_SECONDS",
        default_value_t = 5_u64,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub catalog_timeout_seconds: u64,

    /// Upper bound on one batch lookup, in seconds
    #[arg(
        long,
        env = "CATALOG_BATCH_TIMEOUT_SECONDS",
        default_value_t = 10_u64,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub catalog_batch_timeout_seconds: u64,

    /// Concurrent item requests per batch lookup
    #[arg(long, env = "CATALOG_MAX_CONCURRENCY", default_value_t = 8_usize)]
    pub catalog_max_concurrency: usize,
}

impl CatalogConfig {
    #[must_use]
    pub fn backend(&self) -> CatalogBackend {
        match &self.catalog_url {
            Some(url) => CatalogBackend::Http(HttpCatalogConfig {
                base_url: url.clone(),
                item_timeout: Duration::from_secs(self.catalog_timeout_seconds),
                batch_timeout: Duration::from_secs(self.catalog_batch_timeout_seconds),
                max_concurrency: self.catalog_max_concurrency,
            }),
            None => CatalogBackend::Database,
        }
    }
}
