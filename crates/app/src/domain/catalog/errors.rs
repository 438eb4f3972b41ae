//! Catalog lookup errors.

use std::time::Duration;

use thiserror::Error;

/// Failure of a catalog lookup as a whole.
///
/// Individual unknown identifiers are never errors; they are simply absent
/// from the lookup result.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog did not respond within {0:?}")]
    Timeout(Duration),

    #[error("all {attempted} catalog lookups failed")]
    AllLookupsFailed { attempted: usize },

    #[error("catalog request failed")]
    Transport(#[source] reqwest::Error),

    #[error("catalog responded with unexpected status {0}")]
    UnexpectedStatus(u16),

    #[error("catalog response could not be decoded")]
    Decode(#[source] reqwest::Error),

    #[error("catalog storage error")]
    Sql(#[source] sqlx::Error),
}
