//! Cart pricing errors.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::domain::catalog::{CatalogError, models::AudiobookId};

#[derive(Debug, Error)]
pub enum PricingError {
    #[error("cart line {position} for item {item_id} has invalid quantity {quantity}")]
    InvalidCartLine {
        position: usize,
        item_id: AudiobookId,
        quantity: i64,
    },

    #[error("cart total {total} exceeds the largest order amount")]
    TotalOutOfRange { total: Decimal },

    #[error("catalog unavailable")]
    CatalogUnavailable(#[source] CatalogError),
}

impl From<CatalogError> for PricingError {
    fn from(error: CatalogError) -> Self {
        Self::CatalogUnavailable(error)
    }
}
