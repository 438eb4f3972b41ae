//! Checkout errors.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::domain::{
    catalog::{CatalogError, models::AudiobookId},
    orders::OrdersServiceError,
    pricing::PricingError,
};

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("cart empty or no purchasable items")]
    EmptyCart,

    #[error("cart line {position} for item {item_id} has invalid quantity {quantity}")]
    InvalidCartLine {
        position: usize,
        item_id: AudiobookId,
        quantity: i64,
    },

    #[error("cart total {total} exceeds the largest order amount")]
    TotalOutOfRange { total: Decimal },

    #[error("catalog service unavailable")]
    ServiceUnavailable(#[source] CatalogError),

    #[error("failed to create order")]
    Internal(#[source] OrdersServiceError),
}

impl CheckoutError {
    /// Short machine-readable label, used for logs and metrics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::EmptyCart => "empty_cart",
            Self::InvalidCartLine { .. } => "invalid_cart_line",
            Self::TotalOutOfRange { .. } => "total_out_of_range",
            Self::ServiceUnavailable(_) => "service_unavailable",
            Self::Internal(_) => "internal_error",
        }
    }
}

impl From<PricingError> for CheckoutError {
    fn from(error: PricingError) -> Self {
        match error {
            PricingError::InvalidCartLine {
                position,
                item_id,
                quantity,
            } => Self::InvalidCartLine {
                position,
                item_id,
                quantity,
            },
            PricingError::TotalOutOfRange { total } => Self::TotalOutOfRange { total },
            PricingError::CatalogUnavailable(source) => Self::ServiceUnavailable(source),
        }
    }
}

impl From<OrdersServiceError> for CheckoutError {
    fn from(error: OrdersServiceError) -> Self {
        Self::Internal(error)
    }
}
