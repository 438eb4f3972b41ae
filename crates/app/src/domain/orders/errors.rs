//! Orders service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::orders::models::InvalidOrderStatus;

/// Name of the unique constraint on `orders.order_number`.
pub(crate) const ORDER_NUMBER_CONSTRAINT: &str = "orders_order_number_key";

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("order not found")]
    NotFound,

    #[error("order already exists")]
    AlreadyExists,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error(transparent)]
    InvalidStatus(#[from] InvalidOrderStatus),

    #[error("line {position} has quantity {quantity} which can't be stored")]
    InvalidQuantity { position: usize, quantity: u32 },

    #[error("storage error")]
    Sql(#[source] Error),
}

impl OrdersServiceError {
    /// Whether the error came from the store rather than from the caller's
    /// input or a missing order.
    #[must_use]
    pub fn is_persistence(&self) -> bool {
        !matches!(
            self,
            Self::NotFound | Self::InvalidStatus(_) | Self::InvalidQuantity { .. }
        )
    }
}

impl From<Error> for OrdersServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

/// Whether `error` is a collision on the order number unique constraint.
pub(crate) fn is_order_number_collision(error: &Error) -> bool {
    error
        .as_database_error()
        .is_some_and(|db| {
            matches!(db.kind(), ErrorKind::UniqueViolation)
                && db.constraint() == Some(ORDER_NUMBER_CONSTRAINT)
        })
}
