//! Order Errors

use salvo::http::StatusError;
use tracing::{error, warn};

use audioshelf_app::domain::{checkout::CheckoutError, orders::OrdersServiceError};

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::NotFound => StatusError::not_found()
            .brief("order not found")
            .detail("not_found"),
        OrdersServiceError::InvalidStatus(source) => StatusError::unprocessable_entity()
            .brief(source.to_string())
            .detail("invalid_status"),
        OrdersServiceError::InvalidQuantity { .. } => StatusError::bad_request()
            .brief(error.to_string())
            .detail("invalid_cart_line"),
        error => {
            error!("order storage failed: {error}");

            StatusError::internal_server_error()
                .brief("failed to access orders")
                .detail("internal_error")
        }
    }
}

pub(crate) fn checkout_status_error(error: CheckoutError) -> StatusError {
    let kind = error.kind();

    match error {
        CheckoutError::EmptyCart => StatusError::bad_request()
            .brief(error.to_string())
            .detail("bad_request"),
        CheckoutError::InvalidCartLine { .. } | CheckoutError::TotalOutOfRange { .. } => {
            StatusError::bad_request()
                .brief(error.to_string())
                .detail(kind)
        }
        CheckoutError::ServiceUnavailable(source) => {
            warn!("catalog unavailable during checkout: {source}");

            StatusError::service_unavailable()
                .brief("catalog service unavailable")
                .detail(kind)
        }
        CheckoutError::Internal(source) => {
            error!("failed to persist order: {source}");

            StatusError::internal_server_error()
                .brief("failed to create order")
                .detail(kind)
        }
    }
}
