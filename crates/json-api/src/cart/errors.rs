//! Cart Errors

use salvo::http::StatusError;
use tracing::warn;

use audioshelf_app::domain::pricing::PricingError;

pub(crate) fn into_status_error(error: PricingError) -> StatusError {
    match error {
        PricingError::InvalidCartLine { .. } => StatusError::bad_request()
            .brief(error.to_string())
            .detail("invalid_cart_line"),
        PricingError::TotalOutOfRange { .. } => StatusError::bad_request()
            .brief(error.to_string())
            .detail("total_out_of_range"),
        PricingError::CatalogUnavailable(source) => {
            warn!("catalog unavailable while pricing cart: {source}");

            StatusError::service_unavailable()
                .brief("catalog service unavailable")
                .detail("service_unavailable")
        }
    }
}
