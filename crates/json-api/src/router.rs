//! App Router

use salvo::Router;

use crate::{cart, healthcheck, observability, orders};

/// Routes described by the generated OpenAPI document.
pub(crate) fn api_router() -> Router {
    Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("cart/calculate").post(cart::calculate::handler))
        .push(
            Router::with_path("orders")
                .get(orders::index::handler)
                .post(orders::create::handler)
                .push(
                    Router::with_path("number/{order_number}")
                        .get(orders::get_by_number::handler),
                )
                .push(
                    Router::with_path("{uuid}")
                        .get(orders::get::handler)
                        .push(Router::with_path("status").put(orders::update_status::handler)),
                ),
        )
}

/// Routes served outside the OpenAPI document.
pub(crate) fn ops_router() -> Router {
    Router::with_path("metrics").get(observability::metrics_handler)
}
