//! Get Order By Number Handler

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{
    extensions::*,
    orders::{errors::into_status_error, responses::OrderResponse},
};

/// Get Order By Number
///
/// Looks an order up by its human-facing order number.
#[endpoint(
    tags("orders"),
    summary = "Get Order By Number",
    responses(
        (status_code = StatusCode::OK, description = "Order found"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
    ),
)]
pub(crate) async fn handler(
    order_number: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.state()?;

    let order = state
        .app
        .orders
        .get_order_by_number(&order_number.into_inner())
        .await
        .map_err(into_status_error)?;

    Ok(Json(order.into()))
}
