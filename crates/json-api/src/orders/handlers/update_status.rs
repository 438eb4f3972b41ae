//! Update Order Status Handler

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use audioshelf_app::domain::orders::{
    OrdersServiceError,
    models::{OrderStatus, OrderUuid},
};

use crate::{
    extensions::*,
    orders::{errors::into_status_error, responses::OrderResponse},
};

/// Update Order Status Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateOrderStatusRequest {
    /// New status name, e.g. `confirmed`
    pub status: String,
}

/// Update Order Status
///
/// Moves an order to another status. Any known status is accepted from any
/// other.
#[endpoint(
    tags("orders"),
    summary = "Update Order Status",
    responses(
        (status_code = StatusCode::OK, description = "Status updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Unknown status"),
    ),
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    json: JsonBody<UpdateOrderStatusRequest>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.state()?;

    let status = json
        .into_inner()
        .status
        .parse::<OrderStatus>()
        .map_err(|source| into_status_error(OrdersServiceError::InvalidStatus(source)))?;

    let order = state
        .app
        .orders
        .update_status(OrderUuid::from_uuid(uuid.into_inner()), status)
        .await
        .map_err(into_status_error)?;

    Ok(Json(order.into()))
}
