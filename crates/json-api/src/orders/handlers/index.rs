//! Order Index Handler

use salvo::{oapi::extract::QueryParam, prelude::*};

use audioshelf_app::domain::orders::models::OrdersPage;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, responses::OrdersResponse},
};

/// Clamp the requested page to what the listing serves.
fn page(limit: Option<u32>, offset: Option<u32>) -> OrdersPage {
    OrdersPage {
        limit: limit
            .unwrap_or(OrdersPage::DEFAULT_LIMIT)
            .min(OrdersPage::DEFAULT_LIMIT),
        offset: offset.unwrap_or(0),
    }
}

/// List Orders
///
/// Returns orders newest first, with their line items. `limit` defaults to
/// and is capped at 100.
#[endpoint(
    tags("orders"),
    summary = "List Orders",
    responses(
        (status_code = StatusCode::OK, description = "Orders listed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid paging parameters"),
    ),
)]
pub(crate) async fn handler(
    limit: QueryParam<u32, false>,
    offset: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<OrdersResponse>, StatusError> {
    let state = depot.state()?;

    let orders = state
        .app
        .orders
        .list_orders(page(limit.into_inner(), offset.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(Json(OrdersResponse {
        orders: orders.into_iter().map(Into::into).collect(),
    }))
}
