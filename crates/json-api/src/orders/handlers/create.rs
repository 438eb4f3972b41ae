//! Create Order Handler

use salvo::{http::header::LOCATION, oapi::extract::JsonBody, prelude::*};

use crate::{
    cart::requests::CartRequest,
    extensions::*,
    observability::record_order_outcome,
    orders::{errors::checkout_status_error, responses::OrderResponse},
};

/// Place Order
///
/// Prices the cart against the catalog and stores the result as a pending
/// order. Prices and titles are frozen at this point.
#[endpoint(
    tags("orders"),
    summary = "Place Order",
    responses(
        (status_code = StatusCode::CREATED, description = "Order placed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Empty cart or invalid cart line"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Catalog unavailable"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CartRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.state()?;
    let lines = json.into_inner().into_lines();

    let order = match state.app.checkout.place_order(&lines).await {
        Ok(order) => order,
        Err(error) => {
            record_order_outcome(error.kind());

            return Err(checkout_status_error(error));
        }
    };

    record_order_outcome("placed");

    res.add_header(LOCATION, format!("/orders/{}", order.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(order.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use audioshelf_app::domain::{
        catalog::CatalogError,
        checkout::{CheckoutError, MockCheckoutService},
        orders::{OrdersServiceError, models::OrderUuid},
        pricing::models::CartLineRequest,
    };

    use crate::test_helpers::{TEST_ORDER_NUMBER, checkout_service, make_order};

    use super::*;

    fn make_service(checkout: MockCheckoutService) -> Service {
        checkout_service(checkout, Router::with_path("orders").post(handler))
    }

    fn one_line() -> serde_json::Value {
        json!({ "items": [{ "item_id": 1, "quantity": 1 }] })
    }

    #[tokio::test]
    async fn test_create_order_returns_201() -> TestResult {
        let uuid = OrderUuid::new();
        let order = make_order(uuid);

        let mut checkout = MockCheckoutService::new();

        checkout
            .expect_place_order()
            .once()
            .withf(|lines| {
                lines == [CartLineRequest::new(1, 2), CartLineRequest::new(2, 1)].as_slice()
            })
            .return_once(move |_| Ok(order));

        let mut res = TestClient::post("http://example.com/orders")
            .json(&json!({ "items": [
                { "item_id": 1, "quantity": 2 },
                { "item_id": 2, "quantity": 1 },
            ]}))
            .send(&make_service(checkout))
            .await;

        let location = res
            .headers()
            .get("location")
            .and_then(|v| v.to_str().ok())
            .map(ToOwned::to_owned);
        let body: OrderResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some(format!("/orders/{uuid}")));
        assert_eq!(body.uuid, uuid.into_uuid());
        assert_eq!(body.order_number, TEST_ORDER_NUMBER);
        assert_eq!(body.status, "pending");
        assert_eq!(body.total_amount, "250.00");
        assert_eq!(body.items.len(), 2);
        assert_eq!(body.items[0].unit_price_at_purchase, "100.00");
        assert_eq!(body.items[0].line_total, "200.00");
        assert_eq!(body.items[1].title, "Emma");

        Ok(())
    }

    #[tokio::test]
    async fn test_create_order_empty_cart_returns_400() {
        let mut checkout = MockCheckoutService::new();

        checkout
            .expect_place_order()
            .once()
            .return_once(|_| Err(CheckoutError::EmptyCart));

        let res = TestClient::post("http://example.com/orders")
            .json(&json!({ "items": [{ "item_id": 999, "quantity": 1 }] }))
            .send(&make_service(checkout))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }

    #[tokio::test]
    async fn test_create_order_catalog_outage_returns_503() {
        let mut checkout = MockCheckoutService::new();

        checkout.expect_place_order().once().return_once(|_| {
            Err(CheckoutError::ServiceUnavailable(CatalogError::Timeout(
                std::time::Duration::from_secs(5),
            )))
        });

        let res = TestClient::post("http://example.com/orders")
            .json(&one_line())
            .send(&make_service(checkout))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::SERVICE_UNAVAILABLE));
    }

    #[tokio::test]
    async fn test_create_order_storage_failure_returns_500() {
        let mut checkout = MockCheckoutService::new();

        checkout
            .expect_place_order()
            .once()
            .return_once(|_| Err(CheckoutError::Internal(OrdersServiceError::InvalidData)));

        let res = TestClient::post("http://example.com/orders")
            .json(&one_line())
            .send(&make_service(checkout))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));
    }

    #[tokio::test]
    async fn test_create_order_missing_items_returns_400() {
        let mut checkout = MockCheckoutService::new();

        checkout.expect_place_order().never();

        let res = TestClient::post("http://example.com/orders")
            .json(&json!({ "lines": [] }))
            .send(&make_service(checkout))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }
}
