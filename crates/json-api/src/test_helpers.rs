//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use rust_decimal::Decimal;
use salvo::{affix_state::inject, prelude::*};

use audioshelf_app::{
    context::AppContext,
    domain::{
        catalog::models::AudiobookId,
        checkout::MockCheckoutService,
        orders::{
            MockOrdersService,
            models::{Order, OrderItemUuid, OrderLineItem, OrderStatus, OrderUuid},
        },
        pricing::MockCartPricingService,
    },
};

use crate::state::State;

pub(crate) const TEST_ORDER_NUMBER: &str = "ORD-20260101120000-0a1b2c3d";

fn strict_pricing_mock() -> MockCartPricingService {
    let mut pricing = MockCartPricingService::new();

    pricing.expect_price_cart().never();

    pricing
}

fn strict_orders_mock() -> MockOrdersService {
    let mut orders = MockOrdersService::new();

    orders.expect_create_order().never();
    orders.expect_get_order().never();
    orders.expect_get_order_by_number().never();
    orders.expect_list_orders().never();
    orders.expect_update_status().never();

    orders
}

fn strict_checkout_mock() -> MockCheckoutService {
    let mut checkout = MockCheckoutService::new();

    checkout.expect_place_order().never();

    checkout
}

fn service(
    pricing: MockCartPricingService,
    orders: MockOrdersService,
    checkout: MockCheckoutService,
    route: Router,
) -> Service {
    let app = AppContext {
        pricing: Arc::new(pricing),
        orders: Arc::new(orders),
        checkout: Arc::new(checkout),
    };

    Service::new(Router::new().hoop(inject(State::new(app))).push(route))
}

pub(crate) fn pricing_service(pricing: MockCartPricingService, route: Router) -> Service {
    service(pricing, strict_orders_mock(), strict_checkout_mock(), route)
}

pub(crate) fn orders_service(orders: MockOrdersService, route: Router) -> Service {
    service(strict_pricing_mock(), orders, strict_checkout_mock(), route)
}

pub(crate) fn checkout_service(checkout: MockCheckoutService, route: Router) -> Service {
    service(strict_pricing_mock(), strict_orders_mock(), checkout, route)
}

/// A pending two-line order totalling 250.00.
pub(crate) fn make_order(uuid: OrderUuid) -> Order {
    let item = |position: u32, id: i64, title: &str, price: i64, quantity: u32| OrderLineItem {
        uuid: OrderItemUuid::new(),
        order_uuid: uuid,
        position,
        item_id: AudiobookId::new(id),
        title: title.to_owned(),
        unit_price_at_purchase: Decimal::new(price, 2),
        quantity,
        created_at: Timestamp::UNIX_EPOCH,
    };

    Order {
        uuid,
        order_number: TEST_ORDER_NUMBER.to_owned(),
        total_amount: Decimal::new(25_000, 2),
        status: OrderStatus::Pending,
        items: vec![item(0, 1, "Dune", 10_000, 2), item(1, 2, "Emma", 5_000, 1)],
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}
