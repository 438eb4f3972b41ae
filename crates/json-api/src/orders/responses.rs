//! Order response bodies.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use audioshelf_app::domain::orders::models::{Order, OrderLineItem};

use crate::money::format_money;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemResponse {
    pub uuid: Uuid,
    pub item_id: i64,

    /// Title captured when the order was placed
    pub title: String,

    /// Price captured when the order was placed
    pub unit_price_at_purchase: String,

    pub quantity: u32,
    pub line_total: String,
    pub created_at: String,
}

impl From<OrderLineItem> for OrderItemResponse {
    fn from(item: OrderLineItem) -> Self {
        Self {
            uuid: item.uuid.into_uuid(),
            item_id: item.item_id.get(),
            line_total: format_money(item.line_total()),
            unit_price_at_purchase: format_money(item.unit_price_at_purchase),
            title: item.title,
            quantity: item.quantity,
            created_at: item.created_at.to_string(),
        }
    }
}

/// Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    pub uuid: Uuid,

    /// Human-facing reference, e.g. `ORD-20260101120000-0a1b2c3d`
    pub order_number: String,

    pub total_amount: String,

    /// One of `pending`, `confirmed`, `processing`, `shipped`, `delivered` or `cancelled`
    pub status: String,

    /// Line items in cart order
    pub items: Vec<OrderItemResponse>,

    pub created_at: String,
    pub updated_at: String,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            uuid: order.uuid.into_uuid(),
            order_number: order.order_number,
            total_amount: format_money(order.total_amount),
            status: order.status.to_string(),
            items: order.items.into_iter().map(Into::into).collect(),
            created_at: order.created_at.to_string(),
            updated_at: order.updated_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrdersResponse {
    /// Orders, newest first
    pub orders: Vec<OrderResponse>,
}
