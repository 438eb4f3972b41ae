//! Order Models

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use jiff::Timestamp;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    domain::{catalog::models::AudiobookId, pricing::money::round_money},
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<Order>;

/// Order Line Item UUID
pub type OrderItemUuid = TypedUuid<OrderLineItem>;

/// Lifecycle state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [Self; 6] = [
        Self::Pending,
        Self::Confirmed,
        Self::Processing,
        Self::Shipped,
        Self::Delivered,
        Self::Cancelled,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Processing => "processing",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown order status `{0}`")]
pub struct InvalidOrderStatus(pub String);

impl FromStr for OrderStatus {
    type Err = InvalidOrderStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| InvalidOrderStatus(value.to_string()))
    }
}

/// Human-readable order reference: `ORD-{YYYYMMDDHHMMSS}-{8 hex}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OrderNumber(String);

impl OrderNumber {
    /// Combine the UTC creation time with 32 random bits.
    ///
    /// Uniqueness is probabilistic; the store's unique constraint is what
    /// actually guarantees it.
    #[must_use]
    pub fn generate(now: Timestamp) -> Self {
        let suffix: u32 = rand::random();

        Self(format!("ORD-{}-{suffix:08x}", now.strftime("%Y%m%d%H%M%S")))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for OrderNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

/// Order Model
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub uuid: OrderUuid,
    pub order_number: String,
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub items: Vec<OrderLineItem>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Order {
    #[must_use]
    pub fn items_count(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }
}

/// Order Line Item Model
///
/// Title and unit price are copies taken when the order was placed.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLineItem {
    pub uuid: OrderItemUuid,
    pub order_uuid: OrderUuid,
    pub position: u32,
    pub item_id: AudiobookId,
    pub title: String,
    pub unit_price_at_purchase: Decimal,
    pub quantity: u32,
    pub created_at: Timestamp,
}

impl OrderLineItem {
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        round_money(self.unit_price_at_purchase * Decimal::from(self.quantity))
    }
}

/// Page of orders, newest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrdersPage {
    pub limit: u32,
    pub offset: u32,
}

impl OrdersPage {
    pub const DEFAULT_LIMIT: u32 = 100;
}

impl Default for OrdersPage {
    fn default() -> Self {
        Self {
            limit: Self::DEFAULT_LIMIT,
            offset: 0,
        }
    }
}
