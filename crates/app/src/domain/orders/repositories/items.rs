//! Order Items Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};
use uuid::Uuid;

use crate::domain::{
    catalog::models::AudiobookId,
    orders::models::{OrderItemUuid, OrderLineItem, OrderUuid},
};

const CREATE_ORDER_ITEM_SQL: &str = include_str!("../sql/create_order_item.sql");
const GET_ORDER_ITEMS_SQL: &str = include_str!("../sql/get_order_items.sql");

/// Column values for one line item insert.
#[derive(Debug, Clone)]
pub(crate) struct NewOrderLineItem<'a> {
    pub position: i32,
    pub item_id: AudiobookId,
    pub title: &'a str,
    pub unit_price_at_purchase: Decimal,
    pub quantity: i32,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrderItemsRepository;

impl PgOrderItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_order_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        item: NewOrderLineItem<'_>,
    ) -> Result<OrderLineItem, sqlx::Error> {
        query_as::<Postgres, OrderLineItem>(CREATE_ORDER_ITEM_SQL)
            .bind(OrderItemUuid::new().into_uuid())
            .bind(order.into_uuid())
            .bind(item.position)
            .bind(item.item_id.get())
            .bind(item.title)
            .bind(item.unit_price_at_purchase)
            .bind(item.quantity)
            .fetch_one(&mut **tx)
            .await
    }

    /// Items for every given order, grouped by order and in position order.
    pub(crate) async fn get_order_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        orders: &[OrderUuid],
    ) -> Result<Vec<OrderLineItem>, sqlx::Error> {
        let orders: Vec<Uuid> = orders.iter().map(|order| order.into_uuid()).collect();

        query_as::<Postgres, OrderLineItem>(GET_ORDER_ITEMS_SQL)
            .bind(orders)
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for OrderLineItem {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: OrderItemUuid::from_uuid(row.try_get("uuid")?),
            order_uuid: OrderUuid::from_uuid(row.try_get("order_uuid")?),
            position: try_get_unsigned(row, "position")?,
            item_id: AudiobookId::new(row.try_get("audiobook_id")?),
            title: row.try_get("title")?,
            unit_price_at_purchase: row.try_get("unit_price_at_purchase")?,
            quantity: try_get_unsigned(row, "quantity")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}

fn try_get_unsigned(row: &PgRow, column: &str) -> sqlx::Result<u32> {
    let value: i32 = row.try_get(column)?;

    u32::try_from(value).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}
