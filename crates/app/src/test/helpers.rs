//! Test Helpers

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::{
    domain::{
        catalog::models::AudiobookId,
        pricing::models::{CartPricingSnapshot, ResolvedCartLine},
    },
    test::TestContext,
};

pub(crate) fn money(value: &str) -> Decimal {
    value.parse().expect("valid decimal literal")
}

/// Build a snapshot from `(item_id, title, unit_price, quantity)` tuples.
pub(crate) fn snapshot(lines: &[(i64, &str, &str, u32)]) -> CartPricingSnapshot {
    CartPricingSnapshot::new(
        lines
            .iter()
            .map(|&(id, title, price, quantity)| {
                ResolvedCartLine::new(AudiobookId::new(id), title.to_string(), money(price), quantity)
            })
            .collect(),
        Timestamp::now(),
    )
}

/// Count rows in one of the order tables.
pub(crate) async fn count_rows(ctx: &TestContext, table: &str) -> Result<i64, sqlx::Error> {
    let sql = match table {
        "orders" => "SELECT COUNT(*) FROM orders",
        "order_items" => "SELECT COUNT(*) FROM order_items",
        "audiobooks" => "SELECT COUNT(*) FROM audiobooks",
        other => panic!("unexpected table {other}"),
    };

    sqlx::query_scalar(sql).fetch_one(ctx.pool()).await
}
