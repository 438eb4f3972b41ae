//! Orders service.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use rustc_hash::FxHashMap;
use sqlx::{Postgres, Transaction};
use tracing::{info, warn};

use crate::{
    database::Db,
    domain::{
        orders::{
            errors::{OrdersServiceError, is_order_number_collision},
            models::{Order, OrderNumber, OrderStatus, OrderUuid, OrdersPage},
            repositories::{NewOrderLineItem, PgOrderItemsRepository, PgOrdersRepository},
        },
        pricing::models::CartPricingSnapshot,
    },
};

/// Attempts at inserting an order before an order number collision is
/// reported as an error.
const MAX_ORDER_NUMBER_ATTEMPTS: usize = 3;

type OrderNumberGenerator = Arc<dyn Fn(Timestamp) -> OrderNumber + Send + Sync>;

#[derive(Clone)]
pub struct PgOrdersService {
    db: Db,
    orders_repository: PgOrdersRepository,
    items_repository: PgOrderItemsRepository,
    order_numbers: OrderNumberGenerator,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self::with_order_numbers(db, OrderNumber::generate)
    }

    /// Build the service with a custom order number source.
    #[must_use]
    pub fn with_order_numbers(
        db: Db,
        order_numbers: impl Fn(Timestamp) -> OrderNumber + Send + Sync + 'static,
    ) -> Self {
        Self {
            db,
            orders_repository: PgOrdersRepository::new(),
            items_repository: PgOrderItemsRepository::new(),
            order_numbers: Arc::new(order_numbers),
        }
    }

    async fn insert_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order_number: &OrderNumber,
        snapshot: &CartPricingSnapshot,
        quantities: &[i32],
    ) -> Result<Order, sqlx::Error> {
        let mut order = self
            .orders_repository
            .create_order(
                tx,
                OrderUuid::new(),
                order_number.as_str(),
                snapshot.grand_total(),
            )
            .await?;

        for (position, (line, &quantity)) in snapshot.lines().iter().zip(quantities).enumerate() {
            let position = i32::try_from(position).map_err(|e| sqlx::Error::Encode(Box::new(e)))?;

            let item = self
                .items_repository
                .create_order_item(
                    tx,
                    order.uuid,
                    NewOrderLineItem {
                        position,
                        item_id: line.item_id(),
                        title: line.title(),
                        unit_price_at_purchase: line.unit_price(),
                        quantity,
                    },
                )
                .await?;

            order.items.push(item);
        }

        Ok(order)
    }

    async fn attach_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        orders: &mut [Order],
    ) -> Result<(), sqlx::Error> {
        if orders.is_empty() {
            return Ok(());
        }

        let uuids: Vec<OrderUuid> = orders.iter().map(|order| order.uuid).collect();

        let mut grouped: FxHashMap<OrderUuid, Vec<_>> = FxHashMap::default();

        for item in self.items_repository.get_order_items(tx, &uuids).await? {
            grouped.entry(item.order_uuid).or_default().push(item);
        }

        for order in orders {
            order.items = grouped.remove(&order.uuid).unwrap_or_default();
        }

        Ok(())
    }
}

impl fmt::Debug for PgOrdersService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PgOrdersService")
            .field("db", &self.db)
            .finish_non_exhaustive()
    }
}

/// Roll back after a failed insert. A rollback failure is logged so the
/// insert error stays the one reported.
async fn roll_back(tx: Transaction<'_, Postgres>) {
    if let Err(error) = tx.rollback().await {
        warn!(error = %error, "failed to roll back order transaction");
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn create_order(
        &self,
        snapshot: &CartPricingSnapshot,
    ) -> Result<Order, OrdersServiceError> {
        let quantities = snapshot
            .lines()
            .iter()
            .enumerate()
            .map(|(position, line)| {
                i32::try_from(line.quantity()).map_err(|_overflow| {
                    OrdersServiceError::InvalidQuantity {
                        position,
                        quantity: line.quantity(),
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut attempt = 1;

        loop {
            let order_number = (self.order_numbers)(Timestamp::now());
            let mut tx = self.db.begin_transaction().await?;

            match self
                .insert_order(&mut tx, &order_number, snapshot, &quantities)
                .await
            {
                Ok(order) => {
                    tx.commit().await?;

                    info!(
                        order_uuid = %order.uuid,
                        order_number = %order.order_number,
                        total_amount = %order.total_amount,
                        items = order.items_count(),
                        "order created"
                    );

                    return Ok(order);
                }
                Err(error)
                    if attempt < MAX_ORDER_NUMBER_ATTEMPTS && is_order_number_collision(&error) =>
                {
                    warn!(%order_number, attempt, "order number collision, retrying");

                    roll_back(tx).await;
                    attempt += 1;
                }
                Err(error) => {
                    roll_back(tx).await;

                    return Err(error.into());
                }
            }
        }
    }

    async fn get_order(&self, order: OrderUuid) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let mut order = self.orders_repository.get_order(&mut tx, order).await?;

        self.attach_items(&mut tx, std::slice::from_mut(&mut order))
            .await?;

        tx.commit().await?;

        Ok(order)
    }

    async fn get_order_by_number(&self, order_number: &str) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let mut order = self
            .orders_repository
            .get_order_by_number(&mut tx, order_number)
            .await?;

        self.attach_items(&mut tx, std::slice::from_mut(&mut order))
            .await?;

        tx.commit().await?;

        Ok(order)
    }

    async fn list_orders(&self, page: OrdersPage) -> Result<Vec<Order>, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let mut orders = self.orders_repository.list_orders(&mut tx, page).await?;

        self.attach_items(&mut tx, &mut orders).await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn update_status(
        &self,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let mut updated = self
            .orders_repository
            .update_status(&mut tx, order, status)
            .await?;

        self.attach_items(&mut tx, std::slice::from_mut(&mut updated))
            .await?;

        tx.commit().await?;

        info!(order_uuid = %updated.uuid, status = %updated.status, "order status updated");

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Freeze a pricing snapshot into a new `pending` order.
    ///
    /// The order and all of its line items are written in one transaction;
    /// on failure nothing is persisted.
    async fn create_order(
        &self,
        snapshot: &CartPricingSnapshot,
    ) -> Result<Order, OrdersServiceError>;

    /// Retrieve a single order with its items.
    async fn get_order(&self, order: OrderUuid) -> Result<Order, OrdersServiceError>;

    /// Retrieve a single order by its human-readable number.
    async fn get_order_by_number(&self, order_number: &str) -> Result<Order, OrdersServiceError>;

    /// Retrieve a page of orders, most recent first.
    async fn list_orders(&self, page: OrdersPage) -> Result<Vec<Order>, OrdersServiceError>;

    /// Move an order to a new status.
    async fn update_status(
        &self,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<Order, OrdersServiceError>;
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::{
        domain::{
            catalog::{CatalogLookup, models::AudiobookId},
            pricing::{
                CartPricingService, CatalogCartPricingService,
                models::{CartLineRequest, ResolvedCartLine},
            },
        },
        test::{
            TestContext,
            helpers::{count_rows, money, snapshot},
        },
    };

    use super::*;

    #[tokio::test]
    async fn create_order_persists_snapshot_verbatim() -> TestResult {
        let ctx = TestContext::new().await;

        let snapshot = snapshot(&[(1, "Dune", "100.00", 2), (2, "Emma", "50.00", 1)]);

        let order = ctx.orders.create_order(&snapshot).await?;

        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.total_amount, money("250.00"));
        assert_eq!(order.total_amount.to_string(), "250.00");
        assert!(order.order_number.starts_with("ORD-"));
        assert_eq!(order.items_count(), 2);
        assert_eq!(order.total_quantity(), 3);

        let first = &order.items[0];
        assert_eq!(first.position, 0);
        assert_eq!(first.item_id, AudiobookId::new(1));
        assert_eq!(first.title, "Dune");
        assert_eq!(first.unit_price_at_purchase, money("100.00"));
        assert_eq!(first.quantity, 2);
        assert_eq!(first.order_uuid, order.uuid);

        let fetched = ctx.orders.get_order(order.uuid).await?;
        assert_eq!(fetched, order);

        Ok(())
    }

    #[tokio::test]
    async fn failing_line_insert_leaves_no_rows() -> TestResult {
        let ctx = TestContext::new().await;

        // Quantity 0 passes the structural check but violates the items table
        // check constraint after the order row has been inserted.
        let snapshot = CartPricingSnapshot::new(
            vec![
                ResolvedCartLine::new(AudiobookId::new(1), "Dune".into(), money("10.00"), 1),
                ResolvedCartLine::new(AudiobookId::new(2), "Emma".into(), money("5.00"), 0),
            ],
            Timestamp::now(),
        );

        let result = ctx.orders.create_order(&snapshot).await;

        assert!(
            matches!(result, Err(OrdersServiceError::InvalidData)),
            "expected InvalidData, got {result:?}"
        );
        assert_eq!(count_rows(&ctx, "orders").await?, 0);
        assert_eq!(count_rows(&ctx, "order_items").await?, 0);

        let retried = ctx
            .orders
            .create_order(&crate::test::helpers::snapshot(&[(1, "Dune", "10.00", 1)]))
            .await?;
        assert_eq!(retried.items_count(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn total_beyond_unit_price_precision_is_stored() -> TestResult {
        let ctx = TestContext::new().await;

        let snapshot = snapshot(&[(1, "Dune", "100.00", 1_000_000), (2, "Emma", "99999999.99", 2)]);

        let order = ctx.orders.create_order(&snapshot).await?;

        assert_eq!(order.total_amount.to_string(), "299999999.98");

        let fetched = ctx.orders.get_order(order.uuid).await?;
        assert_eq!(fetched.total_amount, money("299999999.98"));

        Ok(())
    }

    #[tokio::test]
    async fn long_titles_are_stored_verbatim() -> TestResult {
        let ctx = TestContext::new().await;

        let title = "The Remarkably Long Unabridged Edition ".repeat(10);
        assert!(title.len() > 255);

        let order = ctx
            .orders
            .create_order(&snapshot(&[(1, &title, "12.50", 1)]))
            .await?;

        let fetched = ctx.orders.get_order(order.uuid).await?;
        assert_eq!(fetched.items[0].title, title);

        Ok(())
    }

    #[tokio::test]
    async fn oversized_quantity_is_rejected_before_writing() -> TestResult {
        let ctx = TestContext::new().await;

        let snapshot = CartPricingSnapshot::new(
            vec![ResolvedCartLine::new(
                AudiobookId::new(1),
                "Dune".into(),
                money("0.01"),
                u32::MAX,
            )],
            Timestamp::now(),
        );

        let result = ctx.orders.create_order(&snapshot).await;

        assert!(
            matches!(
                result,
                Err(OrdersServiceError::InvalidQuantity { position: 0, .. })
            ),
            "expected InvalidQuantity, got {result:?}"
        );
        assert_eq!(count_rows(&ctx, "orders").await?, 0);

        Ok(())
    }

    #[tokio::test]
    async fn order_keeps_prices_after_catalog_changes() -> TestResult {
        let ctx = TestContext::new().await;
        let id = AudiobookId::new(1);

        ctx.catalog
            .upsert_audiobook(id, "Dune", money("100.00"))
            .await?;

        let pricing = CatalogCartPricingService::new(Arc::new(ctx.catalog.clone()));
        let snapshot = pricing.price_cart(&[CartLineRequest::new(1, 2)]).await?;
        let order = ctx.orders.create_order(&snapshot).await?;

        ctx.catalog
            .upsert_audiobook(id, "Dune (Unabridged)", money("150.00"))
            .await?;

        let current = ctx.catalog.resolve(&[id]).await?;
        assert_eq!(current[&id].unit_price, money("150.00"));

        let fetched = ctx.orders.get_order(order.uuid).await?;

        assert_eq!(fetched.total_amount, money("200.00"));
        assert_eq!(fetched.items[0].title, "Dune");
        assert_eq!(fetched.items[0].unit_price_at_purchase, money("100.00"));
        assert_eq!(fetched.items[0].line_total(), money("200.00"));

        Ok(())
    }

    #[tokio::test]
    async fn get_order_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.orders.get_order(OrderUuid::new()).await;

        assert!(
            matches!(result, Err(OrdersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn get_order_by_number_returns_order() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx
            .orders
            .create_order(&snapshot(&[(7, "Ulysses", "12.50", 1)]))
            .await?;

        let fetched = ctx.orders.get_order_by_number(&created.order_number).await?;

        assert_eq!(fetched.uuid, created.uuid);
        assert_eq!(fetched.items.len(), 1);

        let missing = ctx.orders.get_order_by_number("ORD-00000000000000-deadbeef").await;
        assert!(
            matches!(missing, Err(OrdersServiceError::NotFound)),
            "expected NotFound, got {missing:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn list_orders_returns_newest_first_with_items() -> TestResult {
        let ctx = TestContext::new().await;

        let first = ctx
            .orders
            .create_order(&snapshot(&[(1, "Dune", "1.00", 1)]))
            .await?;
        let second = ctx
            .orders
            .create_order(&snapshot(&[(2, "Emma", "2.00", 1), (3, "Ulysses", "3.00", 2)]))
            .await?;
        let third = ctx
            .orders
            .create_order(&snapshot(&[(4, "Beloved", "4.00", 1)]))
            .await?;

        let orders = ctx.orders.list_orders(OrdersPage::default()).await?;
        let uuids: Vec<_> = orders.iter().map(|order| order.uuid).collect();

        assert_eq!(uuids, vec![third.uuid, second.uuid, first.uuid]);
        assert_eq!(orders[1].items.len(), 2);
        assert_eq!(orders[1].items[1].title, "Ulysses");

        let page = ctx
            .orders
            .list_orders(OrdersPage {
                limit: 1,
                offset: 1,
            })
            .await?;

        assert_eq!(page.len(), 1);
        assert_eq!(page[0].uuid, second.uuid);

        Ok(())
    }

    #[tokio::test]
    async fn list_orders_on_empty_store_is_empty() -> TestResult {
        let ctx = TestContext::new().await;

        let orders = ctx.orders.list_orders(OrdersPage::default()).await?;

        assert!(orders.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn update_status_persists_new_status() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx
            .orders
            .create_order(&snapshot(&[(1, "Dune", "9.99", 1)]))
            .await?;

        let updated = ctx
            .orders
            .update_status(created.uuid, OrderStatus::Shipped)
            .await?;

        assert_eq!(updated.status, OrderStatus::Shipped);
        assert!(updated.updated_at >= created.updated_at);
        assert_eq!(updated.total_amount, created.total_amount);
        assert_eq!(updated.items, created.items);

        let fetched = ctx.orders.get_order(created.uuid).await?;
        assert_eq!(fetched.status, OrderStatus::Shipped);

        Ok(())
    }

    #[tokio::test]
    async fn update_status_unknown_order_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .orders
            .update_status(OrderUuid::new(), OrderStatus::Cancelled)
            .await;

        assert!(
            matches!(result, Err(OrdersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn order_number_collision_is_retried() -> TestResult {
        let ctx = TestContext::new().await;
        let taken = OrderNumber::generate(Timestamp::now());

        let fixed = taken.clone();
        PgOrdersService::with_order_numbers(ctx.db(), move |_| fixed.clone())
            .create_order(&snapshot(&[(1, "Dune", "1.00", 1)]))
            .await?;

        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let colliding = taken.clone();

        let service = PgOrdersService::with_order_numbers(ctx.db(), move |now| {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                colliding.clone()
            } else {
                OrderNumber::generate(now)
            }
        });

        let order = service
            .create_order(&snapshot(&[(2, "Emma", "2.00", 1)]))
            .await?;

        assert_ne!(order.order_number, taken.as_str());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(count_rows(&ctx, "orders").await?, 2);

        Ok(())
    }

    #[tokio::test]
    async fn persistent_collision_gives_up_after_three_attempts() -> TestResult {
        let ctx = TestContext::new().await;
        let taken = OrderNumber::generate(Timestamp::now());

        let fixed = taken.clone();
        PgOrdersService::with_order_numbers(ctx.db(), move |_| fixed.clone())
            .create_order(&snapshot(&[(1, "Dune", "1.00", 1)]))
            .await?;

        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);

        let service = PgOrdersService::with_order_numbers(ctx.db(), move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            taken.clone()
        });

        let result = service
            .create_order(&snapshot(&[(2, "Emma", "2.00", 1)]))
            .await;

        assert!(
            matches!(result, Err(OrdersServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );
        assert_eq!(calls.load(Ordering::SeqCst), 3);

        assert_eq!(count_rows(&ctx, "order_items").await?, 1);

        Ok(())
    }

    #[tokio::test]
    async fn empty_snapshot_creates_order_with_zero_total() -> TestResult {
        let ctx = TestContext::new().await;

        let order = ctx
            .orders
            .create_order(&CartPricingSnapshot::empty(Timestamp::now()))
            .await?;

        assert!(order.items.is_empty());
        assert_eq!(order.total_amount, Decimal::ZERO);

        Ok(())
    }
}
