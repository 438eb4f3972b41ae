use audioshelf_app::domain::orders::{
    OrdersService, PgOrdersService,
    models::{Order, OrdersPage},
};
use clap::Args;

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct ListOrdersArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    /// Maximum number of orders to show
    #[arg(long, default_value_t = OrdersPage::DEFAULT_LIMIT)]
    limit: u32,

    /// Number of orders to skip
    #[arg(long, default_value_t = 0)]
    offset: u32,
}

pub(crate) async fn run(args: ListOrdersArgs) -> Result<(), String> {
    let service = PgOrdersService::new(args.database.connect().await?);

    let orders = service
        .list_orders(OrdersPage {
            limit: args.limit,
            offset: args.offset,
        })
        .await
        .map_err(|error| format!("failed to list orders: {error}"))?;

    if orders.is_empty() {
        println!("no orders found");
        return Ok(());
    }

    for order in &orders {
        println!("{}", summary_line(order));
    }

    Ok(())
}

fn summary_line(order: &Order) -> String {
    format!(
        "{}\t{}\t{}\t{:.2}\t{} items\t{} copies\t{}",
        order.uuid,
        order.order_number,
        order.status,
        order.total_amount,
        order.items_count(),
        order.total_quantity(),
        order.created_at
    )
}
