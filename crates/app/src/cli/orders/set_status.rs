use audioshelf_app::domain::orders::{
    OrdersService, PgOrdersService,
    models::{OrderStatus, OrderUuid},
};
use clap::Args;
use uuid::Uuid;

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct SetStatusArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    /// Order UUID
    #[arg(long)]
    uuid: Uuid,

    /// New status: pending, confirmed, processing, shipped, delivered or cancelled
    #[arg(long)]
    status: String,
}

pub(crate) async fn run(args: SetStatusArgs) -> Result<(), String> {
    let status: OrderStatus = args.status.parse().map_err(|error| format!("{error}"))?;

    let service = PgOrdersService::new(args.database.connect().await?);

    let order = service
        .update_status(OrderUuid::from_uuid(args.uuid), status)
        .await
        .map_err(|error| format!("failed to update order status: {error}"))?;

    super::print_order(&order);

    Ok(())
}
