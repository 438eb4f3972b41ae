use audioshelf_app::domain::orders::{OrdersService, PgOrdersService, models::OrderUuid};
use clap::Args;
use uuid::Uuid;

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct ShowOrderArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    /// Order UUID
    #[arg(long, conflicts_with = "number", required_unless_present = "number")]
    uuid: Option<Uuid>,

    /// Order number, e.g. `ORD-20260301120000-0a1b2c3d`
    #[arg(long)]
    number: Option<String>,
}

pub(crate) async fn run(args: ShowOrderArgs) -> Result<(), String> {
    let service = PgOrdersService::new(args.database.connect().await?);

    let order = match (args.uuid, args.number) {
        (Some(uuid), _) => service.get_order(OrderUuid::from_uuid(uuid)).await,
        (None, Some(number)) => service.get_order_by_number(&number).await,
        (None, None) => return Err("either --uuid or --number is required".to_string()),
    }
    .map_err(|error| format!("failed to load order: {error}"))?;

    super::print_order(&order);

    Ok(())
}
