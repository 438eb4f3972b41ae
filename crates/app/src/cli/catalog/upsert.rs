use audioshelf_app::domain::catalog::{PgCatalogLookup, models::AudiobookId};
use clap::Args;
use rust_decimal::Decimal;

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct UpsertArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    /// Audiobook id
    #[arg(long)]
    id: i64,

    /// Audiobook title
    #[arg(long)]
    title: String,

    /// Unit price, e.g. `19.99`
    #[arg(long)]
    price: Decimal,
}

pub(crate) async fn run(args: UpsertArgs) -> Result<(), String> {
    if args.title.trim().is_empty() {
        return Err("title cannot be empty".to_string());
    }

    let catalog = PgCatalogLookup::new(args.database.connect().await?);

    let entry = catalog
        .upsert_audiobook(AudiobookId::new(args.id), &args.title, args.price)
        .await
        .map_err(|error| format!("failed to save audiobook: {error}"))?;

    println!("id: {}", entry.id);
    println!("title: {}", entry.title);
    println!("price: {:.2}", entry.unit_price);

    Ok(())
}
