use audioshelf_app::domain::catalog::{CatalogLookup, PgCatalogLookup, models::AudiobookId};
use clap::Args;

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct ShowArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    /// Audiobook ids to resolve
    #[arg(required = true)]
    ids: Vec<i64>,
}

pub(crate) async fn run(args: ShowArgs) -> Result<(), String> {
    let catalog = PgCatalogLookup::new(args.database.connect().await?);
    let ids: Vec<AudiobookId> = args.ids.into_iter().map(AudiobookId::new).collect();

    let entries = catalog
        .resolve(&ids)
        .await
        .map_err(|error| format!("failed to resolve audiobooks: {error}"))?;

    for id in ids {
        match entries.get(&id) {
            Some(entry) => println!("{id}\t{:.2}\t{}", entry.unit_price, entry.title),
            None => println!("{id}\tnot found"),
        }
    }

    Ok(())
}
