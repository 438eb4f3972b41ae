use clap::{Args, Subcommand};

mod show;
mod upsert;

#[derive(Debug, Args)]
pub(crate) struct CatalogCommand {
    #[command(subcommand)]
    command: CatalogSubcommand,
}

#[derive(Debug, Subcommand)]
enum CatalogSubcommand {
    /// Add an audiobook to the in-process catalog, or reprice it
    Upsert(upsert::UpsertArgs),
    /// Resolve audiobook ids against the in-process catalog
    Show(show::ShowArgs),
}

pub(crate) async fn run(command: CatalogCommand) -> Result<(), String> {
    match command.command {
        CatalogSubcommand::Upsert(args) => upsert::run(args).await,
        CatalogSubcommand::Show(args) => show::run(args).await,
    }
}
