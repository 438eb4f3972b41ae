use audioshelf_app::domain::orders::models::Order;
use clap::{Args, Subcommand};

mod list;
mod set_status;
mod show;

#[derive(Debug, Args)]
pub(crate) struct OrdersCommand {
    #[command(subcommand)]
    command: OrdersSubcommand,
}

#[derive(Debug, Subcommand)]
enum OrdersSubcommand {
    /// List recent orders, newest first
    List(list::ListOrdersArgs),
    /// Show one order with its items
    Show(show::ShowOrderArgs),
    /// Move an order to a new status
    SetStatus(set_status::SetStatusArgs),
}

pub(crate) async fn run(command: OrdersCommand) -> Result<(), String> {
    match command.command {
        OrdersSubcommand::List(args) => list::run(args).await,
        OrdersSubcommand::Show(args) => show::run(args).await,
        OrdersSubcommand::SetStatus(args) => set_status::run(args).await,
    }
}

fn print_order(order: &Order) {
    println!("order_uuid: {}", order.uuid);
    println!("order_number: {}", order.order_number);
    println!("status: {}", order.status);
    println!("total_amount: {:.2}", order.total_amount);
    println!("total_quantity: {}", order.total_quantity());
    println!("created_at: {}", order.created_at);
    println!("updated_at: {}", order.updated_at);

    for item in &order.items {
        println!(
            "  - {} x{} @ {:.2} = {:.2} ({})",
            item.item_id,
            item.quantity,
            item.unit_price_at_purchase,
            item.line_total(),
            item.title
        );
    }
}
