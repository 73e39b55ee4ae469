use anyhow::{Context, Result};
use bilao_orders::{Order, OrderDesk, OrderForm, OrderId, OrderStatus, OrderUpdate};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

mod config;
mod snapshot;

#[derive(Parser, Debug)]
#[clap(name = "bilao", about = "Order desk for a native delicacy seller")]
struct Args {
    /// YAML desk configuration
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// JSON store file
    #[clap(short, long, default_value = "orders.json")]
    store: PathBuf,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Ranked listing of active orders
    List {
        /// pickup_date, delicacy or status
        #[clap(long)]
        sort_by: Option<String>,

        /// Date treated as today (YYYY-MM-DD)
        #[clap(long)]
        today: Option<NaiveDate>,
    },
    /// Every order, removed ones included
    History,
    /// Take a new order
    Submit {
        #[clap(long)]
        name: String,
        #[clap(long)]
        contact: String,
        #[clap(long)]
        address: String,
        #[clap(long)]
        pickup_place: String,
        #[clap(long)]
        pickup_date: String,
        #[clap(long)]
        delicacy: String,
        #[clap(long)]
        quantity: Option<String>,
        #[clap(long)]
        container: String,
        #[clap(long, default_value = "")]
        special_request: String,
    },
    /// Move an order to a new status
    Status { id: OrderId, status: OrderStatus },
    /// Replace an order's editable fields from a JSON payload
    Update {
        id: OrderId,
        #[clap(long)]
        json: String,
    },
    /// Hide an order from the listing, keeping it in history
    Remove { id: OrderId },
    /// Drop an order for good
    Delete { id: OrderId },
}

impl Command {
    fn mutates(&self) -> bool {
        !matches!(self, Command::List { .. } | Command::History)
    }
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    info!("Loading configuration from {:?}", args.config);
    let config = config::load(args.config.as_deref())?;

    let store = Arc::new(snapshot::load(&args.store)?);
    let desk = OrderDesk::with_store(config, store.clone());

    run(&desk, &args.command)?;

    if args.command.mutates() {
        snapshot::save(&store, &args.store)?;
    }

    Ok(())
}

fn run(desk: &OrderDesk, command: &Command) -> Result<()> {
    match command {
        Command::List { sort_by, today } => {
            let orders = match today {
                Some(today) => desk.list_orders_on(sort_by.as_deref(), *today)?,
                None => desk.list_orders(sort_by.as_deref())?,
            };
            print_orders(desk, &orders)?;
        }
        Command::History => {
            let orders = desk.order_history()?;
            print_orders(desk, &orders)?;
        }
        Command::Submit {
            name,
            contact,
            address,
            pickup_place,
            pickup_date,
            delicacy,
            quantity,
            container,
            special_request,
        } => {
            let form = OrderForm {
                customer_name: name.clone(),
                contact_number: contact.clone(),
                address: address.clone(),
                pickup_place: pickup_place.clone(),
                pickup_date: pickup_date.clone(),
                delicacy: delicacy.clone(),
                quantity: quantity.clone(),
                container: container.clone(),
                special_request: special_request.clone(),
            };
            let order = desk.submit_order(&form)?;
            println!("{}", order.id);
        }
        Command::Status { id, status } => {
            let order = desk.set_status(id, *status)?;
            println!("{} {}", order.id, order.status.label());
        }
        Command::Update { id, json } => {
            let update: OrderUpdate =
                serde_json::from_str(json).context("Invalid update payload")?;
            let order = desk.update_order(id, &update)?;
            println!("{} {}", order.id, order.status.label());
        }
        Command::Remove { id } => {
            let order = desk.remove_order(id)?;
            println!("{} {}", order.id, order.status.label());
        }
        Command::Delete { id } => {
            let order = desk.delete_order(id)?;
            println!("{} deleted", order.id);
        }
    }

    Ok(())
}

fn print_orders(desk: &OrderDesk, orders: &[Order]) -> Result<()> {
    for order in orders {
        let buyer = desk.get_buyer(&order.buyer_id)?;
        println!(
            "{}  {}  {:<14} x{:<4} {:<10} {:<12} {}",
            order.id,
            order.pickup_date,
            order.delicacy.label(),
            order.quantity,
            order.container.name(),
            order.status.label(),
            buyer.name,
        );
    }
    Ok(())
}
