use anyhow::Result;
use clap::{Parser, ValueEnum};
use client_core::{load_settings, triage, BoardView, OrdersClient};
use shared::domain::Order;

#[derive(Parser, Debug)]
struct Args {
    /// Base URL of the order service; falls back to board.toml / environment.
    #[arg(long)]
    backend_url: Option<String>,
    /// Business whose orders are listed.
    #[arg(long)]
    business_id: Option<i64>,
    #[arg(long, value_enum, default_value = "kitchen")]
    view: ViewArg,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ViewArg {
    Delivery,
    DineIn,
    Kitchen,
}

impl From<ViewArg> for BoardView {
    fn from(value: ViewArg) -> Self {
        match value {
            ViewArg::Delivery => BoardView::Delivery,
            ViewArg::DineIn => BoardView::DineIn,
            ViewArg::Kitchen => BoardView::Kitchen,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    let mut settings = load_settings();
    if let Some(backend_url) = args.backend_url {
        settings.backend_url = backend_url;
    }
    if let Some(business_id) = args.business_id {
        settings.business_id = business_id;
    }

    let view: BoardView = args.view.into();
    tracing::info!(
        backend_url = %settings.backend_url,
        business_id = settings.business_id,
        "fetching {} board",
        view.title()
    );

    let client = OrdersClient::new(settings.backend_url.clone());
    let orders = client.fetch_orders(settings.business()).await?;
    let buckets = triage(&orders, view);

    for (title, bucket) in [
        ("CONFIRMED", &buckets.confirmed),
        ("PREPARING", &buckets.preparing),
        ("DONE", &buckets.done),
    ] {
        println!("== {title} ({}) ==", bucket.len());
        if bucket.is_empty() {
            println!("   no orders in this stage");
        }
        for order in bucket {
            print_order(order);
        }
    }

    Ok(())
}

fn print_order(order: &Order) {
    let canceled = if order.is_canceled() { " [canceled]" } else { "" };
    println!(
        "   #{} total R$ {:.2}{canceled}",
        order.display_id.0, order.total_price
    );
    for item in &order.current_cart {
        match &item.notes {
            Some(notes) => println!("      {}x {} ({notes})", item.amount, item.name),
            None => println!("      {}x {}", item.amount, item.name),
        }
    }
}
