mod credentials;
mod view;

use anyhow::Result;
use clap::Parser;
use export::{export_receipt, RenderRegion};
use fp_receipt_core::{LoadState, ReceiptSession};
use gateway::{fastpay::FastpayGateway, mock::MockGateway, ReceiptGateway};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Fetch a FastPay agent transfer receipt and export it as a PDF.
#[derive(Debug, Parser)]
#[command(name = "fastpay-receipt", version, about)]
struct Cli {
    /// FastPay order reference, e.g. FP123456
    order_id: String,

    /// Directory the PDF is written into
    #[arg(long, default_value = ".")]
    out: PathBuf,

    /// Print the receipt without writing a PDF
    #[arg(long)]
    no_pdf: bool,

    /// Use the offline mock gateway instead of the FastPay API
    #[arg(long)]
    mock: bool,

    /// Override the configured API base URL
    #[arg(long)]
    base_url: Option<String>,
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn create_gateway(cli: &Cli) -> Arc<dyn ReceiptGateway> {
    let cfg = config::load().unwrap_or_default();

    let kind = if cli.mock { "mock" } else { cfg.api.kind.as_str() };
    match kind {
        "mock" => {
            tracing::info!("Using mock receipt gateway");
            MockGateway::new()
        }
        _ => {
            let base_url = cli.base_url.clone().unwrap_or(cfg.api.base_url);
            tracing::info!(%base_url, "Using FastPay receipt gateway");
            FastpayGateway::new(base_url, Arc::new(credentials::StoredCredentials::new()))
        }
    }
}

async fn run(cli: Cli) -> Result<i32> {
    let gateway = create_gateway(&cli);

    let mut session = ReceiptSession::begin(cli.order_id.clone());
    println!("Loading receipt for {}...", session.order_id());

    let outcome = gateway::load(gateway.as_ref(), &cli.order_id).await;
    session.apply(&cli.order_id, outcome);

    match session.state() {
        LoadState::Found(receipt) => {
            view::print_receipt(receipt);

            if cli.no_pdf {
                return Ok(0);
            }
            let mut region = RenderRegion::new(receipt.clone());
            match export_receipt(Some(&mut region), &cli.order_id, &cli.out) {
                Ok(Some(path)) => {
                    println!("Saved {}", path.display());
                    Ok(0)
                }
                Ok(None) => Ok(0),
                Err(error) => {
                    tracing::error!(%error, "PDF export failed");
                    eprintln!("Failed to generate PDF. Please try again.");
                    Ok(1)
                }
            }
        }
        LoadState::NotFound => {
            println!("Receipt not found");
            println!("Check the order reference, or return to the agent transaction list.");
            Ok(1)
        }
        LoadState::Loading => {
            // Only reachable if the outcome was discarded as stale, which a
            // single-shot lookup for a fixed id never triggers.
            tracing::warn!("lookup produced no outcome");
            Ok(1)
        }
    }
}

#[tokio::main]
async fn main() {
    init_tracing();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => std::process::exit(code),
        Err(error) => {
            eprintln!("Error: {error:#}");
            std::process::exit(1);
        }
    }
}
