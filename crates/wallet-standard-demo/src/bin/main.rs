//! Wallet Standard discovery demo
//!
//! Loads a scenario (or the built-in one), starts the app and the wallets
//! in the requested order and prints the resulting UI wallets.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::info;

use wallet_standard_demo::{init_logging, run, Scenario, StartupOrder};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Order {
    AppFirst,
    WalletsFirst,
    Interleaved,
}

impl From<Order> for StartupOrder {
    fn from(order: Order) -> Self {
        match order {
            Order::AppFirst => StartupOrder::AppFirst,
            Order::WalletsFirst => StartupOrder::WalletsFirst,
            Order::Interleaved => StartupOrder::Interleaved,
        }
    }
}

/// Simulate Wallet Standard discovery and print what the app sees
#[derive(Parser, Debug)]
#[command(name = "wallet-standard-demo")]
#[command(version)]
#[command(about = "Simulate Wallet Standard discovery on an in-process window")]
struct Args {
    /// Scenario JSON file (built-in scenario if omitted)
    #[arg(long, env = "WALLET_STANDARD_SCENARIO")]
    scenario: Option<PathBuf>,

    /// Override the scenario's startup order
    #[arg(long, value_enum)]
    order: Option<Order>,

    /// Let the app also drain the legacy navigator.wallets slot
    #[arg(long)]
    legacy: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Log as JSON (also enabled by WALLET_STANDARD_LOG_JSON=1)
    #[arg(long)]
    log_json: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.log_json);

    let mut scenario = Scenario::load_or_default(args.scenario.as_deref())
        .context("Failed to load scenario")?;
    if let Some(order) = args.order {
        scenario.order = order.into();
    }
    if args.legacy {
        scenario.legacy_app = true;
    }

    info!(
        "Running scenario with {} wallet(s), order {:?}",
        scenario.wallets.len(),
        scenario.order
    );
    let report = run(&scenario).context("Failed to run scenario")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report);
    }
    Ok(())
}
