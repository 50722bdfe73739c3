//! Tally CLI - Amazon order history to YNAB ledger
//!
//! Usage:
//!   tally ITEMS.csv ORDERS.csv [REFUNDS.csv]   Print the ledger to stdout
//!   tally ITEMS.csv ORDERS.csv -o ledger.csv   Write the ledger to a file
//!   tally digest "Jane Doe"                    Print a ship-to suffix digest

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    // Logs go to stderr; stdout carries the ledger
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    match cli.command {
        Some(Commands::Digest { name }) => commands::cmd_digest(&name),
        None => {
            let (items, orders) = match (cli.items, cli.orders) {
                (Some(items), Some(orders)) => (items, orders),
                _ => anyhow::bail!("Need two arguments: items.csv and orders.csv"),
            };
            commands::cmd_ledger(&commands::LedgerArgs {
                items,
                orders,
                refunds: cli.refunds,
                output: cli.output,
                config: cli.config,
                self_names: cli.self_names,
            })
        }
    }
}
