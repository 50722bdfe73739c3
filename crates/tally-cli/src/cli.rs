//! CLI argument definitions using clap
//!
//! This module contains the clap structs for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Tally - Amazon order history to YNAB ledger
#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Convert Amazon order history reports into a YNAB import CSV", long_about = None)]
#[command(version)]
#[command(subcommand_negates_reqs = true)]
pub struct Cli {
    /// Items report CSV
    #[arg(required = true)]
    pub items: Option<PathBuf>,

    /// Orders and shipments report CSV
    #[arg(required = true)]
    pub orders: Option<PathBuf>,

    /// Refunds report CSV
    pub refunds: Option<PathBuf>,

    /// Write the ledger to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Config file (defaults to the data dir override, then built-in defaults)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Shipping name that means "shipped to myself" (repeatable)
    #[arg(long = "self-name", value_name = "NAME")]
    pub self_names: Vec<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the suffix digest for a shipping name (for `suffix_digests` in config)
    Digest {
        /// Shipping name as it appears in the orders report
        name: String,
    },
}
