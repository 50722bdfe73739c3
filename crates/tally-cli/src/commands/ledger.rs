//! Ledger generation command

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tally_core::{
    generate_ledger,
    import::read_rows_from_path,
    write_ledger, Config, Item, Order, Refund, Row,
};
use tracing::info;

/// Inputs for a ledger run
pub struct LedgerArgs {
    pub items: PathBuf,
    pub orders: PathBuf,
    pub refunds: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub self_names: Vec<String>,
}

/// Read a report and convert each row into a typed record
fn read_report<T>(path: &Path, from_row: fn(&Row) -> tally_core::Result<T>) -> Result<Vec<T>> {
    let rows = read_rows_from_path(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    rows.iter()
        .map(from_row)
        .collect::<tally_core::Result<Vec<T>>>()
        .with_context(|| format!("Invalid row in {}", path.display()))
}

pub fn load_config(path: Option<&Path>, self_names: &[String]) -> Result<Config> {
    let mut config = Config::load(path).context("Failed to load config")?;
    for name in self_names {
        config.self_recipients.add_name(name.clone());
    }
    Ok(config)
}

pub fn cmd_ledger(args: &LedgerArgs) -> Result<()> {
    let config = load_config(args.config.as_deref(), &args.self_names)?;

    let items = read_report(&args.items, Item::from_row)?;
    let orders = read_report(&args.orders, Order::from_row)?;
    let refunds = args
        .refunds
        .as_deref()
        .map(|path| read_report(path, Refund::from_row))
        .transpose()?;

    info!(
        "Loaded {} items, {} orders, {} refunds",
        items.len(),
        orders.len(),
        refunds.as_ref().map_or(0, Vec::len)
    );

    // Build everything before opening the output so a failure writes nothing
    let ledger = generate_ledger(
        &items,
        &orders,
        refunds.as_deref(),
        &config.self_recipients,
    )
    .context("Failed to build ledger")?;

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            write_ledger(&ledger, BufWriter::new(file))
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {} rows to {}", ledger.rows.len(), path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            write_ledger(&ledger, &mut out).context("Failed to write ledger")?;
            out.flush()?;
        }
    }

    let summary = &ledger.summary;
    info!(
        "Orders: {} single item, {} multi-item, {} unknown, {} Whole Foods, {} gift card reloads",
        summary.single_item,
        summary.all_items,
        summary.unknown_items,
        summary.whole_foods,
        summary.gift_card_reloads
    );

    Ok(())
}
