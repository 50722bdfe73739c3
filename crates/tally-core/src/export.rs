//! Ledger output in YNAB's CSV import layout
//!
//! Fields are joined with commas as-is. Nothing is quoted, so a memo or
//! ship-to name containing a comma shifts the remaining columns.

use std::io::Write;

use crate::error::Result;
use crate::ledger::Ledger;
use crate::models::{LedgerRow, LEDGER_HEADER};

fn join_line(fields: &[&str]) -> String {
    fields.join(",")
}

/// Render a single ledger row as an output line (without newline)
pub fn format_row(row: &LedgerRow) -> String {
    join_line(&row.fields())
}

/// Write the header followed by every ledger row
pub fn write_ledger<W: Write>(ledger: &Ledger, mut out: W) -> Result<()> {
    writeln!(out, "{}", join_line(&LEDGER_HEADER))?;
    for row in &ledger.rows {
        writeln!(out, "{}", format_row(row))?;
    }
    out.flush()?;
    Ok(())
}

/// Render the whole ledger to a string
pub fn ledger_to_string(ledger: &Ledger) -> Result<String> {
    let mut buf = Vec::new();
    write_ledger(ledger, &mut buf)?;
    String::from_utf8(buf)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e).into())
}
