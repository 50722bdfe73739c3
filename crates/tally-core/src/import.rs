//! CSV import for Amazon order history reports
//!
//! The reader only knows about header-keyed rows; typed records are built
//! from those rows by the `from_row` constructors in `models`.

use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{Item, Order, Refund, Row};

/// Convert a CSV record to a row mapping using headers as keys
///
/// Short records produce a mapping without the missing trailing columns.
fn record_to_row(headers: &StringRecord, record: &StringRecord) -> Row {
    headers
        .iter()
        .zip(record.iter())
        .map(|(header, value)| (header.to_string(), value.to_string()))
        .collect()
}

/// Read every row of a CSV source, keyed by its first line
pub fn read_rows<R: Read>(reader: R) -> Result<Vec<Row>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let mut rows = Vec::new();

    for result in rdr.records() {
        let record = result?;
        rows.push(record_to_row(&headers, &record));
    }

    debug!("Read {} rows ({} columns)", rows.len(), headers.len());
    Ok(rows)
}

/// Open a CSV file and read its rows
pub fn read_rows_from_path(path: &Path) -> Result<Vec<Row>> {
    let file = File::open(path)?;
    read_rows(file)
}

/// Parse an items report
pub fn parse_items<R: Read>(reader: R) -> Result<Vec<Item>> {
    read_rows(reader)?.iter().map(Item::from_row).collect()
}

/// Parse an orders report
pub fn parse_orders<R: Read>(reader: R) -> Result<Vec<Order>> {
    read_rows(reader)?.iter().map(Order::from_row).collect()
}

/// Parse a refunds report
pub fn parse_refunds<R: Read>(reader: R) -> Result<Vec<Refund>> {
    read_rows(reader)?.iter().map(Refund::from_row).collect()
}

/// Parse an amount string with an optional leading "$"
pub fn parse_amount(s: &str) -> Result<f64> {
    let trimmed = s.trim();
    let digits = trimmed.strip_prefix('$').unwrap_or(trimmed);

    digits
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite())
        .ok_or_else(|| Error::Parse(s.to_string()))
}
