//! Tally Core Library
//!
//! Turns Amazon order history reports into a budgeting ledger:
//! - CSV import of the items, orders and refunds reports
//! - Product title normalization
//! - Order index (items per order, gift card reloads)
//! - Ledger builder with order classification and item attribution
//! - Ledger output in YNAB's CSV import layout
//! - Config for recognising the account holder as shipping recipient

pub mod config;
pub mod error;
pub mod export;
pub mod import;
pub mod index;
pub mod ledger;
pub mod models;
pub mod normalize;

pub use config::{suffix_digest, Config, SelfRecipients};
pub use error::{Error, Result};
pub use export::{ledger_to_string, write_ledger};
pub use index::OrderIndex;
pub use ledger::{build_order_row, build_refund_row, Ledger, LedgerBuilder, LedgerSummary};
pub use models::{Item, ItemDetail, LedgerRow, Order, Refund, Row};
pub use normalize::normalize;

/// Run the whole pipeline over parsed reports
pub fn generate_ledger(
    items: &[Item],
    orders: &[Order],
    refunds: Option<&[Refund]>,
    self_recipients: &SelfRecipients,
) -> Result<Ledger> {
    let index = OrderIndex::build(items);
    LedgerBuilder::new(&index, self_recipients).build(orders, refunds)
}
