//! Domain models for Tally

use std::collections::HashMap;

use crate::error::{Error, Result};

/// A CSV row keyed by the header line
pub type Row = HashMap<String, String>;

/// Category tag Amazon uses for gift card balance reloads
pub const GIFT_CARD_CATEGORY: &str = "ABIS_GIFT_CARD";

/// Seller name on Whole Foods grocery deliveries
pub const WHOLE_FOODS_SELLER: &str = "Whole Foods Market";

/// Default payee for every Amazon transaction
pub const AMAZON_PAYEE: &str = "Amazon.com";

/// Header line of the generated ledger
pub const LEDGER_HEADER: [&str; 5] = ["Date", "Payee", "Memo", "Amount", "Invoice URL"];

/// Column names of the Amazon "Items" order history report
pub mod item_columns {
    pub const ORDER_ID: &str = "Order ID";
    pub const TITLE: &str = "Title";
    pub const CATEGORY: &str = "Category";
    pub const ITEM_TOTAL: &str = "Item Total";
    pub const SELLER: &str = "Seller";
}

/// Column names of the Amazon "Orders and shipments" report
pub mod order_columns {
    pub const ORDER_ID: &str = "Order ID";
    pub const ORDER_DATE: &str = "Order Date";
    pub const SHIPPING_ADDRESS_NAME: &str = "Shipping Address Name";
    pub const TOTAL_CHARGED: &str = "Total Charged";
}

/// Column names of the Amazon "Refunds" report
pub mod refund_columns {
    pub const ORDER_ID: &str = "Order ID";
    pub const REFUND_DATE: &str = "Refund Date";
    pub const TITLE: &str = "Title";
    pub const REFUND_AMOUNT: &str = "Refund Amount";
    pub const REFUND_TAX_AMOUNT: &str = "Refund Tax Amount";
}

fn field(row: &Row, record: &'static str, column: &'static str) -> Result<String> {
    row.get(column)
        .cloned()
        .ok_or(Error::MissingField { record, column })
}

/// One line item from the items report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub order_id: String,
    pub title: String,
    pub category: String,
    /// Line total exactly as exported, e.g. "$42.00"
    pub total: String,
    pub seller: String,
}

impl Item {
    pub fn from_row(row: &Row) -> Result<Self> {
        use self::item_columns::*;
        Ok(Self {
            order_id: field(row, "item", ORDER_ID)?,
            title: field(row, "item", TITLE)?,
            category: field(row, "item", CATEGORY)?,
            total: field(row, "item", ITEM_TOTAL)?,
            seller: field(row, "item", SELLER)?,
        })
    }

    pub fn is_gift_card_funding(&self) -> bool {
        self.category == GIFT_CARD_CATEGORY
    }
}

/// One order from the orders report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub order_id: String,
    pub order_date: String,
    pub ship_to: String,
    /// Empty when the order was never charged (e.g. cancelled)
    pub total_charged: String,
}

impl Order {
    pub fn from_row(row: &Row) -> Result<Self> {
        use self::order_columns::*;
        Ok(Self {
            order_id: field(row, "order", ORDER_ID)?,
            order_date: field(row, "order", ORDER_DATE)?,
            ship_to: field(row, "order", SHIPPING_ADDRESS_NAME)?,
            total_charged: field(row, "order", TOTAL_CHARGED)?,
        })
    }
}

/// One returned item from the refunds report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Refund {
    pub order_id: String,
    pub refund_date: String,
    pub title: String,
    pub amount: String,
    pub tax_amount: String,
}

impl Refund {
    pub fn from_row(row: &Row) -> Result<Self> {
        use self::refund_columns::*;
        Ok(Self {
            order_id: field(row, "refund", ORDER_ID)?,
            refund_date: field(row, "refund", REFUND_DATE)?,
            title: field(row, "refund", TITLE)?,
            amount: field(row, "refund", REFUND_AMOUNT)?,
            tax_amount: field(row, "refund", REFUND_TAX_AMOUNT)?,
        })
    }
}

/// Per-line summary kept by the order index for memo construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDetail {
    /// Normalized title
    pub name: String,
    pub total: String,
    pub seller: String,
}

/// A single output line of the ledger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerRow {
    pub date: String,
    pub payee: String,
    pub memo: String,
    pub amount: String,
    pub invoice_url: String,
}

impl LedgerRow {
    /// Fields in ledger column order
    pub fn fields(&self) -> [&str; 5] {
        [
            self.date.as_str(),
            self.payee.as_str(),
            self.memo.as_str(),
            self.amount.as_str(),
            self.invoice_url.as_str(),
        ]
    }
}

/// Printable invoice page for an order
pub fn invoice_url(order_id: &str) -> String {
    format!(
        "https://www.amazon.com/gp/css/summary/print.html?orderID={}",
        order_id
    )
}
