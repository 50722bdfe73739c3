//! Ledger builder
//!
//! Correlates orders with their indexed items and turns orders and refunds
//! into ledger rows. Rows come out in input order: every charged order,
//! then every refund.
//!
//! Item attribution compares the order's "Total Charged" string with each
//! item's "Item Total" string. It is an exact string comparison, not a
//! numeric one, so "$5.0" and "$5.00" do not match.

use tracing::{debug, info};

use crate::config::SelfRecipients;
use crate::error::Result;
use crate::import::parse_amount;
use crate::index::OrderIndex;
use crate::models::{
    invoice_url, ItemDetail, LedgerRow, Order, Refund, AMAZON_PAYEE, WHOLE_FOODS_SELLER,
};
use crate::normalize::normalize;

/// Memo text for orders with no indexed items
pub const UNKNOWN_ITEMS: &str = "Unknown Items";

/// How an order was described in the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderKind {
    /// No charge recorded; no row emitted
    Uncharged,
    /// Gift card balance reload
    GiftCardReload,
    /// Every item sold by Whole Foods Market
    WholeFoods,
    /// Exactly one item total equals the order charge
    SingleItem,
    /// Zero or several items matched the charge; all items listed
    AllItems,
    /// Order absent from the items report
    UnknownItems,
}

/// Per-run counters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerSummary {
    pub orders: usize,
    pub uncharged_skipped: usize,
    pub gift_card_reloads: usize,
    pub whole_foods: usize,
    pub single_item: usize,
    pub all_items: usize,
    pub unknown_items: usize,
    pub refunds: usize,
}

impl LedgerSummary {
    fn record(&mut self, kind: OrderKind) {
        match kind {
            OrderKind::Uncharged => {
                self.uncharged_skipped += 1;
                return;
            }
            OrderKind::GiftCardReload => self.gift_card_reloads += 1,
            OrderKind::WholeFoods => self.whole_foods += 1,
            OrderKind::SingleItem => self.single_item += 1,
            OrderKind::AllItems => self.all_items += 1,
            OrderKind::UnknownItems => self.unknown_items += 1,
        }
        self.orders += 1;
    }
}

/// Generated ledger rows in output order
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    pub rows: Vec<LedgerRow>,
    pub summary: LedgerSummary,
}

/// Render an order's items when no single item explains the charge
fn list_all_items(items: &[ItemDetail]) -> String {
    items
        .iter()
        .map(|item| format!("{} ({})", item.name, item.total))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Classify an order and build its row
///
/// Returns `None` for orders with an empty "Total Charged".
pub fn classify_order(
    order: &Order,
    index: &OrderIndex,
    self_recipients: &SelfRecipients,
) -> (OrderKind, Option<LedgerRow>) {
    let order_id = &order.order_id;
    let total_charged = &order.total_charged;

    if total_charged.is_empty() {
        debug!("Skipping uncharged order {}", order_id);
        return (OrderKind::Uncharged, None);
    }

    if index.is_gift_card_order(order_id) {
        let row = LedgerRow {
            date: order.order_date.clone(),
            payee: AMAZON_PAYEE.to_string(),
            memo: format!("Order #{}: Prime Reload", order_id),
            amount: total_charged.clone(),
            invoice_url: invoice_url(order_id),
        };
        return (OrderKind::GiftCardReload, Some(row));
    }

    let mut payee = AMAZON_PAYEE;
    let (kind, items) = match index.items_for(order_id) {
        None => (OrderKind::UnknownItems, Some(UNKNOWN_ITEMS.to_string())),
        Some(details) if details.iter().all(|d| d.seller == WHOLE_FOODS_SELLER) => {
            payee = WHOLE_FOODS_SELLER;
            (OrderKind::WholeFoods, None)
        }
        Some(details) => {
            let matching: Vec<&ItemDetail> = details
                .iter()
                .filter(|d| &d.total == total_charged)
                .collect();
            match matching.as_slice() {
                [single] => (OrderKind::SingleItem, Some(single.name.clone())),
                _ => {
                    debug!(
                        "Order {}: {} items match charge {}, listing all {}",
                        order_id,
                        matching.len(),
                        total_charged,
                        details.len()
                    );
                    (OrderKind::AllItems, Some(list_all_items(details)))
                }
            }
        }
    };

    let mut memo = if self_recipients.matches(&order.ship_to) {
        format!("Order #{}", order_id)
    } else {
        format!("{} - Order #{}", order.ship_to, order_id)
    };
    if let Some(items) = items {
        memo.push_str(": ");
        memo.push_str(&items);
    }

    let row = LedgerRow {
        date: order.order_date.clone(),
        payee: payee.to_string(),
        memo,
        amount: format!("-{}", total_charged),
        invoice_url: invoice_url(order_id),
    };
    (kind, Some(row))
}

/// Build the ledger row for an order, or `None` if it was never charged
pub fn build_order_row(
    order: &Order,
    index: &OrderIndex,
    self_recipients: &SelfRecipients,
) -> Option<LedgerRow> {
    classify_order(order, index, self_recipients).1
}

/// Build the ledger row for a refund
///
/// Fails when the refund or refund tax amount is not a decimal.
pub fn build_refund_row(refund: &Refund) -> Result<LedgerRow> {
    let amount = parse_amount(&refund.amount)?;
    let tax_amount = parse_amount(&refund.tax_amount)?;

    Ok(LedgerRow {
        date: refund.refund_date.clone(),
        payee: AMAZON_PAYEE.to_string(),
        memo: format!(
            "Order #{}: Returned {}",
            refund.order_id,
            normalize(&refund.title)
        ),
        amount: format!("${:.2}", amount + tax_amount),
        invoice_url: invoice_url(&refund.order_id),
    })
}

/// Builds a full ledger from orders and optional refunds
pub struct LedgerBuilder<'a> {
    index: &'a OrderIndex,
    self_recipients: &'a SelfRecipients,
}

impl<'a> LedgerBuilder<'a> {
    pub fn new(index: &'a OrderIndex, self_recipients: &'a SelfRecipients) -> Self {
        Self {
            index,
            self_recipients,
        }
    }

    /// Orders first (input order), then refunds (input order)
    ///
    /// A refund that fails to parse aborts the whole build.
    pub fn build(&self, orders: &[Order], refunds: Option<&[Refund]>) -> Result<Ledger> {
        let mut ledger = Ledger::default();

        for order in orders {
            let (kind, row) = classify_order(order, self.index, self.self_recipients);
            ledger.summary.record(kind);
            if let Some(row) = row {
                ledger.rows.push(row);
            }
        }

        for refund in refunds.unwrap_or_default() {
            ledger.rows.push(build_refund_row(refund)?);
            ledger.summary.refunds += 1;
        }

        info!(
            "Built ledger: {} orders, {} refunds ({} uncharged skipped)",
            ledger.summary.orders, ledger.summary.refunds, ledger.summary.uncharged_skipped
        );
        Ok(ledger)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::models::{Item, GIFT_CARD_CATEGORY};

    fn item(order_id: &str, title: &str, total: &str, seller: &str) -> Item {
        Item {
            order_id: order_id.to_string(),
            title: title.to_string(),
            category: "ELECTRONICS".to_string(),
            total: total.to_string(),
            seller: seller.to_string(),
        }
    }

    fn order(order_id: &str, ship_to: &str, total_charged: &str) -> Order {
        Order {
            order_id: order_id.to_string(),
            order_date: "01/15/2024".to_string(),
            ship_to: ship_to.to_string(),
            total_charged: total_charged.to_string(),
        }
    }

    fn refund(amount: &str, tax_amount: &str) -> Refund {
        Refund {
            order_id: "111-1".to_string(),
            refund_date: "02/01/2024".to_string(),
            title: "Echo Dot (4th Gen), Charcoal".to_string(),
            amount: amount.to_string(),
            tax_amount: tax_amount.to_string(),
        }
    }

    fn memo_for(items: &[Item], order: &Order) -> String {
        let index = OrderIndex::build(items);
        build_order_row(order, &index, &SelfRecipients::new())
            .unwrap()
            .memo
    }

    #[test]
    fn test_uncharged_order_skipped() {
        let items = vec![item("1", "Kindle", "$89.99", "Amazon.com")];
        let index = OrderIndex::build(&items);

        let row = build_order_row(&order("1", "Jane Doe", ""), &index, &SelfRecipients::new());
        assert!(row.is_none());
    }

    #[test]
    fn test_gift_card_reload_not_negated() {
        let mut reload = item("1", "Amazon Reload", "$50", "Amazon.com");
        reload.category = GIFT_CARD_CATEGORY.to_string();
        let index = OrderIndex::build(&[reload]);

        let row =
            build_order_row(&order("1", "Jane Doe", "$50"), &index, &SelfRecipients::new()).unwrap();
        assert_eq!(row.payee, "Amazon.com");
        assert_eq!(row.memo, "Order #1: Prime Reload");
        assert_eq!(row.amount, "$50");
    }

    #[test]
    fn test_whole_foods_order() {
        let items = vec![
            item("1", "Bananas", "$1.99", WHOLE_FOODS_SELLER),
            item("1", "Milk, 1 Gallon", "$4.49", WHOLE_FOODS_SELLER),
        ];
        let index = OrderIndex::build(&items);

        let row =
            build_order_row(&order("1", "Jane Doe", "$6.48"), &index, &SelfRecipients::new())
                .unwrap();
        assert_eq!(row.payee, "Whole Foods Market");
        assert_eq!(row.memo, "Jane Doe - Order #1");
        assert_eq!(row.amount, "-$6.48");
    }

    #[test]
    fn test_partial_whole_foods_is_amazon() {
        let items = vec![
            item("1", "Bananas", "$1.99", WHOLE_FOODS_SELLER),
            item("1", "Kindle", "$89.99", "Amazon.com"),
        ];
        let index = OrderIndex::build(&items);

        let row =
            build_order_row(&order("1", "Jane Doe", "$91.98"), &index, &SelfRecipients::new())
                .unwrap();
        assert_eq!(row.payee, "Amazon.com");
    }

    #[test]
    fn test_unknown_items() {
        let index = OrderIndex::default();
        let row =
            build_order_row(&order("9", "Jane Doe", "$10.00"), &index, &SelfRecipients::new())
                .unwrap();
        assert_eq!(row.memo, "Jane Doe - Order #9: Unknown Items");
        assert_eq!(row.amount, "-$10.00");
    }

    #[test]
    fn test_single_matching_item_named() {
        let items = vec![
            item("1", "Echo Dot (4th Gen), Charcoal", "$42.00", "Amazon.com"),
            item("1", "Kindle", "$89.99", "Amazon.com"),
            item("1", "USB Cable", "$8.99", "Amazon.com"),
        ];

        assert_eq!(
            memo_for(&items, &order("1", "Jane Doe", "$42.00")),
            "Jane Doe - Order #1: Echo Dot"
        );
    }

    #[test]
    fn test_ambiguous_match_lists_all_items() {
        let items = vec![
            item("1", "Echo Dot", "$42.00", "Amazon.com"),
            item("1", "Fire TV Stick", "$42.00", "Amazon.com"),
            item("1", "USB Cable", "$8.99", "Amazon.com"),
        ];

        assert_eq!(
            memo_for(&items, &order("1", "Jane Doe", "$42.00")),
            "Jane Doe - Order #1: Echo Dot ($42.00); Fire TV Stick ($42.00); USB Cable ($8.99)"
        );
    }

    #[test]
    fn test_no_match_lists_all_items() {
        let items = vec![
            item("1", "Echo Dot", "$42.00", "Amazon.com"),
            item("1", "USB Cable", "$8.99", "Amazon.com"),
        ];

        assert_eq!(
            memo_for(&items, &order("1", "Jane Doe", "$55.19")),
            "Jane Doe - Order #1: Echo Dot ($42.00); USB Cable ($8.99)"
        );
    }

    #[test]
    fn test_amount_match_is_string_equality() {
        let items = vec![
            item("1", "Echo Dot", "$42.0", "Amazon.com"),
            item("1", "USB Cable", "$8.99", "Amazon.com"),
        ];

        assert_eq!(
            memo_for(&items, &order("1", "Jane Doe", "$42.00")),
            "Jane Doe - Order #1: Echo Dot ($42.0); USB Cable ($8.99)"
        );
    }

    #[test]
    fn test_self_recipient_memo() {
        let items = vec![item("1", "Kindle", "$89.99", "Amazon.com")];
        let index = OrderIndex::build(&items);
        let recipients = SelfRecipients::new().with_name("Jane Doe");

        let row = build_order_row(&order("1", "Jane Doe", "$89.99"), &index, &recipients).unwrap();
        assert_eq!(row.memo, "Order #1: Kindle");

        let row = build_order_row(&order("1", "Bob Jones", "$89.99"), &index, &recipients).unwrap();
        assert_eq!(row.memo, "Bob Jones - Order #1: Kindle");
    }

    #[test]
    fn test_order_row_fields() {
        let items = vec![item("1", "Kindle", "$89.99", "Amazon.com")];
        let index = OrderIndex::build(&items);

        let row =
            build_order_row(&order("1", "Jane Doe", "$89.99"), &index, &SelfRecipients::new())
                .unwrap();
        assert_eq!(row.date, "01/15/2024");
        assert_eq!(
            row.invoice_url,
            "https://www.amazon.com/gp/css/summary/print.html?orderID=1"
        );
    }

    #[test]
    fn test_refund_row() {
        let row = build_refund_row(&refund("$12.34", "$1.01")).unwrap();
        assert_eq!(row.date, "02/01/2024");
        assert_eq!(row.payee, "Amazon.com");
        assert_eq!(row.memo, "Order #111-1: Returned Echo Dot");
        assert_eq!(row.amount, "$13.35");
        assert_eq!(
            row.invoice_url,
            "https://www.amazon.com/gp/css/summary/print.html?orderID=111-1"
        );
    }

    #[test]
    fn test_refund_two_decimals() {
        assert_eq!(build_refund_row(&refund("10", "0.5")).unwrap().amount, "$10.50");
        assert_eq!(build_refund_row(&refund("$7", "$0")).unwrap().amount, "$7.00");
    }

    #[test]
    fn test_refund_parse_error() {
        assert!(matches!(
            build_refund_row(&refund("abc", "0")),
            Err(Error::Parse(_))
        ));
        assert!(matches!(
            build_refund_row(&refund("1.00", "")),
            Err(Error::Parse(_))
        ));
    }

    #[test]
    fn test_builder_orders_then_refunds() {
        let items = vec![
            item("1", "Kindle", "$89.99", "Amazon.com"),
            item("2", "Echo Dot", "$49.99", "Amazon.com"),
        ];
        let index = OrderIndex::build(&items);
        let recipients = SelfRecipients::new();
        let orders = vec![
            order("1", "Jane Doe", "$89.99"),
            order("3", "Jane Doe", ""),
            order("2", "Jane Doe", "$49.99"),
        ];
        let refunds = vec![refund("$49.99", "$0.00")];

        let ledger = LedgerBuilder::new(&index, &recipients)
            .build(&orders, Some(&refunds))
            .unwrap();

        let memos: Vec<&str> = ledger.rows.iter().map(|r| r.memo.as_str()).collect();
        assert_eq!(
            memos,
            vec![
                "Jane Doe - Order #1: Kindle",
                "Jane Doe - Order #2: Echo Dot",
                "Order #111-1: Returned Echo Dot",
            ]
        );
        assert_eq!(ledger.summary.orders, 2);
        assert_eq!(ledger.summary.uncharged_skipped, 1);
        assert_eq!(ledger.summary.single_item, 2);
        assert_eq!(ledger.summary.refunds, 1);
    }

    #[test]
    fn test_builder_without_refunds() {
        let index = OrderIndex::default();
        let recipients = SelfRecipients::new();

        let ledger = LedgerBuilder::new(&index, &recipients)
            .build(&[order("1", "Jane Doe", "$5.00")], None)
            .unwrap();
        assert_eq!(ledger.rows.len(), 1);
        assert_eq!(ledger.summary.unknown_items, 1);
        assert_eq!(ledger.summary.refunds, 0);
    }

    #[test]
    fn test_builder_refund_error_aborts() {
        let index = OrderIndex::default();
        let recipients = SelfRecipients::new();
        let refunds = vec![refund("$1.00", "$0.00"), refund("abc", "$0.00")];

        let result = LedgerBuilder::new(&index, &recipients)
            .build(&[order("1", "Jane Doe", "$5.00")], Some(&refunds));
        assert!(matches!(result, Err(Error::Parse(_))));
    }
}
