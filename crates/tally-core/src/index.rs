//! Order index built from the items report

use std::collections::{HashMap, HashSet};
use tracing::debug;

use crate::models::{Item, ItemDetail};
use crate::normalize::normalize;

/// Items grouped by order, plus the orders that funded gift card balance
#[derive(Debug, Default, Clone)]
pub struct OrderIndex {
    order_items: HashMap<String, Vec<ItemDetail>>,
    gift_card_order_ids: HashSet<String>,
}

impl OrderIndex {
    /// Build the index in a single pass over the items, in input order
    pub fn build<'a, I>(items: I) -> Self
    where
        I: IntoIterator<Item = &'a Item>,
    {
        let mut index = Self::default();

        for item in items {
            if item.is_gift_card_funding() {
                index.gift_card_order_ids.insert(item.order_id.clone());
            } else {
                index.record_item(item);
            }
        }

        debug!(
            "Indexed {} orders ({} gift card reloads)",
            index.order_items.len(),
            index.gift_card_order_ids.len()
        );
        index
    }

    fn record_item(&mut self, item: &Item) {
        self.order_items
            .entry(item.order_id.clone())
            .or_default()
            .push(ItemDetail {
                name: normalize(&item.title),
                total: item.total.clone(),
                seller: item.seller.clone(),
            });
    }

    /// Items recorded for an order, in input order
    pub fn items_for(&self, order_id: &str) -> Option<&[ItemDetail]> {
        self.order_items.get(order_id).map(Vec::as_slice)
    }

    /// Whether any line of the order was a gift card reload
    pub fn is_gift_card_order(&self, order_id: &str) -> bool {
        self.gift_card_order_ids.contains(order_id)
    }

    pub fn order_items(&self) -> &HashMap<String, Vec<ItemDetail>> {
        &self.order_items
    }

    pub fn gift_card_order_ids(&self) -> &HashSet<String> {
        &self.gift_card_order_ids
    }
}
