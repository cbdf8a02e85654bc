//! Per-order aggregates over order line items.
//!
//! Each aggregate is its own frame so the assembler can join them separately.
//! Output rows are sorted by order identifier.

use std::collections::{BTreeMap, HashSet};

use tracing::debug;

use crate::data::OrderItem;
use crate::error::Result;
use crate::frame::{Column, FeatureFrame};

fn group_by_order(items: &[OrderItem]) -> BTreeMap<&str, Vec<&OrderItem>> {
    let mut groups: BTreeMap<&str, Vec<&OrderItem>> = BTreeMap::new();
    for item in items {
        groups.entry(item.order_id.as_str()).or_default().push(item);
    }
    groups
}

fn keys(groups: &BTreeMap<&str, Vec<&OrderItem>>) -> Vec<String> {
    groups.keys().map(|k| k.to_string()).collect()
}

/// `number_of_items`: line-item count per order.
#[tracing::instrument(skip(items), fields(items = items.len()))]
pub fn number_items(items: &[OrderItem]) -> Result<FeatureFrame> {
    let groups = group_by_order(items);
    let counts = groups.values().map(|g| Some(g.len() as i64)).collect();

    debug!(orders = groups.len(), "Item counts computed");
    FeatureFrame::new(keys(&groups)).with_column("number_of_items", Column::Int(counts))
}

/// `number_of_sellers`: distinct seller count per order.
#[tracing::instrument(skip(items), fields(items = items.len()))]
pub fn number_sellers(items: &[OrderItem]) -> Result<FeatureFrame> {
    let groups = group_by_order(items);
    let counts = groups
        .values()
        .map(|g| {
            let sellers: HashSet<&str> = g.iter().map(|i| i.seller_id.as_str()).collect();
            Some(sellers.len() as i64)
        })
        .collect();

    debug!(orders = groups.len(), "Seller counts computed");
    FeatureFrame::new(keys(&groups)).with_column("number_of_sellers", Column::Int(counts))
}

/// `price` and `freight_value` summed per order. Missing cells add nothing.
#[tracing::instrument(skip(items), fields(items = items.len()))]
pub fn price_and_freight(items: &[OrderItem]) -> Result<FeatureFrame> {
    let groups = group_by_order(items);
    let sum = |value: fn(&OrderItem) -> Option<f64>| -> Vec<Option<f64>> {
        groups
            .values()
            .map(|g| Some(g.iter().filter_map(|&i| value(i)).sum()))
            .collect()
    };

    let price = sum(|i| i.price);
    let freight = sum(|i| i.freight_value);

    debug!(orders = groups.len(), "Price and freight sums computed");
    FeatureFrame::new(keys(&groups))
        .with_column("price", Column::Float(price))?
        .with_column("freight_value", Column::Float(freight))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(order_id: &str, seller_id: &str, price: f64, freight: f64) -> OrderItem {
        OrderItem {
            order_id: order_id.to_string(),
            seller_id: seller_id.to_string(),
            price: Some(price),
            freight_value: Some(freight),
        }
    }

    fn fixture() -> Vec<OrderItem> {
        vec![
            item("o2", "s1", 10.0, 1.5),
            item("o1", "s1", 20.0, 2.0),
            item("o2", "s1", 30.0, 2.5),
            item("o2", "s2", 5.0, 1.0),
        ]
    }

    #[test]
    fn test_number_items() {
        let frame = number_items(&fixture()).unwrap();
        assert_eq!(frame.keys(), &["o1".to_string(), "o2".to_string()]);
        assert_eq!(frame.ints("number_of_items").unwrap(), &[Some(1), Some(3)]);
    }

    #[test]
    fn test_number_sellers_counts_distinct() {
        let frame = number_sellers(&fixture()).unwrap();
        assert_eq!(frame.ints("number_of_sellers").unwrap(), &[Some(1), Some(2)]);
    }

    #[test]
    fn test_price_and_freight_sums() {
        let mut items = fixture();
        items.push(OrderItem {
            order_id: "o1".to_string(),
            seller_id: "s3".to_string(),
            price: None,
            freight_value: Some(1.0),
        });

        let frame = price_and_freight(&items).unwrap();
        assert_eq!(frame.floats("price").unwrap(), &[Some(20.0), Some(45.0)]);
        assert_eq!(frame.floats("freight_value").unwrap(), &[Some(3.0), Some(5.0)]);
    }

    #[test]
    fn test_empty_items() {
        assert!(number_items(&[]).unwrap().is_empty());
    }
}
