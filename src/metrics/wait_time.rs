//! Delivery-timing features for delivered orders.

use tracing::debug;

use crate::data::Order;
use crate::error::Result;
use crate::frame::{Column, FeatureFrame};
use crate::policy::{ClampPolicy, ParsePolicy, days_between};

pub const DELIVERED: &str = "delivered";

/// Computes `wait_time`, `expected_wait_time`, `delay_vs_expected` (fractional
/// days) and `order_status` for every delivered order.
///
/// Unparseable timestamps are handled by `parse`; rows are never dropped here.
#[tracing::instrument(skip(orders), fields(orders = orders.len()))]
pub fn wait_time(orders: &[Order], parse: ParsePolicy, clamp: ClampPolicy) -> Result<FeatureFrame> {
    let delivered: Vec<&Order> = orders
        .iter()
        .filter(|o| o.order_status == DELIVERED)
        .collect();

    let purchased = parse_column(&delivered, parse, "order_purchase_timestamp", |o| {
        o.order_purchase_timestamp.as_deref()
    })?;
    let arrived = parse_column(&delivered, parse, "order_delivered_customer_date", |o| {
        o.order_delivered_customer_date.as_deref()
    })?;
    let estimated = parse_column(&delivered, parse, "order_estimated_delivery_date", |o| {
        o.order_estimated_delivery_date.as_deref()
    })?;

    let mut wait = Vec::with_capacity(delivered.len());
    let mut expected = Vec::with_capacity(delivered.len());
    let mut delay = Vec::with_capacity(delivered.len());

    for i in 0..delivered.len() {
        wait.push(days_between(arrived[i], purchased[i]));
        expected.push(days_between(estimated[i], purchased[i]));
        delay.push(clamp.apply(days_between(arrived[i], estimated[i])));
    }

    debug!(delivered = delivered.len(), "Wait times computed");

    FeatureFrame::new(delivered.iter().map(|o| o.order_id.clone()).collect())
        .with_column("wait_time", Column::Float(wait))?
        .with_column("expected_wait_time", Column::Float(expected))?
        .with_column("delay_vs_expected", Column::Float(delay))?
        .with_column(
            "order_status",
            Column::Text(delivered.iter().map(|o| Some(o.order_status.clone())).collect()),
        )
}

fn parse_column<F>(
    orders: &[&Order],
    policy: ParsePolicy,
    column: &str,
    cell: F,
) -> Result<Vec<Option<chrono::NaiveDateTime>>>
where
    F: Fn(&Order) -> Option<&str>,
{
    orders.iter().map(|&o| policy.apply(cell(o), column)).collect()
}
