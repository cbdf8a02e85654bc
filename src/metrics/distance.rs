//! Mean seller-to-customer distance per order.

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::data::Tables;
use crate::error::Result;
use crate::frame::{Column, FeatureFrame};
use crate::geo::{Coordinate, haversine_distances, mean_coordinates};
use crate::metrics::utility::mean_of_available;

/// Joins each order item to its order's customer and its seller, resolves both
/// zip prefixes against the averaged geolocation table and emits
/// `distance_seller_customer`, the mean item distance per order in kilometres.
///
/// Items with an unresolved coordinate contribute nothing to the mean; an
/// order whose items are all unresolved gets a missing distance.
#[tracing::instrument(skip(tables), fields(items = tables.order_items.len()))]
pub fn distance_seller_customer(tables: &Tables) -> Result<FeatureFrame> {
    let geo = mean_coordinates(&tables.geolocation);

    let mut order_customer: HashMap<&str, &str> = HashMap::new();
    for o in &tables.orders {
        order_customer
            .entry(o.order_id.as_str())
            .or_insert(o.customer_id.as_str());
    }

    let mut customer_coord: HashMap<&str, Option<Coordinate>> = HashMap::new();
    for c in &tables.customers {
        customer_coord
            .entry(c.customer_id.as_str())
            .or_insert_with(|| c.customer_zip_code_prefix.and_then(|z| geo.get(&z).copied()));
    }

    let mut seller_coord: HashMap<&str, Option<Coordinate>> = HashMap::new();
    for s in &tables.sellers {
        seller_coord
            .entry(s.seller_id.as_str())
            .or_insert_with(|| s.seller_zip_code_prefix.and_then(|z| geo.get(&z).copied()));
    }

    let items = &tables.order_items;
    let customer: Vec<Option<Coordinate>> = items
        .iter()
        .map(|i| {
            let customer_id = order_customer.get(i.order_id.as_str())?;
            customer_coord.get(customer_id).copied().flatten()
        })
        .collect();
    let seller: Vec<Option<Coordinate>> = items
        .iter()
        .map(|i| seller_coord.get(i.seller_id.as_str()).copied().flatten())
        .collect();

    let lat = |coords: &[Option<Coordinate>]| -> Vec<Option<f64>> {
        coords.iter().map(|c| c.map(|c| c.lat)).collect()
    };
    let lng = |coords: &[Option<Coordinate>]| -> Vec<Option<f64>> {
        coords.iter().map(|c| c.map(|c| c.lng)).collect()
    };

    let distances = haversine_distances(&lat(&customer), &lng(&customer), &lat(&seller), &lng(&seller));

    let unresolved = distances.iter().filter(|d| d.is_none()).count();
    debug!(unresolved, "Item distances computed");

    let mut per_order: BTreeMap<&str, Vec<Option<f64>>> = BTreeMap::new();
    for (item, distance) in items.iter().zip(distances) {
        per_order.entry(item.order_id.as_str()).or_default().push(distance);
    }

    let keys = per_order.keys().map(|k| k.to_string()).collect();
    let means = per_order.values().map(|d| mean_of_available(d)).collect();

    FeatureFrame::new(keys).with_column("distance_seller_customer", Column::Float(means))
}
