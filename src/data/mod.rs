//! Source tables and the collaborator that supplies them.
//!
//! A [`DataSource`] is asked once for a [`Tables`] snapshot. The snapshot is
//! never mutated; every extractor borrows the slices it needs.

mod csv_source;
mod records;

pub use csv_source::{CsvDataSource, default_data_dir, table_key};
pub use records::{Customer, GeoSample, Order, OrderItem, Review, Seller};

use crate::error::Result;

/// Logical names of the source tables the pipeline requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableName {
    Orders,
    OrderItems,
    OrderReviews,
    Customers,
    Sellers,
    Geolocation,
}

impl TableName {
    pub const ALL: [TableName; 6] = [
        TableName::Orders,
        TableName::OrderItems,
        TableName::OrderReviews,
        TableName::Customers,
        TableName::Sellers,
        TableName::Geolocation,
    ];

    pub fn key(self) -> &'static str {
        match self {
            TableName::Orders => "orders",
            TableName::OrderItems => "order_items",
            TableName::OrderReviews => "order_reviews",
            TableName::Customers => "customers",
            TableName::Sellers => "sellers",
            TableName::Geolocation => "geolocation",
        }
    }
}

/// Fully populated snapshot of the source tables.
#[derive(Debug, Clone, Default)]
pub struct Tables {
    pub orders: Vec<Order>,
    pub order_items: Vec<OrderItem>,
    pub order_reviews: Vec<Review>,
    pub customers: Vec<Customer>,
    pub sellers: Vec<Seller>,
    pub geolocation: Vec<GeoSample>,
}

impl Tables {
    pub fn row_count(&self, table: TableName) -> usize {
        match table {
            TableName::Orders => self.orders.len(),
            TableName::OrderItems => self.order_items.len(),
            TableName::OrderReviews => self.order_reviews.len(),
            TableName::Customers => self.customers.len(),
            TableName::Sellers => self.sellers.len(),
            TableName::Geolocation => self.geolocation.len(),
        }
    }
}

/// Supplies the source tables. Failure here is fatal to the run.
pub trait DataSource {
    fn load(&self) -> Result<Tables>;
}
