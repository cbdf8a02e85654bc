//! Row types for the six source tables, deserialized straight from CSV.
//!
//! Only the columns the extractors read are declared; any other column in the
//! file is ignored.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Order {
    pub order_id: String,
    pub customer_id: String,
    pub order_status: String,
    pub order_purchase_timestamp: Option<String>,
    pub order_delivered_customer_date: Option<String>,
    pub order_estimated_delivery_date: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrderItem {
    pub order_id: String,
    pub seller_id: String,
    pub price: Option<f64>,
    pub freight_value: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Review {
    pub order_id: String,
    pub review_score: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Customer {
    pub customer_id: String,
    pub customer_zip_code_prefix: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Seller {
    pub seller_id: String,
    pub seller_zip_code_prefix: Option<u32>,
}

/// One raw coordinate sample; a prefix usually has many. Blank cells load as
/// `None` and the sample is skipped when averaging.
#[derive(Debug, Clone, Deserialize)]
pub struct GeoSample {
    pub geolocation_zip_code_prefix: Option<u32>,
    pub geolocation_lat: Option<f64>,
    pub geolocation_lng: Option<f64>,
}
