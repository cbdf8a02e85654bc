//! Per-order metric extractors.
//!
//! Each extractor is a pure function from borrowed source rows to a
//! [`FeatureFrame`](crate::frame::FeatureFrame) keyed by order identifier.

pub mod distance;
pub mod items;
pub mod reviews;
pub mod utility;
pub mod wait_time;
