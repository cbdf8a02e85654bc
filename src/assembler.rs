//! Assembles the per-order training table from the metric frames.

use tracing::{debug, info};

use crate::data::Tables;
use crate::error::Result;
use crate::frame::FeatureFrame;
use crate::metrics::{distance, items, reviews, wait_time};
use crate::policy::{ClampPolicy, ParsePolicy};

/// Run options for [`TrainingSetAssembler`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Compute and join `distance_seller_customer`.
    pub with_distance_seller_customer: bool,
    pub parse_policy: ParsePolicy,
    pub clamp_policy: ClampPolicy,
}

impl PipelineOptions {
    pub fn with_distance(mut self, enabled: bool) -> Self {
        self.with_distance_seller_customer = enabled;
        self
    }
}

/// Borrows a loaded table snapshot and derives feature frames from it.
///
/// Every call recomputes from the source rows; nothing is cached.
pub struct TrainingSetAssembler<'a> {
    tables: &'a Tables,
    options: PipelineOptions,
}

impl<'a> TrainingSetAssembler<'a> {
    pub fn new(tables: &'a Tables, options: PipelineOptions) -> Self {
        Self { tables, options }
    }

    pub fn wait_time(&self) -> Result<FeatureFrame> {
        wait_time::wait_time(
            &self.tables.orders,
            self.options.parse_policy,
            self.options.clamp_policy,
        )
    }

    pub fn review_score(&self) -> Result<FeatureFrame> {
        reviews::review_score(&self.tables.order_reviews)
    }

    pub fn number_items(&self) -> Result<FeatureFrame> {
        items::number_items(&self.tables.order_items)
    }

    pub fn number_sellers(&self) -> Result<FeatureFrame> {
        items::number_sellers(&self.tables.order_items)
    }

    pub fn price_and_freight(&self) -> Result<FeatureFrame> {
        items::price_and_freight(&self.tables.order_items)
    }

    pub fn distance_seller_customer(&self) -> Result<FeatureFrame> {
        distance::distance_seller_customer(self.tables)
    }

    /// All feature frames left-joined onto the delivered-order wait times,
    /// before incomplete rows are removed.
    #[tracing::instrument(skip(self), fields(with_distance = self.options.with_distance_seller_customer))]
    pub fn joined(&self) -> Result<FeatureFrame> {
        let mut df = self.wait_time()?;

        df = df.left_join(&self.review_score()?)?;
        df = df.left_join(&self.number_items()?)?;
        df = df.left_join(&self.number_sellers()?)?;
        df = df.left_join(&self.price_and_freight()?)?;

        if self.options.with_distance_seller_customer {
            df = df.left_join(&self.distance_seller_customer()?)?;
        }

        debug!(rows = df.len(), "Feature frames joined");
        Ok(df)
    }

    /// The training table: one row per delivered order with every feature
    /// present.
    pub fn training_data(&self) -> Result<FeatureFrame> {
        let joined = self.joined()?;
        let complete = joined.drop_missing();

        info!(
            joined = joined.len(),
            kept = complete.len(),
            dropped = joined.len() - complete.len(),
            "Training table assembled"
        );
        Ok(complete)
    }
}
