//! Review-score indicator features.

use tracing::debug;

use crate::data::Review;
use crate::error::Result;
use crate::frame::{Column, FeatureFrame};

/// Emits one row per review with `dim_is_five_star`, `dim_is_one_star` and the
/// raw `review_score`.
///
/// Reviews are not aggregated per order. A missing score yields zero
/// indicators and a missing `review_score`.
#[tracing::instrument(skip(reviews), fields(reviews = reviews.len()))]
pub fn review_score(reviews: &[Review]) -> Result<FeatureFrame> {
    let indicator = |score: i64| -> Vec<Option<i64>> {
        reviews
            .iter()
            .map(|r| Some(i64::from(r.review_score == Some(score))))
            .collect()
    };

    debug!("Review indicators computed");

    FeatureFrame::new(reviews.iter().map(|r| r.order_id.clone()).collect())
        .with_column("dim_is_five_star", Column::Int(indicator(5)))?
        .with_column("dim_is_one_star", Column::Int(indicator(1)))?
        .with_column(
            "review_score",
            Column::Int(reviews.iter().map(|r| r.review_score).collect()),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(order_id: &str, score: Option<i64>) -> Review {
        Review {
            order_id: order_id.to_string(),
            review_score: score,
        }
    }

    #[test]
    fn test_indicators() {
        let frame = review_score(&[
            review("o1", Some(5)),
            review("o2", Some(1)),
            review("o3", Some(3)),
        ])
        .unwrap();

        assert_eq!(
            frame.ints("dim_is_five_star").unwrap(),
            &[Some(1), Some(0), Some(0)]
        );
        assert_eq!(
            frame.ints("dim_is_one_star").unwrap(),
            &[Some(0), Some(1), Some(0)]
        );
        assert_eq!(
            frame.ints("review_score").unwrap(),
            &[Some(5), Some(1), Some(3)]
        );
        assert_eq!(
            frame.column_names(),
            vec!["order_id", "dim_is_five_star", "dim_is_one_star", "review_score"]
        );
    }

    #[test]
    fn test_multiple_reviews_emitted_as_is() {
        let frame = review_score(&[review("o1", Some(5)), review("o1", Some(2))]).unwrap();
        assert_eq!(frame.rows_for("o1"), vec![0, 1]);
    }

    #[test]
    fn test_missing_score() {
        let frame = review_score(&[review("o1", None)]).unwrap();
        assert_eq!(frame.ints("dim_is_five_star").unwrap(), &[Some(0)]);
        assert_eq!(frame.ints("review_score").unwrap(), &[None::<i64>]);
    }
}
