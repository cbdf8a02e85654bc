//! Named coercion and clipping policies applied by the metric extractors.

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::{PipelineError, Result};

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// How unparseable timestamp cells are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParsePolicy {
    /// Unparseable values become missing; the row survives until the final drop.
    #[default]
    CoerceToMissing,
    /// Unparseable non-empty values abort the run.
    Strict,
}

impl ParsePolicy {
    /// Parses a raw timestamp cell. Empty or absent cells are missing under
    /// every policy.
    pub fn apply(self, raw: Option<&str>, column: &str) -> Result<Option<NaiveDateTime>> {
        let raw = match raw.map(str::trim) {
            Some(s) if !s.is_empty() => s,
            _ => return Ok(None),
        };

        match (parse_timestamp(raw), self) {
            (Some(ts), _) => Ok(Some(ts)),
            (None, ParsePolicy::CoerceToMissing) => Ok(None),
            (None, ParsePolicy::Strict) => Err(PipelineError::InvalidTimestamp {
                column: column.to_string(),
                value: raw.to_string(),
            }),
        }
    }
}

/// How signed day deltas are bounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClampPolicy {
    /// Negative values are floored at zero.
    #[default]
    NonNegative,
    Unclamped,
}

impl ClampPolicy {
    pub fn apply(self, value: Option<f64>) -> Option<f64> {
        match self {
            ClampPolicy::NonNegative => value.map(|v| v.max(0.0)),
            ClampPolicy::Unclamped => value,
        }
    }
}

/// Parses `YYYY-MM-DD HH:MM:SS`, its `T`-separated variant (both with optional
/// fractional seconds) or a bare date at midnight.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Exact fractional day difference `later - earlier`.
pub fn days_between(later: Option<NaiveDateTime>, earlier: Option<NaiveDateTime>) -> Option<f64> {
    let delta = later? - earlier?;
    Some(delta.num_milliseconds() as f64 / 86_400_000.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_space_and_t_separated() {
        let a = parse_timestamp("2017-10-02 10:56:33").unwrap();
        let b = parse_timestamp("2017-10-02T10:56:33").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_parse_date_only_is_midnight() {
        let ts = parse_timestamp("2018-01-15").unwrap();
        assert_eq!(ts.to_string(), "2018-01-15 00:00:00");
    }

    #[test]
    fn test_coerce_to_missing() {
        let parsed = ParsePolicy::CoerceToMissing
            .apply(Some("not a date"), "order_purchase_timestamp")
            .unwrap();
        assert!(parsed.is_none());
    }

    #[test]
    fn test_strict_rejects_garbage() {
        let result = ParsePolicy::Strict.apply(Some("2018-13-45"), "order_purchase_timestamp");
        assert!(matches!(
            result,
            Err(PipelineError::InvalidTimestamp { .. })
        ));
    }

    #[test]
    fn test_empty_cell_is_missing_under_strict() {
        assert!(ParsePolicy::Strict.apply(Some("  "), "c").unwrap().is_none());
        assert!(ParsePolicy::Strict.apply(None, "c").unwrap().is_none());
    }

    #[test]
    fn test_clamp_non_negative() {
        assert_eq!(ClampPolicy::NonNegative.apply(Some(-3.5)), Some(0.0));
        assert_eq!(ClampPolicy::NonNegative.apply(Some(2.0)), Some(2.0));
        assert_eq!(ClampPolicy::NonNegative.apply(None), None);
        assert_eq!(ClampPolicy::Unclamped.apply(Some(-3.5)), Some(-3.5));
    }

    #[test]
    fn test_days_between_is_fractional() {
        let start = parse_timestamp("2023-01-01T00:00:00");
        let end = parse_timestamp("2023-01-05T12:00:00");
        assert_eq!(days_between(end, start), Some(4.5));
        assert_eq!(days_between(None, start), None);
    }
}
