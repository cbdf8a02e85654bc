/// Computes the arithmetic mean of a slice of values. Returns 0.0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Computes the sample standard deviation (divisor `n - 1`) given a
/// pre-computed mean. `None` for fewer than two values.
pub fn sample_stddev(values: &[f64], mean: f64) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let variance =
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (values.len() - 1) as f64;

    Some(variance.sqrt())
}

/// Mean of the present, non-NaN values. `None` when nothing is present.
pub fn mean_of_available(values: &[Option<f64>]) -> Option<f64> {
    let present: Vec<f64> = values.iter().flatten().copied().filter(|v| !v.is_nan()).collect();
    if present.is_empty() {
        None
    } else {
        Some(mean(&present))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_empty() {
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_sample_stddev() {
        let values = [1.0, 3.0];
        assert_eq!(sample_stddev(&values, mean(&values)), Some(2.0_f64.sqrt()));
        assert_eq!(sample_stddev(&[4.0], 4.0), None);
        assert_eq!(sample_stddev(&[], 0.0), None);
    }

    #[test]
    fn test_mean_of_available_ignores_missing() {
        assert_eq!(mean_of_available(&[Some(1.0), None, Some(3.0)]), Some(2.0));
        assert_eq!(mean_of_available(&[None, Some(f64::NAN)]), None);
        assert_eq!(mean_of_available(&[]), None);
    }
}
