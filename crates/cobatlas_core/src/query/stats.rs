//! Numeric summary helpers.
//!
//! # Responsibility
//! - Provide the scalar statistics backing the summary and correlation
//!   operations.
//!
//! # Invariants
//! - Undefined results are `None`, never silently zero: mean/median of
//!   an empty slice, standard deviation of fewer than two values,
//!   Pearson coefficient of fewer than two pairs or a zero-variance
//!   column.

/// Arithmetic mean. `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Median over a sorted copy. `None` for an empty slice.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Some(sorted[mid])
    } else {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    }
}

/// Sample standard deviation (n - 1 denominator).
///
/// `None` below two observations; a single observation has no defined
/// spread.
pub fn sample_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let mean = mean(values)?;
    let sum_sq: f64 = values.iter().map(|value| (value - mean).powi(2)).sum();
    Some((sum_sq / (values.len() - 1) as f64).sqrt())
}

/// Pearson correlation coefficient over paired observations.
///
/// `None` when fewer than two pairs exist or either column has zero
/// variance; callers surface this as a "not computable" cell rather
/// than an error.
pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    debug_assert_eq!(xs.len(), ys.len());
    let n = xs.len().min(ys.len());
    if n < 2 {
        return None;
    }

    let mean_x = mean(&xs[..n])?;
    let mean_y = mean(&ys[..n])?;

    let mut sxx = 0.0;
    let mut syy = 0.0;
    let mut sxy = 0.0;
    for i in 0..n {
        let dx = xs[i] - mean_x;
        let dy = ys[i] - mean_y;
        sxx += dx * dx;
        syy += dy * dy;
        sxy += dx * dy;
    }

    if sxx == 0.0 || syy == 0.0 {
        return None;
    }
    Some(sxy / (sxx.sqrt() * syy.sqrt()))
}

#[cfg(test)]
mod tests {
    use super::{mean, median, pearson, sample_std_dev};

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-12,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn mean_and_median_of_empty_slice_are_undefined() {
        assert_eq!(mean(&[]), None);
        assert_eq!(median(&[]), None);
    }

    #[test]
    fn median_handles_odd_and_even_lengths() {
        assert_eq!(median(&[5.0]), Some(5.0));
        assert_eq!(median(&[4.0, 2.0, 6.0]), Some(4.0));
        assert_eq!(median(&[1.0, 2.0, 3.0, 10.0]), Some(2.5));
    }

    #[test]
    fn sample_std_dev_needs_two_observations() {
        assert_eq!(sample_std_dev(&[]), None);
        assert_eq!(sample_std_dev(&[3.0]), None);
        assert_close(sample_std_dev(&[2.0, 4.0, 6.0]).unwrap(), 2.0);
    }

    #[test]
    fn pearson_detects_perfect_linear_relationships() {
        let xs = [1.0, 2.0, 3.0, 4.0];
        let up = [2.0, 4.0, 6.0, 8.0];
        let down = [8.0, 6.0, 4.0, 2.0];

        assert_close(pearson(&xs, &up).unwrap(), 1.0);
        assert_close(pearson(&xs, &down).unwrap(), -1.0);
    }

    #[test]
    fn pearson_is_undefined_for_short_or_constant_columns() {
        assert_eq!(pearson(&[1.0], &[2.0]), None);
        assert_eq!(pearson(&[1.0, 2.0, 3.0], &[5.0, 5.0, 5.0]), None);
    }
}
