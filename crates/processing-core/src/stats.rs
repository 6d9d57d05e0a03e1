//! Numeric primitives used by the timeline and the trace transforms.
//!
//! Gaps are represented as non-finite values (NaN). Every function here is
//! pure and recomputes from scratch on each call.

use std::cmp::Ordering;

/// Median of `values`; 0 for an empty slice.
///
/// Even-length input yields the mean of the two middle elements.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        sorted[mid]
    } else {
        0.5 * (sorted[mid - 1] + sorted[mid])
    }
}

/// Causal moving average over a trailing window of up to `window` samples.
///
/// Each output is the mean of the finite inputs in `values[i + 1 - window ..= i]`
/// (shorter at the start), or NaN when that window holds no finite value.
/// Output `i` never depends on inputs after `i`. A `window` of 0 or 1
/// returns the input unchanged.
pub fn moving_average(values: &[f64], window: usize) -> Vec<f64> {
    if window <= 1 {
        return values.to_vec();
    }

    (0..values.len())
        .map(|i| {
            let start = (i + 1).saturating_sub(window);
            let (sum, count) = values[start..=i]
                .iter()
                .filter(|v| v.is_finite())
                .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));

            if count == 0 {
                f64::NAN
            } else {
                sum / count as f64
            }
        })
        .collect()
}

/// Scale finite values into `[0, 1]` using the finite min and max.
///
/// A constant series maps to 0 (denominator 1). Non-finite inputs stay NaN.
pub fn normalize01(values: &[f64]) -> Vec<f64> {
    let Some((min, max)) = finite_range(values) else {
        return vec![f64::NAN; values.len()];
    };

    let span = max - min;
    let den = if span == 0.0 { 1.0 } else { span };

    values
        .iter()
        .map(|&x| if x.is_finite() { (x - min) / den } else { f64::NAN })
        .collect()
}

/// `(min, max)` over the finite values, `None` when there are none.
pub fn finite_range(values: &[f64]) -> Option<(f64, f64)> {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn assert_same(a: &[f64], b: &[f64]) {
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b) {
            assert!(
                (x.is_nan() && y.is_nan()) || x == y,
                "mismatch: {a:?} vs {b:?}"
            );
        }
    }

    #[test]
    fn test_median_edge_cases() {
        assert_eq!(median(&[]), 0.0);
        assert_eq!(median(&[4.2]), 4.2);
        assert_eq!(median(&[3.0, 1.0, 2.0]), 2.0);
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), 2.5);
    }

    #[test]
    fn test_median_does_not_reorder_input() {
        let values = vec![3.0, 1.0, 2.0];
        median(&values);
        assert_eq!(values, vec![3.0, 1.0, 2.0]);
    }

    #[test]
    fn test_moving_average_window_one_is_identity() {
        let y = [1.0, f64::NAN, 3.0, -2.5];
        assert_same(&moving_average(&y, 1), &y);
        assert_same(&moving_average(&y, 0), &y);
    }

    #[test]
    fn test_moving_average_trailing_window() {
        let y: Vec<f64> = (0..10).map(f64::from).collect();
        let out = moving_average(&y, 3);

        assert_eq!(out[0], 0.0);
        assert_eq!(out[1], 0.5);
        assert_eq!(out[2], 1.0);
        assert_eq!(out[9], 8.0);
    }

    #[test]
    fn test_moving_average_skips_gaps() {
        let y = [1.0, f64::NAN, 3.0, f64::NAN, f64::NAN, f64::NAN];
        let out = moving_average(&y, 2);

        assert_eq!(out[0], 1.0);
        assert_eq!(out[1], 1.0);
        assert_eq!(out[2], 3.0);
        assert_eq!(out[3], 3.0);
        assert!(out[4].is_nan());
        assert!(out[5].is_nan());
    }

    #[test]
    fn test_normalize01_maps_extremes() {
        let out = normalize01(&[2.0, 4.0, f64::NAN, 6.0]);
        assert_eq!(out[0], 0.0);
        assert_eq!(out[1], 0.5);
        assert!(out[2].is_nan());
        assert_eq!(out[3], 1.0);
    }

    #[test]
    fn test_normalize01_constant_series_maps_to_zero() {
        assert_eq!(normalize01(&[5.0, 5.0, 5.0]), vec![0.0, 0.0, 0.0]);
        assert_eq!(normalize01(&[7.0]), vec![0.0]);
    }

    #[test]
    fn test_normalize01_all_gaps() {
        let out = normalize01(&[f64::NAN, f64::INFINITY]);
        assert!(out.iter().all(|v| v.is_nan()));
    }

    fn series() -> impl Strategy<Value = Vec<f64>> {
        prop::collection::vec(
            prop_oneof![
                4 => -1.0e6..1.0e6f64,
                1 => Just(f64::NAN),
            ],
            1..64,
        )
    }

    proptest! {
        #[test]
        fn prop_moving_average_is_causal(y in series(), window in 1usize..12, k in 1usize..64) {
            let k = k.min(y.len());
            let full = moving_average(&y, window);
            let truncated = moving_average(&y[..k], window);

            prop_assert_eq!(full.len(), y.len());
            for i in 0..k {
                prop_assert!(
                    (full[i].is_nan() && truncated[i].is_nan()) || full[i] == truncated[i]
                );
            }
        }

        #[test]
        fn prop_normalize01_stays_in_unit_range(y in series()) {
            let out = normalize01(&y);
            prop_assert_eq!(out.len(), y.len());

            if let Some((min, max)) = finite_range(&y) {
                for (x, n) in y.iter().zip(&out) {
                    if x.is_finite() {
                        prop_assert!((0.0..=1.0).contains(n));
                        if *x == min {
                            prop_assert_eq!(*n, 0.0);
                        }
                        if *x == max && max > min {
                            prop_assert!((*n - 1.0).abs() < 1e-12);
                        }
                    } else {
                        prop_assert!(n.is_nan());
                    }
                }
            }
        }
    }
}
