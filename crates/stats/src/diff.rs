//! d-fold differencing.

use crate::error::StatsError;

/// Applies the first difference `y[t] - y[t-1]` to `series` `d` times.
///
/// Each pass drops the leading value, which has no predecessor, so the
/// result has `series.len() - d` elements. `d == 0` returns a copy.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`StatsError::DifferenceTooLarge`] | `d > 0` and `d >= series.len()` |
///
/// # Example
///
/// ```
/// let out = kestrel_stats::difference(&[1.0, 4.0, 9.0, 16.0], 1).unwrap();
/// assert_eq!(out, vec![3.0, 5.0, 7.0]);
/// ```
pub fn difference(series: &[f64], d: usize) -> Result<Vec<f64>, StatsError> {
    if d > 0 && d >= series.len() {
        return Err(StatsError::DifferenceTooLarge {
            n: series.len(),
            d,
        });
    }

    let mut out = series.to_vec();
    for _ in 0..d {
        out = out.windows(2).map(|w| w[1] - w[0]).collect();
    }
    Ok(out)
}
