//! Sample autocovariance and autocorrelation.

use crate::error::StatsError;

/// Denominator used when averaging lagged cross-products.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Denominator {
    /// Divide the lag-`k` sum by `n - k` ("yw").
    #[default]
    Unbiased,
    /// Divide every lag by `n` ("mle"). Guarantees a positive
    /// semi-definite autocovariance sequence.
    Biased,
}

impl Denominator {
    fn divisor(self, n: usize, lag: usize) -> f64 {
        match self {
            Denominator::Unbiased => (n - lag) as f64,
            Denominator::Biased => n as f64,
        }
    }
}

/// Sample autocovariances of the mean-centred series at lags `0..=max_lag`.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`StatsError::EmptySeries`] | `series` is empty |
/// | [`StatsError::LagTooLarge`] | `max_lag >= series.len()` |
pub fn autocovariance(
    series: &[f64],
    max_lag: usize,
    denominator: Denominator,
) -> Result<Vec<f64>, StatsError> {
    let n = series.len();
    if n == 0 {
        return Err(StatsError::EmptySeries);
    }
    if max_lag >= n {
        return Err(StatsError::LagTooLarge { lag: max_lag, n });
    }

    let centred = crate::demean(series);
    let acvf = (0..=max_lag)
        .map(|lag| {
            let sum: f64 = centred[..n - lag]
                .iter()
                .zip(&centred[lag..])
                .map(|(a, b)| a * b)
                .sum();
            sum / denominator.divisor(n, lag)
        })
        .collect();
    Ok(acvf)
}

/// Sample autocorrelation function at lags `0..=max_lag`.
///
/// Uses the biased autocovariance, so `acf[0] == 1.0` and every value lies
/// in `[-1, 1]`.
///
/// # Errors
///
/// Everything [`autocovariance`] returns, plus [`StatsError::ZeroVariance`]
/// when the series is constant.
pub fn autocorrelation(series: &[f64], max_lag: usize) -> Result<Vec<f64>, StatsError> {
    let acvf = autocovariance(series, max_lag, Denominator::Biased)?;
    let c0 = acvf[0];
    if c0 <= 0.0 {
        return Err(StatsError::ZeroVariance);
    }
    Ok(acvf.iter().map(|c| c / c0).collect())
}
