//! Partial autocorrelation function.

use kestrel_stats::{autocovariance, Denominator};

use crate::error::ArmaError;
use crate::levinson::levinson_durbin_from_autocovariance;
use crate::validation::check_series;
use crate::yule_walker::YuleWalkerEstimator;

/// Estimation method for [`pacf`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PacfMethod {
    /// Last coefficient of each order-k Yule-Walker fit, unbiased denominator.
    #[default]
    YuleWalker,
    /// As [`PacfMethod::YuleWalker`] with the biased (`n`) denominator.
    Mle,
    /// Reflection coefficients of the Levinson-Durbin recursion run on the
    /// biased autocovariances.
    LevinsonDurbin,
}

/// Default number of lags for a series of length `n`: `floor(10 * log10(n))`,
/// at least 1 and at most `n - 1`.
pub fn default_max_lags(n: usize) -> usize {
    let lags = (10.0 * (n as f64).log10()).floor() as usize;
    lags.max(1).min(n.saturating_sub(1))
}

/// Partial autocorrelations of `series` at lags `0..=max_lags`.
///
/// `max_lags = None` uses [`default_max_lags`]. The first element is always
/// `1.0`.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`ArmaError::EmptyData`] | `series` is empty |
/// | [`ArmaError::NonFiniteData`] | any element is NaN or infinite |
/// | [`ArmaError::InsufficientData`] | fewer than 2 observations |
/// | [`ArmaError::InvalidLag`] | `max_lags == Some(0)` |
/// | [`ArmaError::Stats`] | `max_lags >= series.len()` |
/// | [`ArmaError::SingularSystem`] | constant series or exact fit |
pub fn pacf(
    series: &[f64],
    max_lags: Option<usize>,
    method: PacfMethod,
) -> Result<Vec<f64>, ArmaError> {
    check_series(series)?;
    if series.len() < 2 {
        return Err(ArmaError::InsufficientData {
            n: series.len(),
            min: 2,
        });
    }
    let max_lags = max_lags.unwrap_or_else(|| default_max_lags(series.len()));
    if max_lags == 0 {
        return Err(ArmaError::InvalidLag { lag: 0 });
    }

    match method {
        PacfMethod::YuleWalker | PacfMethod::Mle => {
            let denominator = if method == PacfMethod::Mle {
                Denominator::Biased
            } else {
                Denominator::Unbiased
            };
            let estimator = YuleWalkerEstimator::new(denominator);
            let mut out = Vec::with_capacity(max_lags + 1);
            out.push(1.0);
            for k in 1..=max_lags {
                let fit = estimator.estimate(series, k)?;
                out.push(fit.coefficients()[k - 1]);
            }
            Ok(out)
        }
        PacfMethod::LevinsonDurbin => {
            let acvf = autocovariance(series, max_lags, Denominator::Biased)?;
            let ld = levinson_durbin_from_autocovariance(&acvf, max_lags)?;
            Ok(ld.pacf().to_vec())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::SeedableRng;
    use rand_distr::{Distribution, Normal};

    fn generate_ar1(phi: f64, n: usize, seed: u64) -> Vec<f64> {
        let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
        let normal = Normal::new(0.0, 1.0).unwrap();
        let mut data = vec![0.0; n];
        for t in 1..n {
            data[t] = phi * data[t - 1] + normal.sample(&mut rng);
        }
        data
    }

    #[test]
    fn default_lags() {
        assert_eq!(default_max_lags(100), 20);
        assert_eq!(default_max_lags(1500), 31);
        assert_eq!(default_max_lags(2), 1);
        assert_eq!(default_max_lags(1), 0);
    }

    #[test]
    fn first_value_is_one_for_every_method() {
        let data = generate_ar1(0.6, 200, 1);
        for method in [
            PacfMethod::YuleWalker,
            PacfMethod::Mle,
            PacfMethod::LevinsonDurbin,
        ] {
            let out = pacf(&data, Some(4), method).unwrap();
            assert_eq!(out.len(), 5);
            assert_eq!(out[0], 1.0);
        }
    }

    #[test]
    fn mle_matches_levinson_durbin() {
        let data = generate_ar1(0.4, 300, 2);
        let mle = pacf(&data, Some(6), PacfMethod::Mle).unwrap();
        let ld = pacf(&data, Some(6), PacfMethod::LevinsonDurbin).unwrap();
        for (a, b) in mle.iter().zip(ld.iter()) {
            assert_abs_diff_eq!(a, b, epsilon = 1e-9);
        }
    }

    #[test]
    fn ar1_positive_spike_at_lag_one() {
        let data = generate_ar1(0.9, 1500, 3);
        let out = pacf(&data, None, PacfMethod::YuleWalker).unwrap();
        assert_eq!(out.len(), default_max_lags(1500) + 1);
        assert!(out[1] >= 0.7, "pacf[1] = {}", out[1]);
        assert!(out[2].abs() <= 0.2, "pacf[2] = {}", out[2]);
    }

    #[test]
    fn ar1_negative_spike_at_lag_one() {
        let data = generate_ar1(-0.9, 1500, 4);
        let out = pacf(&data, Some(3), PacfMethod::LevinsonDurbin).unwrap();
        assert!(out[1] <= -0.5, "pacf[1] = {}", out[1]);
        assert!(out[2] >= -0.5, "pacf[2] = {}", out[2]);
    }

    #[test]
    fn zero_lags_rejected() {
        let err = pacf(&[1.0, 2.0, 3.0], Some(0), PacfMethod::Mle).unwrap_err();
        assert_eq!(err, ArmaError::InvalidLag { lag: 0 });
    }

    #[test]
    fn single_observation_rejected() {
        let err = pacf(&[1.0], None, PacfMethod::YuleWalker).unwrap_err();
        assert_eq!(err, ArmaError::InsufficientData { n: 1, min: 2 });
    }
}
