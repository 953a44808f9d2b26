//! Levinson-Durbin recursion.
//!
//! Solves the Yule-Walker equations for every order `1..=max_lag` in
//! `O(max_lag^2)`, reusing the order `k - 1` solution to build order `k`.
//! The reflection coefficient produced at step `k` is the partial
//! autocorrelation at lag `k`.

use kestrel_stats::{autocovariance, Denominator};
use ndarray::{s, Array2};

use crate::error::ArmaError;
use crate::validation::check_series;

/// Output of the Levinson-Durbin recursion up to order `max_lag`.
#[derive(Debug, Clone, PartialEq)]
pub struct LevinsonDurbin {
    sigma2: f64,
    coefficients: Vec<f64>,
    pacf: Vec<f64>,
    sigmas: Vec<f64>,
}

impl LevinsonDurbin {
    /// Innovation variance of the final-order fit.
    pub fn sigma2(&self) -> f64 {
        self.sigma2
    }

    /// AR coefficients `phi_1..phi_max_lag` of the final-order fit.
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Partial autocorrelations at lags `0..=max_lag`; `pacf[0] == 1.0`.
    pub fn pacf(&self) -> &[f64] {
        &self.pacf
    }

    /// Innovation variance after each order, `sigmas[0]` being the lag-0
    /// autocovariance.
    pub fn sigmas(&self) -> &[f64] {
        &self.sigmas
    }
}

/// Runs the recursion on the biased sample autocovariances of `series`.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`ArmaError::EmptyData`] | `series` is empty |
/// | [`ArmaError::NonFiniteData`] | any element is NaN or infinite |
/// | [`ArmaError::InvalidLag`] | `max_lag == 0` |
/// | [`ArmaError::Stats`] | `max_lag >= series.len()` |
/// | [`ArmaError::SingularSystem`] | zero variance at some order |
pub fn levinson_durbin(series: &[f64], max_lag: usize) -> Result<LevinsonDurbin, ArmaError> {
    check_series(series)?;
    if max_lag == 0 {
        return Err(ArmaError::InvalidLag { lag: max_lag });
    }
    let acvf = autocovariance(series, max_lag, Denominator::Biased)?;
    levinson_durbin_from_autocovariance(&acvf, max_lag)
}

/// Runs the recursion on a precomputed autocovariance sequence.
///
/// `acvf` must hold at least `max_lag + 1` values; extra values are ignored.
///
/// # Errors
///
/// [`ArmaError::InvalidLag`] for `max_lag == 0`,
/// [`ArmaError::InsufficientData`] when `acvf` is too short,
/// [`ArmaError::NonFiniteData`] for NaN/infinite input and
/// [`ArmaError::SingularSystem`] when the lag-0 value or an intermediate
/// innovation variance is zero.
pub fn levinson_durbin_from_autocovariance(
    acvf: &[f64],
    max_lag: usize,
) -> Result<LevinsonDurbin, ArmaError> {
    if max_lag == 0 {
        return Err(ArmaError::InvalidLag { lag: max_lag });
    }
    if acvf.len() <= max_lag {
        return Err(ArmaError::InsufficientData {
            n: acvf.len(),
            min: max_lag + 1,
        });
    }
    let r = &acvf[..=max_lag];
    if r.iter().any(|x| !x.is_finite()) {
        return Err(ArmaError::NonFiniteData);
    }
    if r[0] == 0.0 {
        return Err(ArmaError::SingularSystem { dim: 1 });
    }

    // phi[[j, k]]: coefficient j of the order-k fit. Row/column 0 unused.
    let mut phi = Array2::<f64>::zeros((max_lag + 1, max_lag + 1));
    let mut sig = vec![0.0; max_lag + 1];

    sig[0] = r[0];
    phi[[1, 1]] = r[1] / r[0];
    sig[1] = r[0] - phi[[1, 1]] * r[1];

    for k in 2..=max_lag {
        if sig[k - 1] == 0.0 {
            return Err(ArmaError::SingularSystem { dim: k });
        }
        let fitted: f64 = (1..k).map(|j| phi[[j, k - 1]] * r[k - j]).sum();
        let reflection = (r[k] - fitted) / sig[k - 1];
        phi[[k, k]] = reflection;
        for j in 1..k {
            phi[[j, k]] = phi[[j, k - 1]] - reflection * phi[[k - j, k - 1]];
        }
        sig[k] = sig[k - 1] * (1.0 - reflection * reflection);
    }

    let coefficients = phi.slice(s![1.., max_lag]).to_vec();
    let mut pacf = phi.diag().to_vec();
    pacf[0] = 1.0;

    Ok(LevinsonDurbin {
        sigma2: sig[max_lag],
        coefficients,
        pacf,
        sigmas: sig,
    })
}
