//! Statistical helpers shared by the kestrel estimators.
//!
//! Sample mean and centring, sample autocovariance / autocorrelation and
//! d-fold differencing of a univariate series.

mod acf;
mod diff;
mod error;

pub use acf::{autocorrelation, autocovariance, Denominator};
pub use diff::difference;
pub use error::StatsError;

/// Arithmetic mean of a slice. Returns 0.0 if empty.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let sum: f64 = data.iter().sum();
    sum / data.len() as f64
}

/// Returns a copy of `data` with its sample mean subtracted.
pub fn demean(data: &[f64]) -> Vec<f64> {
    let m = mean(data);
    data.iter().map(|x| x - m).collect()
}
