//! Yule-Walker estimation of AR(k) coefficients.

use kestrel_stats::{autocovariance, Denominator};

use crate::error::ArmaError;
use crate::linalg;
use crate::validation::check_series;

/// AR coefficients and innovation variance from the Yule-Walker equations.
#[derive(Debug, Clone, PartialEq)]
pub struct YuleWalker {
    coefficients: Vec<f64>,
    sigma2: f64,
}

impl YuleWalker {
    /// AR coefficients `phi_1..phi_k`.
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Innovation variance `r[0] - phi . r[1..=k]`.
    pub fn sigma2(&self) -> f64 {
        self.sigma2
    }

    /// Consumes the estimate, returning `(coefficients, sigma2)`.
    pub fn into_parts(self) -> (Vec<f64>, f64) {
        (self.coefficients, self.sigma2)
    }
}

/// Stateless Yule-Walker estimator.
///
/// The only knob is the autocovariance [`Denominator`]:
/// [`Denominator::Unbiased`] ("yw", the default) divides lag `l` by `n - l`,
/// [`Denominator::Biased`] ("mle") divides every lag by `n`.
///
/// # Example
///
/// ```
/// use kestrel_arma::YuleWalkerEstimator;
/// use kestrel_stats::Denominator;
///
/// let data: Vec<f64> = (0..50).map(|t| ((t * 7) % 11) as f64).collect();
/// let est = YuleWalkerEstimator::new(Denominator::Biased)
///     .estimate(&data, 2)
///     .unwrap();
/// assert_eq!(est.coefficients().len(), 2);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct YuleWalkerEstimator {
    denominator: Denominator,
}

impl YuleWalkerEstimator {
    /// Creates an estimator using the given autocovariance denominator.
    pub fn new(denominator: Denominator) -> Self {
        Self { denominator }
    }

    /// Returns the autocovariance denominator in use.
    pub fn denominator(&self) -> Denominator {
        self.denominator
    }

    /// Estimates AR(`order`) coefficients and innovation variance from
    /// the mean-centred `series`.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`ArmaError::EmptyData`] | `series` is empty |
    /// | [`ArmaError::NonFiniteData`] | any element is NaN or infinite |
    /// | [`ArmaError::InvalidOrder`] | `order == 0` |
    /// | [`ArmaError::Stats`] | `order >= series.len()` |
    /// | [`ArmaError::SingularSystem`] | autocovariance matrix is singular |
    pub fn estimate(&self, series: &[f64], order: usize) -> Result<YuleWalker, ArmaError> {
        check_series(series)?;
        if order == 0 {
            return Err(ArmaError::InvalidOrder { p: 0, q: 0 });
        }

        let r = autocovariance(series, order, self.denominator)?;
        let coefficients = linalg::solve_toeplitz(&r)?;
        let explained: f64 = coefficients.iter().zip(&r[1..]).map(|(a, b)| a * b).sum();

        Ok(YuleWalker {
            coefficients,
            sigma2: r[0] - explained,
        })
    }
}

/// Yule-Walker estimate with the unbiased ("yw") denominator.
///
/// Shorthand for `YuleWalkerEstimator::default().estimate(series, order)`.
pub fn yule_walker(series: &[f64], order: usize) -> Result<YuleWalker, ArmaError> {
    YuleWalkerEstimator::default().estimate(series, order)
}
