//! ARIMA model order (unfitted).

use std::fmt;

use crate::config::FitConfig;
use crate::error::ArmaError;
use crate::fit::ArmaFit;

/// An unfitted ARIMA(p,d,q) model specification.
///
/// This is the entry point of the fitting workflow. Create a spec with
/// [`ArimaSpec::new()`] (or [`ArimaSpec::arma()`] for `d = 0`), then call
/// [`ArimaSpec::fit()`] to obtain an [`ArmaFit`].
///
/// # Workflow
///
/// ```mermaid
/// graph LR
///     A["ArimaSpec::new(p, d, q)"] -->|".fit(&data)?"| B["ArmaFit"]
///     A -->|".fit_with(&data, &config)?"| B
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ArimaSpec {
    p: usize,
    d: usize,
    q: usize,
}

impl ArimaSpec {
    /// Creates an ARIMA(p,d,q) specification.
    ///
    /// # Example
    ///
    /// ```
    /// use kestrel_arma::ArimaSpec;
    ///
    /// let spec = ArimaSpec::new(2, 1, 1);
    /// assert_eq!((spec.p(), spec.d(), spec.q()), (2, 1, 1));
    /// assert_eq!(spec.to_string(), "ARIMA(2,1,1)");
    /// ```
    pub fn new(p: usize, d: usize, q: usize) -> Self {
        Self { p, d, q }
    }

    /// Creates an ARMA(p,q) specification (no differencing).
    pub fn arma(p: usize, q: usize) -> Self {
        Self::new(p, 0, q)
    }

    /// Returns the AR order (`p`).
    pub fn p(&self) -> usize {
        self.p
    }

    /// Returns the differencing order (`d`).
    pub fn d(&self) -> usize {
        self.d
    }

    /// Returns the MA order (`q`).
    pub fn q(&self) -> usize {
        self.q
    }

    /// Number of estimated coefficients, `p + q`.
    pub fn n_coefficients(&self) -> usize {
        self.p + self.q
    }

    /// Fits this specification with the default [`FitConfig`].
    ///
    /// See [`ArimaSpec::fit_with()`].
    pub fn fit(&self, data: &[f64]) -> Result<ArmaFit, ArmaError> {
        self.fit_with(data, &FitConfig::default())
    }

    /// Fits this specification to `data` by exact maximum likelihood.
    ///
    /// `data` is differenced `d` times and the negated Kalman log-likelihood
    /// of the differenced series is minimised with a simplex search started
    /// at the zero vector. The series is used as given unless
    /// [`FitConfig::with_demean()`] asks for centring on the sample mean.
    ///
    /// Reaching the iteration cap is not an error: the best point found is
    /// returned and [`ArmaFit::warning()`] reports the stall.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`ArmaError::InvalidOrder`] | `p + q == 0` |
    /// | [`ArmaError::EmptyData`] | `data` is empty |
    /// | [`ArmaError::NonFiniteData`] | any element is NaN or infinite |
    /// | [`ArmaError::InvalidConfig`] | `config` fails validation |
    /// | [`ArmaError::Stats`] | `d >= data.len()` |
    /// | [`ArmaError::InsufficientData`] | fewer than `max(p, q, 1) + 1` points after differencing |
    /// | [`ArmaError::NonFinite`] | the likelihood is undefined at the starting point |
    /// | [`ArmaError::OptimizationFailed`] | the optimisation framework failed |
    #[tracing::instrument(skip(self, data, config), fields(order = %self, n = data.len()))]
    pub fn fit_with(&self, data: &[f64], config: &FitConfig) -> Result<ArmaFit, ArmaError> {
        crate::optimizer::fit_arma(*self, config, data)
    }
}

impl fmt::Display for ArimaSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ARIMA({},{},{})", self.p, self.d, self.q)
    }
}

/// Fits an ARMA(p,q) model to `series` with default settings.
///
/// Shorthand for `ArimaSpec::arma(p, q).fit(series)`.
pub fn fit(series: &[f64], p: usize, q: usize) -> Result<ArmaFit, ArmaError> {
    ArimaSpec::arma(p, q).fit(series)
}
