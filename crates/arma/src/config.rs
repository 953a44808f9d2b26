//! Configuration for maximum-likelihood fitting.

use crate::error::ArmaError;

/// Settings for the simplex search run by [`ArimaSpec::fit_with()`].
///
/// Use the builder methods to customise parameters.
///
/// # Example
///
/// ```
/// use kestrel_arma::FitConfig;
///
/// let config = FitConfig::new()
///     .with_max_iters(250)
///     .with_size_tolerance(1e-4);
///
/// assert!(config.validate().is_ok());
/// ```
///
/// [`ArimaSpec::fit_with()`]: crate::ArimaSpec::fit_with
#[derive(Debug, Clone, PartialEq)]
pub struct FitConfig {
    /// Iteration cap for the simplex search.
    max_iters: u64,
    /// Initial simplex offset along each coordinate.
    initial_step: f64,
    /// Mean vertex-to-centroid distance below which the search converges.
    size_tolerance: f64,
    /// Whether to subtract the sample mean before fitting. Off by default:
    /// the likelihood is evaluated on the (differenced) series as given.
    demean: bool,
}

impl FitConfig {
    /// Creates a configuration with the default settings.
    ///
    /// Defaults: `max_iters = 100`, `initial_step = 0.1`,
    /// `size_tolerance = 1e-2`, `demean = false`.
    pub fn new() -> Self {
        Self {
            max_iters: 100,
            initial_step: 0.1,
            size_tolerance: 1e-2,
            demean: false,
        }
    }

    /// Sets the iteration cap.
    pub fn with_max_iters(mut self, max_iters: u64) -> Self {
        self.max_iters = max_iters;
        self
    }

    /// Sets the initial simplex step.
    pub fn with_initial_step(mut self, step: f64) -> Self {
        self.initial_step = step;
        self
    }

    /// Sets the simplex size tolerance.
    pub fn with_size_tolerance(mut self, tolerance: f64) -> Self {
        self.size_tolerance = tolerance;
        self
    }

    /// Enables or disables centring on the sample mean.
    pub fn with_demean(mut self, demean: bool) -> Self {
        self.demean = demean;
        self
    }

    /// Returns the iteration cap.
    pub fn max_iters(&self) -> u64 {
        self.max_iters
    }

    /// Returns the initial simplex step.
    pub fn initial_step(&self) -> f64 {
        self.initial_step
    }

    /// Returns the simplex size tolerance.
    pub fn size_tolerance(&self) -> f64 {
        self.size_tolerance
    }

    /// Returns whether the series is centred before fitting.
    pub fn demean(&self) -> bool {
        self.demean
    }

    /// Validates this configuration.
    ///
    /// Returns [`ArmaError::InvalidConfig`] if `max_iters` is zero, or if the
    /// step or tolerance is non-finite or non-positive.
    pub fn validate(&self) -> Result<(), ArmaError> {
        if self.max_iters == 0 {
            return Err(ArmaError::InvalidConfig {
                field: "max_iters",
                value: 0.0,
            });
        }
        if !self.initial_step.is_finite() || self.initial_step <= 0.0 {
            return Err(ArmaError::InvalidConfig {
                field: "initial_step",
                value: self.initial_step,
            });
        }
        if !self.size_tolerance.is_finite() || self.size_tolerance <= 0.0 {
            return Err(ArmaError::InvalidConfig {
                field: "size_tolerance",
                value: self.size_tolerance,
            });
        }
        Ok(())
    }
}

impl Default for FitConfig {
    fn default() -> Self {
        Self::new()
    }
}
