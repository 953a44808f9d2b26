//! Fitted ARMA model results.

use std::fmt;

use ndarray::Array2;
use rand::Rng;
use rand_distr::Normal;

use crate::error::ArmaError;
use crate::kalman::KalmanRunResult;
use crate::params;
use crate::simulate;
use crate::spec::ArimaSpec;

/// How the simplex search ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Termination {
    /// The simplex shrank below the size tolerance.
    Converged,
    /// The iteration cap was reached first.
    Stalled,
    /// An evaluation failed numerically; the best point found before the
    /// failure was kept.
    Aborted {
        /// Message of the failed evaluation.
        reason: String,
    },
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Termination::Converged => f.write_str("converged"),
            Termination::Stalled => f.write_str("stalled"),
            Termination::Aborted { reason } => write!(f, "aborted ({reason})"),
        }
    }
}

/// A fitted ARMA(p,q) model produced by [`ArimaSpec::fit()`].
///
/// Contains estimated AR (`phi`) and MA (`theta`) coefficients,
/// innovation variance (`sigma2`), residuals, log-likelihood and AIC, all
/// taken from a final Kalman pass at the optimum, plus optimizer
/// diagnostics. Call [`ArmaFit::simulate()`] to generate synthetic
/// realisations.
///
/// ```mermaid
/// graph LR
///     B["ArmaFit"] --> C[".ar(): AR coefficients"]
///     B --> D[".ma(): MA coefficients"]
///     B --> E[".sigma2(): innovation variance"]
///     B --> F[".aic(): Akaike Information Criterion"]
///     B --> W[".warning() / .at_boundary()"]
///     B --> G[".simulate(n, n_sim, &mut rng)"]
/// ```
#[derive(Clone, Debug)]
pub struct ArmaFit {
    spec: ArimaSpec,
    params: Vec<f64>,
    sigma2: f64,
    residuals: Vec<f64>,
    log_likelihood: f64,
    aic: f64,
    mean: f64,
    iterations: u64,
    termination: Termination,
}

impl ArmaFit {
    /// Assembles a fit from the optimum `params` and the Kalman pass there.
    pub(crate) fn new(
        spec: ArimaSpec,
        params: Vec<f64>,
        run: KalmanRunResult,
        mean: f64,
        iterations: u64,
        termination: Termination,
    ) -> Self {
        let (sigma2, log_likelihood, aic) = (run.sigma2(), run.log_likelihood(), run.aic());
        Self {
            spec,
            params,
            sigma2,
            residuals: run.into_innovations(),
            log_likelihood,
            aic,
            mean,
            iterations,
            termination,
        }
    }

    /// Returns the [`ArimaSpec`] that produced this fit.
    pub fn spec(&self) -> ArimaSpec {
        self.spec
    }

    /// Returns the `(p, q)` order of the fitted model.
    pub fn order(&self) -> (usize, usize) {
        (self.spec.p(), self.spec.q())
    }

    /// Returns the optimum parameter vector, AR block then MA block, of
    /// length `p + q`.
    pub fn params(&self) -> &[f64] {
        &self.params
    }

    /// Returns the AR coefficients (`phi`).
    pub fn ar(&self) -> &[f64] {
        &self.params[..self.spec.p()]
    }

    /// Returns the MA coefficients (`theta`).
    pub fn ma(&self) -> &[f64] {
        &self.params[self.spec.p()..]
    }

    /// Returns the concentrated innovation variance (`sigma2`).
    pub fn sigma2(&self) -> f64 {
        self.sigma2
    }

    /// Returns the one-step-ahead prediction residuals (Kalman innovations)
    /// of the differenced, centred series.
    pub fn residuals(&self) -> &[f64] {
        &self.residuals
    }

    /// Returns the maximised log-likelihood.
    pub fn log_likelihood(&self) -> f64 {
        self.log_likelihood
    }

    /// Returns the Akaike Information Criterion,
    /// `-(2 * log_likelihood - 2k)` with `k = p + q + 1`.
    ///
    /// Lower AIC indicates a better trade-off between fit and complexity.
    pub fn aic(&self) -> f64 {
        self.aic
    }

    /// Returns the mean removed from the (differenced) data before fitting.
    ///
    /// Zero unless centring was enabled. Simulated paths from
    /// [`ArmaFit::simulate()`] have this mean added back.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Returns the number of simplex iterations performed.
    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    /// Returns how the simplex search ended.
    pub fn termination(&self) -> &Termination {
        &self.termination
    }

    /// Returns `true` if the simplex converged within the iteration cap.
    pub fn converged(&self) -> bool {
        self.termination == Termination::Converged
    }

    /// Non-fatal diagnostic: [`ArmaError::OptimizerStalled`] when the search
    /// hit its iteration cap, `None` otherwise.
    pub fn warning(&self) -> Option<ArmaError> {
        match self.termination {
            Termination::Stalled => Some(ArmaError::OptimizerStalled {
                iterations: self.iterations,
            }),
            _ => None,
        }
    }

    /// Returns `true` if either coefficient block lies within `1e-3` of the
    /// |coefficient|-sum feasibility bound.
    pub fn at_boundary(&self) -> bool {
        params::at_boundary(self.ar(), self.ma())
    }

    /// Generates synthetic realisations from this fitted ARMA model.
    ///
    /// Draws `n_sim` independent sample paths, each of length `n`,
    /// by driving the model with Gaussian white noise of variance
    /// [`ArmaFit::sigma2()`] after a burn-in period. Paths are on the scale
    /// of the differenced series.
    ///
    /// Returns an [`Array2<f64>`] with shape `(n, n_sim)`; each column
    /// is one realisation.
    ///
    /// # Example
    ///
    /// ```
    /// use kestrel_arma::ArimaSpec;
    /// use rand::SeedableRng;
    ///
    /// let data: Vec<f64> = (0..200).map(|t| ((t * 7919) % 23) as f64 / 23.0).collect();
    /// let fit = ArimaSpec::arma(1, 0).fit(&data).unwrap();
    /// let mut rng = rand::rngs::StdRng::seed_from_u64(1);
    /// let paths = fit.simulate(365, 100, &mut rng);
    /// assert_eq!(paths.shape(), &[365, 100]);
    /// ```
    pub fn simulate<R: Rng>(&self, n: usize, n_sim: usize, rng: &mut R) -> Array2<f64> {
        let mut output = Array2::zeros((n, n_sim));
        if n == 0 || n_sim == 0 {
            return output;
        }
        let Ok(noise) = Normal::new(0.0, self.sigma2.sqrt()) else {
            return output;
        };

        for mut column in output.columns_mut() {
            let path = simulate::path(n, self.ar(), self.ma(), &noise, rng);
            for (dst, value) in column.iter_mut().zip(path) {
                *dst = value + self.mean;
            }
        }
        output
    }
}

fn format_coefficients(coefficients: &[f64]) -> String {
    let parts: Vec<String> = coefficients.iter().map(|c| format!("{c:.4}")).collect();
    format!("[{}]", parts.join(", "))
}

impl fmt::Display for ArmaFit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ar={} ma={} sigma2={:.4} loglik={:.3} aic={:.3} ({} after {} iterations)",
            self.spec,
            format_coefficients(self.ar()),
            format_coefficients(self.ma()),
            self.sigma2,
            self.log_likelihood,
            self.aic,
            self.termination,
            self.iterations
        )
    }
}
